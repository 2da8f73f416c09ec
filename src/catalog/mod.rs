//! Movie catalog — read-only proxy to an external movie service.
//!
//! ```text
//! GET {base}/list_movies.json                  -> { data: { movies: [...] } }
//! GET {base}/movie_details.json?movie_id={id}  -> { data: { movie: {...} } }
//! ```
//!
//! One attempt per call, bounded by a timeout, no caching.

pub mod http;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;

pub use http::HttpCatalog;
pub use types::Movie;

/// Source of [`Movie`] records.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// All movies from the listing endpoint.
    async fn list_movies(&self) -> Result<Vec<Movie>>;

    /// One movie by catalog id, `None` if the catalog has no such movie.
    async fn get_movie(&self, id: &str) -> Result<Option<Movie>>;
}
