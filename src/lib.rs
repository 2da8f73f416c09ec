//! # tweetql
//!
//! A GraphQL API over two in-memory relations, users and tweets, plus a
//! read-only proxy to an external movie catalog.
//!
//! ## Layout
//!
//! - **store**: `User` and `Tweet` tables behind one lock
//! - **catalog**: HTTP client for the movie service
//! - **graphql**: the resolver table and schema
//! - **server**: axum transport
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tweetql::{build_schema, execute, Config, HttpCatalog, MovieCatalog, RelationStore};
//!
//! # async fn run() -> tweetql::Result<()> {
//! let config = Config::default();
//! let store = Arc::new(RelationStore::with_default_seed());
//! let catalog: Arc<dyn MovieCatalog> = Arc::new(HttpCatalog::from_config(&config.catalog)?);
//! let schema = build_schema(store, catalog, &config.server);
//!
//! let json = execute(&schema, "{ allTweets { text author { fullName } } }").await;
//! println!("{}", json);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod graphql;
pub mod server;
pub mod store;

// Re-exports for convenience
pub use catalog::{HttpCatalog, Movie, MovieCatalog};
pub use config::Config;
pub use error::{Result, TweetError};
pub use graphql::{build_schema, execute, execute_request, TweetSchema};
pub use store::{IdPolicy, RelationStore, Seed};
