//! HTTP catalog client over `reqwest`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::{Envelope, Movie, MovieDetails, MovieList};
use super::MovieCatalog;
use crate::config::CatalogConfig;
use crate::error::{Result, TweetError};

/// Catalog reached over HTTP. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| TweetError::Config(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout(), &config.user_agent)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base}/{path}` once and decode the `{ data }` envelope.
    async fn fetch<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, ?query, "catalog request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(url = %url, error = %e, "catalog request failed");
                TweetError::from(e)
            })?;

        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            warn!(url = %url, error = %e, "catalog returned unparsable body");
            TweetError::CatalogUnavailable(format!("invalid response from {}: {}", url, e))
        })?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl MovieCatalog for HttpCatalog {
    async fn list_movies(&self) -> Result<Vec<Movie>> {
        let list: MovieList = self.fetch("list_movies.json", &[]).await?;
        debug!(count = list.movies.len(), "catalog listed movies");
        Ok(list.movies)
    }

    async fn get_movie(&self, id: &str) -> Result<Option<Movie>> {
        let details: MovieDetails = self.fetch("movie_details.json", &[("movie_id", id)]).await?;
        // The catalog answers unknown ids with a zeroed movie
        Ok(details.movie.filter(|m| m.id != 0))
    }
}
