//! Error types for tweetql.
//!
//! Every failure a resolver can surface is a [`TweetError`]. The GraphQL
//! layer turns it into a field error carrying a stable `code` extension.

use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TweetError>;

#[derive(Debug, Error)]
pub enum TweetError {
    /// A mutation referenced a user that does not exist.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// A non-null relation failed to resolve.
    #[error("consistency error: {0}")]
    Consistency(String),

    /// The movie catalog could not be reached or returned garbage.
    #[error("movie catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("invalid seed: {0}")]
    Seed(String),

    #[error("tweet id space exhausted")]
    IdsExhausted,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TweetError {
    /// Machine-readable code placed in `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            TweetError::UserNotFound(_) => "VALIDATION_ERROR",
            TweetError::Consistency(_) => "CONSISTENCY_ERROR",
            TweetError::CatalogUnavailable(_) => "CATALOG_UNAVAILABLE",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl From<reqwest::Error> for TweetError {
    fn from(e: reqwest::Error) -> Self {
        TweetError::CatalogUnavailable(e.to_string())
    }
}

impl ErrorExtensions for TweetError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| {
            ext.set("code", self.code());
            if let TweetError::UserNotFound(id) = self {
                ext.set("userId", id.clone());
            }
        })
    }
}
