//! GraphQL API for tweetql.
//!
//! Binds the type graph to its resolvers. The store and the movie catalog
//! are injected as schema data; resolvers pull them from the context.
//!
//! ## Example
//!
//! ```graphql
//! { allTweets { id text author { fullName } } }
//!
//! mutation { postTweet(text: "hello", userId: "1") { id } }
//!
//! { movie(id: "15553") { title year genres } }
//! ```

pub mod mutation;
pub mod query;
pub mod schema;

use async_graphql::{EmptySubscription, Request, Response, Schema};
use std::sync::Arc;

use crate::catalog::MovieCatalog;
use crate::config::ServerConfig;
use crate::store::RelationStore;
use mutation::Mutation;
use query::Query;

/// The tweetql GraphQL schema type
pub type TweetSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the GraphQL schema over a store and a catalog
pub fn build_schema(
    store: Arc<RelationStore>,
    catalog: Arc<dyn MovieCatalog>,
    limits: &ServerConfig,
) -> TweetSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(store)
        .data(catalog)
        .limit_depth(limits.depth_limit)
        .limit_complexity(limits.complexity_limit)
        .finish()
}

/// Execute a request and return the raw response
pub async fn execute_request(schema: &TweetSchema, request: impl Into<Request>) -> Response {
    schema.execute(request).await
}

/// Execute a GraphQL document and return JSON result
pub async fn execute(schema: &TweetSchema, query: &str) -> String {
    let result = schema.execute(query).await;
    serde_json::to_string_pretty(&result).unwrap_or_else(|_| "{}".to_string())
}
