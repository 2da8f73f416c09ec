//! GraphQL Query resolvers.
//!
//! Read operations over the relation store and the movie catalog.

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use std::sync::Arc;
use tracing::debug;

use super::schema::{Tweet, User};
use crate::catalog::{Movie, MovieCatalog};
use crate::store::RelationStore;

/// Root query type
pub struct Query;

#[Object]
impl Query {
    /// Every user, in insertion order
    async fn all_users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let store = ctx.data::<Arc<RelationStore>>()?;
        let users = store.list_users().map_err(|e| e.extend())?;
        debug!(count = users.len(), "allUsers called");
        Ok(users.into_iter().map(User::from).collect())
    }

    /// Every tweet, in insertion order
    async fn all_tweets(&self, ctx: &Context<'_>) -> Result<Vec<Tweet>> {
        let store = ctx.data::<Arc<RelationStore>>()?;
        let tweets = store.list_tweets().map_err(|e| e.extend())?;
        Ok(tweets.into_iter().map(Tweet::from).collect())
    }

    /// A single tweet, or null if no tweet has this id
    async fn tweet(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Tweet>> {
        let store = ctx.data::<Arc<RelationStore>>()?;
        let tweet = store.find_tweet(id.as_str()).map_err(|e| e.extend())?;
        Ok(tweet.map(Tweet::from))
    }

    /// Every movie in the external catalog
    async fn all_movies(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        let catalog = ctx.data::<Arc<dyn MovieCatalog>>()?;
        catalog.list_movies().await.map_err(|e| e.extend())
    }

    /// A movie by catalog id, or null if the catalog has none
    async fn movie(&self, ctx: &Context<'_>, id: String) -> Result<Option<Movie>> {
        let catalog = ctx.data::<Arc<dyn MovieCatalog>>()?;
        catalog.get_movie(&id).await.map_err(|e| e.extend())
    }

    /// Liveness probe
    async fn ping(&self) -> &'static str {
        "pong"
    }
}
