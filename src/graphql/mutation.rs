//! GraphQL Mutation resolvers.

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use std::sync::Arc;

use super::schema::Tweet;
use crate::store::RelationStore;

/// Root mutation type
pub struct Mutation;

#[Object]
impl Mutation {
    /// Post a tweet as `userId`. Fails with `VALIDATION_ERROR` if the user
    /// does not exist.
    async fn post_tweet(&self, ctx: &Context<'_>, text: String, user_id: ID) -> Result<Tweet> {
        let store = ctx.data::<Arc<RelationStore>>()?;
        let tweet = store
            .create_tweet(&text, user_id.as_str())
            .map_err(|e| e.extend())?;
        Ok(Tweet::from(tweet))
    }

    /// Deletes a Tweet if found, else returns false
    async fn delete_tweet(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let store = ctx.data::<Arc<RelationStore>>()?;
        store.delete_tweet(id.as_str()).map_err(|e| e.extend())
    }
}
