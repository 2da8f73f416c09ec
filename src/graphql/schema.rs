//! GraphQL object types.
//!
//! Stored attributes are plain fields; derived fields and relations are
//! resolved in the `#[ComplexObject]` blocks.

use async_graphql::{ComplexObject, Context, ErrorExtensions, Result, SimpleObject, ID};
use std::sync::Arc;

use crate::error::TweetError;
use crate::store::{self, RelationStore};

/// A user of the service
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct User {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
}

#[ComplexObject]
impl User {
    /// Is the sum of firstName + lastName as a string
    async fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<store::User> for User {
    fn from(user: store::User) -> Self {
        Self {
            id: ID(user.id),
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Tweet object represents a resource for a Tweet
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Tweet {
    pub id: ID,
    pub text: String,
    #[graphql(skip)]
    pub user_id: String,
}

#[ComplexObject]
impl Tweet {
    /// The user who posted this tweet
    async fn author(&self, ctx: &Context<'_>) -> Result<User> {
        let store = ctx.data::<Arc<RelationStore>>()?;
        let user = store.find_user(&self.user_id).map_err(|e| e.extend())?;

        user.map(User::from).ok_or_else(|| {
            TweetError::Consistency(format!(
                "tweet {} references missing user {}",
                self.id.as_str(),
                self.user_id
            ))
            .extend()
        })
    }
}

impl From<store::Tweet> for Tweet {
    fn from(tweet: store::Tweet) -> Self {
        Self {
            id: ID(tweet.id),
            text: tweet.text,
            user_id: tweet.user_id,
        }
    }
}
