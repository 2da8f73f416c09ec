//! Seed data the store starts from.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use super::types::{Tweet, User};
use crate::error::{Result, TweetError};

/// Initial contents of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    pub users: Vec<User>,
    #[serde(default)]
    pub tweets: Vec<Tweet>,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            users: vec![User::new("1", "nico", "las"), User::new("2", "Elon", "Mask")],
            tweets: vec![
                Tweet::new("1", "first one!", "2"),
                Tweet::new("2", "second one", "1"),
            ],
        }
    }
}

impl Seed {
    /// Load a JSON seed file: `{ "users": [...], "tweets": [...] }`.
    pub fn load(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "loading seed");
        let text = fs::read_to_string(path)?;
        let seed: Seed = serde_json::from_str(&text)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Ids unique per table, every tweet pointing at a seeded user.
    pub fn validate(&self) -> Result<()> {
        let mut user_ids = HashSet::new();
        for user in &self.users {
            if !user_ids.insert(user.id.as_str()) {
                return Err(TweetError::Seed(format!("duplicate user id {}", user.id)));
            }
        }

        let mut tweet_ids = HashSet::new();
        for tweet in &self.tweets {
            if !tweet_ids.insert(tweet.id.as_str()) {
                return Err(TweetError::Seed(format!("duplicate tweet id {}", tweet.id)));
            }
            if tweet.id.parse::<u64>() == Ok(u64::MAX) {
                return Err(TweetError::Seed(format!(
                    "tweet id {} leaves no room for new ids",
                    tweet.id
                )));
            }
            if !user_ids.contains(tweet.user_id.as_str()) {
                return Err(TweetError::Seed(format!(
                    "tweet {} references unknown user {}",
                    tweet.id, tweet.user_id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_seed_is_valid() {
        let seed = Seed::default();
        seed.validate().unwrap();
        assert_eq!(seed.users.len(), 2);
        assert_eq!(seed.tweets[0].user_id, "2");
    }

    #[test]
    fn test_rejects_dangling_tweet() {
        let seed = Seed {
            users: vec![User::new("1", "a", "b")],
            tweets: vec![Tweet::new("1", "hi", "7")],
        };
        let err = seed.validate().unwrap_err();
        assert!(matches!(err, TweetError::Seed(_)));
    }

    #[test]
    fn test_rejects_duplicate_user() {
        let seed = Seed {
            users: vec![User::new("1", "a", "b"), User::new("1", "c", "d")],
            tweets: vec![],
        };
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_rejects_max_tweet_id() {
        let seed = Seed {
            users: vec![User::new("1", "a", "b")],
            tweets: vec![Tweet::new(u64::MAX.to_string(), "x", "1")],
        };
        let err = seed.validate().unwrap_err();
        assert!(matches!(err, TweetError::Seed(_)));
    }

    #[test]
    fn test_load_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seed.json");
        fs::write(
            &path,
            r#"{"users":[{"id":"u1","firstName":"Ada","lastName":"Lovelace"}]}"#,
        )
        .unwrap();

        let seed = Seed::load(&path).unwrap();
        assert_eq!(seed.users[0].last_name, "Lovelace");
        assert!(seed.tweets.is_empty());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seed.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(Seed::load(&path), Err(TweetError::Json(_))));
    }
}
