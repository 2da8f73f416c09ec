//! Store engine — owns both tables and serializes mutations.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use super::seed::Seed;
use super::types::{IdPolicy, StoreStats, Tweet, User};
use crate::error::{Result, TweetError};

struct Tables {
    users: Vec<User>,
    tweets: Vec<Tweet>,
    /// Next id under [`IdPolicy::Sequence`]
    next_id: u64,
}

impl Tables {
    fn allocate_id(&mut self, policy: IdPolicy) -> Result<String> {
        match policy {
            IdPolicy::Sequence => {
                let id = self.next_id;
                self.next_id = id.checked_add(1).ok_or(TweetError::IdsExhausted)?;
                Ok(id.to_string())
            }
            IdPolicy::Length => Ok((self.tweets.len() + 1).to_string()),
        }
    }
}

/// In-memory relation store for users and tweets.
///
/// Reads return owned copies of committed rows. `create_tweet` and
/// `delete_tweet` hold the write lock for the whole check-allocate-insert
/// (or find-remove) sequence.
pub struct RelationStore {
    tables: RwLock<Tables>,
    policy: IdPolicy,
}

impl RelationStore {
    /// Create a store from a seed. The seed is validated first.
    pub fn new(seed: Seed, policy: IdPolicy) -> Result<Self> {
        seed.validate()?;
        Ok(Self::from_seed(seed, policy))
    }

    /// Store with the default seed and sequence ids.
    pub fn with_default_seed() -> Self {
        Self::from_seed(Seed::default(), IdPolicy::Sequence)
    }

    fn from_seed(seed: Seed, policy: IdPolicy) -> Self {
        // Start past the largest numeric seed id so sequence ids never collide.
        // Validated seeds never hold u64::MAX, so the add cannot saturate.
        let next_id = seed
            .tweets
            .iter()
            .filter_map(|t| t.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max.saturating_add(1));

        info!(
            users = seed.users.len(),
            tweets = seed.tweets.len(),
            policy = %policy,
            "store seeded"
        );

        Self {
            tables: RwLock::new(Tables {
                users: seed.users,
                tweets: seed.tweets,
                next_id,
            }),
            policy,
        }
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| TweetError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| TweetError::LockPoisoned(e.to_string()))
    }

    // ─── Reads ─────────────────────────────────────────────────

    pub fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.read()?.users.clone())
    }

    pub fn list_tweets(&self) -> Result<Vec<Tweet>> {
        Ok(self.read()?.tweets.clone())
    }

    pub fn find_user(&self, id: &str) -> Result<Option<User>> {
        let tables = self.read()?;
        let user = tables.users.iter().find(|u| u.id == id).cloned();
        if user.is_none() {
            debug!(user_id = id, "user lookup miss");
        }
        Ok(user)
    }

    pub fn find_tweet(&self, id: &str) -> Result<Option<Tweet>> {
        let tables = self.read()?;
        let tweet = tables.tweets.iter().find(|t| t.id == id).cloned();
        if tweet.is_none() {
            debug!(tweet_id = id, "tweet lookup miss");
        }
        Ok(tweet)
    }

    pub fn stats(&self) -> Result<StoreStats> {
        let tables = self.read()?;
        Ok(StoreStats {
            users: tables.users.len(),
            tweets: tables.tweets.len(),
        })
    }

    // ─── Writes ────────────────────────────────────────────────

    /// Append a tweet by `user_id`. Fails with [`TweetError::UserNotFound`]
    /// and leaves the table untouched if the user does not exist.
    pub fn create_tweet(&self, text: &str, user_id: &str) -> Result<Tweet> {
        let mut tables = self.write()?;

        if !tables.users.iter().any(|u| u.id == user_id) {
            warn!(user_id, "rejected tweet for unknown user");
            return Err(TweetError::UserNotFound(user_id.to_string()));
        }

        let id = tables.allocate_id(self.policy)?;
        let tweet = Tweet::new(id, text, user_id);
        tables.tweets.push(tweet.clone());

        info!(tweet_id = %tweet.id, user_id, "tweet created");
        Ok(tweet)
    }

    /// Remove the tweet with `id`. Returns `false` if there was none.
    pub fn delete_tweet(&self, id: &str) -> Result<bool> {
        let mut tables = self.write()?;

        let Some(pos) = tables.tweets.iter().position(|t| t.id == id) else {
            debug!(tweet_id = id, "delete of missing tweet");
            return Ok(false);
        };

        // Under the length policy ids can repeat; remove every match
        tables.tweets.retain(|t| t.id != id);
        info!(tweet_id = id, position = pos, "tweet deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn store(policy: IdPolicy) -> RelationStore {
        RelationStore::new(Seed::default(), policy).unwrap()
    }

    #[test]
    fn test_lists_keep_insertion_order() {
        let store = store(IdPolicy::Sequence);
        let users: Vec<_> = store.list_users().unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(users, vec!["1", "2"]);

        store.create_tweet("third", "1").unwrap();
        let texts: Vec<_> = store.list_tweets().unwrap().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["first one!", "second one", "third"]);
    }

    #[test]
    fn test_find_returns_none_for_missing() {
        let store = store(IdPolicy::Sequence);
        assert_eq!(store.find_tweet("1").unwrap().unwrap().text, "first one!");
        assert!(store.find_tweet("99").unwrap().is_none());
        assert!(store.find_user("99").unwrap().is_none());
    }

    #[test]
    fn test_create_rejects_unknown_user() {
        let store = store(IdPolicy::Sequence);
        let err = store.create_tweet("hi", "404").unwrap_err();
        assert!(matches!(err, TweetError::UserNotFound(ref id) if id == "404"));
        assert_eq!(store.stats().unwrap().tweets, 2);
    }

    #[test]
    fn test_delete_returns_false_after_first() {
        let store = store(IdPolicy::Sequence);
        assert!(store.delete_tweet("1").unwrap());
        assert!(!store.delete_tweet("1").unwrap());
        assert!(store.find_tweet("1").unwrap().is_none());
        assert_eq!(store.stats().unwrap().tweets, 1);
    }

    #[test]
    fn test_sequence_ids_not_reused_after_delete() {
        let store = store(IdPolicy::Sequence);
        store.delete_tweet("1").unwrap();
        let tweet = store.create_tweet("new", "1").unwrap();
        assert_eq!(tweet.id, "3");
        let tweet = store.create_tweet("newer", "1").unwrap();
        assert_eq!(tweet.id, "4");
    }

    #[test]
    fn test_length_policy_collides_after_delete() {
        let store = store(IdPolicy::Length);
        store.delete_tweet("1").unwrap();

        // One tweet left ("2"), so len + 1 hands out "2" again
        let tweet = store.create_tweet("dup", "1").unwrap();
        assert_eq!(tweet.id, "2");

        let matching = store
            .list_tweets()
            .unwrap()
            .into_iter()
            .filter(|t| t.id == "2")
            .count();
        assert_eq!(matching, 2);
    }

    #[test]
    fn test_sequence_starts_past_seed_ids() {
        let seed = Seed {
            users: vec![User::new("1", "a", "b")],
            tweets: vec![Tweet::new("10", "x", "1"), Tweet::new("abc", "y", "1")],
        };
        let store = RelationStore::new(seed, IdPolicy::Sequence).unwrap();
        assert_eq!(store.create_tweet("z", "1").unwrap().id, "11");
    }

    #[test]
    fn test_max_seed_id_rejected() {
        let seed = Seed {
            users: vec![User::new("1", "a", "b")],
            tweets: vec![Tweet::new(u64::MAX.to_string(), "x", "1")],
        };
        let err = RelationStore::new(seed, IdPolicy::Sequence).err().unwrap();
        assert!(matches!(err, TweetError::Seed(_)));
    }

    #[test]
    fn test_sequence_exhaustion_leaves_table_unchanged() {
        let near_max = u64::MAX - 2;
        let seed = Seed {
            users: vec![User::new("1", "a", "b")],
            tweets: vec![Tweet::new(near_max.to_string(), "x", "1")],
        };
        let store = RelationStore::new(seed, IdPolicy::Sequence).unwrap();

        let tweet = store.create_tweet("last", "1").unwrap();
        assert_eq!(tweet.id, (u64::MAX - 1).to_string());

        let err = store.create_tweet("one too many", "1").unwrap_err();
        assert!(matches!(err, TweetError::IdsExhausted));
        assert_eq!(store.stats().unwrap().tweets, 2);
    }

    #[test]
    fn test_new_rejects_invalid_seed() {
        let seed = Seed {
            users: vec![],
            tweets: vec![Tweet::new("1", "x", "1")],
        };
        assert!(RelationStore::new(seed, IdPolicy::Sequence).is_err());
    }

    #[test]
    fn test_default_seed_store_matches_new() {
        let a = RelationStore::with_default_seed();
        let b = store(IdPolicy::Sequence);
        assert_eq!(a.list_tweets().unwrap(), b.list_tweets().unwrap());
        assert_eq!(
            a.create_tweet("t", "1").unwrap().id,
            b.create_tweet("t", "1").unwrap().id
        );
    }

    #[test]
    fn test_concurrent_creates_get_unique_ids() {
        let store = Arc::new(store(IdPolicy::Sequence));

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..25)
                        .map(|i| store.create_tweet(&format!("{}-{}", n, i), "1").unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id), "duplicate tweet id");
            }
        }
        assert_eq!(ids.len(), 200);
        assert_eq!(store.stats().unwrap().tweets, 202);
    }
}
