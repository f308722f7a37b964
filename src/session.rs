//! Per-user conversation state.
//!
//! The only state the bot keeps is an optional pending transaction id per
//! user, held in process memory. Entries expire after a configurable TTL
//! and the cache is capacity-capped, so abandoned submissions cannot grow
//! the map without bound.

use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

/// Storage seam for pending submissions.
///
/// The dialogue logic only ever needs these three operations, so a
/// persistent backend can replace [`InMemorySessions`] without touching
/// the handlers.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the pending transaction id for the user, if any.
    async fn get(&self, user_id: i64) -> Option<String>;

    /// Stores the pending transaction id for the user, replacing any
    /// previous one.
    async fn set(&self, user_id: i64, txid: String);

    /// Removes the user's pending transaction id.
    async fn clear(&self, user_id: i64);
}

/// In-memory [`SessionStore`] backed by a TTL'd, capacity-capped cache.
#[derive(Clone)]
pub struct InMemorySessions {
    /// Moka cache storing user_id -> pending txid with automatic TTL
    cache: Cache<i64, String>,
}

impl InMemorySessions {
    /// Creates a store whose entries expire `ttl_secs` after insertion.
    ///
    /// # Arguments
    ///
    /// * `ttl_secs` - Time-to-live for pending submissions
    /// * `max_capacity` - Maximum number of concurrent pending submissions
    #[must_use]
    pub fn new(ttl_secs: u64, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Returns the current number of pending submissions.
    ///
    /// Useful for monitoring and health checks.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[async_trait]
impl SessionStore for InMemorySessions {
    async fn get(&self, user_id: i64) -> Option<String> {
        self.cache.get(&user_id).await
    }

    async fn set(&self, user_id: i64, txid: String) {
        self.cache.insert(user_id, txid).await;
    }

    async fn clear(&self, user_id: i64) {
        self.cache.invalidate(&user_id).await;
    }
}
