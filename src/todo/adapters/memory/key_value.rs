//! In-memory key-value store with clock-driven expiry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use crate::todo::ports::{KeyValueResult, KeyValueStore, KeyValueStoreError};

/// Thread-safe in-memory key-value store.
///
/// Entries expire according to the injected clock, so TTL behaviour can be
/// tested by advancing a synthetic clock.
#[derive(Debug, Clone)]
pub struct InMemoryKeyValueStore<C: Clock + Send + Sync> {
    entries: Arc<RwLock<HashMap<String, StoredValue>>>,
    clock: Arc<C>,
}

#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    expires_at: DateTime<Utc>,
}

impl<C: Clock + Send + Sync> InMemoryKeyValueStore<C> {
    /// Creates an empty store using `clock` for expiry.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Returns the expiry instant of a live entry.
    #[must_use]
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let now = self.clock.utc();
        self.entries
            .read()
            .ok()?
            .get(key)
            .filter(|stored| stored.expires_at > now)
            .map(|stored| stored.expires_at)
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = self.clock.utc();
        self.entries
            .read()
            .map(|guard| guard.values().filter(|stored| stored.expires_at > now).count())
            .unwrap_or(0)
    }

    /// Returns `true` if no live entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(err: impl std::fmt::Display) -> KeyValueStoreError {
    KeyValueStoreError::backend(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C: Clock + Send + Sync> KeyValueStore for InMemoryKeyValueStore<C> {
    async fn get(&self, key: &str) -> KeyValueResult<Option<String>> {
        let now = self.clock.utc();
        let mut entries = self.entries.write().map_err(lock_error)?;
        let expired = entries
            .get(key)
            .is_some_and(|stored| stored.expires_at <= now);
        if expired {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|stored| stored.value.clone()))
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> KeyValueResult<()> {
        let ttl = TimeDelta::from_std(ttl).map_err(KeyValueStoreError::backend)?;
        let expires_at = self.clock.utc() + ttl;
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.insert(
            key.to_owned(),
            StoredValue {
                value: value.to_owned(),
                expires_at,
            },
        );
        Ok(())
    }
}
