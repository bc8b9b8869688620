//! Task store gateway: whole-list reads and writes keyed by user.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, instrument, warn};

use crate::todo::{
    domain::{Task, UserId},
    ports::KeyValueStore,
};

/// Default storage key prefix; keys take the form `todos:<userId>`.
pub const DEFAULT_KEY_PREFIX: &str = "todos";

/// Default time-to-live applied on every write.
pub const DEFAULT_STORE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Storage key layout and expiry for task lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    key_prefix: String,
    ttl: Duration,
}

impl GatewaySettings {
    /// Creates settings with a custom key prefix and TTL.
    #[must_use]
    pub fn new(key_prefix: impl Into<String>, ttl: Duration) -> Self {
        Self {
            key_prefix: key_prefix.into(),
            ttl,
        }
    }

    /// Returns the key prefix.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Returns the TTL applied on every write.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX, DEFAULT_STORE_TTL)
    }
}

/// Reads and writes a user's full task list as one JSON array.
///
/// Failures never reach the caller: reads degrade to an empty list and
/// writes to `false`, with the cause logged.
#[derive(Debug)]
pub struct TaskStoreGateway<S>
where
    S: KeyValueStore,
{
    store: Arc<S>,
    settings: GatewaySettings,
}

impl<S> TaskStoreGateway<S>
where
    S: KeyValueStore,
{
    /// Creates a gateway over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>, settings: GatewaySettings) -> Self {
        Self { store, settings }
    }

    /// Returns the storage key for a user's list.
    #[must_use]
    pub fn storage_key(&self, user_id: &UserId) -> String {
        format!("{}:{user_id}", self.settings.key_prefix)
    }

    /// Loads the stored list for `user_id`.
    ///
    /// Returns an empty list when nothing is stored, when the stored value
    /// is not a JSON array of tasks, or when the store fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn load(&self, user_id: &UserId) -> Vec<Task> {
        let key = self.storage_key(user_id);
        let raw = match self.store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(%key, "no stored task list");
                return Vec::new();
            }
            Err(err) => {
                error!(%key, error = %err, "failed to get tasks");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                debug!(%key, count = tasks.len(), "loaded task list");
                tasks
            }
            Err(err) => {
                warn!(%key, error = %err, "stored task list is malformed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replaces the stored list for `user_id` and refreshes its TTL.
    ///
    /// Returns `false` when serialisation or the store write fails.
    #[instrument(skip(self, tasks), fields(user_id = %user_id, count = tasks.len()))]
    pub async fn save(&self, user_id: &UserId, tasks: &[Task]) -> bool {
        let key = self.storage_key(user_id);
        let payload = match serde_json::to_string(tasks) {
            Ok(payload) => payload,
            Err(err) => {
                error!(%key, error = %err, "failed to serialise tasks");
                return false;
            }
        };

        match self
            .store
            .set_with_ttl(&key, &payload, self.settings.ttl)
            .await
        {
            Ok(()) => {
                debug!(%key, "saved task list");
                true
            }
            Err(err) => {
                error!(%key, error = %err, "failed to set tasks");
                false
            }
        }
    }
}
