//! Port for the hosted key-value store holding serialised task lists.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for key-value store operations.
pub type KeyValueResult<T> = Result<T, KeyValueStoreError>;

/// Minimal key-value contract: whole-value reads and expiring writes.
///
/// There is no query language and no partial update; a write replaces the
/// value stored under the key and restarts its time-to-live.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when the key is absent or has expired.
    async fn get(&self, key: &str) -> KeyValueResult<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::Backend`] when the store rejects the
    /// write or cannot be reached.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> KeyValueResult<()>;
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum KeyValueStoreError {
    /// The store could not be reached or rejected the command.
    #[error("key-value backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl KeyValueStoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
