//! Key-value store backed by a Redis server.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::time::timeout;

use crate::todo::ports::{KeyValueResult, KeyValueStore, KeyValueStoreError};

/// Default limit for one store operation, connection included.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis implementation of [`KeyValueStore`].
///
/// Each call opens a multiplexed connection from the shared client; writes
/// use `SET ... EX` so the TTL is refreshed together with the value. Every
/// operation, connecting included, is bounded by the command timeout, and
/// an elapsed timeout is reported as a backend error.
#[derive(Debug, Clone)]
pub struct RedisKeyValueStore {
    client: redis::Client,
    command_timeout: Duration,
}

impl RedisKeyValueStore {
    /// Creates a store for the Redis server at `url`.
    ///
    /// No connection is made until the first command.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::Backend`] when `url` is not a valid
    /// Redis connection string.
    pub fn open(url: &str, command_timeout: Duration) -> KeyValueResult<Self> {
        let client = redis::Client::open(url).map_err(KeyValueStoreError::backend)?;
        Ok(Self {
            client,
            command_timeout,
        })
    }

    /// Returns the limit applied to each operation.
    #[must_use]
    pub const fn command_timeout(&self) -> Duration {
        self.command_timeout
    }

    async fn connection(&self) -> KeyValueResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(KeyValueStoreError::backend)
    }

    async fn bounded<T, F>(&self, operation: F) -> KeyValueResult<T>
    where
        F: Future<Output = KeyValueResult<T>> + Send,
    {
        timeout(self.command_timeout, operation)
            .await
            .map_err(KeyValueStoreError::backend)?
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> KeyValueResult<Option<String>> {
        self.bounded(async {
            let mut conn = self.connection().await?;
            let value: Option<String> =
                conn.get(key).await.map_err(KeyValueStoreError::backend)?;
            Ok(value)
        })
        .await
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> KeyValueResult<()> {
        let seconds = ttl.as_secs().max(1);
        self.bounded(async {
            let mut conn = self.connection().await?;
            let _: () = conn
                .set_ex(key, value, seconds)
                .await
                .map_err(KeyValueStoreError::backend)?;
            Ok(())
        })
        .await
    }
}
