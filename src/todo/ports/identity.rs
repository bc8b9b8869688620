//! Port for the session adapter that resolves the signed-in user.

use crate::todo::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity lookups.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Resolves the identity of the current session.
///
/// The OAuth handshake and session storage live behind this port; the task
/// services only ever see the resolved [`UserId`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// Returns the signed-in user, or `None` for an anonymous session.
    async fn current_user(&self) -> IdentityResult<Option<UserId>>;
}

/// Errors returned by identity adapters.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The identity provider or session store failed.
    #[error("identity provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a provider error.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
