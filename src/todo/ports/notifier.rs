//! Port for the platform notification side channel.

use crate::todo::domain::ReminderNotice;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Permission state reported by the notification platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationPermission {
    /// Notifications may be shown.
    Granted,
    /// The user refused notifications.
    Denied,
    /// The user has not decided yet.
    #[default]
    Default,
}

impl NotificationPermission {
    /// Returns whether notifications may be shown.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Shows short-lived alerts with a title and body.
///
/// Delivery is best effort: there is no queue and no retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Asks the platform for permission to show notifications.
    async fn request_permission(&self) -> NotifierResult<NotificationPermission>;

    /// Shows a notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Delivery`] when the platform rejects the
    /// notification.
    async fn notify(&self, notice: &ReminderNotice) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// The platform failed to show the notification.
    #[error("notification delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
