//! Notifier that records notices instead of showing them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::todo::{
    domain::ReminderNotice,
    ports::{NotificationPermission, Notifier, NotifierError, NotifierResult},
};

/// Notifier that keeps every delivered notice in memory.
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    permission: NotificationPermission,
    delivered: Arc<RwLock<Vec<ReminderNotice>>>,
    permission_requests: Arc<AtomicUsize>,
}

impl RecordingNotifier {
    /// Creates a notifier that answers permission requests with `permission`.
    #[must_use]
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            permission,
            delivered: Arc::new(RwLock::new(Vec::new())),
            permission_requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns a copy of every delivered notice, oldest first.
    #[must_use]
    pub fn delivered(&self) -> Vec<ReminderNotice> {
        self.delivered
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Returns how many times permission was requested.
    #[must_use]
    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new(NotificationPermission::Granted)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn request_permission(&self) -> NotifierResult<NotificationPermission> {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.permission)
    }

    async fn notify(&self, notice: &ReminderNotice) -> NotifierResult<()> {
        let mut delivered = self
            .delivered
            .write()
            .map_err(|err| NotifierError::delivery(std::io::Error::other(err.to_string())))?;
        delivered.push(notice.clone());
        Ok(())
    }
}
