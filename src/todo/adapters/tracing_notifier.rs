//! Notifier that writes reminders to the log.

use async_trait::async_trait;
use tracing::info;

use crate::todo::{
    domain::ReminderNotice,
    ports::{NotificationPermission, Notifier, NotifierResult},
};

/// Notifier for headless runs: every notice becomes an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn request_permission(&self) -> NotifierResult<NotificationPermission> {
        Ok(NotificationPermission::Granted)
    }

    async fn notify(&self, notice: &ReminderNotice) -> NotifierResult<()> {
        info!(
            task_id = %notice.task_id,
            title = %notice.title,
            body = %notice.body,
            "task reminder"
        );
        Ok(())
    }
}
