//! Reminder produced when a task's due time comes within the lead window.

use super::TaskId;
use chrono::TimeDelta;

/// A reminder fired for one task by the reminder sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    task_id: TaskId,
    text: String,
    time: String,
    lead: TimeDelta,
}

impl Reminder {
    /// Creates a reminder for a task due after `lead`.
    #[must_use]
    pub fn new(task_id: TaskId, text: impl Into<String>, time: impl Into<String>, lead: TimeDelta) -> Self {
        Self {
            task_id,
            text: text.into(),
            time: time.into(),
            lead,
        }
    }

    /// Returns the identifier of the reminded task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the task text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the stored `HH:MM` due time.
    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the exact time remaining until the due instant.
    #[must_use]
    pub const fn lead(&self) -> TimeDelta {
        self.lead
    }

    /// Returns the remaining time in whole minutes, rounded half up.
    #[must_use]
    pub fn minutes_until_due(&self) -> i64 {
        (self.lead + TimeDelta::seconds(30)).num_minutes()
    }
}

/// Rendered notification content for a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotice {
    /// Identifier of the reminded task.
    pub task_id: TaskId,
    /// Short notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
}
