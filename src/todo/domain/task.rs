//! Task record and per-task lifecycle rules.

use super::{DueTime, TaskDomainError, TaskId};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single to-do item owned by one user.
///
/// The serialised field names match the stored JSON record:
/// `id`, `text`, `completed`, `time`, `notified`, `lastModified`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    text: String,
    completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<String>,
    #[serde(default)]
    notified: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    last_modified: DateTime<Utc>,
}

impl Task {
    /// Creates a new, incomplete task.
    ///
    /// The text is trimmed. A blank `time` is treated as no due time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskText`] when the trimmed text is
    /// empty.
    pub fn new(
        id: TaskId,
        text: &str,
        time: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, TaskDomainError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTaskText);
        }
        let time = time
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);

        Ok(Self {
            id,
            text: trimmed.to_owned(),
            completed: false,
            time,
            notified: false,
            last_modified: now,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the display text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the stored due-time string, if any.
    #[must_use]
    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    /// Returns the parsed due time, or `None` when absent or malformed.
    #[must_use]
    pub fn due_time(&self) -> Option<DueTime> {
        self.time.as_deref().and_then(|raw| DueTime::parse(raw).ok())
    }

    /// Returns whether a reminder has already fired for this task.
    #[must_use]
    pub const fn is_notified(&self) -> bool {
        self.notified
    }

    /// Returns the creation or last toggle timestamp.
    #[must_use]
    pub const fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Returns how long ago the task was last modified.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        now.signed_duration_since(self.last_modified)
    }

    /// Returns whether the task is still within its lifetime.
    ///
    /// The comparison is strict: a task exactly `lifetime` old is expired.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, lifetime: TimeDelta) -> bool {
        self.age(now) < lifetime
    }

    /// Returns the remaining lifetime, clamped at zero.
    #[must_use]
    pub fn time_left(&self, now: DateTime<Utc>, lifetime: TimeDelta) -> TimeDelta {
        (lifetime - self.age(now)).max(TimeDelta::zero())
    }

    /// Flips the completion flag and restarts the expiration clock.
    pub fn toggle_completed(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.last_modified = now;
    }

    /// Returns the time remaining until today's due instant when a reminder
    /// should fire at `now`.
    ///
    /// A reminder is due when the task has a parseable due time, is neither
    /// completed nor already notified, and the due instant lies in
    /// `(now, now + window]`.
    #[must_use]
    pub fn reminder_lead<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        window: TimeDelta,
    ) -> Option<TimeDelta> {
        if self.completed || self.notified {
            return None;
        }
        let due_at = self.due_time()?.on_date_of(now)?;
        let lead = due_at.signed_duration_since(now);
        (lead > TimeDelta::zero() && lead <= window).then_some(lead)
    }

    /// Records that the reminder for the current due time has fired.
    pub const fn mark_notified(&mut self) {
        self.notified = true;
    }
}
