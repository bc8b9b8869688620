//! Read-only summaries of a task list for presentation.

use super::{Task, TaskId, format_due_time};
use chrono::{DateTime, TimeDelta, Utc};

/// Aggregate counts over a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStatistics {
    /// Number of tasks in the list.
    pub total: usize,
    /// Number of completed tasks.
    pub completed: usize,
    /// Completed share as a whole percentage, rounded half up.
    pub completion_rate: u8,
}

impl TaskStatistics {
    /// Computes statistics for the given tasks.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.is_completed()).count();
        Self {
            total,
            completed,
            completion_rate: completion_rate(completed, total),
        }
    }
}

fn completion_rate(completed: usize, total: usize) -> u8 {
    let doubled_total = total.saturating_mul(2);
    let rate = completed
        .saturating_mul(200)
        .saturating_add(total)
        .checked_div(doubled_total)
        .unwrap_or(0);
    u8::try_from(rate).unwrap_or(u8::MAX)
}

/// Formats remaining lifetime as `"<H>h <M>m left"`.
#[must_use]
pub fn format_time_left(remaining: TimeDelta) -> String {
    let clamped = remaining.max(TimeDelta::zero());
    let hours = clamped.num_hours();
    let minutes = (clamped - TimeDelta::hours(hours)).num_minutes();
    format!("{hours}h {minutes}m left")
}

/// Display projection of a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Task text.
    pub text: String,
    /// Whether the task is completed.
    pub completed: bool,
    /// Formatted due time; malformed values are shown as stored.
    pub due: Option<String>,
    /// Remaining lifetime, e.g. `"23h 59m left"`.
    pub time_left: String,
}

impl TaskView {
    /// Projects a task for display at `now`.
    #[must_use]
    pub fn project(task: &Task, now: DateTime<Utc>, lifetime: TimeDelta) -> Self {
        Self {
            id: task.id(),
            text: task.text().to_owned(),
            completed: task.is_completed(),
            due: task.time().map(format_due_time),
            time_left: format_time_left(task.time_left(now, lifetime)),
        }
    }
}
