//! Domain model for personal task lists.
//!
//! The domain covers task creation, completion toggling, deletion, the
//! 24-hour expiration rule, and due-time reminders. Time is always passed in
//! explicitly so every rule can be exercised with synthetic instants.

mod due_time;
mod error;
mod ids;
mod list;
mod reminder;
mod stats;
mod task;

pub use due_time::{DueTime, format_due_time};
pub use error::TaskDomainError;
pub use ids::{TaskId, UserId};
pub use list::{DEFAULT_REMINDER_WINDOW, DEFAULT_TASK_LIFETIME, TaskList, sweep_expired};
pub use reminder::{Reminder, ReminderNotice};
pub use stats::{TaskStatistics, TaskView, format_time_left};
pub use task::Task;
