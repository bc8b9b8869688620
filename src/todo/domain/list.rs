//! Ordered task list with creation, toggle, delete, and sweep rules.

use super::{Reminder, Task, TaskId, TaskStatistics};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

/// Default application-level task lifetime.
pub const DEFAULT_TASK_LIFETIME: TimeDelta = TimeDelta::hours(24);

/// Default lead window within which a reminder fires.
pub const DEFAULT_REMINDER_WINDOW: TimeDelta = TimeDelta::minutes(10);

/// Returns the subsequence of `tasks` still within `lifetime` at `now`.
///
/// Insertion order is preserved. Applying the sweep twice with the same
/// `now` yields the same sequence.
#[must_use]
pub fn sweep_expired(tasks: Vec<Task>, now: DateTime<Utc>, lifetime: TimeDelta) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| task.is_fresh(now, lifetime))
        .collect()
}

/// A user's tasks in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    last_issued: Option<TaskId>,
}

impl TaskList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps tasks loaded from storage.
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let last_issued = tasks.iter().map(Task::id).max();
        Self { tasks, last_issued }
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the list holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Computes completion statistics.
    #[must_use]
    pub fn statistics(&self) -> TaskStatistics {
        TaskStatistics::from_tasks(&self.tasks)
    }

    /// Appends a new task and returns its identifier.
    ///
    /// Returns `None` without changing the list when `text` is blank.
    pub fn create(&mut self, text: &str, time: Option<&str>, now: DateTime<Utc>) -> Option<TaskId> {
        let id = self.next_id(now);
        let task = Task::new(id, text, time, now).ok()?;
        self.tasks.push(task);
        self.last_issued = Some(id);
        Some(id)
    }

    /// Flips completion of the task with `id`, restarting its expiration
    /// clock. Returns `false` when no such task exists.
    pub fn toggle_complete(&mut self, id: TaskId, now: DateTime<Utc>) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) else {
            return false;
        };
        task.toggle_completed(now);
        true
    }

    /// Removes the task with `id`. Returns `false` when no such task exists.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        self.tasks.len() != before
    }

    /// Drops every task whose age has reached `lifetime` and returns how
    /// many were removed.
    pub fn expiration_sweep(&mut self, now: DateTime<Utc>, lifetime: TimeDelta) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.is_fresh(now, lifetime));
        before - self.tasks.len()
    }

    /// Fires reminders for tasks due within `window` of `now`.
    ///
    /// Each fired task is marked notified, so a later sweep never fires it
    /// again. Tasks whose due time has already passed are not reminded.
    pub fn reminder_sweep<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
        window: TimeDelta,
    ) -> Vec<Reminder> {
        let mut fired = Vec::new();
        for task in &mut self.tasks {
            let Some(lead) = task.reminder_lead(now, window) else {
                continue;
            };
            task.mark_notified();
            fired.push(Reminder::new(
                task.id(),
                task.text(),
                task.time().unwrap_or_default(),
                lead,
            ));
        }
        fired
    }

    fn next_id(&self, now: DateTime<Utc>) -> TaskId {
        let candidate = TaskId::from_instant(now);
        match self.last_issued {
            Some(last) if last >= candidate => last.successor(),
            _ => candidate,
        }
    }
}
