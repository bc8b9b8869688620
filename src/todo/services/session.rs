//! Session-scoped task engine.
//!
//! A [`TaskSession`] owns the authoritative in-memory task list for one
//! signed-in session. Mutations apply to the list immediately and hand a
//! snapshot to the [`PersistenceQueue`]; persistence outcomes are logged only.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tracing::{debug, info, warn};

use super::{PersistenceQueue, ReminderTemplates, TaskStoreGateway};
use crate::todo::{
    domain::{
        DEFAULT_REMINDER_WINDOW, DEFAULT_TASK_LIFETIME, Reminder, ReminderNotice, Task, TaskId,
        TaskList, TaskStatistics, TaskView, UserId, sweep_expired,
    },
    ports::{IdentityPort, KeyValueStore, NotificationPermission, Notifier},
};

/// Policy for saving a list that has become empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyListPolicy {
    /// Leave the previous blob in place and let its TTL expire it.
    #[default]
    Skip,
    /// Overwrite the stored list with an empty array.
    Overwrite,
}

/// Timing rules and persistence policy for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Age at which a task expires.
    pub task_lifetime: TimeDelta,
    /// Lead window within which a reminder fires.
    pub reminder_window: TimeDelta,
    /// What to do when the list becomes empty.
    pub empty_list_policy: EmptyListPolicy,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            task_lifetime: DEFAULT_TASK_LIFETIME,
            reminder_window: DEFAULT_REMINDER_WINDOW,
            empty_list_policy: EmptyListPolicy::Skip,
        }
    }
}

/// Collaborators a session is opened with.
#[derive(Debug)]
pub struct SessionDependencies<S, N>
where
    S: KeyValueStore,
    N: Notifier,
{
    /// Gateway to the stored task lists.
    pub gateway: Arc<TaskStoreGateway<S>>,
    /// Notification side channel.
    pub notifier: Arc<N>,
    /// Reminder text templates.
    pub templates: ReminderTemplates,
    /// Timing rules and persistence policy.
    pub settings: SessionSettings,
}

/// What a scheduler tick changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Tasks removed by the expiration sweep.
    pub expired: usize,
    /// Reminders fired by the reminder sweep.
    pub reminded: usize,
}

impl TickOutcome {
    /// Returns whether the tick modified the task list.
    #[must_use]
    pub const fn changed(self) -> bool {
        self.expired > 0 || self.reminded > 0
    }
}

/// Task engine for one session.
///
/// Without a resolved user every mutating operation is a no-op and nothing
/// is persisted.
#[derive(Debug)]
pub struct TaskSession<N>
where
    N: Notifier,
{
    user: Option<UserId>,
    tasks: TaskList,
    persistence: Option<PersistenceQueue>,
    notifier: Arc<N>,
    permission: NotificationPermission,
    templates: ReminderTemplates,
    settings: SessionSettings,
}

impl<N> TaskSession<N>
where
    N: Notifier,
{
    /// Opens a session: resolves the user, requests notification
    /// permission once, and loads the user's unexpired tasks.
    pub async fn open<I, S>(
        identity: &I,
        dependencies: SessionDependencies<S, N>,
        now: DateTime<Utc>,
    ) -> Self
    where
        I: IdentityPort + ?Sized,
        S: KeyValueStore + 'static,
    {
        let SessionDependencies {
            gateway,
            notifier,
            templates,
            settings,
        } = dependencies;

        let user = identity.current_user().await.unwrap_or_else(|err| {
            warn!(error = %err, "identity lookup failed, continuing anonymously");
            None
        });

        let permission = notifier.request_permission().await.unwrap_or_else(|err| {
            warn!(error = %err, "notification permission request failed");
            NotificationPermission::Denied
        });

        let (tasks, persistence, loaded_any) = match &user {
            Some(user_id) => {
                let stored = gateway.load(user_id).await;
                let loaded_any = !stored.is_empty();
                let fresh = sweep_expired(stored, now, settings.task_lifetime);
                info!(%user_id, count = fresh.len(), "opened task session");
                (
                    TaskList::from_tasks(fresh),
                    Some(PersistenceQueue::spawn(gateway)),
                    loaded_any,
                )
            }
            None => {
                debug!("opened anonymous task session");
                (TaskList::new(), None, false)
            }
        };

        let session = Self {
            user,
            tasks,
            persistence,
            notifier,
            permission,
            templates,
            settings,
        };
        // Write back the filtered list so expired entries leave the store
        // and the key TTL restarts.
        if loaded_any {
            session.persist();
        }
        session
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// Returns the notification permission obtained when the session opened.
    #[must_use]
    pub const fn permission(&self) -> NotificationPermission {
        self.permission
    }

    /// Returns the session settings.
    #[must_use]
    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    /// Returns completion statistics for the current list.
    #[must_use]
    pub fn statistics(&self) -> TaskStatistics {
        self.tasks.statistics()
    }

    /// Projects every task for display at `now`.
    #[must_use]
    pub fn views(&self, now: DateTime<Utc>) -> Vec<TaskView> {
        self.tasks
            .tasks()
            .iter()
            .map(|task| TaskView::project(task, now, self.settings.task_lifetime))
            .collect()
    }

    /// Creates a task. Returns `None` when the text is blank or the session
    /// is anonymous.
    pub fn create(&mut self, text: &str, time: Option<&str>, now: DateTime<Utc>) -> Option<TaskId> {
        self.user.as_ref()?;
        let id = self.tasks.create(text, time, now)?;
        debug!(task_id = %id, "created task");
        self.persist();
        Some(id)
    }

    /// Toggles completion of a task. Returns `false` when the task is absent
    /// or the session is anonymous.
    pub fn toggle_complete(&mut self, id: TaskId, now: DateTime<Utc>) -> bool {
        if self.user.is_none() || !self.tasks.toggle_complete(id, now) {
            return false;
        }
        debug!(task_id = %id, "toggled task completion");
        self.persist();
        true
    }

    /// Deletes a task. Returns `false` when the task is absent or the
    /// session is anonymous.
    pub fn delete(&mut self, id: TaskId) -> bool {
        if self.user.is_none() || !self.tasks.delete(id) {
            return false;
        }
        debug!(task_id = %id, "deleted task");
        self.persist();
        true
    }

    /// Runs the expiration sweep and returns how many tasks were removed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let removed = self
            .tasks
            .expiration_sweep(now, self.settings.task_lifetime);
        if removed > 0 {
            debug!(removed, "expired tasks");
            self.persist();
        }
        removed
    }

    /// Runs the reminder sweep, delivers notifications, and returns the
    /// reminders that fired.
    pub async fn remind<Tz>(&mut self, now: &DateTime<Tz>) -> Vec<Reminder>
    where
        Tz: TimeZone,
    {
        let fired = self.fire_reminders(now).await;
        if !fired.is_empty() {
            self.persist();
        }
        fired
    }

    /// Runs both sweeps for one scheduler tick and persists at most once.
    pub async fn tick<Tz>(&mut self, now: &DateTime<Tz>) -> TickOutcome
    where
        Tz: TimeZone,
    {
        let expired = self
            .tasks
            .expiration_sweep(now.with_timezone(&Utc), self.settings.task_lifetime);
        let reminded = self.fire_reminders(now).await.len();
        let outcome = TickOutcome { expired, reminded };
        if outcome.changed() {
            debug!(expired, reminded, "sweep tick changed task list");
            self.persist();
        }
        outcome
    }

    /// Closes the session, waiting for queued writes to finish.
    pub async fn close(self) {
        if let Some(persistence) = self.persistence {
            persistence.shutdown().await;
        }
    }

    async fn fire_reminders<Tz>(&mut self, now: &DateTime<Tz>) -> Vec<Reminder>
    where
        Tz: TimeZone,
    {
        let fired = self
            .tasks
            .reminder_sweep(now, self.settings.reminder_window);
        for reminder in &fired {
            info!(
                task_id = %reminder.task_id(),
                minutes = reminder.minutes_until_due(),
                "reminder fired"
            );
            self.deliver(reminder).await;
        }
        fired
    }

    async fn deliver(&self, reminder: &Reminder) {
        if !self.permission.is_granted() {
            debug!(task_id = %reminder.task_id(), "notification permission not granted, skipping");
            return;
        }
        let notice = self
            .templates
            .render(reminder)
            .unwrap_or_else(|err| {
                warn!(error = %err, "reminder template failed, using default text");
                fallback_notice(reminder)
            });
        if let Err(err) = self.notifier.notify(&notice).await {
            warn!(task_id = %reminder.task_id(), error = %err, "failed to show reminder");
        }
    }

    fn persist(&self) {
        let (Some(user_id), Some(persistence)) = (&self.user, &self.persistence) else {
            return;
        };
        if self.tasks.is_empty() && self.settings.empty_list_policy == EmptyListPolicy::Skip {
            debug!(%user_id, "task list is empty, leaving stored list to expire");
            return;
        }
        persistence.enqueue(user_id.clone(), self.tasks.tasks().to_vec());
    }
}

fn fallback_notice(reminder: &Reminder) -> ReminderNotice {
    ReminderNotice {
        task_id: reminder.task_id(),
        title: format!("Task Reminder: {}", reminder.text()),
        body: format!(
            "Your task is due in {} minutes at {}",
            reminder.minutes_until_due(),
            reminder.time()
        ),
    }
}
