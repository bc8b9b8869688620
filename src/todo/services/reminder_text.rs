//! Rendering of reminder notification text.

use minijinja::{Environment, context};
use thiserror::Error;

use crate::todo::domain::{Reminder, ReminderNotice};

/// Default notification title template.
pub const DEFAULT_TITLE_TEMPLATE: &str = "Task Reminder: {{ text }}";

/// Default notification body template.
pub const DEFAULT_BODY_TEMPLATE: &str =
    "Your task is due in {{ minutes }} minutes at {{ time }}";

/// Error raised when a reminder template cannot be compiled or rendered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid reminder template '{template}': {reason}")]
pub struct ReminderTemplateError {
    /// Template source that failed.
    pub template: String,
    /// Renderer diagnostic.
    pub reason: String,
}

/// Title and body templates for reminder notifications.
///
/// Templates see `text`, `time`, and `minutes` (rounded minutes until due).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderTemplates {
    title: String,
    body: String,
}

impl ReminderTemplates {
    /// Creates templates after checking that both compile.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderTemplateError`] when either template has a syntax
    /// error.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, ReminderTemplateError> {
        let templates = Self {
            title: title.into(),
            body: body.into(),
        };
        let environment = Environment::new();
        for source in [&templates.title, &templates.body] {
            environment
                .template_from_str(source)
                .map_err(|err| ReminderTemplateError {
                    template: source.clone(),
                    reason: err.to_string(),
                })?;
        }
        Ok(templates)
    }

    /// Renders the notification for `reminder`.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderTemplateError`] when rendering fails, for example
    /// because a filter rejects its input.
    pub fn render(&self, reminder: &Reminder) -> Result<ReminderNotice, ReminderTemplateError> {
        Ok(ReminderNotice {
            task_id: reminder.task_id(),
            title: render(&self.title, reminder)?,
            body: render(&self.body, reminder)?,
        })
    }
}

impl Default for ReminderTemplates {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE_TEMPLATE.to_owned(),
            body: DEFAULT_BODY_TEMPLATE.to_owned(),
        }
    }
}

fn render(template: &str, reminder: &Reminder) -> Result<String, ReminderTemplateError> {
    let environment = Environment::new();
    environment
        .render_str(
            template,
            context! {
                text => reminder.text(),
                time => reminder.time(),
                minutes => reminder.minutes_until_due(),
            },
        )
        .map_err(|err| ReminderTemplateError {
            template: template.to_owned(),
            reason: err.to_string(),
        })
}
