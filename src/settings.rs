//! Runtime settings.
//!
//! Settings are layered from built-in defaults, an optional TOML file, and
//! `TASKLIGHT__`-prefixed environment variables, in increasing precedence.
//! Nested keys use a double underscore, e.g. `TASKLIGHT__STORE__REDIS_URL`.

use std::env;
use std::time::Duration;

use ::config::{Config, Environment, File, FileFormat};
use chrono::TimeDelta;
use serde::Deserialize;
use thiserror::Error;

use crate::todo::{
    domain::{TaskDomainError, UserId},
    services::{
        DEFAULT_BODY_TEMPLATE, DEFAULT_KEY_PREFIX, DEFAULT_TITLE_TEMPLATE, EmptyListPolicy,
        GatewaySettings, ReminderTemplateError, ReminderTemplates, SessionSettings,
    },
};

/// Environment variable naming an explicit settings file.
pub const SETTINGS_PATH_VAR: &str = "TASKLIGHT_CONFIG";

const DEFAULT_SETTINGS_FILE: &str = "tasklight";
const ENV_PREFIX: &str = "TASKLIGHT";
const ENV_SEPARATOR: &str = "__";

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialised.
    #[error("failed to load settings: {0}")]
    Load(#[from] ::config::ConfigError),

    /// A value was read but is out of range.
    #[error("invalid setting {key}: {reason}")]
    Invalid {
        /// Dotted key of the offending setting.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configured session user is not a valid identifier.
    #[error(transparent)]
    User(#[from] TaskDomainError),

    /// A reminder template does not compile.
    #[error(transparent)]
    Template(#[from] ReminderTemplateError),
}

/// Key-value store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Redis connection URL.
    pub redis_url: String,
    /// Storage key prefix.
    pub key_prefix: String,
    /// TTL applied on every write, in seconds.
    pub ttl_secs: u64,
    /// Whether an emptied list overwrites the stored one.
    pub persist_empty: bool,
    /// Limit for one store operation, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_owned(),
            key_prefix: DEFAULT_KEY_PREFIX.to_owned(),
            ttl_secs: 86_400,
            persist_empty: false,
            timeout_ms: 2_000,
        }
    }
}

/// Sweep timing settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Seconds between scheduler ticks.
    pub interval_secs: u64,
    /// Age in seconds at which a task expires.
    pub task_lifetime_secs: u64,
    /// Reminder lead window in seconds.
    pub reminder_window_secs: u64,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            task_lifetime_secs: 86_400,
            reminder_window_secs: 600,
        }
    }
}

/// Notification text settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Title template.
    pub title_template: String,
    /// Body template.
    pub body_template: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            title_template: DEFAULT_TITLE_TEMPLATE.to_owned(),
            body_template: DEFAULT_BODY_TEMPLATE.to_owned(),
        }
    }
}

/// Session identity settings for the worker binary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SessionIdentitySettings {
    /// User whose list the worker manages; unset means anonymous.
    pub user_id: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

/// Complete application settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Key-value store settings.
    pub store: StoreSettings,
    /// Sweep timing settings.
    pub sweep: SweepSettings,
    /// Notification text settings.
    pub notifications: NotificationSettings,
    /// Session identity settings.
    pub session: SessionIdentitySettings,
    /// Logging settings.
    pub log: LogSettings,
}

impl AppSettings {
    /// Loads settings from the settings file and the environment.
    ///
    /// The file is `$TASKLIGHT_CONFIG` when set, otherwise an optional
    /// `tasklight.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a source is unreadable or a value is
    /// invalid.
    pub fn load() -> Result<Self, SettingsError> {
        let file = match env::var(SETTINGS_PATH_VAR) {
            Ok(path) => File::with_name(&path).required(true),
            Err(_) => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };
        let builder = Config::builder().add_source(file).add_source(environment());
        Self::from_config(builder.build()?)
    }

    /// Parses settings from a TOML document, then applies the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the document is malformed or a value
    /// is invalid.
    pub fn from_toml_str(document: &str) -> Result<Self, SettingsError> {
        let builder = Config::builder()
            .add_source(File::from_str(document, FileFormat::Toml))
            .add_source(environment());
        Self::from_config(builder.build()?)
    }

    fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Self = config.try_deserialize()?;
        settings.validate()
    }

    fn validate(self) -> Result<Self, SettingsError> {
        let positive = [
            ("store.ttl_secs", self.store.ttl_secs),
            ("store.timeout_ms", self.store.timeout_ms),
            ("sweep.interval_secs", self.sweep.interval_secs),
            ("sweep.task_lifetime_secs", self.sweep.task_lifetime_secs),
            ("sweep.reminder_window_secs", self.sweep.reminder_window_secs),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(SettingsError::Invalid {
                    key,
                    reason: "must be greater than zero".to_owned(),
                });
            }
        }
        if self.store.key_prefix.trim().is_empty() {
            return Err(SettingsError::Invalid {
                key: "store.key_prefix",
                reason: "must not be empty".to_owned(),
            });
        }
        Ok(self)
    }

    /// Returns gateway key layout and TTL.
    #[must_use]
    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings::new(
            self.store.key_prefix.clone(),
            Duration::from_secs(self.store.ttl_secs),
        )
    }

    /// Returns session timing rules and empty-list policy.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] when a duration does not fit.
    pub fn session_settings(&self) -> Result<SessionSettings, SettingsError> {
        Ok(SessionSettings {
            task_lifetime: seconds("sweep.task_lifetime_secs", self.sweep.task_lifetime_secs)?,
            reminder_window: seconds(
                "sweep.reminder_window_secs",
                self.sweep.reminder_window_secs,
            )?,
            empty_list_policy: if self.store.persist_empty {
                EmptyListPolicy::Overwrite
            } else {
                EmptyListPolicy::Skip
            },
        })
    }

    /// Returns the limit for one key-value store operation.
    #[must_use]
    pub const fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store.timeout_ms)
    }

    /// Returns the scheduler tick period.
    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep.interval_secs)
    }

    /// Compiles the configured reminder templates.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Template`] when a template does not compile.
    pub fn reminder_templates(&self) -> Result<ReminderTemplates, SettingsError> {
        Ok(ReminderTemplates::new(
            self.notifications.title_template.clone(),
            self.notifications.body_template.clone(),
        )?)
    }

    /// Returns the configured session user.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::User`] when the value is blank.
    pub fn session_user(&self) -> Result<Option<UserId>, SettingsError> {
        Ok(self
            .session
            .user_id
            .as_deref()
            .map(UserId::new)
            .transpose()?)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

fn seconds(key: &'static str, value: u64) -> Result<TimeDelta, SettingsError> {
    i64::try_from(value)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(|| SettingsError::Invalid {
            key,
            reason: format!("{value} seconds is out of range"),
        })
}
