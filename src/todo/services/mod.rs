//! Application services for task persistence, sessions, and sweeps.

mod gateway;
mod persistence;
mod reminder_text;
mod scheduler;
mod session;

pub use gateway::{DEFAULT_KEY_PREFIX, DEFAULT_STORE_TTL, GatewaySettings, TaskStoreGateway};
pub use persistence::PersistenceQueue;
pub use reminder_text::{
    DEFAULT_BODY_TEMPLATE, DEFAULT_TITLE_TEMPLATE, ReminderTemplateError, ReminderTemplates,
};
pub use scheduler::{DEFAULT_SWEEP_INTERVAL, SweepScheduler};
pub use session::{
    EmptyListPolicy, SessionDependencies, SessionSettings, TaskSession, TickOutcome,
};
