//! Tasklight: personal task lists with expiry and due-time reminders.
//!
//! Signed-in users keep a short list of tasks that lives for 24 hours after
//! its last change. Tasks may carry a daily due time; a reminder fires once
//! when that time is less than ten minutes away.
//!
//! # Architecture
//!
//! Tasklight follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (key-value stores,
//!   identity, notifications)
//!
//! # Modules
//!
//! - [`todo`]: Task lists, the session engine, and sweeps
//! - [`settings`]: Layered runtime settings
//! - [`telemetry`]: Logging setup

pub mod settings;
pub mod telemetry;
pub mod todo;
