//! Personal task lists with expiration and due-time reminders.
//!
//! Each signed-in user owns one ordered list of tasks, stored as a single
//! JSON blob in a key-value store with a rolling 24-hour TTL. Tasks older
//! than 24 hours are dropped, and a task with a due time triggers one
//! notification within ten minutes of that time. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
