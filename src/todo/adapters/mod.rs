//! Adapter implementations for task ports.

pub mod memory;
pub mod redis;
pub mod tracing_notifier;

pub use tracing_notifier::TracingNotifier;
