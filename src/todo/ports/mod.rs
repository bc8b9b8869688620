//! Port contracts for task persistence, identity, and notifications.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod identity;
pub mod key_value;
pub mod notifier;

pub use identity::{IdentityError, IdentityPort, IdentityResult};
pub use key_value::{KeyValueResult, KeyValueStore, KeyValueStoreError};
pub use notifier::{NotificationPermission, Notifier, NotifierError, NotifierResult};
