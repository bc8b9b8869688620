//! In-memory adapter implementations.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! tests and local runs without an external key-value store.

mod identity;
mod key_value;
mod notifier;

pub use identity::StaticIdentity;
pub use key_value::InMemoryKeyValueStore;
pub use notifier::RecordingNotifier;
