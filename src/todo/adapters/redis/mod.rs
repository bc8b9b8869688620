//! Redis-backed adapter implementations.

mod key_value;

pub use key_value::{DEFAULT_COMMAND_TIMEOUT, RedisKeyValueStore};
