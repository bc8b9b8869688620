//! Scoped environment overrides for settings tests.

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Applies environment variable overrides until dropped.
///
/// Holding the guard serialises every test that touches the process
/// environment, including tests that only read settings.
pub struct EnvOverrides {
    previous: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvOverrides {
    /// Sets (`Some`) or removes (`None`) each variable.
    pub fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let previous = changes
            .iter()
            .map(|(key, value)| {
                let before = env::var(key).ok();
                unsafe {
                    // SAFETY: ENV_MUTEX serialises environment mutation in tests.
                    match value {
                        Some(new_value) => env::set_var(key, new_value),
                        None => env::remove_var(key),
                    }
                }
                ((*key).to_owned(), before)
            })
            .collect();

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvOverrides {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            unsafe {
                // SAFETY: the guard still holds ENV_MUTEX.
                match value {
                    Some(previous) => env::set_var(&key, previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}
