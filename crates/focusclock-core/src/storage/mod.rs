mod database;
mod memory;

pub use database::Database;
pub use memory::{MemoryStore, NullStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Key under which validated settings are persisted.
pub const SETTINGS_KEY: &str = "settings";
/// Key under which the timer snapshot is persisted.
pub const TIMER_STATE_KEY: &str = "timerState";
/// Scratch key used by [`probe`].
pub const PROBE_KEY: &str = "__storage_test__";

/// Durable string-keyed store.
///
/// Every backend may be absent or read-only at runtime; callers probe with
/// [`probe`] before relying on durability.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

/// Returns true if the store accepts a write-then-delete round trip.
pub fn probe<S: KeyValueStore + ?Sized>(store: &mut S) -> bool {
    store
        .set(PROBE_KEY, PROBE_KEY)
        .and_then(|()| store.delete(PROBE_KEY))
        .is_ok()
}

/// Returns `~/.config/focusclock[-dev]/` based on FOCUSCLOCK_ENV.
///
/// Set FOCUSCLOCK_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSCLOCK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusclock-dev")
    } else {
        base_dir.join("focusclock")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
