use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Flat key-value persistence.
///
/// Values are opaque JSON text, overwritten wholesale on every write. No
/// transactions: callers own a key at a time.
pub trait KeyValueStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    fn set_raw(&self, key: &str, value: String) -> Result<()>;

    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    fn keys(&self) -> Result<Vec<String>>;
}

/// Typed access on top of [`KeyValueStore`]
pub trait KeyValueStoreExt: KeyValueStore {
    /// Parsed value, or `default` when absent, unreadable or unparseable.
    /// Failures are logged and otherwise swallowed.
    fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read stored value, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored value is not valid JSON, using default");
                default
            }
        }
    }

    fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.get_or(key, T::default())
    }

    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, raw)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
