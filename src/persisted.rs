//! A typed value mirrored into a durable key-value store.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::storage::{KeyValueStore, StorageError};

/// Errors raised while reading or writing a persisted value.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Stored value for key {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize value for key {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Binds a value of type `T` to `key` in a [`KeyValueStore`].
///
/// The durable store is always written before the in-memory mirror, so a
/// failed write leaves the mirror at its previous value. After [`clear`]
/// the mirror is absent (`None`), not the initial value.
///
/// [`clear`]: PersistedValue::clear
pub struct PersistedValue<T> {
    key: String,
    value: Option<T>,
    store: Arc<dyn KeyValueStore>,
}

impl<T> PersistedValue<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Reads `key` from the store.
    ///
    /// An absent key yields `initial` without writing it; absence is only
    /// replaced on the first [`set`](PersistedValue::set).
    ///
    /// # Errors
    /// `PersistError::Corrupt` when stored data does not deserialize as `T`,
    /// `PersistError::Storage` when the store cannot be read.
    #[instrument(skip(store, initial))]
    pub fn initialize(
        store: Arc<dyn KeyValueStore>,
        key: &str,
        initial: T,
    ) -> Result<Self, PersistError> {
        let value = match store.get(key)? {
            Some(raw) => {
                debug!("Rehydrating stored value");
                serde_json::from_str(&raw).map_err(|source| PersistError::Corrupt {
                    key: key.to_string(),
                    source,
                })?
            }
            None => {
                debug!("No stored value, using initial");
                initial
            }
        };

        Ok(Self {
            key: key.to_string(),
            value: Some(value),
            store,
        })
    }

    /// Mirrors `value` without touching the store.
    ///
    /// Used when stored data was rejected and the caller chose to start over;
    /// whatever is stored stays there until the next `set` replaces it.
    pub fn detached(store: Arc<dyn KeyValueStore>, key: &str, value: T) -> Self {
        Self {
            key: key.to_string(),
            value: Some(value),
            store,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value, `None` after [`clear`](PersistedValue::clear).
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Writes `new_value` to the store, then to the mirror.
    pub fn set(&mut self, new_value: T) -> Result<(), PersistError> {
        let raw = serde_json::to_string(&new_value).map_err(|source| PersistError::Serialize {
            key: self.key.clone(),
            source,
        })?;
        self.store.set(&self.key, &raw)?;
        self.value = Some(new_value);
        Ok(())
    }

    /// Removes the key from the store and leaves the mirror absent.
    pub fn clear(&mut self) -> Result<(), PersistError> {
        self.store.remove(&self.key)?;
        self.value = None;
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedValue")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::collections::BTreeMap;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk full".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk full".into()))
        }
    }

    #[test]
    fn absent_key_yields_initial_without_writing() {
        let store = MemoryStore::new();
        let value = PersistedValue::initialize(Arc::new(store.clone()), "k", vec![1, 2]).unwrap();
        assert_eq!(value.value(), Some(&vec![1, 2]));
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn set_survives_a_new_session() {
        let store = MemoryStore::new();
        let mut first = PersistedValue::initialize(Arc::new(store.clone()), "k", BTreeMap::new()).unwrap();
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 3u32);
        first.set(map.clone()).unwrap();

        let second = PersistedValue::initialize(Arc::new(store), "k", BTreeMap::new()).unwrap();
        assert_eq!(second.value(), Some(&map));
    }

    #[test]
    fn clear_removes_key_and_leaves_mirror_absent() {
        let store = MemoryStore::new();
        let mut value = PersistedValue::initialize(Arc::new(store.clone()), "k", 5u32).unwrap();
        value.set(9).unwrap();
        value.clear().unwrap();

        assert_eq!(value.value(), None);
        assert_eq!(store.get("k").unwrap(), None);

        let reopened = PersistedValue::initialize(Arc::new(store), "k", 5u32).unwrap();
        assert_eq!(reopened.value(), Some(&5));
    }

    #[test]
    fn corrupt_data_is_reported() {
        let store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        let err = PersistedValue::<Vec<u32>>::initialize(Arc::new(store), "k", vec![]).unwrap_err();
        assert!(matches!(err, PersistError::Corrupt { ref key, .. } if key == "k"));
    }

    #[test]
    fn foreign_shaped_data_is_reported() {
        let store = MemoryStore::new();
        store.set("k", r#"{"id": 1}"#).unwrap();
        let err = PersistedValue::<Vec<u32>>::initialize(Arc::new(store), "k", vec![]).unwrap_err();
        assert!(matches!(err, PersistError::Corrupt { .. }));
    }

    #[test]
    fn failed_write_keeps_previous_mirror() {
        let mut value = PersistedValue::initialize(Arc::new(BrokenStore), "k", 1u32).unwrap();
        assert!(matches!(value.set(2), Err(PersistError::Storage(_))));
        assert_eq!(value.value(), Some(&1));
        assert!(value.clear().is_err());
        assert_eq!(value.value(), Some(&1));
    }

    #[test]
    fn detached_does_not_touch_store() {
        let store = MemoryStore::new();
        store.set("k", "garbage").unwrap();
        let value = PersistedValue::detached(Arc::new(store.clone()), "k", 0u32);
        assert_eq!(value.value(), Some(&0));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("garbage"));
    }
}
