//! Durable key-value stores backing [`PersistedValue`](crate::persisted::PersistedValue).
//!
//! Stores are synchronous: once `set` returns, the value is durable and no
//! partially written state can be read back.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by a durable store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed, string-valued durable store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written or was removed.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
