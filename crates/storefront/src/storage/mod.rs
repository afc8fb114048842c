//! Durable local storage.
//!
//! A small key-value store holding independent JSON-serialized blobs: the
//! cart line-item sequence and the current user record. The contract mirrors
//! a browser's origin-scoped storage: string keys, string values, best-effort
//! durability, and a malformed blob is treated as absent by its readers.
//!
//! Two implementations:
//! - [`FileStore`] - one file per key under a data directory, survives restarts
//! - [`MemoryStore`] - process-local, for tests and ephemeral runs

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors that can occur when reading or writing the durable store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters the backing store cannot represent.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A durable string key-value store.
///
/// Implementations must tolerate concurrent readers from multiple handles;
/// writers are expected to be sequential (one UI thread driving mutations).
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Absent keys are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be modified.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Well-known storage keys.
pub mod keys {
    /// Key for the serialized cart line-item sequence.
    pub const CART_ITEMS: &str = "cart_items";

    /// Key for the current user record written by the login flow.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the identity provider's session token.
    pub const IDENTITY_SESSION: &str = "identity_session";
}

/// Validate a storage key for the file-backed store.
///
/// Keys name files on disk, so they are restricted to a conservative
/// character set.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
