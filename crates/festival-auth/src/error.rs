//! Error types for festival-auth.

use thiserror::Error;

/// Result type for festival-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for session storage backends.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Errors raised while decoding or persisting auth state.
///
/// None of these escape [`AuthStore`](crate::AuthStore) operations; the store
/// recovers from every one of them locally.
#[derive(Error, Debug)]
pub enum Error {
    /// The persisted entry is not a valid auth record.
    #[error("Corrupt auth state: {0}")]
    CorruptState(#[from] serde_json::Error),

    /// The session storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures reported by a [`SessionStorage`](crate::SessionStorage) backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Storage is missing or disabled (e.g. by browser policy).
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    /// Reading an entry failed.
    #[error("Session storage read failed: {0}")]
    Read(String),

    /// Writing or removing an entry failed (quota, security error).
    #[error("Session storage write failed: {0}")]
    Write(String),
}
