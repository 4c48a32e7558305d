//! Store error handling
//!
//! Only the persistence boundary can fail. Lookups by id return `Option`
//! or `bool` and never produce an error.

use thiserror::Error;

/// Persistence failure on a named slot
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error on '{key}': {source}")]
    Io {
        key: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize '{key}': {source}")]
    Serialization {
        key: String,
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }

    /// Slot key the failure happened on
    pub fn key(&self) -> &str {
        match self {
            StoreError::Io { key, .. } | StoreError::Serialization { key, .. } => key,
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
