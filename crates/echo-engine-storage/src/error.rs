//! Storage error types.

use echo_engine_core::CoreError;
use thiserror::Error;

/// Errors raised by persistence backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error while {context}: {source}")]
    Io {
        /// What the store was doing
        context: &'static str,
        /// The underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be encoded or decoded.
    #[error("serialization error while {context}: {source}")]
    Serialization {
        /// What the store was doing
        context: &'static str,
        /// The underlying serde error
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn serialization(context: &'static str, source: serde_json::Error) -> Self {
        Self::Serialization { context, source }
    }
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        CoreError::Storage(err.to_string())
    }
}
