//! # Storage Error Types
//!
//! Error types for durable-storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Containment                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the key and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreAdapter ← STOPS HERE: logged at WARN, converted to absence       │
//! │                                                                         │
//! │  StoreError never crosses the adapter boundary. Persistence is a       │
//! │  cache of the in-memory state, not the authority, so a failure is      │
//! │  reported on the side channel and the operation proceeds.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Durable-storage operation errors.
///
/// Produced by [`KeyValueStore`](crate::KeyValueStore) implementations and
/// consumed by [`StoreAdapter`](crate::StoreAdapter), which logs and
/// recovers. Callers above the adapter never see this type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the underlying substrate failed.
    ///
    /// ## When This Occurs
    /// - Data directory cannot be created
    /// - File permissions issue
    /// - Disk full
    #[error("I/O failure for key '{key}': {message}")]
    Io { key: String, message: String },

    /// A value could not be serialized to JSON before storing.
    #[error("Serialize failure for key '{key}': {message}")]
    Serialize { key: String, message: String },

    /// A stored value could not be parsed back.
    ///
    /// ## Recovery
    /// The adapter discards the value and proactively removes the entry,
    /// preventing repeated failures on every subsequent load.
    #[error("Corrupt value for key '{key}': {message}")]
    Corrupt { key: String, message: String },
}

impl StoreError {
    /// Creates an Io error for a given key.
    pub fn io(key: impl Into<String>, err: &std::io::Error) -> Self {
        StoreError::Io {
            key: key.into(),
            message: err.to_string(),
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
