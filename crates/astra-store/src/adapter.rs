//! # Store Adapter
//!
//! Typed facade over a [`KeyValueStore`]: JSON (de)serialization plus the
//! fail-soft recovery policy.
//!
//! ## Corruption Recovery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    load() Decision Tree                                 │
//! │                                                                         │
//! │  get(key)                                                               │
//! │    │                                                                    │
//! │    ├── substrate failure ──► WARN log ──► None                          │
//! │    │                                                                    │
//! │    ├── absent ──► None                                                  │
//! │    │                                                                    │
//! │    └── present ──► parse JSON                                           │
//! │          │                                                              │
//! │          ├── ok ──► Some(value)                                         │
//! │          │                                                              │
//! │          └── corrupt ──► WARN log ──► remove(key) ──► None              │
//! │                          (removal prevents repeated failures on         │
//! │                           every subsequent load)                        │
//! │                                                                         │
//! │  The durable copy is a cache, not the authority: a corrupt value is     │
//! │  discarded, not repaired, and the failure never reaches the caller.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::StoreError;
use crate::kv::{KeyValueStore, MemoryStore};

/// Typed load/save facade over a shared [`KeyValueStore`].
///
/// Cloning is cheap (Arc); every state manager in a session holds a clone
/// pointed at the same substrate.
#[derive(Debug, Clone)]
pub struct StoreAdapter {
    store: Arc<dyn KeyValueStore>,
}

impl StoreAdapter {
    /// Creates an adapter over the given substrate.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        StoreAdapter { store }
    }

    /// Creates an adapter over a fresh in-memory substrate.
    ///
    /// ## Usage
    /// The default for tests - each test gets an isolated store.
    pub fn in_memory() -> Self {
        StoreAdapter::new(Arc::new(MemoryStore::new()))
    }

    /// Loads and deserializes the value stored under `key`.
    ///
    /// Fails soft: absence, substrate failures, and corrupt values all
    /// yield `None`. A corrupt value is additionally removed so the next
    /// load does not fail again.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Storage read failed; treating value as absent");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                let err = StoreError::Corrupt {
                    key: key.to_string(),
                    message: e.to_string(),
                };
                warn!(error = %err, "Discarding corrupt stored value");
                self.remove(key);
                None
            }
        }
    }

    /// Serializes `value` and stores it under `key`, overwriting
    /// unconditionally.
    ///
    /// Fire-and-forget: failures are logged at WARN and never surfaced,
    /// so a mutation is never failed by its persistence mirror.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                let err = StoreError::Serialize {
                    key: key.to_string(),
                    message: e.to_string(),
                };
                warn!(error = %err, "Skipping persist");
                return;
            }
        };

        if let Err(e) = self.store.set(key, &raw) {
            warn!(key, error = %e, "Storage write failed; in-memory state unaffected");
        }
    }

    /// Removes the value stored under `key`. Failures are logged.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!(key, error = %e, "Storage remove failed");
        }
    }

    /// Raw read, bypassing deserialization. Mainly useful in tests.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.store.get(key).ok().flatten()
    }

    /// Raw write, bypassing serialization. Mainly useful in tests to
    /// plant corrupt values.
    pub fn set_raw(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, error = %e, "Storage write failed");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
