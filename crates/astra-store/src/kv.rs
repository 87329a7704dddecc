//! # Key-Value Substrate
//!
//! The durable key-value substrate the session state mirrors into.
//! Two implementations:
//!
//! - [`MemoryStore`] - process-local HashMap; the default for tests and
//!   ephemeral sessions
//! - [`FileStore`] - one JSON file per key under a platform data
//!   directory; the localStorage analogue for a desktop session
//!
//! ## Storage Layout (FileStore)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ~/.local/share/astra-commerce/        (Linux)                          │
//! │  ~/Library/Application Support/com.astra.commerce/   (macOS)            │
//! │                                                                         │
//! │  ├── cart.json       ← serialized Cart                                 │
//! │  ├── user.json       ← serialized User                                 │
//! │  ├── token.json      ← serialized session token                        │
//! │  └── reviews.json    ← serialized Vec<Review>                          │
//! │                                                                         │
//! │  One file per key: a torn write can corrupt at most one entry, and     │
//! │  the adapter discards corrupt entries on load.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// KeyValueStore Trait
// =============================================================================

/// The durable key-value substrate contract.
///
/// Values are opaque strings (JSON-encoded by the adapter). `set`
/// overwrites unconditionally; it does not merge. No transactional or
/// atomicity guarantees are required: this is a single-writer,
/// single-process model.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Returns the stored string for `key`, or `None` when absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory key-value store.
///
/// ## Thread Safety
/// A `Mutex<HashMap>` is enough: operations are short and the model is
/// single-writer, so contention is not a concern.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// File-backed key-value store: one `<key>.json` file per key.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a file store rooted at an explicit directory.
    ///
    /// The directory is created if it does not exist.
    pub fn new(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)
            .map_err(|e| StoreError::io(root.display().to_string(), &e))?;
        debug!(root = %root.display(), "File store opened");
        Ok(FileStore { root })
    }

    /// Creates a file store in the platform app-data directory.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.astra.commerce/`
    /// - **Windows**: `%APPDATA%\astra\commerce\`
    /// - **Linux**: `~/.local/share/astra-commerce/`
    ///
    /// ## Development Override
    /// Set `ASTRA_DATA_DIR` to use a custom path.
    pub fn at_data_dir() -> StoreResult<Self> {
        if let Ok(path) = std::env::var("ASTRA_DATA_DIR") {
            return FileStore::new(path);
        }

        let proj_dirs = ProjectDirs::from("com", "astra", "commerce").ok_or_else(|| {
            StoreError::Io {
                key: "data-dir".to_string(),
                message: "could not determine app data directory".to_string(),
            }
        })?;

        FileStore::new(proj_dirs.data_dir())
    }

    /// Resolves a key to its backing file path.
    ///
    /// Keys are sanitized to a conservative character set so a key can
    /// never escape the store root or collide with path separators.
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.root.join(format!("{}.json", safe))
    }

    /// Returns the store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, &e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|e| StoreError::io(key, &e))
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, &e)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
