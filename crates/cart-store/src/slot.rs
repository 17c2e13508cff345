//! # State Slot
//!
//! The durable key-value boundary the store persists through.
//!
//! ## Boundary Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         StateSlot                                       │
//! │                                                                         │
//! │   CartStore ──► write("cartState", json)  ──►  ┌──────────────────┐    │
//! │             ──► read("cartState")         ◄──  │  JsonFileSlot    │    │
//! │                                                │  <base>/<key>.json│   │
//! │                                                ├──────────────────┤    │
//! │                                                │  MemorySlot      │    │
//! │                                                │  HashMap (tests) │    │
//! │                                                └──────────────────┘    │
//! │                                                                         │
//! │   read of a missing key is Ok(None), never an error                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The slot stores opaque strings. Encoding and decoding cart state is
//! the store's job; a slot implementation must not inspect values.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::StoreResult;

/// Abstraction over the durable key-value slot.
///
/// Implementations must be usable from multiple threads; the store calls
/// `write` while holding its state lock to keep merge-then-persist atomic.
pub trait StateSlot: Send + Sync {
    /// Reads the value for a key.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes the value for a key, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;
}

// =============================================================================
// File-Backed Slot
// =============================================================================

/// A slot keeping one JSON file per key under a base directory.
///
/// ## Layout
/// `<base>/<key>.json`, e.g. `~/.local/share/myapp/cartState.json`
///
/// ## Atomicity
/// Writes go to a sibling temp file first and are published with a
/// rename, so a crash mid-write leaves the previous value intact rather
/// than a truncated file.
#[derive(Debug, Clone)]
pub struct JsonFileSlot {
    base: PathBuf,
}

impl JsonFileSlot {
    /// Opens a file slot under the given directory, creating it if needed.
    pub fn open(base: impl Into<PathBuf>) -> StoreResult<Self> {
        let base = base.into();
        fs::create_dir_all(&base)?;
        Ok(JsonFileSlot { base })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }

    /// The directory this slot stores its files under.
    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl StateSlot for JsonFileSlot {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(key = %key, path = %path.display(), "slot key not present");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        let tmp = self.base.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(key = %key, bytes = value.len(), "slot value written");
        Ok(())
    }
}

// =============================================================================
// In-Memory Slot
// =============================================================================

/// An in-memory slot for tests.
///
/// Cloning shares the underlying map, so two stores opened over clones
/// of the same `MemorySlot` see each other's writes. That is exactly
/// what reopen-style tests need.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        MemorySlot::default()
    }
}

impl StateSlot for MemorySlot {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().expect("memory slot mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().expect("memory slot mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
