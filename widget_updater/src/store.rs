//! Read side of the key-value persistence the main app writes its widget
//! state into. The pipeline never writes to it.
use crate::error::StoreError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key the main app publishes the dashboard snapshot under
pub const DEFAULT_SNAPSHOT_KEY: &str = "widget_data";

pub trait SnapshotStore {
    /// Returns the raw blob stored under `key`, or `None` if nothing was
    /// ever written.
    ///
    /// # Errors
    /// If the backing storage exists but cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    entries: HashMap<String, String>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }
}

/// Store backed by a JSON preferences document on disk: a single object
/// mapping keys to string values. A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Preferences file does not exist yet");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let entries: HashMap<String, Option<String>> =
            serde_json::from_str(&contents)?;

        Ok(entries.get(key).cloned().flatten())
    }
}
