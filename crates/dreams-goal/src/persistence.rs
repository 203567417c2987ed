// persistence.rs - PersistenceAdapter trait, codec, and the two backends.
//
// The store treats storage as a single key/value slot holding one JSON
// blob: the full ordered goal list. The trait keeps the store independent
// of where that blob lives (a file on disk here, browser local storage in
// the web build, a plain String in tests).
//
// Layout: a JSON array of goals, no version field.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TrackerError;
use crate::goal::Goal;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "dreams-tracker-data";

/// Blob storage the store writes through to.
///
/// `load` returns `Ok(None)` when nothing has been stored yet. `save`
/// replaces whatever was stored before.
pub trait PersistenceAdapter {
    fn load(&self) -> Result<Option<String>, TrackerError>;

    fn save(&mut self, blob: &str) -> Result<(), TrackerError>;
}

impl<A: PersistenceAdapter + ?Sized> PersistenceAdapter for Box<A> {
    fn load(&self) -> Result<Option<String>, TrackerError> {
        (**self).load()
    }

    fn save(&mut self, blob: &str) -> Result<(), TrackerError> {
        (**self).save(blob)
    }
}

/// Serialize the goal list into the persisted blob.
pub fn encode_goals(goals: &[Goal]) -> Result<String, TrackerError> {
    Ok(serde_json::to_string(goals)?)
}

/// Parse a persisted blob back into the goal list.
pub fn decode_goals(blob: &str) -> Result<Vec<Goal>, TrackerError> {
    Ok(serde_json::from_str(blob)?)
}

/// File-backed adapter: one JSON file per storage key.
///
/// The blob for key `k` lives at `<dir>/k.json`, so several independent
/// trackers can share one data directory.
pub struct JsonFileAdapter {
    path: PathBuf,
}

impl JsonFileAdapter {
    /// Create an adapter for `key` under `dir`.
    /// Creates the directory if it doesn't exist.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Result<Self, TrackerError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| TrackerError::IoError {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            path: dir.join(format!("{}.json", key)),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceAdapter for JsonFileAdapter {
    fn load(&self) -> Result<Option<String>, TrackerError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let blob = fs::read_to_string(&self.path).map_err(|source| TrackerError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(Some(blob))
    }

    fn save(&mut self, blob: &str) -> Result<(), TrackerError> {
        fs::write(&self.path, blob).map_err(|source| TrackerError::IoError {
            path: self.path.display().to_string(),
            source,
        })
    }
}

/// In-memory adapter holding a single blob.
#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
    blob: Option<String>,
    saves: usize,
}

impl MemoryAdapter {
    /// Create an adapter with nothing stored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already-stored blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            saves: 0,
        }
    }

    /// The blob currently stored, if any.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn load(&self) -> Result<Option<String>, TrackerError> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &str) -> Result<(), TrackerError> {
        self.blob = Some(blob.to_string());
        self.saves += 1;
        Ok(())
    }
}
