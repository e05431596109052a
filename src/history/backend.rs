//! Durable storage for the serialized history list.
//!
//! A backend holds a single value: the JSON array of entries. The store
//! decides what goes in it; backends only read, write and remove it.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

/// File name of the history file inside the data directory.
pub const HISTORY_FILE_NAME: &str = "calc_history.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read history from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write history to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("stored history is corrupt")]
    Corrupt(#[source] serde_json::Error),
    #[error("failed to serialize history")]
    Serialize(#[source] serde_json::Error),
    #[error("history storage unavailable: {0}")]
    Unavailable(String),
}

/// One key-value slot holding the serialized history.
pub trait HistoryBackend {
    /// Read the stored value, `None` if nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, PersistenceError>;

    /// Replace the stored value.
    fn write(&mut self, contents: &str) -> Result<(), PersistenceError>;

    /// Remove the stored value entirely.
    fn remove(&mut self) -> Result<(), PersistenceError>;
}

/// Default location of the history file.
pub fn default_history_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("omnicalc")
        .join(HISTORY_FILE_NAME)
}

/// History stored as a JSON file on disk.
#[derive(Clone, Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryBackend for JsonFileBackend {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistenceError> {
        let write_err = |source: io::Error| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Written to a sibling and renamed into place.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)
    }

    fn remove(&mut self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// In-memory slot used when persistence is disabled and in tests.
///
/// Clones share the same slot, so a test can keep a handle and inspect
/// what the store persisted.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    slot: Rc<RefCell<Option<String>>>,
    unavailable: Rc<RefCell<bool>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that starts out holding `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.slot.borrow_mut() = Some(contents.into());
        backend
    }

    /// Current stored value.
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Make every subsequent operation fail, as if storage went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.borrow_mut() = unavailable;
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if *self.unavailable.borrow() {
            Err(PersistenceError::Unavailable("memory slot disabled".into()))
        } else {
            Ok(())
        }
    }
}

impl HistoryBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        self.check()?;
        Ok(self.contents())
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistenceError> {
        self.check()?;
        *self.slot.borrow_mut() = Some(contents.to_string());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), PersistenceError> {
        self.check()?;
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::new(dir.path().join("nested").join(HISTORY_FILE_NAME));

        assert!(backend.read().unwrap().is_none());
        backend.write("[]").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("[]"));

        backend.remove().unwrap();
        assert!(backend.read().unwrap().is_none());
        assert!(!backend.path().exists());

        // Removing twice is fine.
        backend.remove().unwrap();
    }

    #[test]
    fn test_file_backend_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as a string.
        let backend = JsonFileBackend::new(dir.path());
        assert!(matches!(backend.read(), Err(PersistenceError::Read { .. })));
    }

    #[test]
    fn test_memory_backend_shares_slot() {
        let handle = MemoryBackend::new();
        let mut backend = handle.clone();
        backend.write("[1]").unwrap();
        assert_eq!(handle.contents().as_deref(), Some("[1]"));

        handle.set_unavailable(true);
        assert!(backend.write("[2]").is_err());
        assert_eq!(handle.contents().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_error_cause_is_linked_not_repeated() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileBackend::new(dir.path()).read().unwrap_err();
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(!err.to_string().contains(&cause));

        let corrupt = PersistenceError::Corrupt(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(corrupt.to_string(), "stored history is corrupt");
        assert!(std::error::Error::source(&corrupt).is_some());
    }
}
