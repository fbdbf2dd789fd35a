//! Durable single-key storage for the serialized session.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("session storage lock poisoned")]
    Poisoned,
}

/// Holds one serialized value. Writes are synchronous so the stored state never
/// lags behind the in-memory session.
pub trait SessionStorage {
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// # Errors
    /// Returns an error if the value cannot be written.
    fn save(&self, value: &str) -> Result<(), StorageError>;

    /// Removing an absent value is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be modified.
    fn clear(&self) -> Result<(), StorageError>;
}

/// JSON file on disk, parent directories created on first save.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        fs::write(&self.path, value).map_err(|err| self.io_error(err))?;
        debug!("session written to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("session removed from {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}

/// In-process storage. Clones share the same slot, which lets a second store
/// "restart" from what the first one wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        let mut slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        *slot = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}
