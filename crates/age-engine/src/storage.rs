//! Durable key-value slots backing the history log.
//!
//! Each slot holds one string value. [`FileStorage`] keeps one file per slot
//! under a base directory; [`MemoryStorage`] keeps them in-process.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::debug;

pub trait Storage {
    /// The value stored under `key`, or `None` if the slot is empty.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// Empty the slot. Removing an empty slot is not an error.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// One `<key>.json` file per slot under `base_dir`.
///
/// Each write goes to its own uniquely named temp file in `base_dir`, which
/// is then renamed over the target. Readers see either the old or the new
/// value, never a mix, even with several writers; the last rename wins.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file holding `key`.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.base_dir)?;

        let path = self.slot_path(key);
        let mut temp = NamedTempFile::new_in(&self.base_dir)?;
        temp.write_all(value.as_bytes())?;
        temp.persist(&path).map_err(|e| e.error)?;

        debug!("Wrote slot '{}' to {:?}", key, path);
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.slot_path(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-process slots. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| io::Error::other("memory storage lock poisoned"))
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        (**self).remove(key)
    }
}
