//! Durable key/value storage for reader preferences.
//!
//! Values live in a tiny TOML file (one string per key) under the cache
//! directory. Callers treat every error as "nothing stored"; see
//! `TrackPreferenceStore`.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage key holding the selected track identifier.
pub const TRACK_STORAGE_KEY: &str = "tutorial-app-track";

pub trait PreferenceStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: PreferenceStorage + ?Sized> PreferenceStorage for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<S: PreferenceStorage + ?Sized> PreferenceStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Preferences persisted as `key = "value"` lines in a TOML file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage file `preferences.toml` inside `cache_dir`.
    pub fn in_cache_dir(cache_dir: &Path) -> Self {
        Self::new(cache_dir.join("preferences.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading {}", self.path.display()));
            }
        };
        toml::from_str(&data).with_context(|| format!("parsing {}", self.path.display()))
    }
}

impl PreferenceStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // A corrupted file is replaced rather than blocking every later write.
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let contents = toml::to_string(&entries).context("serializing preferences")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

/// In-process storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage(name: &str) -> FileStorage {
        let dir = std::env::temp_dir().join(format!(
            "tutorial-storage-test-{}-{name}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        FileStorage::in_cache_dir(&dir)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let storage = temp_storage("missing");
        assert_eq!(storage.get(TRACK_STORAGE_KEY).expect("read"), None);
    }

    #[test]
    fn set_creates_parent_and_keeps_other_keys() {
        let storage = temp_storage("keeps");
        storage.set("other", "1").expect("write other");
        storage.set(TRACK_STORAGE_KEY, "fastapi").expect("write track");

        assert_eq!(
            storage.get(TRACK_STORAGE_KEY).expect("read"),
            Some("fastapi".to_string())
        );
        assert_eq!(storage.get("other").expect("read"), Some("1".to_string()));
    }

    #[test]
    fn corrupted_file_is_an_error_on_read_and_replaced_on_write() {
        let storage = temp_storage("corrupt");
        if let Some(parent) = storage.path().parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(storage.path(), "this is = = not toml").expect("seed");

        assert!(storage.get(TRACK_STORAGE_KEY).is_err());
        storage.set(TRACK_STORAGE_KEY, "nextjs").expect("overwrite");
        assert_eq!(
            storage.get(TRACK_STORAGE_KEY).expect("read"),
            Some("nextjs".to_string())
        );
    }
}
