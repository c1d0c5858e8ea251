// src/infrastructure/storage.rs
use crate::domain::StorageError;
use crate::ports::Storage;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};

/// Storage backed by a single JSON object on disk.
///
/// Every write rewrites the whole file; the store only ever holds two small keys.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes go to a sibling temp file which then replaces the target, so readers
    /// never see a half-written file.
    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(serde_json::to_string_pretty(items)?.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn update<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        let (mut items, corrupt) = match self.read_all() {
            Ok(items) => (items, false),
            Err(StorageError::Serialize(e)) => {
                warn!(path = ?self.path, error = %e, "Storage file is corrupt, starting over");
                (BTreeMap::new(), true)
            }
            Err(e) => return Err(e),
        };
        if f(&mut items) || corrupt {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        Ok(self.read_all()?.remove(key))
    }

    #[instrument(level = "debug", skip(self, value))]
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
            true
        })?;
        debug!(path = ?self.path, "Stored item");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.update(|items| items.remove(key).is_some())
    }
}

/// Process-local storage, used when nothing should outlive the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: &[(&str, &str)]) -> Self {
        Self {
            items: Mutex::new(
                items
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .items
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(key)
            .cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_missing_file_when_reading_then_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("storage.json"));

        assert_eq!(storage.get_item("token").unwrap(), None);
        assert!(!storage.path().exists());
    }

    #[test]
    fn given_item_when_setting_then_survives_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/storage.json");

        FileStorage::new(&path).set_item("token", "abc").unwrap();
        let reopened = FileStorage::new(&path);

        assert_eq!(reopened.get_item("token").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn given_two_keys_when_removing_one_then_other_remains() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("storage.json"));
        storage.set_item("token", "abc").unwrap();
        storage.set_item("user", "{}").unwrap();

        storage.remove_item("token").unwrap();

        assert_eq!(storage.get_item("token").unwrap(), None);
        assert_eq!(storage.get_item("user").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn given_missing_key_when_removing_then_succeeds_without_creating_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("storage.json"));

        storage.remove_item("token").unwrap();

        assert!(!storage.path().exists());
    }

    #[test]
    fn given_corrupt_file_when_reading_then_returns_serialize_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "[1, 2").unwrap();

        let result = FileStorage::new(&path).get_item("token");

        assert!(matches!(result, Err(StorageError::Serialize(_))));
    }

    #[test]
    fn given_corrupt_file_when_setting_then_overwrites() {
        // Arrange
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, r#"{"token": "abc"#).unwrap();
        let storage = FileStorage::new(&path);

        // Act
        storage.set_item("token", "fresh").unwrap();

        // Assert
        assert_eq!(storage.get_item("token").unwrap().as_deref(), Some("fresh"));
        assert_eq!(storage.get_item("user").unwrap(), None);
    }

    #[test]
    fn given_corrupt_file_when_removing_then_resets_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "[1, 2").unwrap();
        let storage = FileStorage::new(&path);

        storage.remove_item("token").unwrap();

        assert_eq!(storage.get_item("token").unwrap(), None);
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");
    }

    #[test]
    fn given_write_when_setting_then_leaves_no_temp_files_behind() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("storage.json"));

        storage.set_item("token", "abc").unwrap();
        storage.set_item("user", "{}").unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn given_memory_storage_when_overwriting_then_keeps_latest_value() {
        let storage = MemoryStorage::with_items(&[("token", "a")]);

        storage.set_item("token", "b").unwrap();

        assert_eq!(storage.get_item("token").unwrap().as_deref(), Some("b"));
        assert_eq!(storage.len(), 1);
    }
}
