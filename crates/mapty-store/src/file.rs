//! File-backed key-value store.
//!
//! All keys live in a single JSON object file (`{"workouts": "[...]"}`). The
//! file is read once when the store is opened and rewritten wholesale on every
//! change.

use mapty_core::error::{MaptyError, Result};
use mapty_core::ports::KeyValueStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileKeyValueStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let items = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    MaptyError::Serialization(format!(
                        "Storage file {} is not a JSON object of strings: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened storage file {} with {} keys", path.display(), items.len());
        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.items)
            .map_err(|e| MaptyError::Serialization(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.items.insert(key.to_string(), value.to_string());
        self.flush().inspect_err(|_| match previous {
            Some(previous) => {
                self.items.insert(key.to_string(), previous);
            }
            None => {
                self.items.remove(key);
            }
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if let Some(previous) = self.items.remove(key) {
            self.flush().inspect_err(|_| {
                self.items.insert(key.to_string(), previous);
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(dir.path().join("storage.json")).unwrap();

        assert_eq!(store.get_item("workouts").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileKeyValueStore::open(&path).unwrap();
        store.set_item("workouts", r#"[{"kind":"running"}]"#).unwrap();
        store.set_item("other", "value").unwrap();

        let reopened = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(
            reopened.get_item("workouts").unwrap().as_deref(),
            Some(r#"[{"kind":"running"}]"#)
        );
        assert_eq!(reopened.get_item("other").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_remove_item_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileKeyValueStore::open(&path).unwrap();
        store.set_item("workouts", "[]").unwrap();
        store.remove_item("workouts").unwrap();

        let reopened = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(reopened.get_item("workouts").unwrap(), None);
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileKeyValueStore::open(&path).unwrap();
        store.set_item("workouts", "[]").unwrap();

        // A directory in place of the file makes every flush fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.set_item("workouts", "[1]").is_err());
        assert_eq!(store.get_item("workouts").unwrap().as_deref(), Some("[]"));

        assert!(store.set_item("other", "value").is_err());
        assert_eq!(store.get_item("other").unwrap(), None);

        assert!(store.remove_item("workouts").is_err());
        assert_eq!(store.get_item("workouts").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_rejects_non_object_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let result = FileKeyValueStore::open(&path);
        assert!(matches!(result, Err(MaptyError::Serialization(_))));
    }
}
