//! String key/value storage, shaped like the browser's `localStorage`.
//!
//! The progress store only ever talks to the [`Storage`] trait. Two
//! backends ship with the crate: [`MemoryStorage`] for tests and headless
//! runs, and [`JsonFileStorage`] which keeps the whole map in one JSON
//! object on disk.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// File-backed storage. The file is rewritten after every mutation.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Open `path`, starting empty if the file does not exist yet.
    ///
    /// A file that is not a JSON object of strings is moved aside to
    /// `<path>.corrupt` and the store starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => match serde_json::from_str(&text) {
                Ok(items) => items,
                Err(e) => {
                    let aside = corrupt_path(&path);
                    log::warn!(
                        "{} is unreadable ({}), moved to {}",
                        path.display(),
                        e,
                        aside.display()
                    );
                    fs::rename(&path, &aside)?;
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("opened {} ({} keys)", path.display(), items.len());
        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

impl Storage for JsonFileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Memory storage whose writes to one key always fail.
#[cfg(test)]
pub(crate) struct RejectingStorage {
    inner: MemoryStorage,
    key: &'static str,
}

#[cfg(test)]
impl RejectingStorage {
    pub(crate) fn new(key: &'static str) -> Self {
        Self {
            inner: MemoryStorage::new(),
            key,
        }
    }
}

#[cfg(test)]
impl Storage for RejectingStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.key {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into());
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut s = MemoryStorage::new();
        assert_eq!(s.get_item("a").unwrap(), None);
        s.set_item("a", "1").unwrap();
        s.set_item("a", "2").unwrap();
        assert_eq!(s.get_item("a").unwrap().as_deref(), Some("2"));
        s.remove_item("a").unwrap();
        s.remove_item("a").unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn test_json_file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("village.json");
        {
            let mut s = JsonFileStorage::open(&path).unwrap();
            s.set_item("villagePoints", "42").unwrap();
            s.set_item("villageAge", "senior").unwrap();
            s.remove_item("villageAge").unwrap();
        }
        let s = JsonFileStorage::open(&path).unwrap();
        assert_eq!(s.get_item("villagePoints").unwrap().as_deref(), Some("42"));
        assert_eq!(s.get_item("villageAge").unwrap(), None);
    }

    #[test]
    fn test_json_file_sets_aside_unreadable_content() {
        let dir = tempfile::tempdir().unwrap();
        let cases = [
            ("array.json", "[1, 2]"),
            ("cut.json", r#"{"villagePoints": "40", "#),
        ];
        for (name, content) in cases {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();

            let mut s = JsonFileStorage::open(&path).unwrap();
            assert_eq!(s.get_item("villagePoints").unwrap(), None);
            let aside = corrupt_path(&path);
            assert_eq!(fs::read_to_string(&aside).unwrap(), content);

            s.set_item("villagePoints", "5").unwrap();
            let s = JsonFileStorage::open(&path).unwrap();
            assert_eq!(s.get_item("villagePoints").unwrap().as_deref(), Some("5"));
        }
    }

    #[test]
    fn test_storage_through_mut_ref() {
        fn put(mut s: impl Storage) {
            s.set_item("k", "v").unwrap();
        }
        let mut s = MemoryStorage::new();
        put(&mut s);
        assert_eq!(s.len(), 1);
    }
}
