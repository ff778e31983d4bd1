//! [`ClientStorage`] persisted to a TOML key/value file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use advising_core::Result;
use advising_core::storage::ClientStorage;

use super::atomic_toml::AtomicTomlFile;

type Entries = BTreeMap<String, String>;

/// Survives process restarts the way browser storage survives page loads.
pub struct FileClientStorage {
    file: AtomicTomlFile<Entries>,
}

impl FileClientStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    fn entries(&self) -> Result<Entries> {
        Ok(self.file.load()?.unwrap_or_default())
    }
}

impl ClientStorage for FileClientStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(Entries::new(), |entries| {
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.file.update(Entries::new(), |entries| {
            entries.remove(key);
            Ok(())
        })
    }

    fn clear(&self) -> Result<()> {
        self.file.update(Entries::new(), |entries| {
            entries.clear();
            Ok(())
        })?;
        tracing::debug!(path = %self.file.path().display(), "client storage cleared");
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries()?.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use advising_core::session::{Session, SessionStore, UserRole};
    use advising_core::theme::ThemeMode;
    use tempfile::TempDir;

    #[test]
    fn test_values_persist_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local_storage.toml");

        FileClientStorage::new(path.clone())
            .set("accessToken", "abc.def")
            .unwrap();

        let reopened = FileClientStorage::new(path);
        assert_eq!(reopened.get("accessToken").unwrap().as_deref(), Some("abc.def"));
        assert_eq!(reopened.keys().unwrap(), vec!["accessToken".to_string()]);
    }

    #[test]
    fn test_session_store_over_file() {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(FileClientStorage::new(dir.path().join("s.toml")));
        let store = SessionStore::new(storage.clone());

        store
            .save(&Session::new("tok", UserRole::Lecturer, "Dr. Bello"))
            .unwrap();
        store.set_theme(ThemeMode::Dark).unwrap();
        assert_eq!(store.theme().unwrap(), ThemeMode::Dark);

        store.clear_all().unwrap();
        assert!(storage.keys().unwrap().is_empty());
        assert!(store.snapshot().unwrap().token.is_none());
    }

    #[test]
    fn test_remove_missing_key_is_fine() {
        let dir = TempDir::new().unwrap();
        let storage = FileClientStorage::new(dir.path().join("s.toml"));
        storage.remove("nothing").unwrap();
        assert!(storage.get("nothing").unwrap().is_none());
    }
}
