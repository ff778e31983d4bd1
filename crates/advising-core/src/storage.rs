//! Persistent client-side key/value storage.
//!
//! Pages never read storage directly; they go through
//! [`crate::session::SessionStore`], which owns the key names.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{AdvisingError, Result};

/// Key/value storage that survives page loads.
///
/// Methods are synchronous: the browser storage this stands in for is
/// synchronous too, and every implementation keeps operations short.
pub trait ClientStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Removes every key.
    fn clear(&self) -> Result<()>;

    fn keys(&self) -> Result<Vec<String>>;
}

/// In-process storage. Used by tests and by throwaway CLI runs.
#[derive(Debug, Default)]
pub struct MemoryClientStorage {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryClientStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with the given entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }

    fn poisoned() -> AdvisingError {
        AdvisingError::storage("in-memory storage lock poisoned")
    }
}

impl ClientStorage for MemoryClientStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.clear();
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryClientStorage::new();
        storage.set("theme", "dark").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));

        storage.remove("theme").unwrap();
        assert!(storage.get("theme").unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_everything() {
        let storage = MemoryClientStorage::with_entries([("a", "1"), ("b", "2")]);
        assert_eq!(storage.keys().unwrap(), vec!["a", "b"]);

        storage.clear().unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }
}
