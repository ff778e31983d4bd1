//! Typed access to session keys in persistent client storage.

use std::sync::Arc;

use crate::error::Result;
use crate::session::model::{Session, SessionSnapshot};
use crate::storage::ClientStorage;
use crate::theme::ThemeMode;

/// Storage key names shared by every page.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "accessToken";
    pub const USER_TYPE: &str = "userType";
    pub const USER_NAME: &str = "userName";
    pub const ACCOUNT_ID: &str = "accountId";
    pub const THEME: &str = "theme";
}

/// Session and preference accessors over a [`ClientStorage`].
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn ClientStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self { storage }
    }

    /// Reads the stored session keys without judging them.
    pub fn snapshot(&self) -> Result<SessionSnapshot> {
        Ok(SessionSnapshot {
            token: self.storage.get(keys::ACCESS_TOKEN)?,
            role: self.storage.get(keys::USER_TYPE)?,
            display_name: self.storage.get(keys::USER_NAME)?,
            account_id: self.storage.get(keys::ACCOUNT_ID)?,
        })
    }

    /// Persists a session issued by the external login flow.
    pub fn save(&self, session: &Session) -> Result<()> {
        self.storage.set(keys::ACCESS_TOKEN, &session.token)?;
        self.storage.set(keys::USER_TYPE, session.role.as_str())?;
        self.storage.set(keys::USER_NAME, &session.display_name)?;
        match &session.account_id {
            Some(id) => self.storage.set(keys::ACCOUNT_ID, id)?,
            None => self.storage.remove(keys::ACCOUNT_ID)?,
        }
        tracing::debug!(role = %session.role, "session saved");
        Ok(())
    }

    /// Clears all client state, theme preference included.
    pub fn clear_all(&self) -> Result<()> {
        self.storage.clear()
    }

    pub fn theme(&self) -> Result<ThemeMode> {
        let stored = self.storage.get(keys::THEME)?;
        Ok(ThemeMode::from_stored(stored.as_deref()))
    }

    pub fn set_theme(&self, mode: ThemeMode) -> Result<()> {
        self.storage.set(keys::THEME, mode.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserRole;
    use crate::storage::MemoryClientStorage;

    fn store() -> (Arc<MemoryClientStorage>, SessionStore) {
        let storage = Arc::new(MemoryClientStorage::new());
        (storage.clone(), SessionStore::new(storage))
    }

    #[test]
    fn test_save_then_snapshot() {
        let (_, store) = store();
        let session =
            Session::new("tok-1", UserRole::Student, "Ada Obi").with_account_id("student_7");
        store.save(&session).unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.token.as_deref(), Some("tok-1"));
        assert_eq!(snapshot.parsed_role(), Some(UserRole::Student));
        assert_eq!(snapshot.display_name.as_deref(), Some("Ada Obi"));
        assert_eq!(snapshot.account_id.as_deref(), Some("student_7"));
    }

    #[test]
    fn test_clear_all_drops_theme_too() {
        let (storage, store) = store();
        store
            .save(&Session::new("tok", UserRole::Lecturer, "Dr. Bello"))
            .unwrap();
        store.set_theme(ThemeMode::Dark).unwrap();

        store.clear_all().unwrap();

        assert!(storage.keys().unwrap().is_empty());
        assert_eq!(store.theme().unwrap(), ThemeMode::Light);
    }

    #[test]
    fn test_save_without_account_removes_stale_id() {
        let (storage, store) = store();
        storage.set(keys::ACCOUNT_ID, "old").unwrap();
        store
            .save(&Session::new("tok", UserRole::Lecturer, "Dr. Bello"))
            .unwrap();
        assert!(storage.get(keys::ACCOUNT_ID).unwrap().is_none());
    }
}
