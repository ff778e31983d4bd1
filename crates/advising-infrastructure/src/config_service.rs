//! Configuration service.
//!
//! Loads [`AppConfig`] from `config.toml`, applies environment overrides and
//! caches the result.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use advising_core::config::{AppConfig, DocumentDbConfig};
use advising_core::{AdvisingError, Result};

use crate::paths::AdvisingPaths;
use crate::storage::AtomicTomlFile;

pub const ENV_BACKEND_URL: &str = "ADVISING_BACKEND_URL";
pub const ENV_DOCUMENT_PROJECT: &str = "ADVISING_DOCUMENT_PROJECT";
pub const ENV_LOGIN_PAGE: &str = "ADVISING_LOGIN_PAGE";

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses `<config_dir>/student-advising/config.toml`.
    pub fn with_default_location() -> Result<Self> {
        Ok(Self::new(AdvisingPaths::config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading it on first access.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let mut loaded = self.load_file()?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = None;
    }

    /// A missing or empty file yields the defaults.
    fn load_file(&self) -> Result<AppConfig> {
        let file = AtomicTomlFile::<AppConfig>::new(self.path.clone());
        let config = file
            .load()
            .map_err(|e| AdvisingError::config(format!("{}: {e}", self.path.display())))?;
        match config {
            Some(config) => {
                tracing::debug!(path = %self.path.display(), "loaded configuration");
                Ok(config)
            }
            None => {
                tracing::debug!(path = %self.path.display(), "no configuration file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }
}

/// Applies the `ADVISING_*` overrides. `lookup` abstracts the environment.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(ENV_BACKEND_URL) {
        config.backend_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(page) = non_empty(ENV_LOGIN_PAGE) {
        config.login_page = page;
    }
    if let Some(project) = non_empty(ENV_DOCUMENT_PROJECT) {
        match config.document_db.as_mut() {
            Some(db) => db.project_id = project,
            None => config.document_db = Some(DocumentDbConfig::new(project)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(dir.path().join("config.toml"));
        let config = service.load_file().unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_file_values_are_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "backend_base_url = \"https://api.example.edu\"\nauto_close_delay_ms = 100\n",
        )
        .unwrap();

        let config = ConfigService::new(path).load_file().unwrap();
        assert_eq!(config.backend_base_url, "https://api.example.edu");
        assert_eq!(config.auto_close_delay_ms, 100);
        assert!(config.document_db.is_none());
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "backend_base_url = [").unwrap();
        assert!(ConfigService::new(path).load_file().unwrap_err().is_config());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_BACKEND_URL, "http://10.0.0.5:5000/"),
                (ENV_DOCUMENT_PROJECT, "advising-test"),
                (ENV_LOGIN_PAGE, ""),
            ]),
        );
        assert_eq!(config.backend_base_url, "http://10.0.0.5:5000");
        assert_eq!(config.login_page, "index.html");
        let db = config.document_db.unwrap();
        assert_eq!(db.project_id, "advising-test");
        assert_eq!(db.database, "(default)");
    }
}
