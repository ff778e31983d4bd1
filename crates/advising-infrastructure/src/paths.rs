//! Path management for advising client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/student-advising/
//! ├── config.toml           # AppConfig
//! └── local_storage.toml    # persisted session and theme
//! ```

use std::path::PathBuf;

use advising_core::{AdvisingError, Result};

const APP_DIR: &str = "student-advising";

pub struct AdvisingPaths;

impl AdvisingPaths {
    /// Platform config directory joined with the application directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| AdvisingError::config("Cannot find the user config directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn storage_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("local_storage.toml"))
    }
}
