//! Client configuration models.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOGIN_PAGE: &str = "index.html";
pub const DEFAULT_AUTO_CLOSE_DELAY_MS: u64 = 2500;
pub const DEFAULT_DOCUMENT_ENDPOINT: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_DOCUMENT_DATABASE: &str = "(default)";

/// Root configuration for the advising client.
///
/// Every field has a default so a missing or partial `config.toml` still
/// yields a usable configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub backend_base_url: String,
    /// Page the client navigates to when a session is missing or rejected.
    pub login_page: String,
    /// Delay before a successful modal form closes itself.
    pub auto_close_delay_ms: u64,
    /// Optional per-request timeout. Unset means the transport default.
    pub request_timeout_secs: Option<u64>,
    /// Document database settings. Pages backed by it are unavailable
    /// when this is absent.
    pub document_db: Option<DocumentDbConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_URL.to_string(),
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
            auto_close_delay_ms: DEFAULT_AUTO_CLOSE_DELAY_MS,
            request_timeout_secs: None,
            document_db: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DocumentDbConfig {
    pub project_id: String,
    #[serde(default = "default_document_database")]
    pub database: String,
    #[serde(default = "default_document_endpoint")]
    pub endpoint: String,
}

impl DocumentDbConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: default_document_database(),
            endpoint: default_document_endpoint(),
        }
    }
}

fn default_document_database() -> String {
    DEFAULT_DOCUMENT_DATABASE.to_string()
}

fn default_document_endpoint() -> String {
    DEFAULT_DOCUMENT_ENDPOINT.to_string()
}
