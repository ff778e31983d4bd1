use thiserror::Error;

/// Inline message for a request that never got a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error or failed to connect to the server.";

/// Inline message shown while the session is being torn down.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired or unauthorized. Please log in again.";

/// Statuses that end the session wherever they come from.
pub fn is_auth_status(status: u16) -> bool {
    matches!(status, 401 | 403 | 422)
}

/// Why a fetch did not produce a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),

    /// Non-2xx status. `message` is the body's message or `HTTP error {status}`.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// HTTP succeeded but the payload reported `success: false`.
    #[error("payload failure: {}", message.as_deref().unwrap_or("no message"))]
    Payload { message: Option<String> },

    /// Authentication failure; callers clear the session and leave the page.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    NotFound { entity: String, message: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    /// Client-side validation failure; no request was made.
    #[error("{0}")]
    Validation(String),
}

impl FetchError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            message: SESSION_EXPIRED_MESSAGE.to_string(),
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The text a page shows in the container that triggered the fetch.
    ///
    /// `fallback` is the page's own wording for a failure that carried no
    /// message of its own.
    pub fn inline_message(&self, fallback: &str) -> String {
        match self {
            Self::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Status { message, .. } => message.clone(),
            Self::Payload { message } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(fallback)
                .to_string(),
            Self::Unauthorized { message } => message.clone(),
            Self::NotFound { message, .. } => message.clone(),
            Self::Decode(_) => fallback.to_string(),
            Self::Validation(message) => message.clone(),
        }
    }
}
