//! Session domain model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of account a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Lecturer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Lecturer => "lecturer",
        }
    }

    /// Landing page for this role.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Student => "student/dashboard.html",
            Self::Lecturer => "lecturer/dashboard.html",
        }
    }

    pub fn profile_path(&self) -> &'static str {
        match self {
            Self::Student => "student/profile.html",
            Self::Lecturer => "lecturer/profile.html",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "lecturer" => Ok(Self::Lecturer),
            other => Err(format!("unknown user role: {other}")),
        }
    }
}

/// An authenticated session, as admitted by the guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer credential.
    pub token: String,
    pub role: UserRole,
    pub display_name: String,
    /// Document-database key of the signed-in account, when known.
    pub account_id: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, role: UserRole, display_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            role,
            display_name: display_name.into(),
            account_id: None,
        }
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }
}

/// Raw view of what storage currently holds, before any admission check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    /// Stored role string; kept raw so the guard can tell "missing" from "unknown".
    pub role: Option<String>,
    pub display_name: Option<String>,
    pub account_id: Option<String>,
}

impl SessionSnapshot {
    /// A token that is absent or blank counts as no token.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn parsed_role(&self) -> Option<UserRole> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}
