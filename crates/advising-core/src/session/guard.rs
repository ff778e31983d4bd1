//! Page-entry admission.

use thiserror::Error;

use crate::session::model::{Session, SessionSnapshot, UserRole};

/// Why a page refused to initialise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardRejection {
    #[error("no session token stored")]
    MissingToken,

    #[error("stored user type {found:?} is not valid for this page")]
    RoleMismatch {
        expected: Option<UserRole>,
        found: Option<String>,
    },

    #[error("session has no account id")]
    MissingAccountId,
}

/// Decides whether a stored session may enter a page.
///
/// The guard is pure: it never touches storage or the network, so a rejected
/// page is guaranteed to have issued no request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGuard {
    role: Option<UserRole>,
    require_account_id: bool,
}

impl SessionGuard {
    /// Any signed-in user with a recognised role.
    pub fn any_role() -> Self {
        Self {
            role: None,
            require_account_id: false,
        }
    }

    pub fn for_role(role: UserRole) -> Self {
        Self {
            role: Some(role),
            require_account_id: false,
        }
    }

    /// Pages that read the document database key records by account id.
    pub fn requiring_account_id(mut self) -> Self {
        self.require_account_id = true;
        self
    }

    pub fn required_role(&self) -> Option<UserRole> {
        self.role
    }

    pub fn admit(&self, snapshot: &SessionSnapshot) -> Result<Session, GuardRejection> {
        if !snapshot.has_token() {
            return Err(GuardRejection::MissingToken);
        }

        let role = match (snapshot.parsed_role(), self.role) {
            (Some(found), Some(expected)) if found == expected => found,
            (Some(found), None) => found,
            _ => {
                return Err(GuardRejection::RoleMismatch {
                    expected: self.role,
                    found: snapshot.role.clone(),
                });
            }
        };

        let account_id = snapshot
            .account_id
            .clone()
            .filter(|id| !id.trim().is_empty());
        if self.require_account_id && account_id.is_none() {
            return Err(GuardRejection::MissingAccountId);
        }

        Ok(Session {
            token: snapshot.token.clone().unwrap_or_default(),
            role,
            display_name: snapshot.display_name.clone().unwrap_or_default(),
            account_id,
        })
    }
}
