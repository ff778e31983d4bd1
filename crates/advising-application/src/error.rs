use advising_core::AdvisingError;
use advising_core::form::FormError;
use advising_core::session::GuardRejection;
use thiserror::Error;

use crate::render::RenderError;

/// Failures a page controller reports to its host.
///
/// Remote failures never show up here: they are rendered inline. What is
/// left is page entry being refused and local faults.
#[derive(Debug, Error)]
pub enum PageError {
    /// The session guard refused entry; the page has navigated to login.
    #[error("page entry refused: {0}")]
    Rejected(#[from] GuardRejection),

    #[error(transparent)]
    Local(#[from] AdvisingError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("document database is not configured")]
    DocumentStoreMissing,

    #[error("page has not been loaded")]
    NotLoaded,
}

impl PageError {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

pub type PageResult<T> = std::result::Result<T, PageError>;
