//! Domain layer for the student advising client.
//!
//! Holds the types every page controller shares: the session and its guard,
//! the fetch contract for the REST backend and the document database, the
//! typed payload schemas, and the small pure pieces (formatting, category
//! filtering, form state, request epochs) that rendering relies on.

pub mod config;
pub mod document;
pub mod epoch;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod form;
pub mod payload;
pub mod session;
pub mod storage;
pub mod theme;
pub mod view;

pub use error::{AdvisingError, Result};
pub use fetch::FetchError;
