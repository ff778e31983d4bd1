//! Application layer for the student advising client.
//!
//! Page controllers drive a [`PageSurface`](surface::PageSurface) through the
//! shared [`AppContext`](context::AppContext): they admit the stored session,
//! fetch through the REST backend or the document database, and render
//! every outcome, failures included, into the page's own containers.

pub mod bootstrap;
pub mod context;
pub mod error;
pub mod pages;
pub mod render;
pub mod surface;

pub use bootstrap::{build_context, file_storage};
pub use context::{AppContext, Landing};
pub use error::{PageError, PageResult};
pub use surface::PageSurface;
