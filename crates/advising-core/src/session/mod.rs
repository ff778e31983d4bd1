//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the signed-in session and the user role
//! - `store`: typed access to the persisted session keys
//! - `guard`: page-entry admission checks

mod guard;
mod model;
mod store;

pub use guard::{GuardRejection, SessionGuard};
pub use model::{Session, SessionSnapshot, UserRole};
pub use store::{SessionStore, keys};
