//! Document-database contract.
//!
//! # Module Structure
//!
//! - `model`: documents and collection queries
//! - `store`: the `DocumentStore` seam
//! - `join`: client-side join of two fetched collections

mod join;
mod model;
mod store;

pub use join::{Joined, index_by_id, resolve_join};
pub use model::{CollectionQuery, Document, FieldFilter, SortDirection, collections};
pub use store::DocumentStore;
