//! Document-database client over the Firestore REST API.

mod client;
mod value;

pub use client::{FirestoreClient, PERMISSION_DENIED_MESSAGE, UNAVAILABLE_MESSAGE};
pub use value::{decode_fields, decode_value, encode_value};
