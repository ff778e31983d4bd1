//! Infrastructure for the advising client: the reqwest transport, the
//! document-database REST client, file-backed client storage and
//! configuration loading.

pub mod config_service;
pub mod firestore;
pub mod http_transport;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::firestore::FirestoreClient;
pub use crate::http_transport::ReqwestTransport;
pub use crate::paths::AdvisingPaths;
pub use crate::storage::FileClientStorage;
