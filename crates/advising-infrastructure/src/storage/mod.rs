//! File-backed storage primitives.

mod atomic_toml;
mod file_client_storage;

pub use atomic_toml::AtomicTomlFile;
pub use file_client_storage::FileClientStorage;
