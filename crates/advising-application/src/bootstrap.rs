//! Wiring of a production [`AppContext`] from configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use advising_core::config::AppConfig;
use advising_core::storage::ClientStorage;
use advising_infrastructure::{AdvisingPaths, FileClientStorage, FirestoreClient, ReqwestTransport};

use crate::context::AppContext;
use crate::error::PageResult;

/// File-backed client storage at `path`, or at the default location.
pub fn file_storage(path: Option<PathBuf>) -> PageResult<Arc<dyn ClientStorage>> {
    let path = match path {
        Some(path) => path,
        None => AdvisingPaths::storage_file()?,
    };
    tracing::debug!(path = %path.display(), "using file client storage");
    Ok(Arc::new(FileClientStorage::new(path)))
}

/// Builds the context with the reqwest transport and, when configured, the
/// document database client.
pub fn build_context(config: AppConfig, storage: Arc<dyn ClientStorage>) -> PageResult<AppContext> {
    let timeout = config.request_timeout_secs.map(Duration::from_secs);
    let transport = ReqwestTransport::new(config.backend_base_url.clone(), timeout)?;
    tracing::info!(backend = transport.base_url(), "backend transport ready");

    let document_db = config.document_db.clone();
    let mut context = AppContext::new(config, storage, Arc::new(transport))?;

    match document_db {
        Some(db) => {
            tracing::info!(project = %db.project_id, database = %db.database, "document database configured");
            let client = FirestoreClient::new(db, timeout)?;
            context = context.with_document_store(Arc::new(client));
        }
        None => tracing::debug!("no document database configured"),
    }
    Ok(context)
}
