use async_trait::async_trait;

use super::model::{CollectionQuery, Document};
use crate::fetch::FetchError;

/// Read access to the document database.
///
/// Each method is exactly one remote read. Permission-denied and
/// unauthenticated answers surface as [`FetchError::Unauthorized`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when the document does not exist.
    async fn get(&self, token: &str, collection: &str, id: &str) -> Result<Option<Document>, FetchError>;

    async fn query(&self, token: &str, query: &CollectionQuery) -> Result<Vec<Document>, FetchError>;

    /// Every document in a collection, single page.
    async fn list(&self, token: &str, collection: &str) -> Result<Vec<Document>, FetchError>;
}
