use std::time::Duration;

use advising_core::config::DocumentDbConfig;
use advising_core::document::{CollectionQuery, Document, DocumentStore, SortDirection};
use advising_core::fetch::{FetchError, SESSION_EXPIRED_MESSAGE};
use advising_core::{AdvisingError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::value::{decode_fields, encode_value};

pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have permission to view this data.";

pub const UNAVAILABLE_MESSAGE: &str =
    "The document database is currently unavailable. Please try again later.";

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl RawDocument {
    fn into_document(self) -> Document {
        let id = self.name.rsplit('/').next().unwrap_or_default().to_string();
        Document::new(id, decode_fields(&self.fields))
    }
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    document: Option<RawDocument>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// REST client for one Firestore database, authenticated per call with the
/// session's ID token.
#[derive(Clone)]
pub struct FirestoreClient {
    client: Client,
    config: DocumentDbConfig,
}

impl FirestoreClient {
    pub fn new(config: DocumentDbConfig, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AdvisingError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.config.endpoint.trim_end_matches('/'),
            self.config.project_id,
            self.config.database
        )
    }

    async fn execute(&self, request: RequestBuilder, token: &str) -> std::result::Result<(u16, String), FetchError> {
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("Failed to read response body: {e}")))?;
        Ok((status, body))
    }
}

/// Maps a failed response onto the fetch taxonomy.
pub(crate) fn classify_failure(status: u16, body: &str) -> FetchError {
    let error = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);
    let code = error.as_ref().and_then(|e| e.status.as_deref()).unwrap_or("");
    let message = error.as_ref().and_then(|e| e.message.clone());

    match (code, status) {
        ("PERMISSION_DENIED", _) | (_, 403) => FetchError::Unauthorized {
            message: PERMISSION_DENIED_MESSAGE.to_string(),
        },
        ("UNAUTHENTICATED", _) | (_, 401) => FetchError::Unauthorized {
            message: SESSION_EXPIRED_MESSAGE.to_string(),
        },
        ("UNAVAILABLE", _) | (_, 503) => FetchError::Status {
            status: 503,
            message: UNAVAILABLE_MESSAGE.to_string(),
        },
        ("NOT_FOUND", _) | (_, 404) => FetchError::not_found(
            "document",
            message.unwrap_or_else(|| "Document not found.".to_string()),
        ),
        _ => FetchError::Status {
            status,
            message: message.unwrap_or_else(|| format!("HTTP error {status}")),
        },
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn structured_query(query: &CollectionQuery) -> Value {
    let mut structured = json!({ "from": [{ "collectionId": query.collection }] });

    let filters: Vec<Value> = query
        .filters
        .iter()
        .map(|f| {
            json!({ "fieldFilter": {
                "field": { "fieldPath": f.field },
                "op": "EQUAL",
                "value": encode_value(&f.value),
            }})
        })
        .collect();
    match filters.len() {
        0 => {}
        1 => structured["where"] = filters.into_iter().next().unwrap_or(Value::Null),
        _ => structured["where"] = json!({ "compositeFilter": { "op": "AND", "filters": filters } }),
    }

    if let Some((field, direction)) = &query.order_by {
        let direction = match direction {
            SortDirection::Ascending => "ASCENDING",
            SortDirection::Descending => "DESCENDING",
        };
        structured["orderBy"] = json!([{ "field": { "fieldPath": field }, "direction": direction }]);
    }

    json!({ "structuredQuery": structured })
}

fn decode_body<T: for<'de> Deserialize<'de>>(body: &str) -> std::result::Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn get(&self, token: &str, collection: &str, id: &str) -> std::result::Result<Option<Document>, FetchError> {
        let url = format!("{}/{collection}/{id}", self.documents_root());
        tracing::debug!(collection, id, "document get");

        let (status, body) = self.execute(self.client.get(&url), token).await?;
        if status == 404 {
            return Ok(None);
        }
        if !is_success(status) {
            return Err(classify_failure(status, &body));
        }
        let raw: RawDocument = decode_body(&body)?;
        Ok(Some(raw.into_document()))
    }

    async fn query(&self, token: &str, query: &CollectionQuery) -> std::result::Result<Vec<Document>, FetchError> {
        let url = format!("{}:runQuery", self.documents_root());
        tracing::debug!(collection = %query.collection, "document query");

        let request = self.client.post(&url).json(&structured_query(query));
        let (status, body) = self.execute(request, token).await?;
        if !is_success(status) {
            return Err(classify_failure(status, &body));
        }
        let items: Vec<RunQueryItem> = decode_body(&body)?;
        Ok(items
            .into_iter()
            .filter_map(|item| item.document)
            .map(RawDocument::into_document)
            .collect())
    }

    /// Reads the whole collection as one unfiltered `runQuery`.
    async fn list(&self, token: &str, collection: &str) -> std::result::Result<Vec<Document>, FetchError> {
        tracing::debug!(collection, "document list");
        self.query(token, &CollectionQuery::new(collection)).await
    }
}
