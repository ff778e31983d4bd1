//! Shared fakes for page controller tests.
//!
//! Both fakes record every call so tests can prove that a page made no
//! request at all.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use advising_application::AppContext;
use advising_core::config::AppConfig;
use advising_core::document::{CollectionQuery, Document, DocumentStore, SortDirection};
use advising_core::fetch::{ApiRequest, FetchError, Method, RawResponse, Transport, TransportError};
use advising_core::session::{Session, SessionStore, UserRole};
use advising_core::storage::{ClientStorage, MemoryClientStorage};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

pub const LOGIN_PAGE: &str = "index.html";

enum Canned {
    Reply(RawResponse),
    Unreachable,
}

/// Transport answering from canned responses keyed by method and path.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<(&'static str, String), Canned>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.routes.lock().unwrap().insert(
            (method.as_str(), path.to_string()),
            Canned::Reply(RawResponse::new(status, body.to_string())),
        );
    }

    /// Makes `path` fail as if the server could not be reached.
    pub fn unreachable(&self, method: Method, path: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert((method.as_str(), path.to_string()), Canned::Unreachable);
    }

    /// Holds every request to `path` until the returned gate is notified.
    pub fn gate(&self, path: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(path.to_string(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.calls.lock().unwrap().push(request.clone());

        let gate = self.gates.lock().unwrap().get(&request.path).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let routes = self.routes.lock().unwrap();
        match routes.get(&(request.method.as_str(), request.path.clone())) {
            Some(Canned::Reply(response)) => Ok(response.clone()),
            Some(Canned::Unreachable) => Err(TransportError("connection refused".to_string())),
            None => Ok(RawResponse::new(
                404,
                r#"{"success":false,"message":"no such route"}"#,
            )),
        }
    }
}

/// In-memory document database.
#[derive(Default)]
pub struct FakeDocumentStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    failures: Mutex<HashMap<String, FetchError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeDocumentStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, collection: &str, id: &str, fields: Value) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Document::from_json(id, fields));
    }

    /// Every read of `collection` fails with `error`.
    pub fn fail(&self, collection: &str, error: FetchError) {
        self.failures
            .lock()
            .unwrap()
            .insert(collection.to_string(), error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn read(&self, op: &str, collection: &str) -> Result<Vec<Document>, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{op} {collection}"));
        if let Some(error) = self.failures.lock().unwrap().get(collection) {
            return Err(error.clone());
        }
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn get(&self, _token: &str, collection: &str, id: &str) -> Result<Option<Document>, FetchError> {
        Ok(self
            .read("get", collection)?
            .into_iter()
            .find(|d| d.id == id))
    }

    async fn query(&self, _token: &str, query: &CollectionQuery) -> Result<Vec<Document>, FetchError> {
        let mut documents: Vec<Document> = self
            .read("query", &query.collection)?
            .into_iter()
            .filter(|d| {
                query
                    .filters
                    .iter()
                    .all(|f| d.fields.get(&f.field) == Some(&f.value))
            })
            .collect();

        if let Some((field, direction)) = &query.order_by {
            documents.sort_by(|a, b| {
                let a = a.fields.get(field).and_then(Value::as_str).unwrap_or_default();
                let b = b.fields.get(field).and_then(Value::as_str).unwrap_or_default();
                match direction {
                    SortDirection::Ascending => a.cmp(b),
                    SortDirection::Descending => b.cmp(a),
                }
            });
        }
        Ok(documents)
    }

    async fn list(&self, _token: &str, collection: &str) -> Result<Vec<Document>, FetchError> {
        self.read("list", collection)
    }
}

/// A context over fresh in-memory storage and the given fakes.
pub struct Harness {
    pub ctx: Arc<AppContext>,
    pub storage: Arc<MemoryClientStorage>,
    pub transport: Arc<FakeTransport>,
    pub documents: Arc<FakeDocumentStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let storage = Arc::new(MemoryClientStorage::new());
        let transport = FakeTransport::new();
        let documents = FakeDocumentStore::new();
        let ctx = AppContext::new(config, storage.clone(), transport.clone())
            .unwrap()
            .with_document_store(documents.clone());
        Self {
            ctx: Arc::new(ctx),
            storage,
            transport,
            documents,
        }
    }

    pub fn sign_in(&self, role: UserRole, name: &str) -> &Self {
        let session = Session::new("tok-123", role, name);
        SessionStore::new(self.storage.clone()).save(&session).unwrap();
        self
    }

    pub fn sign_in_student(&self, account_id: &str) -> &Self {
        let session = Session::new("tok-123", UserRole::Student, "Ada Obi").with_account_id(account_id);
        SessionStore::new(self.storage.clone()).save(&session).unwrap();
        self
    }

    pub fn stored_keys(&self) -> Vec<String> {
        self.storage.keys().unwrap()
    }

    pub async fn location(&self) -> Option<String> {
        self.ctx
            .surface_snapshot()
            .await
            .location()
            .map(str::to_string)
    }

    pub async fn html(&self, id: &str) -> String {
        self.ctx
            .surface_snapshot()
            .await
            .html(id)
            .unwrap_or_default()
            .to_string()
    }

    pub async fn text(&self, id: &str) -> String {
        self.ctx
            .surface_snapshot()
            .await
            .text(id)
            .unwrap_or_default()
            .to_string()
    }
}
