use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::fetch::FetchError;

/// Collection names.
pub mod collections {
    pub const USERS: &str = "users";
    pub const RESULTS: &str = "results";
    pub const COURSES: &str = "courses";
}

/// A fetched document: its id plus its fields as plain JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Builds a document from a JSON object literal. Non-objects give no fields.
    pub fn from_json(id: impl Into<String>, value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(id, fields)
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|e| {
            FetchError::Decode(format!("document '{}' has an unexpected shape: {e}", self.id))
        })
    }

    /// Decodes every document, keeping ids alongside.
    pub fn decode_all<T: DeserializeOwned>(documents: &[Document]) -> Result<Vec<(String, T)>, FetchError> {
        documents
            .iter()
            .map(|doc| doc.decode().map(|record| (doc.id.clone(), record)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Equality filter on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

/// One filtered, ordered read of a single collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionQuery {
    pub collection: String,
    pub filters: Vec<FieldFilter>,
    pub order_by: Option<(String, SortDirection)>,
}

impl CollectionQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: None,
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }
}
