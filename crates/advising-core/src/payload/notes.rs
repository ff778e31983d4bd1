use serde::{Deserialize, Serialize};

use super::lenient;
use crate::fetch::ApiPayload;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisingNote {
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: String,
    /// ISO-8601, with or without an offset.
    pub created_at: Option<String>,
    pub author_name: Option<String>,
}

/// `GET /api/students/{id}/notes`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NotesPayload {
    #[serde(default)]
    pub notes: Vec<AdvisingNote>,
}

impl ApiPayload for NotesPayload {}

/// Body of `POST /api/students/{id}/notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NoteCreated {
    pub note: Option<AdvisingNote>,
}

impl ApiPayload for NoteCreated {}
