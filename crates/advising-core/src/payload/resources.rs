use serde::{Deserialize, Serialize};

use super::lenient;
use crate::fetch::ApiPayload;
use crate::filter::Categorized;

/// An advising resource from the public catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
}

impl Resource {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            description: None,
            url: None,
            category: Some(category.into()),
        }
    }
}

impl Categorized for Resource {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// `GET /api/resources`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResourcesPayload {
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl ApiPayload for ResourcesPayload {}
