//! In-memory page surface.
//!
//! Stands in for the page's DOM: named elements with content, visibility,
//! disabled state, form values and data attributes, plus body classes, the
//! current location and any alerts raised. Controllers only write here
//! through [`crate::context::AppContext`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    /// Markup produced by the renderer, already escaped.
    Html(String),
}

impl Default for Content {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub content: Content,
    pub visible: bool,
    pub disabled: bool,
    pub value: String,
    pub attributes: BTreeMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            content: Content::default(),
            visible: true,
            disabled: false,
            value: String::new(),
            attributes: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageSurface {
    page: String,
    elements: BTreeMap<String, Element>,
    body_classes: BTreeSet<String>,
    location: Option<String>,
    alerts: Vec<String>,
}

impl PageSurface {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            ..Self::default()
        }
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn set_page(&mut self, page: impl Into<String>) {
        self.page = page.into();
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    fn element_mut(&mut self, id: &str) -> &mut Element {
        self.elements.entry(id.to_string()).or_default()
    }

    pub fn set_text(&mut self, id: &str, text: impl Into<String>) {
        self.element_mut(id).content = Content::Text(text.into());
    }

    /// Replaces the element's children with rendered markup.
    pub fn set_html(&mut self, id: &str, html: impl Into<String>) {
        self.element_mut(id).content = Content::Html(html.into());
    }

    /// Plain text content, `None` when the element holds markup or is unknown.
    pub fn text(&self, id: &str) -> Option<&str> {
        match &self.element(id)?.content {
            Content::Text(text) => Some(text),
            Content::Html(_) => None,
        }
    }

    pub fn html(&self, id: &str) -> Option<&str> {
        match &self.element(id)?.content {
            Content::Html(html) => Some(html),
            Content::Text(_) => None,
        }
    }

    pub fn show(&mut self, id: &str) {
        self.element_mut(id).visible = true;
    }

    pub fn hide(&mut self, id: &str) {
        self.element_mut(id).visible = false;
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.element(id).is_some_and(|e| e.visible)
    }

    pub fn set_disabled(&mut self, id: &str, disabled: bool) {
        self.element_mut(id).disabled = disabled;
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.element(id).is_some_and(|e| e.disabled)
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) {
        self.element_mut(id).value = value.into();
    }

    pub fn value(&self, id: &str) -> &str {
        self.element(id).map_or("", |e| e.value.as_str())
    }

    pub fn set_attribute(&mut self, id: &str, name: &str, value: impl Into<String>) {
        self.element_mut(id)
            .attributes
            .insert(name.to_string(), value.into());
    }

    pub fn remove_attribute(&mut self, id: &str, name: &str) {
        self.element_mut(id).attributes.remove(name);
    }

    pub fn attribute(&self, id: &str, name: &str) -> Option<&str> {
        self.element(id)?.attributes.get(name).map(String::as_str)
    }

    pub fn add_body_class(&mut self, class: &str) {
        self.body_classes.insert(class.to_string());
    }

    pub fn remove_body_class(&mut self, class: &str) {
        self.body_classes.remove(class);
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn navigate(&mut self, location: impl Into<String>) {
        self.location = Some(location.into());
    }

    /// Where the page navigated to, if it did.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Human-readable listing of the surface, one element per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "page: {}", self.page);
        if !self.body_classes.is_empty() {
            let classes: Vec<&str> = self.body_classes.iter().map(String::as_str).collect();
            let _ = writeln!(out, "body: {}", classes.join(" "));
        }
        for (id, element) in &self.elements {
            let mut flags = Vec::new();
            if !element.visible {
                flags.push("hidden");
            }
            if element.disabled {
                flags.push("disabled");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(","))
            };
            let content = match &element.content {
                Content::Text(text) => text.clone(),
                Content::Html(html) => html.clone(),
            };
            let _ = writeln!(out, "#{id}{flags}: {content}");
            if !element.value.is_empty() {
                let _ = writeln!(out, "#{id} value: {}", element.value);
            }
        }
        for alert in &self.alerts {
            let _ = writeln!(out, "alert: {alert}");
        }
        if let Some(location) = &self.location {
            let _ = writeln!(out, "location: {location}");
        }
        out
    }
}
