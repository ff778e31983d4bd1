//! Column mappings.
//!
//! A page describes its table once as a list of columns, each a pure
//! function from the row type to a cell. Rendering is then the same for
//! every table: map every row, or emit the layout's placeholder when there
//! are none.

/// A per-row button carrying the row key as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub label: &'static str,
    pub action: &'static str,
    pub key: String,
    /// Display name passed along with the key, when the action needs one.
    pub name: Option<String>,
}

impl RowAction {
    pub fn new(label: &'static str, action: &'static str, key: impl Into<String>) -> Self {
        Self {
            label,
            action,
            key: key.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.name = name.map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Actions(Vec<RowAction>),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

pub struct Column<T> {
    pub header: &'static str,
    pub value: fn(&T) -> Cell,
}

pub struct TableLayout<T> {
    columns: Vec<Column<T>>,
    empty_message: &'static str,
}

impl<T> TableLayout<T> {
    pub fn new(empty_message: &'static str) -> Self {
        Self {
            columns: Vec::new(),
            empty_message,
        }
    }

    pub fn column(mut self, header: &'static str, value: fn(&T) -> Cell) -> Self {
        self.columns.push(Column { header, value });
        self
    }

    pub fn colspan(&self) -> usize {
        self.columns.len()
    }

    pub fn empty_message(&self) -> &'static str {
        self.empty_message
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }

    pub fn cells(&self, row: &T) -> Vec<Cell> {
        self.columns.iter().map(|c| (c.value)(row)).collect()
    }
}
