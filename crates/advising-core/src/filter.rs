//! Category filtering for catalog pages.

/// Selector value that matches every item.
pub const ALL_CATEGORIES: &str = "all";

/// Something with a category label.
pub trait Categorized {
    fn category(&self) -> Option<&str>;
}

/// The currently selected category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parses a selector value. `"all"` is the catch-all; anything else is
    /// matched exactly.
    pub fn from_selection(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn as_selection(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(c) => c,
        }
    }

    pub fn matches<T: Categorized>(&self, item: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => item.category() == Some(c.as_str()),
        }
    }
}

/// Pure filter: case-sensitive equality, no partial matching.
pub fn filter_by_category<'a, T: Categorized>(items: &'a [T], filter: &CategoryFilter) -> Vec<&'a T> {
    items.iter().filter(|item| filter.matches(*item)).collect()
}

/// Distinct non-empty categories in first-seen order.
pub fn distinct_categories<T: Categorized>(items: &[T]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in items.iter().filter_map(|item| item.category()) {
        if !category.trim().is_empty() && !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}

/// The full fetched collection plus the active selection.
///
/// The collection is replaced wholesale on every fetch and never mutated by
/// filtering.
#[derive(Debug, Clone)]
pub struct CatalogState<T> {
    items: Vec<T>,
    selected: CategoryFilter,
}

impl<T> Default for CatalogState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: CategoryFilter::All,
        }
    }
}

impl<T: Categorized> CatalogState<T> {
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn select(&mut self, filter: CategoryFilter) {
        self.selected = filter;
    }

    pub fn selected(&self) -> &CategoryFilter {
        &self.selected
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn visible(&self) -> Vec<&T> {
        filter_by_category(&self.items, &self.selected)
    }

    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.items)
    }
}
