//! Description of which slice of a list resource the view currently wants.

use serde::{Deserialize, Serialize};

/// Sentinel category meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Page size used by the list screens unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Search text, category filter and page position of a list view.
///
/// Changing the search text or the category always moves the view back to
/// the first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_text: String,
    pub category_filter: String,
    pub page: usize,
    pub page_size: usize,
}

impl QueryState {
    /// Creates the initial query: first page, no search, no category filter.
    ///
    /// # Panics
    ///
    /// Panics if `page_size` is zero.
    pub fn new(page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be greater than zero");
        Self {
            search_text: String::new(),
            category_filter: ALL_CATEGORIES.to_string(),
            page: 1,
            page_size,
        }
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.set_search(text);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.set_category(category);
        self
    }

    pub fn paginate(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    /// Unknown categories are kept verbatim; the server decides validity.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category_filter = category.into();
        self.page = 1;
    }

    /// Search text with surrounding whitespace removed, `None` when empty.
    pub fn search_term(&self) -> Option<&str> {
        Some(self.search_text.trim()).filter(|s| !s.is_empty())
    }

    /// Category to filter by, `None` for the [`ALL_CATEGORIES`] sentinel.
    pub fn category_term(&self) -> Option<&str> {
        Some(self.category_filter.as_str()).filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
