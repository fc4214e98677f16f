//! Wire shapes of the `/api/v1` list endpoints.

use serde::{Deserialize, Serialize};

use crate::pagination::Page;
use crate::query::QueryState;

/// Query string accepted by every `/api/v1/{collection}` list endpoint.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PageParams<'a> {
    /// Free-form search string; omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<&'a str>,
    /// Category filter; omitted for the "all" sentinel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
    /// One-based page number.
    pub page: usize,
    /// Page size requested by the client.
    pub limit: usize,
}

impl<'a> From<&'a QueryState> for PageParams<'a> {
    fn from(query: &'a QueryState) -> Self {
        Self {
            search: query.search_term(),
            category: query.category_term(),
            page: query.page.max(1),
            limit: query.page_size,
        }
    }
}

/// Body returned by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct PageResponse<T> {
    /// Items of the requested page in server order.
    pub items: Vec<T>,
    /// Total number of items matching the filter across all pages.
    pub total: usize,
}

impl<T> From<PageResponse<T>> for Page<T> {
    fn from(response: PageResponse<T>) -> Self {
        Page::new(response.items, response.total)
    }
}

/// Body of `PATCH /api/v1/notices/{id}`.
#[derive(Debug, Serialize)]
pub struct NoticeReadPatch {
    pub is_read: bool,
}
