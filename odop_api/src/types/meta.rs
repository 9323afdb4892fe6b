use serde::{Deserialize, Serialize};

/// One page of results in the backend's envelope form: a total count,
/// absolute URLs for the adjacent pages, and the page's records.
#[derive(Serialize, Deserialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// A product-list response. The backend returns either a bare JSON array
/// or a paginated envelope depending on configuration; callers must
/// accept both shapes.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Page<T>),
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    /// The records in this response, regardless of envelope shape.
    pub fn items(&self) -> &[T] {
        match self {
            ListResponse::Paginated(page) => &page.results,
            ListResponse::Bare(items) => items,
        }
    }

    /// Consumes the response, returning the records.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated(page) => page.results,
            ListResponse::Bare(items) => items,
        }
    }

    /// Total record count across all pages. A bare array is its own total.
    pub fn total_count(&self) -> i64 {
        match self {
            ListResponse::Paginated(page) => page.count,
            ListResponse::Bare(items) => items.len() as i64,
        }
    }

    /// URL of the next page, if the backend paginated the response.
    pub fn next_url(&self) -> Option<&str> {
        match self {
            ListResponse::Paginated(page) => page.next.as_deref(),
            ListResponse::Bare(_) => None,
        }
    }
}
