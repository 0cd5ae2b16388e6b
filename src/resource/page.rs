//! Ready-made paginated collections.
//!
//! The pages hold plain JSON items and do not eager load. To paginate data
//! that loads relations, wrap a page in your own type: delegate
//! [`as_length_aware_paginator`](ResourceData::as_length_aware_paginator) or
//! [`as_cursor_paginator`](ResourceData::as_cursor_paginator) to the page and
//! return the collection's [`Loadable`](super::Loadable) from
//! [`as_loadable`](ResourceData::as_loadable).

use serde_json::Value;

use super::ResourceData;
use crate::pagination::{CursorPaginator, LengthAwarePaginator};

/// One page of a collection whose total size is known.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use transformer::pagination::LengthAwarePaginator;
/// use transformer::resource::LengthAwarePage;
///
/// let page = LengthAwarePage::new(vec![json!({"id": 3})], 5, 2, 2)
///     .with_path("/users")
///     .append("sort", "name asc");
///
/// assert_eq!(page.last_page(), 3);
/// assert_eq!(page.url(3).as_deref(), Some("/users?sort=name%20asc&page=3"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LengthAwarePage {
    items: Vec<Value>,
    total: u64,
    per_page: u64,
    current_page: u64,
    path: Option<String>,
    query: Vec<(String, String)>,
}

impl LengthAwarePage {
    /// Creates a page. `current_page` is clamped to at least 1.
    #[must_use]
    pub fn new(items: Vec<Value>, total: u64, per_page: u64, current_page: u64) -> Self {
        Self {
            items,
            total,
            per_page,
            current_page: current_page.max(1),
            path: None,
            query: Vec::new(),
        }
    }

    /// Sets the base path used to build page URLs.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Adds a query parameter to every generated page URL.
    #[must_use]
    pub fn append(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Returns the items on this page.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

impl LengthAwarePaginator for LengthAwarePage {
    fn total(&self) -> u64 {
        self.total
    }

    fn per_page(&self) -> u64 {
        self.per_page
    }

    fn current_page(&self) -> u64 {
        self.current_page
    }

    fn count(&self) -> usize {
        self.items.len()
    }

    fn url(&self, page: u64) -> Option<String> {
        let path = self.path.as_ref()?;
        let mut query: Vec<String> = self
            .query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect();
        query.push(format!("page={page}"));

        let separator = if path.contains('?') { '&' } else { '?' };
        Some(format!("{path}{separator}{}", query.join("&")))
    }
}

impl ResourceData for LengthAwarePage {
    fn payload(&self) -> Value {
        Value::Array(self.items.clone())
    }

    fn as_length_aware_paginator(&self) -> Option<&dyn LengthAwarePaginator> {
        Some(self)
    }
}

/// One page of a cursor-paginated collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CursorPage {
    items: Vec<Value>,
    current: Option<String>,
    previous: Option<String>,
    next: Option<String>,
}

impl CursorPage {
    /// Creates a page without any cursors.
    #[must_use]
    pub const fn new(items: Vec<Value>) -> Self {
        Self {
            items,
            current: None,
            previous: None,
            next: None,
        }
    }

    /// Sets the cursor of this page.
    #[must_use]
    pub fn with_current(mut self, cursor: impl Into<String>) -> Self {
        self.current = Some(cursor.into());
        self
    }

    /// Sets the cursor of the previous page.
    #[must_use]
    pub fn with_previous(mut self, cursor: impl Into<String>) -> Self {
        self.previous = Some(cursor.into());
        self
    }

    /// Sets the cursor of the next page.
    #[must_use]
    pub fn with_next(mut self, cursor: impl Into<String>) -> Self {
        self.next = Some(cursor.into());
        self
    }

    /// Returns the items on this page.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

impl CursorPaginator for CursorPage {
    fn current(&self) -> Option<String> {
        self.current.clone()
    }

    fn previous(&self) -> Option<String> {
        self.previous.clone()
    }

    fn next(&self) -> Option<String> {
        self.next.clone()
    }

    fn count(&self) -> usize {
        self.items.len()
    }
}

impl ResourceData for CursorPage {
    fn payload(&self) -> Value {
        Value::Array(self.items.clone())
    }

    fn as_cursor_paginator(&self) -> Option<&dyn CursorPaginator> {
        Some(self)
    }
}
