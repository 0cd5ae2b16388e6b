//! Pagination capabilities and their engine-facing adapters.
//!
//! Raw data opts into pagination by implementing one of two capabilities:
//!
//! - [`LengthAwarePaginator`]: page numbers with a known total
//! - [`CursorPaginator`]: opaque cursors pointing at neighbouring pages
//!
//! The [`PaginatorFactory`] snapshots either capability into the plain
//! [`PaginatorAdapter`] and [`Cursor`] values a transform engine and its
//! serializer consume.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use transformer::pagination::PaginatorFactory;
//! use transformer::resource::LengthAwarePage;
//!
//! let page = LengthAwarePage::new(vec![json!({"id": 1}), json!({"id": 2})], 12, 2, 3)
//!     .with_path("https://api.example.com/users");
//!
//! let adapter = PaginatorFactory::new().make(&page);
//! assert_eq!(adapter.total, 12);
//! assert_eq!(adapter.last_page, 6);
//! assert_eq!(
//!     adapter.next_url.as_deref(),
//!     Some("https://api.example.com/users?page=4")
//! );
//! ```

use serde::{Deserialize, Serialize};

/// Data that knows its total size and is split into numbered pages.
pub trait LengthAwarePaginator {
    /// Total number of items across all pages.
    fn total(&self) -> u64;

    /// Number of items per page.
    fn per_page(&self) -> u64;

    /// The current page, starting at 1.
    fn current_page(&self) -> u64;

    /// Number of items on the current page.
    fn count(&self) -> usize;

    /// Returns the URL for a given page, if the paginator knows its path.
    fn url(&self, page: u64) -> Option<String>;

    /// The last page number. Never less than 1.
    fn last_page(&self) -> u64 {
        let per_page = self.per_page().max(1);
        let pages = self.total().saturating_add(per_page - 1) / per_page;
        pages.max(1)
    }
}

/// Data paginated with opaque cursors.
pub trait CursorPaginator {
    /// Cursor of the current page.
    fn current(&self) -> Option<String>;

    /// Cursor of the previous page.
    fn previous(&self) -> Option<String>;

    /// Cursor of the next page.
    fn next(&self) -> Option<String>;

    /// Number of items on the current page.
    fn count(&self) -> usize;
}

/// Engine-facing snapshot of a length-aware paginator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatorAdapter {
    /// Total number of items.
    pub total: u64,
    /// Number of items on the current page.
    pub count: usize,
    /// Items per page.
    pub per_page: u64,
    /// Current page number.
    pub current_page: u64,
    /// Last page number.
    pub last_page: u64,
    /// URL of the previous page, if there is one.
    pub previous_url: Option<String>,
    /// URL of the next page, if there is one.
    pub next_url: Option<String>,
}

impl PaginatorAdapter {
    /// Returns `true` if a page follows the current one.
    #[must_use]
    pub const fn has_more_pages(&self) -> bool {
        self.current_page < self.last_page
    }
}

/// Engine-facing cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Cursor of the current page.
    pub current: Option<String>,
    /// Cursor of the previous page.
    pub previous: Option<String>,
    /// Cursor of the next page.
    pub next: Option<String>,
    /// Number of items on the current page.
    pub count: usize,
}

impl Cursor {
    /// Creates a cursor from its parts.
    #[must_use]
    pub const fn new(
        current: Option<String>,
        previous: Option<String>,
        next: Option<String>,
        count: usize,
    ) -> Self {
        Self {
            current,
            previous,
            next,
            count,
        }
    }
}

/// Builds engine-facing pagination values from paginator capabilities.
///
/// Both operations are pure: they read the paginator and return a snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct PaginatorFactory;

impl PaginatorFactory {
    /// Creates a factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Adapts a length-aware paginator.
    #[must_use]
    pub fn make(&self, paginator: &dyn LengthAwarePaginator) -> PaginatorAdapter {
        let current_page = paginator.current_page();
        let last_page = paginator.last_page();

        let previous_url = if current_page > 1 {
            paginator.url((current_page - 1).min(last_page))
        } else {
            None
        };
        let next_url = if current_page < last_page {
            paginator.url(current_page + 1)
        } else {
            None
        };

        PaginatorAdapter {
            total: paginator.total(),
            count: paginator.count(),
            per_page: paginator.per_page(),
            current_page,
            last_page,
            previous_url,
            next_url,
        }
    }

    /// Adapts a cursor paginator.
    #[must_use]
    pub fn make_cursor(&self, paginator: &dyn CursorPaginator) -> Cursor {
        Cursor::new(
            paginator.current(),
            paginator.previous(),
            paginator.next(),
            paginator.count(),
        )
    }
}
