//! The resource wrapper and its data capabilities.
//!
//! A [`Resource`] bundles everything a transform engine needs to render one
//! response: the raw data, an optional [`Transformer`], an optional resource
//! key, pagination and meta. Raw data participates through the
//! [`ResourceData`] trait, which exposes a JSON payload plus three opt-in
//! capabilities:
//!
//! - [`CursorPaginator`]: the data is a cursor-paginated collection
//! - [`LengthAwarePaginator`]: the data is a page of a known-size collection
//! - [`Loadable`]: the data can eager load relations before transformation
//!
//! Resources are created by a [`ResourceFactory`], normally the
//! [`DefaultResourceFactory`].
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use transformer::resource::{DefaultResourceFactory, ResourceFactory, ResourceKind};
//!
//! let resource = DefaultResourceFactory::new().make(
//!     Box::new(json!([{"id": 1}, {"id": 2}])),
//!     None,
//!     Some("users"),
//! );
//!
//! assert_eq!(resource.kind(), ResourceKind::Collection);
//! assert_eq!(resource.resource_key(), Some("users"));
//! assert!(resource.paginator().is_none());
//! assert!(resource.cursor().is_none());
//! ```

mod factory;
mod page;

pub use factory::{DefaultResourceFactory, ResourceFactory};
pub use page::{CursorPage, LengthAwarePage};

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::directives::EagerLoad;
use crate::pagination::{Cursor, CursorPaginator, LengthAwarePaginator, PaginatorAdapter};
use crate::transformer::Transformer;

/// Boxed error type used at collaborator boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Data that can eager load relations.
pub trait Loadable {
    /// Loads the given relations, in order.
    ///
    /// # Errors
    ///
    /// Returns whatever error the data layer produced. The builder passes it
    /// to the caller unchanged.
    fn load(&mut self, relations: &[EagerLoad]) -> Result<(), BoxError>;
}

/// Raw data that can be wrapped in a [`Resource`].
///
/// Only [`payload`](ResourceData::payload) is required. The capability
/// accessors return `None` unless the implementor opts in; an input should
/// opt into at most one of the two paginator capabilities.
pub trait ResourceData: fmt::Debug + Send {
    /// The data as JSON, handed to the transform engine.
    fn payload(&self) -> Value;

    /// Returns the cursor paginator capability.
    fn as_cursor_paginator(&self) -> Option<&dyn CursorPaginator> {
        None
    }

    /// Returns the length-aware paginator capability.
    fn as_length_aware_paginator(&self) -> Option<&dyn LengthAwarePaginator> {
        None
    }

    /// Returns the eager-load capability.
    fn as_loadable(&mut self) -> Option<&mut dyn Loadable> {
        None
    }
}

impl ResourceData for Value {
    fn payload(&self) -> Value {
        self.clone()
    }
}

/// The empty payload, used for directive-only staging.
impl ResourceData for () {
    fn payload(&self) -> Value {
        Value::Null
    }
}

/// The shape of a resource's data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    /// A single item.
    Item,
    /// A list of items, paginated or not.
    Collection,
    /// No data.
    Null,
}

/// The pagination bound to a resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageBinding {
    /// Length-aware pagination.
    Paginator(PaginatorAdapter),
    /// Cursor pagination.
    Cursor(Cursor),
}

/// Data, transformer, key, pagination and meta for one response.
#[derive(Debug)]
pub struct Resource {
    data: Box<dyn ResourceData>,
    transformer: Option<Arc<dyn Transformer>>,
    resource_key: Option<String>,
    pagination: Option<PageBinding>,
    meta: Map<String, Value>,
}

impl Resource {
    /// Creates a resource without pagination or meta.
    #[must_use]
    pub fn new(
        data: Box<dyn ResourceData>,
        transformer: Option<Arc<dyn Transformer>>,
        resource_key: Option<String>,
    ) -> Self {
        Self {
            data,
            transformer,
            resource_key,
            pagination: None,
            meta: Map::new(),
        }
    }

    /// Returns the wrapped data.
    #[must_use]
    pub fn data(&self) -> &dyn ResourceData {
        self.data.as_ref()
    }

    /// Returns the wrapped data mutably.
    pub fn data_mut(&mut self) -> &mut dyn ResourceData {
        self.data.as_mut()
    }

    /// Returns the transformer, if any.
    #[must_use]
    pub fn transformer(&self) -> Option<&Arc<dyn Transformer>> {
        self.transformer.as_ref()
    }

    /// Returns the resource key, if any.
    #[must_use]
    pub fn resource_key(&self) -> Option<&str> {
        self.resource_key.as_deref()
    }

    /// Returns the shape of the data.
    ///
    /// Paginated data is always a collection.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        if self.pagination.is_some() {
            return ResourceKind::Collection;
        }
        match self.data.payload() {
            Value::Null => ResourceKind::Null,
            Value::Array(_) => ResourceKind::Collection,
            _ => ResourceKind::Item,
        }
    }

    /// Returns the pagination binding.
    #[must_use]
    pub const fn pagination(&self) -> Option<&PageBinding> {
        self.pagination.as_ref()
    }

    /// Returns the bound paginator, if pagination is length-aware.
    #[must_use]
    pub const fn paginator(&self) -> Option<&PaginatorAdapter> {
        match &self.pagination {
            Some(PageBinding::Paginator(paginator)) => Some(paginator),
            _ => None,
        }
    }

    /// Returns the bound cursor, if pagination is cursor based.
    #[must_use]
    pub const fn cursor(&self) -> Option<&Cursor> {
        match &self.pagination {
            Some(PageBinding::Cursor(cursor)) => Some(cursor),
            _ => None,
        }
    }

    /// Binds a paginator, replacing any cursor.
    pub fn set_paginator(&mut self, paginator: PaginatorAdapter) {
        self.pagination = Some(PageBinding::Paginator(paginator));
    }

    /// Binds a cursor, replacing any paginator.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.pagination = Some(PageBinding::Cursor(cursor));
    }

    /// Returns the meta data.
    #[must_use]
    pub const fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    /// Merges entries into the meta data. Later values win on key collision.
    pub fn merge_meta(&mut self, meta: Map<String, Value>) {
        self.meta.extend(meta);
    }
}
