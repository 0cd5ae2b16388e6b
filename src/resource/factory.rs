//! Resource construction with pagination auto-detection.

use std::fmt;
use std::sync::Arc;

use super::{Resource, ResourceData};
use crate::pagination::PaginatorFactory;
use crate::transformer::Transformer;

/// Wraps raw data into a [`Resource`].
///
/// The builder receives its factory by injection, so alternative wrapping
/// strategies (or recording test doubles) can be swapped in.
pub trait ResourceFactory: fmt::Debug + Send + Sync {
    /// Wraps `data` with an optional transformer and resource key.
    fn make(
        &self,
        data: Box<dyn ResourceData>,
        transformer: Option<Arc<dyn Transformer>>,
        resource_key: Option<&str>,
    ) -> Resource;
}

/// The standard factory.
///
/// Binds a cursor when the data is a [`CursorPaginator`](crate::pagination::CursorPaginator),
/// otherwise a paginator when the data is a
/// [`LengthAwarePaginator`](crate::pagination::LengthAwarePaginator). Plain data is
/// wrapped without pagination. The data itself is never touched.
#[derive(Clone, Debug, Default)]
pub struct DefaultResourceFactory {
    paginators: PaginatorFactory,
}

impl DefaultResourceFactory {
    /// Creates a factory using the default [`PaginatorFactory`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            paginators: PaginatorFactory::new(),
        }
    }
}

impl ResourceFactory for DefaultResourceFactory {
    fn make(
        &self,
        data: Box<dyn ResourceData>,
        transformer: Option<Arc<dyn Transformer>>,
        resource_key: Option<&str>,
    ) -> Resource {
        let cursor = data
            .as_cursor_paginator()
            .map(|paginator| self.paginators.make_cursor(paginator));
        let paginator = if cursor.is_none() {
            data.as_length_aware_paginator()
                .map(|paginator| self.paginators.make(paginator))
        } else {
            None
        };

        let mut resource = Resource::new(data, transformer, resource_key.map(ToString::to_string));

        if let Some(cursor) = cursor {
            tracing::debug!(count = cursor.count, "Binding cursor to resource");
            resource.set_cursor(cursor);
        } else if let Some(paginator) = paginator {
            tracing::debug!(
                page = paginator.current_page,
                total = paginator.total,
                "Binding paginator to resource"
            );
            resource.set_paginator(paginator);
        }

        resource
    }
}
