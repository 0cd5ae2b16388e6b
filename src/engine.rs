//! The transform engine boundary.
//!
//! The engine walks a transformer graph and serializes it. This crate only
//! resolves what the engine should do; plugging in an engine is up to the
//! caller.

use serde_json::Value;

use crate::directives::Directives;
use crate::resource::{BoxError, Resource};
use crate::serializers::SuccessSerializer;

/// Produces the final output for a resource.
///
/// # Example
///
/// ```rust
/// use serde_json::Value;
/// use transformer::{Directives, Resource, SuccessSerializer, TransformEngine};
/// use transformer::resource::BoxError;
///
/// #[derive(Debug)]
/// struct RawEngine;
///
/// impl TransformEngine for RawEngine {
///     fn make(
///         &self,
///         resource: &Resource,
///         serializer: &dyn SuccessSerializer,
///         _directives: &Directives,
///     ) -> Result<Value, BoxError> {
///         Ok(serializer.item(resource.resource_key(), resource.data().payload()))
///     }
/// }
/// ```
pub trait TransformEngine: std::fmt::Debug + Send + Sync {
    /// Transforms `resource` according to `directives`.
    ///
    /// # Errors
    ///
    /// Any engine failure. The builder returns it to the caller unchanged.
    fn make(
        &self,
        resource: &Resource,
        serializer: &dyn SuccessSerializer,
        directives: &Directives,
    ) -> Result<Value, BoxError>;
}
