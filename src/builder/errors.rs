//! Error types for transform builder operations.
//!
//! # Error Handling
//!
//! - [`TransformError::InvalidSuccessSerializer`]: raised by
//!   [`TransformBuilder::serializer`](crate::TransformBuilder::serializer) only
//! - [`TransformError::MissingResource`]: an operation needs a bound resource
//! - [`TransformError::EagerLoad`] and [`TransformError::Engine`]: collaborator
//!   failures, passed through transparently
//!
//! # Example
//!
//! ```rust,ignore
//! use transformer::TransformError;
//!
//! match builder.transform() {
//!     Ok(output) => println!("{output}"),
//!     Err(TransformError::Engine(e)) => println!("Engine failed: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::resource::BoxError;

/// Error type for transform builder operations.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The selected serializer is not a success serializer.
    ///
    /// Returned for serializer names the registry cannot resolve.
    #[error("Serializer '{serializer}' is not a valid success serializer")]
    InvalidSuccessSerializer {
        /// The rejected selection.
        serializer: String,
    },

    /// The operation requires a resource to be bound first.
    #[error("Cannot {operation} without a resource. Call resource() first.")]
    MissingResource {
        /// The operation that was attempted (e.g., "transform", "paginate").
        operation: &'static str,
    },

    /// The data layer failed while eager loading relations.
    #[error(transparent)]
    EagerLoad(BoxError),

    /// The transform engine failed.
    #[error(transparent)]
    Engine(BoxError),
}
