//! Configuration error types for the transformer crate.
//!
//! Errors raised while transforming a resource live next to the builder in
//! [`crate::builder::TransformError`]. This module only covers the failures
//! that can happen while assembling a [`TransformConfig`](crate::TransformConfig).
//!
//! # Example
//!
//! ```rust
//! use transformer::{ConfigError, TransformConfig};
//!
//! let result = TransformConfig::builder()
//!     .default_serializer("does-not-exist")
//!     .build();
//! assert!(matches!(result, Err(ConfigError::UnknownSerializer { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`TransformConfig`](crate::TransformConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The default serializer name is not present in the serializer registry.
    #[error("Unknown serializer '{name}'. Register it in the serializer registry before selecting it as the default.")]
    UnknownSerializer {
        /// The serializer name that could not be resolved.
        name: String,
    },

    /// The recursion limit must allow at least one level of includes.
    #[error("Invalid recursion limit {limit}. The limit must be at least 1.")]
    InvalidRecursionLimit {
        /// The rejected limit.
        limit: usize,
    },
}
