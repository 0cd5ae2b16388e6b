//! Configuration for transform builders.
//!
//! A [`TransformConfig`] holds the settings shared by every
//! [`TransformBuilder`](crate::TransformBuilder) of an application: the
//! serializer registry, the default serializer, whether relations are eager
//! loaded, and how deep the engine may follow nested includes.
//!
//! # Example
//!
//! ```rust
//! use transformer::TransformConfig;
//!
//! let config = TransformConfig::builder()
//!     .default_serializer("noop")
//!     .eager_load(false)
//!     .recursion_limit(3)
//!     .build()
//!     .unwrap();
//!
//! assert!(!config.eager_load());
//! assert_eq!(config.recursion_limit(), 3);
//! ```

use std::sync::Arc;

use crate::error::ConfigError;
use crate::serializers::{SerializerRegistry, SuccessSerializer, SUCCESS_SERIALIZER};

/// Default maximum include nesting depth.
pub const DEFAULT_RECURSION_LIMIT: usize = 10;

/// Settings shared by transform builders.
///
/// # Thread Safety
///
/// `TransformConfig` is `Clone`, `Send`, and `Sync`. Clone it into each
/// request handler; builders themselves are per-request.
#[derive(Clone, Debug)]
pub struct TransformConfig {
    serializers: SerializerRegistry,
    default_serializer: Arc<dyn SuccessSerializer>,
    eager_load: bool,
    recursion_limit: usize,
}

impl TransformConfig {
    /// Creates a new builder for constructing a `TransformConfig`.
    #[must_use]
    pub fn builder() -> TransformConfigBuilder {
        TransformConfigBuilder::new()
    }

    /// Returns the serializer registry.
    #[must_use]
    pub const fn serializers(&self) -> &SerializerRegistry {
        &self.serializers
    }

    /// Returns the serializer used when a builder does not select one.
    #[must_use]
    pub const fn default_serializer(&self) -> &Arc<dyn SuccessSerializer> {
        &self.default_serializer
    }

    /// Returns whether relations are eager loaded before transformation.
    #[must_use]
    pub const fn eager_load(&self) -> bool {
        self.eager_load
    }

    /// Returns the maximum include nesting depth passed to the engine.
    #[must_use]
    pub const fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            serializers: SerializerRegistry::with_defaults(),
            default_serializer: Arc::new(crate::serializers::SuccessEnvelopeSerializer),
            eager_load: true,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

// Verify TransformConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransformConfig>();
};

/// Builder for constructing [`TransformConfig`] instances.
///
/// # Defaults
///
/// - `serializers`: [`SerializerRegistry::with_defaults`]
/// - `default_serializer`: `"success"`
/// - `eager_load`: `true`
/// - `recursion_limit`: [`DEFAULT_RECURSION_LIMIT`]
#[derive(Debug, Default)]
pub struct TransformConfigBuilder {
    serializers: Option<SerializerRegistry>,
    default_serializer: Option<String>,
    eager_load: Option<bool>,
    recursion_limit: Option<usize>,
}

impl TransformConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the serializer registry.
    #[must_use]
    pub fn serializers(mut self, registry: SerializerRegistry) -> Self {
        self.serializers = Some(registry);
        self
    }

    /// Sets the name of the default serializer.
    #[must_use]
    pub fn default_serializer(mut self, name: impl Into<String>) -> Self {
        self.default_serializer = Some(name.into());
        self
    }

    /// Enables or disables eager loading.
    #[must_use]
    pub const fn eager_load(mut self, enabled: bool) -> Self {
        self.eager_load = Some(enabled);
        self
    }

    /// Sets the maximum include nesting depth.
    #[must_use]
    pub const fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Builds the [`TransformConfig`], resolving the default serializer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownSerializer`] if the default serializer is
    /// not registered, or [`ConfigError::InvalidRecursionLimit`] for a limit of 0.
    pub fn build(self) -> Result<TransformConfig, ConfigError> {
        let serializers = self
            .serializers
            .unwrap_or_else(SerializerRegistry::with_defaults);
        let name = self
            .default_serializer
            .unwrap_or_else(|| SUCCESS_SERIALIZER.to_string());
        let default_serializer = serializers
            .get(&name)
            .ok_or(ConfigError::UnknownSerializer { name })?;

        let recursion_limit = self.recursion_limit.unwrap_or(DEFAULT_RECURSION_LIMIT);
        if recursion_limit == 0 {
            return Err(ConfigError::InvalidRecursionLimit {
                limit: recursion_limit,
            });
        }

        Ok(TransformConfig {
            serializers,
            default_serializer,
            eager_load: self.eager_load.unwrap_or(true),
            recursion_limit,
        })
    }
}
