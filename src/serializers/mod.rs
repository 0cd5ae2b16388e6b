//! Success serializers and the serializer registry.
//!
//! A [`SuccessSerializer`] decides the envelope around transformed data: where
//! the data lives, how pagination and cursors are rendered and how meta is
//! merged. Transform engines call it while building their output.
//!
//! Serializers are selected either by instance or by name. Names are resolved
//! through an explicit [`SerializerRegistry`]; there is no reflective lookup.
//!
//! # Built-in Serializers
//!
//! | Name        | Type                          | Output                                   |
//! |-------------|-------------------------------|------------------------------------------|
//! | `"success"` | [`SuccessEnvelopeSerializer`] | `{"data": ..., "pagination": ..., meta}` |
//! | `"noop"`    | [`NoopSerializer`]            | the transformed data only                |
//!
//! # Example
//!
//! ```rust
//! use transformer::serializers::{SerializerChoice, SerializerRegistry};
//!
//! let registry = SerializerRegistry::with_defaults();
//! assert!(registry.resolve(&SerializerChoice::from("success")).is_some());
//! assert!(registry.resolve(&SerializerChoice::from("xml")).is_none());
//! ```

mod noop;
mod success;

pub use noop::NoopSerializer;
pub use success::SuccessEnvelopeSerializer;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::pagination::{Cursor, PaginatorAdapter};

/// Name of the [`SuccessEnvelopeSerializer`] in the default registry.
pub const SUCCESS_SERIALIZER: &str = "success";

/// Name of the [`NoopSerializer`] in the default registry.
pub const NOOP_SERIALIZER: &str = "noop";

/// Renders transformed data into a success response envelope.
pub trait SuccessSerializer: fmt::Debug + Send + Sync {
    /// Wraps a single transformed item.
    fn item(&self, resource_key: Option<&str>, data: Value) -> Value;

    /// Wraps a list of transformed items.
    fn collection(&self, resource_key: Option<&str>, data: Vec<Value>) -> Value;

    /// Renders a resource without data.
    fn null(&self) -> Value;

    /// Renders meta data, merged into the top level of the output.
    fn meta(&self, meta: &Map<String, Value>) -> Value;

    /// Renders length-aware pagination.
    fn paginator(&self, paginator: &PaginatorAdapter) -> Value;

    /// Renders cursor pagination.
    fn cursor(&self, cursor: &Cursor) -> Value;
}

/// A serializer selection, by instance or by registered name.
#[derive(Clone, Debug)]
pub enum SerializerChoice {
    /// A concrete serializer.
    Instance(Arc<dyn SuccessSerializer>),
    /// A name resolved through the [`SerializerRegistry`].
    Name(String),
}

impl From<&str> for SerializerChoice {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for SerializerChoice {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Arc<dyn SuccessSerializer>> for SerializerChoice {
    fn from(serializer: Arc<dyn SuccessSerializer>) -> Self {
        Self::Instance(serializer)
    }
}

impl From<SuccessEnvelopeSerializer> for SerializerChoice {
    fn from(serializer: SuccessEnvelopeSerializer) -> Self {
        Self::Instance(Arc::new(serializer))
    }
}

impl From<NoopSerializer> for SerializerChoice {
    fn from(serializer: NoopSerializer) -> Self {
        Self::Instance(Arc::new(serializer))
    }
}

impl fmt::Display for SerializerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(serializer) => write!(f, "{serializer:?}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Maps serializer names to instances.
///
/// Populated once at configuration time and shared by every builder created
/// from the same [`TransformConfig`](crate::TransformConfig).
#[derive(Clone, Default)]
pub struct SerializerRegistry {
    serializers: HashMap<String, Arc<dyn SuccessSerializer>>,
}

impl SerializerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in serializers.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .register(SUCCESS_SERIALIZER, SuccessEnvelopeSerializer)
            .register(NOOP_SERIALIZER, NoopSerializer)
    }

    /// Registers a serializer under `name`, replacing any previous entry.
    #[must_use]
    pub fn register<S>(mut self, name: impl Into<String>, serializer: S) -> Self
    where
        S: SuccessSerializer + 'static,
    {
        self.serializers.insert(name.into(), Arc::new(serializer));
        self
    }

    /// Looks up a serializer by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn SuccessSerializer>> {
        self.serializers.get(name).cloned()
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.serializers.contains_key(name)
    }

    /// Resolves a selection to a serializer instance.
    ///
    /// Instances resolve to themselves; names resolve through the registry.
    #[must_use]
    pub fn resolve(&self, choice: &SerializerChoice) -> Option<Arc<dyn SuccessSerializer>> {
        match choice {
            SerializerChoice::Instance(serializer) => Some(Arc::clone(serializer)),
            SerializerChoice::Name(name) => self.get(name),
        }
    }

    /// Returns the registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.serializers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("names", &self.names())
            .finish()
    }
}
