//! # Response Transformer
//!
//! A fluent builder that turns application data into normalized API response
//! envelopes.
//!
//! ## Overview
//!
//! This crate provides:
//! - A [`TransformBuilder`] that accumulates includes, excludes, field filters,
//!   meta and serializer selection, then resolves them into one engine call
//! - Automatic eager loading of the relations a [`Transformer`] cannot resolve
//!   itself, driven by explicit capability traits
//! - Resource wrapping with cursor and length-aware pagination detection via
//!   [`resource::DefaultResourceFactory`]
//! - Success serializers selected by instance or through a
//!   [`serializers::SerializerRegistry`]
//! - Type-safe configuration via [`TransformConfig`] and [`TransformConfigBuilder`]
//!
//! The engine that walks the transformer graph is a collaborator supplied by
//! the caller through the [`TransformEngine`] trait.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::{json, Value};
//! use transformer::{Directives, Resource, SuccessSerializer, TransformBuilder,
//!     TransformConfig, TransformEngine};
//! use transformer::resource::BoxError;
//!
//! #[derive(Debug)]
//! struct EnvelopeEngine;
//!
//! impl TransformEngine for EnvelopeEngine {
//!     fn make(
//!         &self,
//!         resource: &Resource,
//!         serializer: &dyn SuccessSerializer,
//!         _directives: &Directives,
//!     ) -> Result<Value, BoxError> {
//!         Ok(serializer.item(resource.resource_key(), resource.data().payload()))
//!     }
//! }
//!
//! let config = TransformConfig::builder()
//!     .default_serializer("success")
//!     .build()
//!     .unwrap();
//!
//! let mut builder = TransformBuilder::new(config, Arc::new(EnvelopeEngine));
//! let output = builder
//!     .resource(json!({"id": 1, "name": "Ada"}), None, Some("user"))
//!     .with("roles")
//!     .only(["id", "name"])
//!     .transform()
//!     .unwrap();
//!
//! assert_eq!(output, json!({"data": {"id": 1, "name": "Ada"}}));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Explicit capabilities**: pagination, eager loading and include methods
//!   are opt-in traits, never probed by name
//! - **Fail-fast validation**: serializer names are checked when selected
//! - **Per-request builders**: a builder is owned by one request; the
//!   configuration it is created from is `Send + Sync`

pub mod builder;
pub mod config;
pub mod directives;
pub mod engine;
pub mod error;
pub mod pagination;
pub mod resource;
pub mod serializers;
pub mod transformer;

// Re-export public types at crate root for convenience
pub use builder::{TransformBuilder, TransformError};
pub use config::{TransformConfig, TransformConfigBuilder};
pub use directives::{Directives, IncludeDirective, Names, Relations};
pub use engine::TransformEngine;
pub use error::ConfigError;
pub use resource::{Resource, ResourceData};
pub use serializers::{SerializerChoice, SuccessSerializer};
pub use transformer::{ClosureTransformer, Transformer};
