//! The transform builder.
//!
//! [`TransformBuilder`] accumulates everything needed to render one response
//! and resolves it into a single call to a [`TransformEngine`]:
//!
//! 1. bind data with [`resource`](TransformBuilder::resource), which detects
//!    cursor and length-aware pagination
//! 2. optionally chain [`with`](TransformBuilder::with),
//!    [`without`](TransformBuilder::without), [`only`](TransformBuilder::only),
//!    [`meta`](TransformBuilder::meta), [`serializer`](TransformBuilder::serializer)
//!    and the manual pagination overrides
//! 3. call [`transform`](TransformBuilder::transform), which eager loads the
//!    relations the transformer cannot resolve itself and invokes the engine
//!
//! Builders are per-request and not meant to be shared between threads.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::{json, Value};
//! use transformer::{Directives, Resource, SuccessSerializer, TransformBuilder,
//!     TransformConfig, TransformEngine};
//! use transformer::resource::BoxError;
//!
//! #[derive(Debug)]
//! struct IncludeEcho;
//!
//! impl TransformEngine for IncludeEcho {
//!     fn make(
//!         &self,
//!         _resource: &Resource,
//!         _serializer: &dyn SuccessSerializer,
//!         directives: &Directives,
//!     ) -> Result<Value, BoxError> {
//!         Ok(json!(directives.include_specs()))
//!     }
//! }
//!
//! let mut builder = TransformBuilder::new(TransformConfig::default(), Arc::new(IncludeEcho));
//! let output = builder
//!     .resource(json!({"id": 1}), None, None)
//!     .with("author")
//!     .with(["comments:limit(5)", "tags"])
//!     .transform()
//!     .unwrap();
//!
//! assert_eq!(output, json!(["author", "comments:limit(5)", "tags"]));
//! ```

mod errors;

pub use errors::TransformError;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::TransformConfig;
use crate::directives::{
    parse_include, Directives, EagerLoad, IncludeDirective, Names, Relations,
};
use crate::engine::TransformEngine;
use crate::pagination::{Cursor, PaginatorAdapter};
use crate::resource::{DefaultResourceFactory, Resource, ResourceData, ResourceFactory};
use crate::serializers::{SerializerChoice, SuccessSerializer};
use crate::transformer::Transformer;

/// Accumulates transformation directives and runs one transformation.
#[derive(Debug)]
pub struct TransformBuilder {
    config: TransformConfig,
    engine: Arc<dyn TransformEngine>,
    factory: Arc<dyn ResourceFactory>,
    serializer: Arc<dyn SuccessSerializer>,
    resource: Option<Resource>,
    includes: Vec<IncludeDirective>,
    excludes: Vec<String>,
    fieldsets: Vec<String>,
}

impl TransformBuilder {
    /// Creates a builder using the [`DefaultResourceFactory`].
    #[must_use]
    pub fn new(config: TransformConfig, engine: Arc<dyn TransformEngine>) -> Self {
        Self::with_factory(config, engine, Arc::new(DefaultResourceFactory::new()))
    }

    /// Creates a builder with a custom resource factory.
    #[must_use]
    pub fn with_factory(
        config: TransformConfig,
        engine: Arc<dyn TransformEngine>,
        factory: Arc<dyn ResourceFactory>,
    ) -> Self {
        let serializer = Arc::clone(config.default_serializer());
        Self {
            config,
            engine,
            factory,
            serializer,
            resource: None,
            includes: Vec::new(),
            excludes: Vec::new(),
            fieldsets: Vec::new(),
        }
    }

    /// Wraps `data` into the active resource.
    ///
    /// Replaces any previously bound resource and clears accumulated include,
    /// exclude and fieldset directives. The selected serializer is kept.
    pub fn resource<D>(
        &mut self,
        data: D,
        transformer: Option<Arc<dyn Transformer>>,
        resource_key: Option<&str>,
    ) -> &mut Self
    where
        D: ResourceData + 'static,
    {
        self.resource = Some(self.factory.make(Box::new(data), transformer, resource_key));
        self.includes.clear();
        self.excludes.clear();
        self.fieldsets.clear();
        self
    }

    /// Binds an empty resource, for staging directives before data is known.
    pub fn empty_resource(&mut self) -> &mut Self {
        self.resource((), None, None)
    }

    /// Binds a cursor to the active resource, replacing any pagination.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::MissingResource`] if no resource is bound.
    pub fn cursor(&mut self, cursor: Cursor) -> Result<&mut Self, TransformError> {
        self.active_resource("bind a cursor")?.set_cursor(cursor);
        Ok(self)
    }

    /// Binds a paginator to the active resource, replacing any pagination.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::MissingResource`] if no resource is bound.
    pub fn paginator(&mut self, paginator: PaginatorAdapter) -> Result<&mut Self, TransformError> {
        self.active_resource("bind a paginator")?
            .set_paginator(paginator);
        Ok(self)
    }

    /// Merges meta data into the active resource. Later values win.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::MissingResource`] if no resource is bound.
    pub fn meta(&mut self, meta: Map<String, Value>) -> Result<&mut Self, TransformError> {
        self.active_resource("add meta")?.merge_meta(meta);
        Ok(self)
    }

    /// Selects the serializer, by instance or by registered name.
    ///
    /// The selection survives later calls to [`resource`](Self::resource).
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidSuccessSerializer`] if the name is not
    /// registered. The previously selected serializer stays in place.
    pub fn serializer(
        &mut self,
        serializer: impl Into<SerializerChoice>,
    ) -> Result<&mut Self, TransformError> {
        let choice = serializer.into();
        let Some(resolved) = self.config.serializers().resolve(&choice) else {
            tracing::warn!(
                serializer = %choice,
                registered = ?self.config.serializers().names(),
                "Rejected serializer that is not a registered success serializer"
            );
            return Err(TransformError::InvalidSuccessSerializer {
                serializer: choice.to_string(),
            });
        };

        self.serializer = resolved;
        Ok(self)
    }

    /// Appends include directives, in argument order.
    pub fn with(&mut self, relations: impl Into<Relations>) -> &mut Self {
        let relations: Relations = relations.into();
        self.includes.extend(relations);
        self
    }

    /// Appends excluded relations, in argument order.
    pub fn without(&mut self, relations: impl Into<Names>) -> &mut Self {
        let relations: Names = relations.into();
        self.excludes.extend(relations.into_inner());
        self
    }

    /// Appends field filters, in argument order.
    pub fn only(&mut self, fields: impl Into<Names>) -> &mut Self {
        let fields: Names = fields.into();
        self.fieldsets.extend(fields.into_inner());
        self
    }

    /// Eager loads relations and transforms the active resource.
    ///
    /// The engine receives the include directives exactly as supplied,
    /// followed by each default relation of the transformer whose name no
    /// directive already covers. The same list, minus relations the
    /// transformer resolves itself, is eager loaded on data that supports it.
    ///
    /// # Errors
    ///
    /// - [`TransformError::MissingResource`] if no resource is bound
    /// - [`TransformError::EagerLoad`] if the data layer fails
    /// - [`TransformError::Engine`] if the engine fails
    pub fn transform(&mut self) -> Result<Value, TransformError> {
        let Some(resource) = self.resource.as_mut() else {
            return Err(TransformError::MissingResource {
                operation: "transform",
            });
        };
        let transformer = resource.transformer().cloned();

        let includes = resolve_includes(&self.includes, transformer.as_deref());

        if self.config.eager_load() {
            if let Some(loadable) = resource.data_mut().as_loadable() {
                let relations = eager_loads(&includes, transformer.as_deref());
                tracing::debug!(
                    relations = ?relations.iter().map(|r| r.relation.as_str()).collect::<Vec<_>>(),
                    "Eager loading relations"
                );
                loadable
                    .load(&relations)
                    .map_err(TransformError::EagerLoad)?;
            }
        }

        let directives = Directives {
            includes,
            excludes: self.excludes.clone(),
            fieldsets: self.fieldsets.clone(),
            recursion_limit: self.config.recursion_limit(),
        };

        tracing::debug!(
            includes = ?directives.include_specs(),
            excludes = ?directives.excludes,
            fieldsets = ?directives.fieldsets,
            "Invoking transform engine"
        );

        self.engine
            .make(resource, self.serializer.as_ref(), &directives)
            .map_err(TransformError::Engine)
    }

    /// Returns the active resource.
    #[must_use]
    pub const fn resource_ref(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    /// Returns the accumulated include directives.
    #[must_use]
    pub fn includes(&self) -> &[IncludeDirective] {
        &self.includes
    }

    /// Returns the accumulated excluded relations.
    #[must_use]
    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// Returns the accumulated field filters.
    #[must_use]
    pub fn fieldsets(&self) -> &[String] {
        &self.fieldsets
    }

    /// Returns the serializer that [`transform`](Self::transform) will use.
    #[must_use]
    pub const fn current_serializer(&self) -> &Arc<dyn SuccessSerializer> {
        &self.serializer
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &TransformConfig {
        &self.config
    }

    fn active_resource(&mut self, operation: &'static str) -> Result<&mut Resource, TransformError> {
        self.resource
            .as_mut()
            .ok_or(TransformError::MissingResource { operation })
    }
}

/// Explicit directives followed by default relations not already covered.
fn resolve_includes(
    explicit: &[IncludeDirective],
    transformer: Option<&dyn Transformer>,
) -> Vec<IncludeDirective> {
    let mut includes = explicit.to_vec();
    let Some(transformer) = transformer else {
        return includes;
    };

    let mut covered: Vec<String> = explicit
        .iter()
        .map(|directive| directive.relation().to_string())
        .collect();

    for relation in transformer.default_relations() {
        let directive = IncludeDirective::new(relation);
        let name = directive.relation().to_string();
        if covered.contains(&name) {
            continue;
        }
        includes.push(directive);
        covered.push(name);
    }

    includes
}

/// The relations to eager load, skipping those the transformer resolves itself.
fn eager_loads(includes: &[IncludeDirective], transformer: Option<&dyn Transformer>) -> Vec<EagerLoad> {
    includes
        .iter()
        .map(parse_include)
        .filter(|parsed| {
            transformer.map_or(true, |transformer| {
                !transformer.has_include_method(parsed.root_segment)
            })
        })
        .map(|parsed| EagerLoad {
            relation: parsed.relation.to_string(),
            constraint: parsed.directive.constraint().cloned(),
        })
        .collect()
}
