//! Integration tests for the transform builder.
//!
//! These tests verify directive accumulation, resource wrapping, pagination
//! binding, serializer selection, eager-load inference and the directive set
//! handed to the transform engine.

use std::sync::{Arc, Mutex};

use serde_json::{json, Map, Value};
use transformer::directives::{Constraint, EagerLoad};
use transformer::pagination::{Cursor, LengthAwarePaginator, PaginatorAdapter};
use transformer::resource::{
    BoxError, CursorPage, DefaultResourceFactory, LengthAwarePage, Loadable, ResourceFactory,
};
use transformer::serializers::{NoopSerializer, SerializerRegistry};
use transformer::{
    Directives, IncludeDirective, Relations, Resource, ResourceData, SuccessSerializer,
    TransformBuilder, TransformConfig, TransformEngine, TransformError, Transformer,
};

// ============================================================================
// Test Doubles
// ============================================================================

/// What the engine saw on one call.
#[derive(Debug, Clone)]
struct EngineCall {
    includes: Vec<String>,
    excludes: Vec<String>,
    fieldsets: Vec<String>,
    recursion_limit: usize,
    serializer: String,
    resource_key: Option<String>,
    meta: Map<String, Value>,
    has_cursor: bool,
    has_paginator: bool,
}

/// Records every call and returns a fixed output.
#[derive(Debug, Default)]
struct RecordingEngine {
    calls: Mutex<Vec<EngineCall>>,
}

impl RecordingEngine {
    fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    fn last_call(&self) -> EngineCall {
        self.calls().pop().expect("engine was not called")
    }
}

impl TransformEngine for RecordingEngine {
    fn make(
        &self,
        resource: &Resource,
        serializer: &dyn SuccessSerializer,
        directives: &Directives,
    ) -> Result<Value, BoxError> {
        self.calls.lock().unwrap().push(EngineCall {
            includes: directives
                .include_specs()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
            excludes: directives.excludes.clone(),
            fieldsets: directives.fieldsets.clone(),
            recursion_limit: directives.recursion_limit,
            serializer: format!("{serializer:?}"),
            resource_key: resource.resource_key().map(ToString::to_string),
            meta: resource.meta().clone(),
            has_cursor: resource.cursor().is_some(),
            has_paginator: resource.paginator().is_some(),
        });
        Ok(json!({"transformed": true}))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("engine exploded")]
struct EngineExploded;

#[derive(Debug)]
struct FailingEngine;

impl TransformEngine for FailingEngine {
    fn make(
        &self,
        _resource: &Resource,
        _serializer: &dyn SuccessSerializer,
        _directives: &Directives,
    ) -> Result<Value, BoxError> {
        Err(Box::new(EngineExploded))
    }
}

/// One recorded eager-load entry: relation name and constraint, if any.
type LoadedRelation = (String, Option<Constraint>);

/// Data that records eager-load calls.
#[derive(Debug, Clone, Default)]
struct LoadableModel {
    loads: Arc<Mutex<Vec<Vec<LoadedRelation>>>>,
    fail: bool,
}

impl LoadableModel {
    fn load_calls(&self) -> Vec<Vec<LoadedRelation>> {
        self.loads.lock().unwrap().clone()
    }

    fn loaded_names(&self) -> Vec<String> {
        let calls = self.load_calls();
        assert_eq!(calls.len(), 1, "expected exactly one load call");
        calls[0].iter().map(|(name, _)| name.clone()).collect()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("relation 'ghost' does not exist")]
struct MissingRelation;

impl Loadable for LoadableModel {
    fn load(&mut self, relations: &[EagerLoad]) -> Result<(), BoxError> {
        if self.fail {
            return Err(Box::new(MissingRelation));
        }
        self.loads.lock().unwrap().push(
            relations
                .iter()
                .map(|r| (r.relation.clone(), r.constraint.clone()))
                .collect(),
        );
        Ok(())
    }
}

impl ResourceData for LoadableModel {
    fn payload(&self) -> Value {
        json!({"id": 1})
    }

    fn as_loadable(&mut self) -> Option<&mut dyn Loadable> {
        Some(self)
    }
}

/// Records the arguments of every wrapping call.
#[derive(Debug, Default)]
struct RecordingFactory {
    inner: DefaultResourceFactory,
    calls: Mutex<Vec<(Value, bool, Option<String>)>>,
}

impl ResourceFactory for RecordingFactory {
    fn make(
        &self,
        data: Box<dyn ResourceData>,
        transformer: Option<Arc<dyn Transformer>>,
        resource_key: Option<&str>,
    ) -> Resource {
        self.calls.lock().unwrap().push((
            data.payload(),
            transformer.is_some(),
            resource_key.map(ToString::to_string),
        ));
        self.inner.make(data, transformer, resource_key)
    }
}

#[derive(Debug)]
struct PostTransformer {
    defaults: Vec<&'static str>,
    include_methods: Vec<&'static str>,
}

impl PostTransformer {
    fn arc(defaults: Vec<&'static str>, include_methods: Vec<&'static str>) -> Arc<dyn Transformer> {
        Arc::new(Self {
            defaults,
            include_methods,
        })
    }
}

impl Transformer for PostTransformer {
    fn transform(&self, item: &Value) -> Value {
        item.clone()
    }

    fn default_relations(&self) -> Vec<String> {
        self.defaults.iter().map(ToString::to_string).collect()
    }

    fn has_include_method(&self, relation: &str) -> bool {
        self.include_methods.iter().any(|name| *name == relation)
    }
}

fn builder() -> (TransformBuilder, Arc<RecordingEngine>) {
    let engine = Arc::new(RecordingEngine::default());
    let builder = TransformBuilder::new(TransformConfig::default(), engine.clone());
    (builder, engine)
}

fn specs(includes: &[IncludeDirective]) -> Vec<&str> {
    includes.iter().map(IncludeDirective::spec).collect()
}

// ============================================================================
// Directive Accumulation
// ============================================================================

#[test]
fn test_with_accumulates_in_call_order() {
    let (mut builder, _) = builder();
    builder.empty_resource().with("foo").with(["bar", "baz"]);

    assert_eq!(specs(builder.includes()), vec!["foo", "bar", "baz"]);
}

#[test]
fn test_with_flattens_every_argument_shape() {
    let (mut builder, _) = builder();
    builder
        .empty_resource()
        .with("a")
        .with(vec!["b", "c"])
        .with(vec!["d".to_string()])
        .with(IncludeDirective::new("e:limit(1)"))
        .with(Relations::from_pairs([("f", Constraint::new(1_u8))]).and_names(["g"]));

    assert_eq!(
        specs(builder.includes()),
        vec!["a", "b", "c", "d", "e:limit(1)", "f", "g"]
    );
}

#[test]
fn test_duplicates_are_preserved() {
    let (mut builder, _) = builder();
    builder
        .empty_resource()
        .with("foo")
        .with("foo")
        .without("bar")
        .without(["bar"])
        .only("id")
        .only("id");

    assert_eq!(specs(builder.includes()), vec!["foo", "foo"]);
    assert_eq!(builder.excludes(), ["bar", "bar"]);
    assert_eq!(builder.fieldsets(), ["id", "id"]);
}

#[test]
fn test_without_and_only_accumulate_in_call_order() {
    let (mut builder, engine) = builder();
    builder
        .resource(json!({"id": 1}), None, None)
        .without("foo")
        .without(["bar", "baz"])
        .only(vec!["id".to_string()])
        .only(["name", "email"]);

    builder.transform().unwrap();

    let call = engine.last_call();
    assert_eq!(call.excludes, vec!["foo", "bar", "baz"]);
    assert_eq!(call.fieldsets, vec!["id", "name", "email"]);
}

// ============================================================================
// Resource Wrapping
// ============================================================================

#[test]
fn test_resource_makes_exactly_one_wrapping_call() {
    let engine = Arc::new(RecordingEngine::default());
    let factory = Arc::new(RecordingFactory::default());
    let mut builder =
        TransformBuilder::with_factory(TransformConfig::default(), engine, factory.clone());

    builder.resource(json!({"id": 9}), Some(PostTransformer::arc(vec![], vec![])), Some("post"));

    let calls = factory.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![(json!({"id": 9}), true, Some("post".to_string()))]);
}

#[test]
fn test_paginated_resource_makes_exactly_one_wrapping_call() {
    let engine = Arc::new(RecordingEngine::default());
    let factory = Arc::new(RecordingFactory::default());
    let mut builder =
        TransformBuilder::with_factory(TransformConfig::default(), engine, factory.clone());

    builder.resource(CursorPage::new(vec![json!({"id": 1})]).with_next("n"), None, Some("posts"));
    assert!(builder.resource_ref().unwrap().cursor().is_some());
    assert_eq!(factory.calls.lock().unwrap().len(), 1);

    builder.resource(LengthAwarePage::new(vec![json!({"id": 2})], 4, 1, 2), None, None);
    assert!(builder.resource_ref().unwrap().paginator().is_some());

    let calls = factory.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            (json!([{"id": 1}]), false, Some("posts".to_string())),
            (json!([{"id": 2}]), false, None),
        ]
    );
}

#[test]
fn test_empty_resource_wraps_null_payload() {
    let engine = Arc::new(RecordingEngine::default());
    let factory = Arc::new(RecordingFactory::default());
    let mut builder =
        TransformBuilder::with_factory(TransformConfig::default(), engine, factory.clone());

    builder.empty_resource();

    let calls = factory.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![(Value::Null, false, None)]);
    assert!(builder.resource_ref().is_some());
}

#[test]
fn test_cursor_paginated_data_binds_cursor() {
    let (mut builder, _) = builder();
    builder.resource(
        CursorPage::new(vec![json!({"id": 1})]).with_next("abc"),
        None,
        None,
    );

    let resource = builder.resource_ref().unwrap();
    assert_eq!(resource.cursor().unwrap().next.as_deref(), Some("abc"));
    assert!(resource.paginator().is_none());
}

#[test]
fn test_length_aware_data_binds_paginator() {
    let (mut builder, _) = builder();
    builder.resource(LengthAwarePage::new(vec![json!(1)], 25, 10, 1), None, None);

    let resource = builder.resource_ref().unwrap();
    assert_eq!(resource.paginator().unwrap().last_page, 3);
    assert!(resource.cursor().is_none());
}

#[test]
fn test_plain_data_binds_no_pagination() {
    let (mut builder, _) = builder();
    builder.resource(json!([1, 2, 3]), None, None);

    let resource = builder.resource_ref().unwrap();
    assert!(resource.cursor().is_none());
    assert!(resource.paginator().is_none());
}

#[test]
fn test_manual_cursor_and_paginator_override() {
    let (mut builder, engine) = builder();
    builder
        .resource(json!([]), None, None)
        .paginator(PaginatorAdapter::default())
        .unwrap();
    assert!(builder.resource_ref().unwrap().paginator().is_some());

    builder
        .cursor(Cursor::new(Some("1".to_string()), None, None, 0))
        .unwrap()
        .transform()
        .unwrap();

    let call = engine.last_call();
    assert!(call.has_cursor);
    assert!(!call.has_paginator);
}

#[test]
fn test_pagination_override_requires_resource() {
    let (mut builder, _) = builder();

    assert!(matches!(
        builder.cursor(Cursor::default()),
        Err(TransformError::MissingResource { .. })
    ));
    assert!(matches!(
        builder.paginator(PaginatorAdapter::default()),
        Err(TransformError::MissingResource { .. })
    ));
}

#[test]
fn test_meta_requires_resource() {
    let (mut builder, _) = builder();

    let mut meta = Map::new();
    meta.insert("foo".to_string(), json!(1));

    assert!(matches!(
        builder.meta(meta),
        Err(TransformError::MissingResource {
            operation: "add meta"
        })
    ));
    assert!(builder.resource_ref().is_none());
}

// ============================================================================
// Meta
// ============================================================================

#[test]
fn test_meta_returns_same_builder_and_sets_meta() {
    let (mut builder, _) = builder();
    builder.empty_resource();

    let mut meta = Map::new();
    meta.insert("foo".to_string(), json!(1));

    let returned: *const TransformBuilder = builder.meta(meta.clone()).unwrap();
    assert!(std::ptr::eq(returned, &builder));
    assert_eq!(builder.resource_ref().unwrap().meta(), &meta);
}

#[test]
fn test_meta_merges_with_last_write_winning() {
    let (mut builder, engine) = builder();
    builder.resource(json!({}), None, None);

    let mut first = Map::new();
    first.insert("a".to_string(), json!(1));
    first.insert("b".to_string(), json!(1));
    let mut second = Map::new();
    second.insert("b".to_string(), json!(2));

    builder
        .meta(first)
        .unwrap()
        .meta(second)
        .unwrap()
        .transform()
        .unwrap();

    assert_eq!(Value::Object(engine.last_call().meta), json!({"a": 1, "b": 2}));
}

// ============================================================================
// Serializer Selection
// ============================================================================

#[test]
fn test_invalid_serializer_fails_and_keeps_previous_serializer() {
    let (mut builder, engine) = builder();
    builder.resource(json!({}), None, None);

    let error = builder.serializer("InvalidThing").unwrap_err();
    assert!(matches!(
        error,
        TransformError::InvalidSuccessSerializer { ref serializer } if serializer == "InvalidThing"
    ));

    builder.transform().unwrap();
    assert_eq!(engine.last_call().serializer, "SuccessEnvelopeSerializer");
}

#[test]
fn test_serializer_by_name_and_instance() {
    let (mut builder, engine) = builder();
    builder.resource(json!({}), None, None);

    builder.serializer("noop").unwrap().transform().unwrap();
    assert_eq!(engine.last_call().serializer, "NoopSerializer");

    #[derive(Debug)]
    struct Custom;

    impl SuccessSerializer for Custom {
        fn item(&self, _key: Option<&str>, data: Value) -> Value {
            data
        }

        fn collection(&self, _key: Option<&str>, data: Vec<Value>) -> Value {
            Value::Array(data)
        }

        fn null(&self) -> Value {
            Value::Null
        }

        fn meta(&self, meta: &Map<String, Value>) -> Value {
            Value::Object(meta.clone())
        }

        fn paginator(&self, _paginator: &PaginatorAdapter) -> Value {
            json!({})
        }

        fn cursor(&self, _cursor: &Cursor) -> Value {
            json!({})
        }
    }

    let custom: Arc<dyn SuccessSerializer> = Arc::new(Custom);
    builder.serializer(custom).unwrap().transform().unwrap();
    assert_eq!(engine.last_call().serializer, "Custom");
}

#[test]
fn test_serializer_survives_resource_rebind() {
    let (mut builder, engine) = builder();
    builder.serializer(NoopSerializer).unwrap();
    builder.resource(json!({"id": 1}), None, None);
    builder.resource(json!({"id": 2}), None, None).transform().unwrap();

    assert_eq!(engine.last_call().serializer, "NoopSerializer");
}

#[test]
fn test_serializer_resolves_through_configured_registry() {
    let engine = Arc::new(RecordingEngine::default());
    let config = TransformConfig::builder()
        .serializers(SerializerRegistry::with_defaults().register("bare", NoopSerializer))
        .build()
        .unwrap();
    let mut builder = TransformBuilder::new(config, engine.clone());

    builder
        .resource(json!({}), None, None)
        .serializer("bare")
        .unwrap()
        .transform()
        .unwrap();

    assert_eq!(engine.last_call().serializer, "NoopSerializer");
}

// ============================================================================
// Resource Re-binding
// ============================================================================

#[test]
fn test_resource_rebind_discards_directives() {
    let (mut builder, engine) = builder();
    builder
        .resource(json!({"id": 1}), None, None)
        .with("foo")
        .without("bar")
        .only("id");

    builder
        .resource(json!({"id": 2}), None, Some("second"))
        .with("baz")
        .transform()
        .unwrap();

    let call = engine.last_call();
    assert_eq!(call.includes, vec!["baz"]);
    assert!(call.excludes.is_empty());
    assert!(call.fieldsets.is_empty());
    assert_eq!(call.resource_key.as_deref(), Some("second"));
}

// ============================================================================
// Transformation and Eager Loading
// ============================================================================

#[test]
fn test_transform_with_no_directives() {
    let (mut builder, engine) = builder();
    let output = builder.resource(json!({"id": 1}), None, None).transform().unwrap();

    assert_eq!(output, json!({"transformed": true}));
    let call = engine.last_call();
    assert!(call.includes.is_empty());
    assert!(call.excludes.is_empty());
    assert!(call.fieldsets.is_empty());
    assert_eq!(call.recursion_limit, 10);
}

#[test]
fn test_transform_without_resource_fails_fast() {
    let (mut builder, engine) = builder();
    let error = builder.transform().unwrap_err();

    assert!(matches!(
        error,
        TransformError::MissingResource {
            operation: "transform"
        }
    ));
    assert!(engine.calls().is_empty());
}

#[test]
fn test_defaults_are_appended_after_explicit_includes() {
    let (mut builder, engine) = builder();
    let model = LoadableModel::default();
    let constraint = Constraint::new("only published".to_string());

    builder
        .resource(model.clone(), Some(PostTransformer::arc(vec!["baz"], vec![])), None)
        .with(vec![
            IncludeDirective::constrained("foo", constraint.clone()),
            IncludeDirective::new("bar"),
        ])
        .transform()
        .unwrap();

    let loads = model.load_calls();
    assert_eq!(loads.len(), 1);
    let names: Vec<&str> = loads[0].iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["foo", "bar", "baz"]);
    assert!(loads[0][0].1.as_ref().is_some_and(|c| c.same_as(&constraint)));
    assert!(loads[0][1].1.is_none());
    assert!(loads[0][2].1.is_none());

    assert_eq!(engine.last_call().includes, vec!["foo", "bar", "baz"]);
}

#[test]
fn test_parameterized_include_loads_bare_name() {
    let (mut builder, engine) = builder();
    let model = LoadableModel::default();

    builder
        .resource(model.clone(), None, None)
        .with("foo:first(aa|bb)")
        .transform()
        .unwrap();

    assert_eq!(model.loaded_names(), vec!["foo"]);
    assert_eq!(engine.last_call().includes, vec!["foo:first(aa|bb)"]);
}

#[test]
fn test_default_already_covered_by_parameterized_include_is_not_repeated() {
    let (mut builder, engine) = builder();
    let model = LoadableModel::default();

    builder
        .resource(model.clone(), Some(PostTransformer::arc(vec!["foo"], vec![])), None)
        .with("foo:limit(3)")
        .transform()
        .unwrap();

    assert_eq!(model.loaded_names(), vec!["foo"]);
    assert_eq!(engine.last_call().includes, vec!["foo:limit(3)"]);
}

#[test]
fn test_parameterized_default_covered_by_bare_include_is_not_repeated() {
    let (mut builder, engine) = builder();
    let model = LoadableModel::default();

    builder
        .resource(
            model.clone(),
            Some(PostTransformer::arc(vec!["comments:limit(5)"], vec![])),
            None,
        )
        .with("comments")
        .transform()
        .unwrap();

    assert_eq!(model.loaded_names(), vec!["comments"]);
    assert_eq!(engine.last_call().includes, vec!["comments"]);
}

#[test]
fn test_include_method_skips_eager_load_but_reaches_engine() {
    let (mut builder, engine) = builder();
    let model = LoadableModel::default();

    builder
        .resource(model.clone(), Some(PostTransformer::arc(vec![], vec!["bar"])), None)
        .with(["foo", "bar"])
        .transform()
        .unwrap();

    assert_eq!(model.loaded_names(), vec!["foo"]);
    assert_eq!(engine.last_call().includes, vec!["foo", "bar"]);
}

#[test]
fn test_include_method_checks_first_segment_of_nested_relation() {
    let (mut builder, _) = builder();
    let model = LoadableModel::default();

    builder
        .resource(model.clone(), Some(PostTransformer::arc(vec![], vec!["stats"])), None)
        .with(["stats.daily", "author.profile", "daily"])
        .transform()
        .unwrap();

    assert_eq!(model.loaded_names(), vec!["author.profile", "daily"]);
}

#[test]
fn test_include_method_applies_to_default_relations() {
    let (mut builder, engine) = builder();
    let model = LoadableModel::default();

    builder
        .resource(
            model.clone(),
            Some(PostTransformer::arc(vec!["author", "stats"], vec!["stats"])),
            None,
        )
        .transform()
        .unwrap();

    assert_eq!(model.loaded_names(), vec!["author"]);
    assert_eq!(engine.last_call().includes, vec!["author", "stats"]);
}

/// Length-aware page over loadable records.
#[derive(Debug)]
struct LoadablePage {
    page: LengthAwarePage,
    records: LoadableModel,
}

impl ResourceData for LoadablePage {
    fn payload(&self) -> Value {
        self.page.payload()
    }

    fn as_length_aware_paginator(&self) -> Option<&dyn LengthAwarePaginator> {
        self.page.as_length_aware_paginator()
    }

    fn as_loadable(&mut self) -> Option<&mut dyn Loadable> {
        Some(&mut self.records)
    }
}

#[test]
fn test_paginated_loadable_data_is_eager_loaded() {
    let (mut builder, engine) = builder();
    let records = LoadableModel::default();
    let data = LoadablePage {
        page: LengthAwarePage::new(vec![json!({"id": 1}), json!({"id": 2})], 6, 2, 1),
        records: records.clone(),
    };

    builder
        .resource(data, None, None)
        .with("author:limit(1)")
        .transform()
        .unwrap();

    assert_eq!(records.loaded_names(), vec!["author"]);
    let call = engine.last_call();
    assert!(call.has_paginator);
    assert_eq!(call.includes, vec!["author:limit(1)"]);
}

#[test]
fn test_eager_load_disabled_by_config() {
    let engine = Arc::new(RecordingEngine::default());
    let config = TransformConfig::builder().eager_load(false).build().unwrap();
    let mut builder = TransformBuilder::new(config, engine.clone());
    let model = LoadableModel::default();

    builder
        .resource(model.clone(), None, None)
        .with("foo")
        .transform()
        .unwrap();

    assert!(model.load_calls().is_empty());
    assert_eq!(engine.last_call().includes, vec!["foo"]);
}

#[test]
fn test_recursion_limit_is_forwarded() {
    let engine = Arc::new(RecordingEngine::default());
    let config = TransformConfig::builder().recursion_limit(2).build().unwrap();
    let mut builder = TransformBuilder::new(config, engine.clone());

    builder.resource(json!({}), None, None).transform().unwrap();

    assert_eq!(engine.last_call().recursion_limit, 2);
}

// ============================================================================
// Error Propagation
// ============================================================================

#[test]
fn test_eager_load_error_propagates_before_engine() {
    let (mut builder, engine) = builder();
    let model = LoadableModel {
        fail: true,
        ..LoadableModel::default()
    };

    let error = builder
        .resource(model, None, None)
        .with("ghost")
        .transform()
        .unwrap_err();

    assert!(matches!(error, TransformError::EagerLoad(_)));
    assert_eq!(error.to_string(), "relation 'ghost' does not exist");
    assert!(engine.calls().is_empty());
}

#[test]
fn test_engine_error_propagates_unchanged() {
    let mut builder = TransformBuilder::new(TransformConfig::default(), Arc::new(FailingEngine));

    let error = builder
        .resource(json!({}), None, None)
        .with("foo")
        .transform()
        .unwrap_err();

    assert!(matches!(error, TransformError::Engine(_)));
    assert_eq!(error.to_string(), "engine exploded");
    assert_eq!(specs(builder.includes()), vec!["foo"]);
}
