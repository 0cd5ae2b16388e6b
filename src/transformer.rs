//! The transformer capability.
//!
//! A [`Transformer`] turns one item of raw data into its public representation
//! and describes which relations it knows how to include. The builder only
//! queries the relation side of the trait; the transform engine calls
//! [`Transformer::transform`].

use std::fmt;

use serde_json::Value;

/// Transforms raw items and declares relation capabilities.
///
/// # Example
///
/// ```rust
/// use serde_json::{json, Value};
/// use transformer::Transformer;
///
/// #[derive(Debug)]
/// struct PostTransformer;
///
/// impl Transformer for PostTransformer {
///     fn transform(&self, item: &Value) -> Value {
///         json!({ "id": item["id"], "title": item["title"] })
///     }
///
///     fn default_relations(&self) -> Vec<String> {
///         vec!["author".to_string()]
///     }
///
///     fn has_include_method(&self, relation: &str) -> bool {
///         relation == "stats"
///     }
/// }
///
/// let transformer = PostTransformer;
/// assert_eq!(transformer.default_relations(), vec!["author"]);
/// assert!(transformer.has_include_method("stats"));
/// assert!(!transformer.has_include_method("author"));
/// ```
pub trait Transformer: fmt::Debug + Send + Sync {
    /// Transforms a single item.
    fn transform(&self, item: &Value) -> Value;

    /// Relations included on every transformation, in order.
    fn default_relations(&self) -> Vec<String> {
        Vec::new()
    }

    /// Returns `true` if the transformer resolves `relation` itself.
    ///
    /// `relation` is always a single path segment. Relations resolved by the
    /// transformer are not eager loaded.
    fn has_include_method(&self, _relation: &str) -> bool {
        false
    }
}

/// A transformer backed by a plain function.
///
/// Useful for one-off transformations that do not need a dedicated type.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use transformer::{ClosureTransformer, Transformer};
///
/// let transformer = ClosureTransformer::new(|item: &serde_json::Value| json!({ "name": item["first_name"] }))
///     .with_default_relations(["roles"]);
///
/// assert_eq!(transformer.transform(&json!({"first_name": "Ada"})), json!({"name": "Ada"}));
/// assert_eq!(transformer.default_relations(), vec!["roles"]);
/// ```
pub struct ClosureTransformer<F> {
    transform: F,
    default_relations: Vec<String>,
}

impl<F> ClosureTransformer<F>
where
    F: Fn(&Value) -> Value + Send + Sync,
{
    /// Creates a transformer from a function.
    #[must_use]
    pub const fn new(transform: F) -> Self {
        Self {
            transform,
            default_relations: Vec::new(),
        }
    }

    /// Sets the relations included by default.
    #[must_use]
    pub fn with_default_relations<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_relations = relations.into_iter().map(Into::into).collect();
        self
    }
}

impl<F> fmt::Debug for ClosureTransformer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureTransformer")
            .field("default_relations", &self.default_relations)
            .finish_non_exhaustive()
    }
}

impl<F> Transformer for ClosureTransformer<F>
where
    F: Fn(&Value) -> Value + Send + Sync,
{
    fn transform(&self, item: &Value) -> Value {
        (self.transform)(item)
    }

    fn default_relations(&self) -> Vec<String> {
        self.default_relations.clone()
    }
}
