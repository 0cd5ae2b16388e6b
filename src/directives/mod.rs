//! Include, exclude and fieldset directives.
//!
//! A directive is one instruction accumulated on a
//! [`TransformBuilder`](crate::TransformBuilder) through `with`, `without` or
//! `only`. Include directives come in two forms:
//!
//! - a plain string such as `"comments"` or `"comments:limit(5|1)"`
//! - a relation name paired with an opaque [`Constraint`] the data layer uses
//!   while eager loading
//!
//! The argument types [`Relations`] and [`Names`] normalize every accepted
//! argument shape into one canonical list before it is stored.
//!
//! # Example
//!
//! ```rust
//! use transformer::directives::{parse_include, IncludeDirective};
//!
//! let directive = IncludeDirective::new("comments.author:first(aa|bb)");
//! let parsed = parse_include(&directive);
//!
//! assert_eq!(parsed.relation, "comments.author");
//! assert_eq!(parsed.root_segment, "comments");
//! assert_eq!(parsed.directive.spec(), "comments.author:first(aa|bb)");
//! ```

mod args;

pub use args::{Names, Relations};

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Separates a relation name from its parameter suffix.
const PARAMETER_DELIMITER: char = ':';

/// Separates the segments of a nested relation name.
const NESTING_DELIMITER: char = '.';

/// An opaque eager-load constraint attached to an include directive.
///
/// The transformer crate never inspects a constraint. It is cloned along with
/// its directive and handed to the data layer, which downcasts it back to the
/// callback type it registered.
///
/// # Example
///
/// ```rust
/// use transformer::directives::Constraint;
///
/// type Scope = fn(&mut Vec<String>);
///
/// fn only_published(query: &mut Vec<String>) {
///     query.push("published = 1".to_string());
/// }
///
/// let constraint = Constraint::new(only_published as Scope);
/// let scope = constraint.downcast_ref::<Scope>().unwrap();
///
/// let mut query = Vec::new();
/// scope(&mut query);
/// assert_eq!(query, vec!["published = 1"]);
/// ```
#[derive(Clone)]
pub struct Constraint(Arc<dyn Any + Send + Sync>);

impl Constraint {
    /// Wraps any `Send + Sync` value as a constraint.
    #[must_use]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Returns the wrapped value if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns `true` if both handles point at the same constraint.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Constraint(..)")
    }
}

/// A single include directive.
///
/// The directive text is stored exactly as supplied. It is split on demand by
/// [`parse_include`] but never rewritten.
#[derive(Clone, Debug)]
pub struct IncludeDirective {
    spec: String,
    constraint: Option<Constraint>,
}

impl IncludeDirective {
    /// Creates a plain string directive such as `"posts"` or `"posts:limit(5)"`.
    #[must_use]
    pub fn new(spec: impl Into<String>) -> Self {
        Self {
            spec: spec.into(),
            constraint: None,
        }
    }

    /// Creates an associative directive pairing a relation with a constraint.
    #[must_use]
    pub fn constrained(spec: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            spec: spec.into(),
            constraint: Some(constraint),
        }
    }

    /// Returns the original directive text.
    #[must_use]
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// Returns the constraint of an associative directive.
    #[must_use]
    pub const fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    /// Returns the bare relation name: everything before the first `:`.
    #[must_use]
    pub fn relation(&self) -> &str {
        self.spec
            .split_once(PARAMETER_DELIMITER)
            .map_or(self.spec.as_str(), |(relation, _)| relation)
    }
}

impl From<&str> for IncludeDirective {
    fn from(spec: &str) -> Self {
        Self::new(spec)
    }
}

impl From<String> for IncludeDirective {
    fn from(spec: String) -> Self {
        Self::new(spec)
    }
}

/// The result of splitting one include directive.
#[derive(Clone, Copy, Debug)]
pub struct ParsedInclude<'a> {
    /// Bare relation name used for eager loading.
    pub relation: &'a str,
    /// First path segment of the bare name, used for include method lookups.
    pub root_segment: &'a str,
    /// The untouched directive handed to the transform engine.
    pub directive: &'a IncludeDirective,
}

/// Splits an include directive into its eager-load name and engine-facing form.
///
/// A directive without a `:` yields its whole text as the relation name.
#[must_use]
pub fn parse_include(directive: &IncludeDirective) -> ParsedInclude<'_> {
    let relation = directive.relation();
    let root_segment = relation
        .split_once(NESTING_DELIMITER)
        .map_or(relation, |(root, _)| root);

    ParsedInclude {
        relation,
        root_segment,
        directive,
    }
}

/// One relation handed to the data layer for eager loading.
#[derive(Clone, Debug)]
pub struct EagerLoad {
    /// Bare relation name, possibly nested (`"posts.comments"`).
    pub relation: String,
    /// Constraint from an associative include directive.
    pub constraint: Option<Constraint>,
}

impl EagerLoad {
    /// Creates an unconstrained eager-load entry.
    #[must_use]
    pub fn new(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            constraint: None,
        }
    }
}

/// The resolved directive set passed to a [`TransformEngine`](crate::TransformEngine).
#[derive(Clone, Debug, Default)]
pub struct Directives {
    /// Include directives in call order, followed by uncovered default relations.
    pub includes: Vec<IncludeDirective>,
    /// Excluded relations in call order.
    pub excludes: Vec<String>,
    /// Field filters in call order.
    pub fieldsets: Vec<String>,
    /// Maximum include nesting depth the engine should honor.
    pub recursion_limit: usize,
}

impl Directives {
    /// Returns the text of every include directive, in order.
    #[must_use]
    pub fn include_specs(&self) -> Vec<&str> {
        self.includes.iter().map(IncludeDirective::spec).collect()
    }
}
