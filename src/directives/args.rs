//! Argument normalization for `with`, `without` and `only`.

use super::{Constraint, IncludeDirective};

/// A normalized list of include directives.
///
/// Every argument shape accepted by
/// [`TransformBuilder::with`](crate::TransformBuilder::with) converts into this
/// type, so the builder only ever stores one canonical list.
///
/// # Example
///
/// ```rust
/// use transformer::directives::{Constraint, Relations};
///
/// let relations = Relations::from_pairs([("foo", Constraint::new(1_u8))])
///     .and_names(["bar", "baz:limit(2)"]);
///
/// let specs: Vec<&str> = relations.iter().map(|d| d.spec()).collect();
/// assert_eq!(specs, vec!["foo", "bar", "baz:limit(2)"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Relations(Vec<IncludeDirective>);

impl Relations {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list of plain string directives.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(IncludeDirective::new).collect())
    }

    /// Builds a list of associative directives.
    #[must_use]
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Constraint)>,
        S: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(spec, constraint)| IncludeDirective::constrained(spec, constraint))
                .collect(),
        )
    }

    /// Appends plain string directives after the existing ones.
    #[must_use]
    pub fn and_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(names.into_iter().map(IncludeDirective::new));
        self
    }

    /// Appends one associative directive.
    #[must_use]
    pub fn and_pair(mut self, spec: impl Into<String>, constraint: Constraint) -> Self {
        self.0.push(IncludeDirective::constrained(spec, constraint));
        self
    }

    /// Returns an iterator over the directives.
    pub fn iter(&self) -> std::slice::Iter<'_, IncludeDirective> {
        self.0.iter()
    }

    /// Returns the number of directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list holds no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the list and returns the directives.
    #[must_use]
    pub fn into_inner(self) -> Vec<IncludeDirective> {
        self.0
    }
}

impl IntoIterator for Relations {
    type Item = IncludeDirective;
    type IntoIter = std::vec::IntoIter<IncludeDirective>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<IncludeDirective> for Relations {
    fn from(directive: IncludeDirective) -> Self {
        Self(vec![directive])
    }
}

impl From<Vec<IncludeDirective>> for Relations {
    fn from(directives: Vec<IncludeDirective>) -> Self {
        Self(directives)
    }
}

impl From<&str> for Relations {
    fn from(name: &str) -> Self {
        Self::from_names([name])
    }
}

impl From<String> for Relations {
    fn from(name: String) -> Self {
        Self::from_names([name])
    }
}

impl From<&[&str]> for Relations {
    fn from(names: &[&str]) -> Self {
        Self::from_names(names.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Relations {
    fn from(names: [&str; N]) -> Self {
        Self::from_names(names)
    }
}

impl From<Vec<&str>> for Relations {
    fn from(names: Vec<&str>) -> Self {
        Self::from_names(names)
    }
}

impl From<Vec<String>> for Relations {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

/// A normalized list of relation or field names.
///
/// Used by [`TransformBuilder::without`](crate::TransformBuilder::without) and
/// [`TransformBuilder::only`](crate::TransformBuilder::only).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Names(Vec<String>);

impl Names {
    /// Builds a list from any iterator of names.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Returns the names as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Consumes the list and returns the names.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Names {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl From<String> for Names {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl From<&[&str]> for Names {
    fn from(names: &[&str]) -> Self {
        Self::from_names(names.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Names {
    fn from(names: [&str; N]) -> Self {
        Self::from_names(names)
    }
}

impl From<Vec<&str>> for Names {
    fn from(names: Vec<&str>) -> Self {
        Self::from_names(names)
    }
}

impl From<Vec<String>> for Names {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}
