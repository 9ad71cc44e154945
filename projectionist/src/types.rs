//! In-memory data model for projection registries.

use crate::paths;
use crate::specificity::sort_by_specificity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Property key → template value.
pub type Props = HashMap<String, String>;

/// Every pattern declared at one root directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projection {
    patterns: HashMap<String, Props>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `props` for `pattern`, replacing any previous declaration.
    pub fn insert(&mut self, pattern: impl Into<String>, props: Props) {
        self.patterns.insert(pattern.into(), props);
    }

    /// Builder-style [`Projection::insert`].
    pub fn with(mut self, pattern: impl Into<String>, props: Props) -> Self {
        self.insert(pattern, props);
        self
    }

    pub fn get(&self, pattern: &str) -> Option<&Props> {
        self.patterns.get(pattern)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Props)> {
        self.patterns.iter()
    }

    /// Patterns, most specific first.
    pub fn patterns_by_specificity(&self) -> Vec<&str> {
        let mut patterns: Vec<&str> = self.patterns.keys().map(String::as_str).collect();
        sort_by_specificity(&mut patterns);
        patterns
    }

    /// Merge `other` into `self`. Patterns declared by `other` win.
    pub fn merge(&mut self, other: Projection) {
        self.patterns.extend(other.patterns);
    }
}

impl FromIterator<(String, Props)> for Projection {
    fn from_iter<I: IntoIterator<Item = (String, Props)>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}

/// Every loaded registry, keyed by its root directory.
///
/// Root keys are lexically cleaned on insertion so they never carry a
/// trailing separator or `.`/`..` segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Projections {
    roots: HashMap<String, Projection>,
}

impl Projections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the registry declared at `root`.
    ///
    /// A root that is already present gets the patterns merged, the new
    /// declarations winning.
    pub fn insert(&mut self, root: &str, projection: Projection) {
        let root = paths::clean(root);
        match self.roots.get_mut(&root) {
            Some(existing) => existing.merge(projection),
            None => {
                self.roots.insert(root, projection);
            }
        }
    }

    /// Builder-style [`Projections::insert`].
    pub fn with(mut self, root: &str, projection: Projection) -> Self {
        self.insert(root, projection);
        self
    }

    pub fn get(&self, root: &str) -> Option<&Projection> {
        self.roots.get(root)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Projection)> {
        self.roots.iter()
    }

    /// Roots, most specific first. Nested roots come before their ancestors.
    pub fn roots_by_specificity(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = self.roots.keys().map(String::as_str).collect();
        sort_by_specificity(&mut roots);
        roots
    }
}

/// Values a placeholder can draw its base value from.
///
/// Every query context holds `project` and `file`; `match` is present once a
/// pattern matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryContext {
    values: HashMap<String, String>,
}

impl QueryContext {
    pub const PROJECT: &'static str = "project";
    pub const FILE: &'static str = "file";
    pub const MATCH: &'static str = "match";

    /// Context for a query of `file` against the registry at `project`.
    pub fn new(project: &str, file: &str) -> Self {
        let mut ctx = Self::default();
        ctx.insert(Self::PROJECT, project);
        ctx.insert(Self::FILE, file);
        ctx
    }

    /// Record the text captured by a pattern.
    pub fn with_match(mut self, captured: impl Into<String>) -> Self {
        self.insert(Self::MATCH, captured);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn project(&self) -> Option<&str> {
        self.get(Self::PROJECT)
    }

    pub fn captured(&self) -> Option<&str> {
        self.get(Self::MATCH)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// An unexpanded template value together with the context it matched in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawResult {
    /// Root of the registry declaring the value.
    pub root: String,
    pub value: String,
    pub context: QueryContext,
}

/// Build [`Props`] from key/value pairs.
pub fn props<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Props {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
