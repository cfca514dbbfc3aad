//! Dependency graph construction and analysis.
//!
//! - [`DependencyGraph`]: insertion-ordered `package -> dependencies` map
//! - [`GraphBuilder`]: bounded BFS discovery with filtering and narrow cycle flags
//! - [`GraphBuilder::reverse_dependencies`]: reverse lookup over the full graph
//! - [`find_cycles`]: general depth-first cycle detection

mod builder;
mod cycles;
mod reverse;

pub use builder::{DEFAULT_BOOTSTRAP_ROOTS, GraphBuilder, GraphStatistics};
pub use cycles::find_cycles;
pub use reverse::{BOOTSTRAP_MAX_DEPTH, invert};

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Reverse-dependency map: dependent package -> `[target]`.
pub type ReverseMap = DependencyGraph;

/// A package dependency graph.
///
/// Maps a package to the ordered list of its direct dependencies. Keys keep
/// the order in which they were first inserted. A package that only ever
/// appears as a dependency is a *leaf*: its own dependencies were never
/// looked up.
///
/// Two graphs are equal when they hold the same entries in the same order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    entries: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dependencies of `package`.
    ///
    /// Replacing an existing entry keeps its original position.
    pub fn insert(&mut self, package: impl Into<String>, dependencies: Vec<String>) {
        self.entries.insert(package.into(), dependencies);
    }

    /// Dependencies of `package`, if it is a key.
    #[must_use]
    pub fn get(&self, package: &str) -> Option<&[String]> {
        self.entries.get(package).map(Vec::as_slice)
    }

    /// Dependencies of `package`; empty when it is not a key.
    #[must_use]
    pub fn dependencies(&self, package: &str) -> &[String] {
        self.get(package).unwrap_or_default()
    }

    /// Whether `package` is a key of the graph.
    #[must_use]
    pub fn contains(&self, package: &str) -> bool {
        self.entries.contains_key(package)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(package, dependencies)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, deps)| (k.as_str(), deps.as_slice()))
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the graph has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of `(package, dependency)` edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Copy every entry of `other` into this graph, overwriting existing keys.
    pub fn merge(&mut self, other: &DependencyGraph) {
        for (package, deps) in other.iter() {
            self.insert(package, deps.to_vec());
        }
    }

    /// All packages mentioned anywhere in the graph, keys and values, sorted.
    #[must_use]
    pub fn node_names(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .flat_map(|(k, deps)| std::iter::once(k).chain(deps))
            .map(String::as_str)
            .collect()
    }
}

impl PartialEq for DependencyGraph {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for DependencyGraph {}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (package, deps) in iter {
            graph.insert(package, deps);
        }
        graph
    }
}

impl<K: Into<String>> From<Vec<(K, Vec<String>)>> for DependencyGraph {
    fn from(entries: Vec<(K, Vec<String>)>) -> Self {
        entries.into_iter().collect()
    }
}

impl Serialize for DependencyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Build a graph from string-slice literals.
///
/// Handy in tests and demos: `graph_from(&[("A", &["B", "C"]), ("B", &[])])`.
#[must_use]
pub fn graph_from(entries: &[(&str, &[&str])]) -> DependencyGraph {
    entries
        .iter()
        .map(|(package, deps)| {
            (
                *package,
                deps.iter().map(|d| (*d).to_string()).collect::<Vec<_>>(),
            )
        })
        .collect()
}
