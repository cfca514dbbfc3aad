//! Table-backed provider.

use super::DependencyProvider;
use crate::error::{Error, Result};
use crate::graph::DependencyGraph;

/// A provider answering from a fixed `name -> deps` table.
///
/// Serves as the memo behind [`super::StaticFileProvider`] and as a test
/// double for the graph algorithms.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    packages: DependencyGraph,
    lookups: usize,
}

impl InMemoryProvider {
    /// Create a provider over the given table.
    #[must_use]
    pub fn new(packages: DependencyGraph) -> Self {
        Self {
            packages,
            lookups: 0,
        }
    }

    /// Create a provider from string-slice literals.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Self {
        Self::new(crate::graph::graph_from(pairs))
    }

    /// Number of `direct_dependencies` calls answered so far, hits and misses.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    /// The underlying table.
    #[must_use]
    pub fn packages(&self) -> &DependencyGraph {
        &self.packages
    }
}

impl DependencyProvider for InMemoryProvider {
    fn direct_dependencies(&mut self, package: &str) -> Result<Vec<String>> {
        self.lookups += 1;
        self.packages
            .get(package)
            .map(<[String]>::to_vec)
            .ok_or_else(|| Error::PackageNotFound(package.to_string()))
    }

    fn universe(&mut self) -> Result<Option<DependencyGraph>> {
        Ok(Some(self.packages.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hit_and_miss() {
        let mut provider = InMemoryProvider::from_pairs(&[("curl", &["openssl", "zlib"])]);
        assert_eq!(
            provider.direct_dependencies("curl").expect("curl is known"),
            vec!["openssl", "zlib"]
        );
        let err = provider
            .direct_dependencies("wget")
            .expect_err("wget is unknown");
        assert!(matches!(err, Error::PackageNotFound(name) if name == "wget"));
        assert_eq!(provider.lookups(), 2);
    }

    #[test]
    fn test_universe_is_whole_table() {
        let mut provider = InMemoryProvider::from_pairs(&[("a", &["b"]), ("b", &[])]);
        let universe = provider
            .universe()
            .expect("universe should succeed")
            .expect("in-memory provider enumerates its universe");
        assert_eq!(universe.len(), 2);
    }
}
