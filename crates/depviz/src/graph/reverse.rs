//! Reverse-dependency discovery.
//!
//! Answering "who depends on X?" needs the dependency lists of every known
//! package, the *full graph*. Backends that can enumerate their universe
//! hand it over directly; otherwise it is grown by running the BFS builder
//! from a list of bootstrap roots.

use super::{DependencyGraph, GraphBuilder, ReverseMap};
use crate::provider::DependencyProvider;

/// Expansion depth used while bootstrapping the full graph.
pub const BOOTSTRAP_MAX_DEPTH: usize = 10;

impl<P: DependencyProvider> GraphBuilder<P> {
    /// Packages that declare `target` as a direct dependency.
    ///
    /// Each dependent maps to `[target]` only. The full graph is computed on
    /// the first call and cached for the lifetime of the builder.
    pub fn reverse_dependencies(&mut self, target: &str) -> ReverseMap {
        invert(self.full_graph(), target)
    }

    /// The graph over the whole known package universe.
    pub fn full_graph(&mut self) -> &DependencyGraph {
        if self.full_graph.is_none() {
            let full = self.compute_full_graph();
            tracing::debug!(
                packages = full.len(),
                edges = full.edge_count(),
                "Full graph ready"
            );
            self.full_graph = Some(full);
        }
        self.full_graph.get_or_insert_with(DependencyGraph::new)
    }

    fn compute_full_graph(&mut self) -> DependencyGraph {
        match self.provider.universe() {
            Ok(Some(universe)) => return universe,
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Could not enumerate package universe, bootstrapping instead"
                );
            }
        }

        let saved_depth = self.max_depth;
        self.max_depth = BOOTSTRAP_MAX_DEPTH;

        let roots = self.bootstrap_roots.clone();
        let mut full = DependencyGraph::new();
        for root in &roots {
            let graph = self.build(root);
            if self.failed_lookups().contains(root) {
                tracing::debug!(root = %root, "Skipping bootstrap root");
                continue;
            }
            full.merge(&graph);
        }

        self.max_depth = saved_depth;
        full
    }
}

/// Collect every package in `full` that lists `target` among its dependencies.
#[must_use]
pub fn invert(full: &DependencyGraph, target: &str) -> ReverseMap {
    full.iter()
        .filter(|(_, deps)| deps.iter().any(|d| d == target))
        .map(|(package, _)| (package, vec![target.to_string()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::graph::graph_from;
    use crate::provider::InMemoryProvider;

    /// Answers point lookups only, so the builder has to bootstrap.
    struct PointLookups(InMemoryProvider);

    impl DependencyProvider for PointLookups {
        fn direct_dependencies(&mut self, package: &str) -> Result<Vec<String>> {
            self.0.direct_dependencies(package)
        }
    }

    #[test]
    fn test_static_universe_inversion() {
        let provider = InMemoryProvider::from_pairs(&[
            ("nginx", &["openssl", "pcre"]),
            ("curl", &["openssl"]),
        ]);
        let mut builder = GraphBuilder::new(provider, 1, "");

        let reverse = builder.reverse_dependencies("openssl");
        assert_eq!(
            reverse,
            graph_from(&[("nginx", &["openssl"]), ("curl", &["openssl"])])
        );
        assert!(builder.reverse_dependencies("pcre").contains("nginx"));
        assert!(builder.reverse_dependencies("nginx").is_empty());
    }

    #[test]
    fn test_bootstrap_universe_ignores_configured_depth() {
        let provider = PointLookups(InMemoryProvider::from_pairs(&[
            ("base", &["a"]),
            ("a", &["b"]),
            ("b", &["c"]),
            ("c", &["target"]),
            ("target", &[]),
        ]));
        let mut builder = GraphBuilder::new(provider, 1, "").with_bootstrap_roots(["base"]);

        let reverse = builder.reverse_dependencies("target");
        assert_eq!(reverse, graph_from(&[("c", &["target"])]));
        assert_eq!(builder.max_depth(), 1);
    }

    #[test]
    fn test_bootstrap_skips_unknown_roots() {
        let provider = PointLookups(InMemoryProvider::from_pairs(&[
            ("x", &["lib"]),
            ("lib", &[]),
        ]));
        let mut builder =
            GraphBuilder::new(provider, 2, "").with_bootstrap_roots(["missing", "x"]);

        let full = builder.full_graph().clone();
        assert!(!full.contains("missing"));
        assert_eq!(full, graph_from(&[("x", &["lib"]), ("lib", &[])]));
    }

    #[test]
    fn test_bootstrap_looks_up_each_root_once() {
        let provider = PointLookups(InMemoryProvider::from_pairs(&[
            ("x", &["lib"]),
            ("lib", &[]),
        ]));
        let mut builder =
            GraphBuilder::new(provider, 2, "").with_bootstrap_roots(["missing", "x"]);

        builder.full_graph();
        // missing, x, lib
        assert_eq!(builder.provider_mut().0.lookups(), 3);
    }

    #[test]
    fn test_full_graph_is_cached() {
        let provider = PointLookups(InMemoryProvider::from_pairs(&[
            ("x", &["lib"]),
            ("lib", &[]),
        ]));
        let mut builder = GraphBuilder::new(provider, 2, "").with_bootstrap_roots(["x"]);

        builder.reverse_dependencies("lib");
        let after_first = builder.provider_mut().0.lookups();
        builder.reverse_dependencies("x");
        assert_eq!(builder.provider_mut().0.lookups(), after_first);
    }

    #[test]
    fn test_invert_lists_only_target() {
        let full = graph_from(&[("app", &["libssl", "zlib"]), ("zlib", &[])]);
        let reverse = invert(&full, "zlib");
        assert_eq!(reverse.dependencies("app"), ["zlib"]);
        assert_eq!(reverse.len(), 1);
    }
}
