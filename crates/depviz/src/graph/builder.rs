//! Bounded breadth-first dependency discovery.

use std::collections::{BTreeSet, HashSet, VecDeque};

use serde::Serialize;

use super::DependencyGraph;
use crate::provider::DependencyProvider;

/// Packages the full graph is grown from when the provider cannot list its
/// whole universe.
pub const DEFAULT_BOOTSTRAP_ROOTS: &[&str] = &[
    "alpine-base",
    "busybox",
    "musl",
    "openssl",
    "curl",
    "bash",
    "python3",
    "nginx",
];

/// Snapshot of the last [`GraphBuilder::build`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    /// Number of packages assigned a traversal depth.
    pub total_packages: usize,
    /// Number of narrow (two-node) cycles flagged during discovery.
    pub cycles_detected: usize,
    /// Configured expansion depth.
    pub max_depth: usize,
}

/// Builds depth-limited dependency graphs from a [`DependencyProvider`].
///
/// # Depth
///
/// The root sits at depth 0. A package dequeued at depth `d` always gets its
/// direct dependencies recorded, but they are only queued for expansion when
/// `d + 1 < max_depth`. Dependencies recorded at the last level therefore show
/// up as graph values without being counted in [`GraphBuilder::visited`].
///
/// # Filtering
///
/// A non-empty filter excludes every package whose name contains it,
/// compared case-insensitively, both as a key and as a dependency. The root is
/// always counted as visited, even when the filter then drops it.
///
/// # State
///
/// `visited`, the narrow cycle list, the filtered set and the failed
/// lookups are reset by every `build` call. The full graph used for reverse lookups is computed once
/// per builder.
#[derive(Debug)]
pub struct GraphBuilder<P> {
    pub(super) provider: P,
    pub(super) max_depth: usize,
    filter: String,
    visited: HashSet<String>,
    cycles_detected: Vec<String>,
    filtered: BTreeSet<String>,
    failed: HashSet<String>,
    pub(super) full_graph: Option<DependencyGraph>,
    pub(super) bootstrap_roots: Vec<String>,
}

impl<P: DependencyProvider> GraphBuilder<P> {
    /// Create a builder.
    ///
    /// An empty `filter` disables filtering.
    pub fn new(provider: P, max_depth: usize, filter: &str) -> Self {
        Self {
            provider,
            max_depth,
            filter: filter.to_lowercase(),
            visited: HashSet::new(),
            cycles_detected: Vec::new(),
            filtered: BTreeSet::new(),
            failed: HashSet::new(),
            full_graph: None,
            bootstrap_roots: DEFAULT_BOOTSTRAP_ROOTS
                .iter()
                .map(|r| (*r).to_string())
                .collect(),
        }
    }

    /// Replace the packages the full graph is bootstrapped from.
    #[must_use]
    pub fn with_bootstrap_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bootstrap_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Build the dependency graph rooted at `root`.
    ///
    /// Provider failures never abort the traversal: the failing package is
    /// recorded with no dependencies and a warning is logged.
    pub fn build(&mut self, root: &str) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        let mut queue: VecDeque<(String, usize)> = VecDeque::from([(root.to_string(), 0)]);

        self.visited = HashSet::from([root.to_string()]);
        self.cycles_detected.clear();
        self.filtered.clear();
        self.failed.clear();

        while let Some((package, depth)) = queue.pop_front() {
            if self.is_filtered(&package) {
                tracing::debug!(package = %package, "Skipping filtered package");
                self.filtered.insert(package);
                continue;
            }

            let dependencies = match self.provider.direct_dependencies(&package) {
                Ok(deps) => deps,
                Err(err) => {
                    tracing::warn!(
                        package = %package,
                        error = %err,
                        "Failed to fetch dependencies, recording none"
                    );
                    graph.insert(package.clone(), Vec::new());
                    self.failed.insert(package);
                    continue;
                }
            };

            let (kept, dropped): (Vec<String>, Vec<String>) = dependencies
                .into_iter()
                .partition(|dep| !self.is_filtered(dep));
            self.filtered.extend(dropped);
            graph.insert(package.clone(), kept.clone());

            if depth + 1 >= self.max_depth {
                continue;
            }

            for dep in kept {
                if self.visited.insert(dep.clone()) {
                    queue.push_back((dep, depth + 1));
                } else if graph
                    .get(&dep)
                    .is_some_and(|back| back.contains(&package))
                {
                    let cycle = format!("{package} -> {dep}");
                    if !self.cycles_detected.contains(&cycle) {
                        tracing::debug!(cycle = %cycle, "Mutual dependency detected");
                        self.cycles_detected.push(cycle);
                    }
                }
            }
        }

        tracing::debug!(
            root,
            packages = self.visited.len(),
            entries = graph.len(),
            cycles = self.cycles_detected.len(),
            "Dependency graph built"
        );
        graph
    }

    /// Whether `package` is excluded by the filter.
    #[must_use]
    pub fn is_filtered(&self, package: &str) -> bool {
        !self.filter.is_empty() && package.to_lowercase().contains(&self.filter)
    }

    /// Statistics for the last `build` run.
    #[must_use]
    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            total_packages: self.visited.len(),
            cycles_detected: self.cycles_detected.len(),
            max_depth: self.max_depth,
        }
    }

    /// Narrow cycles from the last run, as `"A -> B"` in discovery order.
    #[must_use]
    pub fn cycles(&self) -> &[String] {
        &self.cycles_detected
    }

    /// Packages assigned a depth during the last run.
    #[must_use]
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Distinct package names the filter excluded during the last run.
    #[must_use]
    pub fn filtered_packages(&self) -> &BTreeSet<String> {
        &self.filtered
    }

    /// Packages whose lookup failed during the last run.
    #[must_use]
    pub fn failed_lookups(&self) -> &HashSet<String> {
        &self.failed
    }

    /// Configured expansion depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Lowercased filter substring; empty when filtering is off.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Mutable access to the provider, e.g. for direct lookups.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}
