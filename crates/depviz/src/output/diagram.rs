//! PlantUML diagram rendering.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::graph::{DependencyGraph, ReverseMap};

/// Render the graph as a PlantUML component diagram.
///
/// Every package mentioned in `graph` or `reverse` becomes a rectangle,
/// declared in lexicographic order: `root` is highlighted, packages with
/// their own graph entry use the default style, and packages seen only as
/// dependencies are marked as unexpanded. Direct edges follow in graph
/// order, then dashed `reverse` edges.
///
/// Every package gets its own alias. When two names sanitize to the same
/// alias, the later one in sort order takes the first free `_2`, `_3`, ...
/// suffix.
///
/// Output is deterministic for a given input.
#[must_use]
pub fn render_diagram(graph: &DependencyGraph, root: &str, reverse: Option<&ReverseMap>) -> String {
    let mut lines = vec![
        "@startuml".to_string(),
        "skinparam monochrome true".to_string(),
        "skinparam shadowing false".to_string(),
    ];

    let mut nodes: BTreeSet<&str> = graph.node_names();
    if let Some(reverse) = reverse {
        nodes.extend(reverse.node_names());
    }

    let aliases = alias_table(&nodes);
    let alias_of = |package: &str| {
        aliases
            .get(package)
            .cloned()
            .unwrap_or_else(|| alias(package))
    };

    for &package in &nodes {
        let style = if package == root {
            " #lightblue"
        } else if graph.contains(package) {
            ""
        } else {
            " #pink"
        };
        lines.push(format!(
            "rectangle \"{package}\" as {}{style}",
            alias_of(package)
        ));
    }

    for (package, deps) in graph.iter() {
        for dep in deps {
            lines.push(format!("{} --> {}", alias_of(package), alias_of(dep)));
        }
    }

    if let Some(reverse) = reverse {
        for (package, deps) in reverse.iter() {
            for dep in deps {
                lines.push(format!(
                    "{} -[dashed]-> {} : reverse",
                    alias_of(package),
                    alias_of(dep)
                ));
            }
        }
    }

    lines.push("@enduml".to_string());
    lines.join("\n")
}

/// Unique alias for every node, assigned in `nodes` order.
fn alias_table<'a>(nodes: &BTreeSet<&'a str>) -> HashMap<&'a str, String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(nodes.len());
    let mut table = HashMap::with_capacity(nodes.len());
    for &package in nodes {
        let base = alias(package);
        let mut candidate = base.clone();
        let mut n = 2;
        while taken.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        taken.insert(candidate.clone());
        table.insert(package, candidate);
    }
    table
}

/// PlantUML-safe alias: every character outside `[A-Za-z0-9_]` becomes `_`.
#[must_use]
pub fn alias(package: &str) -> String {
    package
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
