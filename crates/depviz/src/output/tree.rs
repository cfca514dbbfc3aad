//! ASCII dependency tree rendering.

use std::collections::HashSet;

use crate::graph::DependencyGraph;

/// Connector strings used to draw a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeGlyphs {
    /// Connector for a child with later siblings.
    pub branch: &'static str,
    /// Connector for the last child.
    pub corner: &'static str,
    /// Prefix segment below a child with later siblings.
    pub pipe: &'static str,
    /// Prefix segment below the last child.
    pub space: &'static str,
    /// Annotation for a package that was already drawn.
    pub revisit: &'static str,
}

impl TreeGlyphs {
    /// Box-drawing connectors.
    pub const UNICODE: Self = Self {
        branch: "├── ",
        corner: "└── ",
        pipe: "│   ",
        space: "    ",
        revisit: "↺ (cycle)",
    };

    /// Plain ASCII connectors for terminals without box drawing.
    pub const ASCII: Self = Self {
        branch: "|-- ",
        corner: "`-- ",
        pipe: "|   ",
        space: "    ",
        revisit: "<- (cycle)",
    };
}

/// Render `graph` as a box-drawing tree rooted at `root`.
///
/// See [`render_ascii_tree_with`].
#[must_use]
pub fn render_ascii_tree(graph: &DependencyGraph, root: &str) -> String {
    render_ascii_tree_with(graph, root, &TreeGlyphs::UNICODE)
}

/// Render `graph` as a tree rooted at `root` using the given connectors.
///
/// Renders like:
/// ```text
/// └── A
///     ├── B
///     │   └── D
///     └── C
///         └── D ↺ (cycle)
/// ```
///
/// A package is expanded the first time it is drawn. Any later occurrence,
/// whether it closes a real cycle or is just a dependency shared by two
/// branches, is drawn as a marked leaf with the corner connector. When
/// `root` has no entry in the graph a two-line placeholder is returned.
#[must_use]
pub fn render_ascii_tree_with(graph: &DependencyGraph, root: &str, glyphs: &TreeGlyphs) -> String {
    if !graph.contains(root) {
        return format!("{root}\n{}(no dependencies)", glyphs.corner);
    }

    let mut lines = Vec::new();
    let mut drawn: HashSet<&str> = HashSet::new();
    // (package, prefix, is last child)
    let mut stack: Vec<(&str, String, bool)> = vec![(root, String::new(), true)];

    while let Some((node, prefix, is_last)) = stack.pop() {
        if !drawn.insert(node) {
            lines.push(format!("{prefix}{}{node} {}", glyphs.corner, glyphs.revisit));
            continue;
        }

        let connector = if is_last { glyphs.corner } else { glyphs.branch };
        lines.push(format!("{prefix}{connector}{node}"));

        let children = graph.dependencies(node);
        if children.is_empty() {
            continue;
        }
        let segment = if is_last { glyphs.space } else { glyphs.pipe };
        let child_prefix = format!("{prefix}{segment}");
        let last = children.len() - 1;
        for (i, child) in children.iter().enumerate().rev() {
            stack.push((child.as_str(), child_prefix.clone(), i == last));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::graph_from;

    #[test]
    fn test_tree_nested_children() {
        let graph = graph_from(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &[])]);
        assert_eq!(
            render_ascii_tree(&graph, "A"),
            "└── A\n    ├── B\n    │   └── D\n    └── C"
        );
    }

    #[test]
    fn test_tree_shared_dependency_marked_on_second_reach() {
        let graph = graph_from(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["D"]), ("D", &[])]);
        let output = render_ascii_tree(&graph, "A");
        assert_eq!(
            output,
            "└── A\n    ├── B\n    │   └── D\n    └── C\n        └── D ↺ (cycle)"
        );
    }

    #[test]
    fn test_tree_true_cycle_marked() {
        let graph = graph_from(&[("A", &["B"]), ("B", &["A"])]);
        assert_eq!(
            render_ascii_tree(&graph, "A"),
            "└── A\n    └── B\n        └── A ↺ (cycle)"
        );
    }

    #[test]
    fn test_tree_revisit_always_uses_corner() {
        let graph = graph_from(&[("A", &["B", "A", "C"]), ("B", &[]), ("C", &[])]);
        let output = render_ascii_tree(&graph, "A");
        assert!(
            output.contains("    └── A ↺ (cycle)\n    └── C"),
            "revisited middle child should use corner connector, got:\n{output}"
        );
        assert!(output.contains("    ├── B"));
    }

    #[test]
    fn test_tree_root_without_entry() {
        let graph = graph_from(&[("other", &[])]);
        assert_eq!(
            render_ascii_tree(&graph, "ghost"),
            "ghost\n└── (no dependencies)"
        );
    }

    #[test]
    fn test_tree_root_with_empty_entry() {
        let graph = graph_from(&[("solo", &[])]);
        assert_eq!(render_ascii_tree(&graph, "solo"), "└── solo");
    }

    #[test]
    fn test_tree_ascii_glyphs() {
        let graph = graph_from(&[("A", &["B", "C"]), ("B", &["C"]), ("C", &[])]);
        assert_eq!(
            render_ascii_tree_with(&graph, "A", &TreeGlyphs::ASCII),
            "`-- A\n    |-- B\n    |   `-- C\n    `-- C <- (cycle)"
        );
    }

    #[test]
    fn test_tree_is_stable_across_calls() {
        let graph = graph_from(&[("A", &["B", "C"]), ("B", &["D", "E"]), ("C", &["E"])]);
        assert_eq!(render_ascii_tree(&graph, "A"), render_ascii_tree(&graph, "A"));
    }
}
