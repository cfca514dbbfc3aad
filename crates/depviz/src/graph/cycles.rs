//! General cycle detection.
//!
//! Unlike the two-node check the BFS builder performs while discovering
//! edges, this walks an already-built graph depth first and reports every
//! cycle closed by a back edge along the current path.

use std::collections::HashSet;

use super::DependencyGraph;

/// Find cycles in `graph`.
///
/// Every key not yet explored starts a depth-first walk. When a walk reaches
/// a package already on its current path, the path suffix starting at that
/// package is a cycle. Packages fully explored by an earlier walk are not
/// entered again. Cycles are returned in discovery order, with exact
/// duplicates (same sequence) collapsed; rotations are kept as distinct.
///
/// The walk uses an explicit stack, so deep graphs do not grow the call
/// stack.
#[must_use]
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_path: HashSet<&str> = HashSet::new();
    let mut path: Vec<&str> = Vec::new();

    for start in graph.keys() {
        if visited.contains(start) {
            continue;
        }

        visited.insert(start);
        on_path.insert(start);
        path.push(start);
        // (package, index of the next dependency to visit)
        let mut stack: Vec<(&str, usize)> = vec![(start, 0)];

        while let Some(top) = stack.last_mut() {
            let node = top.0;
            let next = top.1;
            top.1 += 1;

            let Some(child) = graph.dependencies(node).get(next) else {
                on_path.remove(node);
                path.pop();
                stack.pop();
                continue;
            };
            let child = child.as_str();

            if on_path.contains(child) {
                if let Some(pos) = path.iter().position(|p| *p == child) {
                    let cycle: Vec<String> =
                        path[pos..].iter().map(|p| (*p).to_string()).collect();
                    if !cycles.contains(&cycle) {
                        cycles.push(cycle);
                    }
                }
                continue;
            }
            if !visited.insert(child) {
                continue;
            }

            on_path.insert(child);
            path.push(child);
            stack.push((child, 0));
        }
    }

    cycles
}
