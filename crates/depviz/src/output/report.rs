//! The `analyze` report.

use std::io::{self, Write};

use serde::Serialize;

use super::color::{bold, dimmed, info, success, warning};
use super::{OutputConfig, OutputMode, print_rule};
use crate::graph::{DependencyGraph, GraphStatistics, ReverseMap};

/// Everything `depviz analyze` found out about one package.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Root package.
    pub package: String,
    /// Direct dependencies of the root, straight from the provider.
    pub direct_dependencies: Vec<String>,
    /// Depth-limited graph discovered from the root.
    pub graph: DependencyGraph,
    /// Packages that depend on the root.
    pub reverse_dependencies: ReverseMap,
    /// Traversal statistics for the graph above.
    pub statistics: GraphStatistics,
    /// Package names the filter excluded, sorted.
    pub filtered_packages: Vec<String>,
    /// Two-node cycles flagged during discovery, as `"A -> B"`.
    pub narrow_cycles: Vec<String>,
    /// Cycles found by depth-first search over the graph.
    pub cycles: Vec<Vec<String>>,
    /// PlantUML source.
    pub diagram: String,
    /// Rendered tree, when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascii_tree: Option<String>,
}

/// Print a report in the requested mode.
pub fn print_report<W: Write>(
    w: &mut W,
    report: &AnalysisReport,
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Text => print_report_text(w, report, config),
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
            writeln!(w, "{json}")
        }
    }
}

fn print_report_text<W: Write>(
    w: &mut W,
    report: &AnalysisReport,
    config: &OutputConfig,
) -> io::Result<()> {
    let package = info(&report.package, config);

    writeln!(w)?;
    writeln!(w, "{}", bold(&format!("Direct dependencies of '{package}':"), config))?;
    if report.direct_dependencies.is_empty() {
        writeln!(w, "  {}", warning("No dependencies found", config))?;
    } else {
        for (i, dep) in report.direct_dependencies.iter().enumerate() {
            writeln!(w, "  {}. {dep}", i + 1)?;
        }
    }
    writeln!(
        w,
        "{}",
        success(
            &format!("Found {} direct dependencies", report.direct_dependencies.len()),
            config
        )
    )?;

    writeln!(w)?;
    writeln!(
        w,
        "{}",
        bold(
            &format!(
                "Dependency graph (max depth {}):",
                report.statistics.max_depth
            ),
            config
        )
    )?;
    print_adjacency(w, &report.graph, config)?;

    writeln!(w)?;
    writeln!(w, "{}", bold(&format!("Reverse dependencies of '{package}':"), config))?;
    if report.reverse_dependencies.is_empty() {
        writeln!(w, "  {}", dimmed("None found", config))?;
    } else {
        for dependent in report.reverse_dependencies.keys() {
            writeln!(w, "  {dependent}")?;
        }
    }

    writeln!(w)?;
    writeln!(w, "{}", bold("Statistics:", config))?;
    writeln!(w, "  Total packages: {}", report.statistics.total_packages)?;
    writeln!(w, "  Max depth: {}", report.statistics.max_depth)?;
    writeln!(w, "  Cycles detected: {}", report.statistics.cycles_detected)?;
    writeln!(w, "  Filtered packages: {}", report.filtered_packages.len())?;

    if !report.narrow_cycles.is_empty() || !report.cycles.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Cycles:", config))?;
        for cycle in &report.narrow_cycles {
            writeln!(w, "  {}", warning(cycle, config))?;
        }
        for cycle in &report.cycles {
            let mut path = cycle.join(" -> ");
            if let Some(first) = cycle.first() {
                path.push_str(" -> ");
                path.push_str(first);
            }
            writeln!(w, "  {}", warning(&path, config))?;
        }
    }

    writeln!(w)?;
    writeln!(w, "{}", bold("PlantUML diagram:", config))?;
    writeln!(w, "```plantuml")?;
    writeln!(w, "{}", report.diagram)?;
    writeln!(w, "```")?;

    if let Some(tree) = &report.ascii_tree {
        writeln!(w)?;
        writeln!(w, "{}", bold("ASCII tree:", config))?;
        writeln!(w, "{tree}")?;
    }

    print_rule(w, '=', config)
}

/// Print a graph as `package -> dep, dep` lines.
pub fn print_adjacency<W: Write>(
    w: &mut W,
    graph: &DependencyGraph,
    config: &OutputConfig,
) -> io::Result<()> {
    if graph.is_empty() {
        return writeln!(w, "  {}", dimmed("(empty)", config));
    }
    for (package, deps) in graph.iter() {
        let deps = if deps.is_empty() {
            dimmed("(none)", config)
        } else {
            deps.join(", ")
        };
        writeln!(w, "  {} -> {deps}", info(package, config))?;
    }
    Ok(())
}
