//! Command execution.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;

use super::args::{AnalyzeArgs, DemoArgs};
use crate::config::Config;
use crate::graph::{GraphBuilder, find_cycles};
use crate::output::color::bold;
use crate::output::report::print_adjacency;
use crate::output::{
    AnalysisReport, OutputConfig, OutputMode, error, info, print_banner, print_config,
    print_report, print_rule, render_ascii_tree_with, render_diagram, success,
};
use crate::provider::{DependencyProvider, create_provider};

/// Load the configuration and apply command-line overrides.
fn load_config(path: &Path, args: &AnalyzeArgs) -> Result<Config> {
    let mut config = Config::load(path)?;
    if let Some(package) = &args.package {
        config.package_name.clone_from(package);
    }
    if let Some(depth) = args.depth {
        config.max_dependency_depth = depth;
    }
    if let Some(filter) = &args.filter {
        config.package_filter.clone_from(filter);
    }
    Ok(config)
}

/// Run the full analysis for one package and collect the results.
///
/// The direct-dependency lookup of the root is the only fatal provider call;
/// everything after it degrades instead of failing.
pub fn analyze<P: DependencyProvider>(
    builder: &mut GraphBuilder<P>,
    package: &str,
    include_tree: bool,
    out: &OutputConfig,
) -> Result<AnalysisReport> {
    let direct_dependencies = builder.provider_mut().direct_dependencies(package)?;

    let graph = builder.build(package);
    // Snapshot before the reverse lookup, which may run more traversals.
    let statistics = builder.statistics();
    let narrow_cycles = builder.cycles().to_vec();
    let filtered_packages = builder.filtered_packages().iter().cloned().collect();

    let reverse_dependencies = builder.reverse_dependencies(package);
    let cycles = find_cycles(&graph);
    let diagram = render_diagram(&graph, package, Some(&reverse_dependencies));
    let ascii_tree = include_tree.then(|| render_ascii_tree_with(&graph, package, out.glyphs()));

    Ok(AnalysisReport {
        package: package.to_string(),
        direct_dependencies,
        graph,
        reverse_dependencies,
        statistics,
        filtered_packages,
        narrow_cycles,
        cycles,
        diagram,
        ascii_tree,
    })
}

/// Execute the `analyze` command.
pub fn execute_analyze(config_path: &Path, args: &AnalyzeArgs, mode: OutputMode) -> Result<()> {
    let config = load_config(config_path, args)?;
    let out = OutputConfig::from_env();
    let stdout = io::stdout();
    let mut w = stdout.lock();

    if mode == OutputMode::Text {
        print_banner(&mut w, &out)?;
        print_config(&mut w, &config, &out)?;
    }

    let mut builder = GraphBuilder::new(
        create_provider(&config),
        config.max_dependency_depth,
        &config.package_filter,
    );
    let report = analyze(
        &mut builder,
        &config.package_name,
        config.ascii_tree_output,
        &out,
    )?;

    print_report(&mut w, &report, mode, &out)?;
    Ok(())
}

/// Execute the `demo` command.
pub fn execute_demo(config_path: &Path, args: &DemoArgs, mode: OutputMode) -> Result<()> {
    let config = Config::load(config_path)?;
    let out = OutputConfig::from_env();
    let stdout = io::stdout();
    let mut w = stdout.lock();

    if mode == OutputMode::Json {
        let mut reports = serde_json::Map::new();
        for package in &args.packages {
            let mut builder = GraphBuilder::new(
                create_provider(&config),
                config.max_dependency_depth,
                &config.package_filter,
            );
            let value = match analyze(&mut builder, package, config.ascii_tree_output, &out) {
                Ok(report) => serde_json::to_value(&report)?,
                Err(err) => serde_json::json!({ "error": format!("{err:#}") }),
            };
            reports.insert(package.clone(), value);
        }
        writeln!(w, "{}", serde_json::to_string_pretty(&reports)?)?;
        return Ok(());
    }

    writeln!(w, "{}", bold("=== Visualization demo ===", &out))?;
    for package in &args.packages {
        demo_package(&mut w, &config, package, &out)?;
    }
    writeln!(w)?;
    print_rule(&mut w, '=', &out)?;
    writeln!(
        w,
        "{}",
        success(
            &format!("Demo complete: {}", args.packages.join(", ")),
            &out
        )
    )?;
    Ok(())
}

fn demo_package<W: Write>(w: &mut W, config: &Config, package: &str, out: &OutputConfig) -> Result<()> {
    writeln!(w)?;
    print_rule(w, '=', out)?;
    writeln!(w, "{}", bold(&format!("Package: {}", info(package, out)), out))?;
    print_rule(w, '=', out)?;

    let mut builder = GraphBuilder::new(
        create_provider(config),
        config.max_dependency_depth,
        &config.package_filter,
    );

    if let Err(err) = builder.provider_mut().direct_dependencies(package) {
        tracing::debug!(package, error = %err, "Demo package lookup failed");
        writeln!(w, "{}", error(&format!("Error for {package}: {err}"), out))?;
        return Ok(());
    }

    let graph = builder.build(package);
    print_adjacency(w, &graph, out)?;

    writeln!(w)?;
    writeln!(w, "{}", bold(&format!("PlantUML for '{package}':"), out))?;
    writeln!(w, "```plantuml")?;
    writeln!(w, "{}", render_diagram(&graph, package, None))?;
    writeln!(w, "```")?;

    if config.ascii_tree_output {
        writeln!(w)?;
        writeln!(w, "{}", bold(&format!("ASCII tree for '{package}':"), out))?;
        writeln!(w, "{}", render_ascii_tree_with(&graph, package, out.glyphs()))?;
    }

    let stats = builder.statistics();
    writeln!(w)?;
    writeln!(
        w,
        "Packages: {}, Cycles: {}",
        stats.total_packages, stats.cycles_detected
    )?;
    Ok(())
}

/// Execute the `config` command.
pub fn execute_config(config_path: &Path, mode: OutputMode) -> Result<()> {
    let config = Config::load(config_path)?;
    let out = OutputConfig::from_env();
    let stdout = io::stdout();
    let mut w = stdout.lock();

    match mode {
        OutputMode::Text => {
            print_banner(&mut w, &out)?;
            print_config(&mut w, &config, &out)?;
        }
        OutputMode::Json => {
            writeln!(w, "{}", serde_json::to_string_pretty(&config)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::graph::graph_from;
    use crate::provider::InMemoryProvider;

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false, false)
    }

    fn sample_provider() -> InMemoryProvider {
        InMemoryProvider::from_pairs(&[
            ("A", &["B", "C"]),
            ("B", &["D", "A"]),
            ("C", &["docs-c"]),
            ("D", &[]),
            ("docs-c", &[]),
        ])
    }

    #[test]
    fn test_analyze_collects_everything() {
        let mut builder = GraphBuilder::new(sample_provider(), 3, "docs");
        let report = analyze(&mut builder, "A", true, &plain()).expect("analysis succeeds");

        assert_eq!(report.direct_dependencies, vec!["B", "C"]);
        assert_eq!(
            report.graph,
            graph_from(&[("A", &["B", "C"]), ("B", &["D", "A"]), ("C", &[]), ("D", &[])])
        );
        assert_eq!(report.statistics.total_packages, 4);
        assert_eq!(report.narrow_cycles, vec!["B -> A"]);
        assert_eq!(report.cycles, vec![vec!["A", "B"]]);
        assert_eq!(report.filtered_packages, vec!["docs-c"]);
        assert_eq!(report.reverse_dependencies, graph_from(&[("B", &["A"])]));
        assert!(report.diagram.contains("B -[dashed]-> A : reverse"));
        assert!(report.ascii_tree.is_some());
    }

    #[test]
    fn test_analyze_statistics_ignore_reverse_lookup() {
        let mut builder = GraphBuilder::new(sample_provider(), 1, "");
        let report = analyze(&mut builder, "A", false, &plain()).expect("analysis succeeds");
        assert_eq!(report.statistics.total_packages, 1);
        assert!(report.ascii_tree.is_none());
    }

    #[test]
    fn test_analyze_unknown_root_is_fatal() {
        let mut builder = GraphBuilder::new(sample_provider(), 2, "");
        let err = analyze(&mut builder, "Z", true, &plain()).expect_err("unknown root fails");
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::PackageNotFound(name)) if name == "Z"
        ));
    }

    #[test]
    fn test_demo_package_reports_failure_and_continues() {
        let config = Config {
            package_name: "A".into(),
            repository_url: "/nonexistent/depviz/repo.txt".into(),
            test_repository_mode: true,
            ascii_tree_output: true,
            max_dependency_depth: 2,
            package_filter: String::new(),
        };
        let mut buffer = Vec::new();
        demo_package(&mut buffer, &config, "A", &plain()).expect("demo step never fails");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Error for A:"));
    }
}
