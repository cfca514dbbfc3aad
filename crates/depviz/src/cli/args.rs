//! CLI argument structs for all commands.

use clap::Parser;

use super::validators::{validate_depth, validate_package_name};

/// Arguments for the `analyze` command
#[derive(Parser, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Package to analyze instead of the configured `package_name`
    #[arg(short, long, value_parser = validate_package_name)]
    pub package: Option<String>,

    /// Expansion depth instead of the configured `max_dependency_depth`
    #[arg(short, long, value_parser = validate_depth)]
    pub depth: Option<usize>,

    /// Exclusion filter instead of the configured `package_filter`
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Arguments for the `demo` command
#[derive(Parser, Debug, Clone)]
pub struct DemoArgs {
    /// Packages to render, in order
    #[arg(value_parser = validate_package_name, default_values = ["A", "X", "M"])]
    pub packages: Vec<String>,
}
