//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `analyze` (default): full report for the configured package
//! - `demo`: diagram and tree for several packages in a row
//! - `config`: validate and print the configuration
//!
//! # Global Flags
//!
//! - `--config <PATH>`: configuration file (default `config.json`)
//! - `--json`: output in JSON format
//!
//! # Example
//!
//! ```bash
//! depviz --config config.json
//! depviz analyze --package curl --depth 2 --filter doc
//! depviz demo A X M
//! ```

mod args;
mod execute;
mod validators;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{AnalyzeArgs, DemoArgs};
pub use validators::{validate_depth, validate_package_name};

use crate::config::DEFAULT_CONFIG_FILE;
use crate::error::Error;
use crate::output::{self, OutputConfig, OutputMode};

/// Depviz - dependency graph visualizer for Alpine packages
///
/// Discovers the dependency graph of a package from an APKINDEX (or a test
/// manifest) and renders it as a PlantUML diagram and an ASCII tree.
#[derive(Parser, Debug)]
#[command(name = "depviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute (defaults to `analyze`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Analyze the configured package
    ///
    /// Prints direct dependencies, the depth-limited dependency graph,
    /// reverse dependencies, statistics, cycles and the diagram.
    Analyze(AnalyzeArgs),

    /// Render diagrams for several packages
    ///
    /// A failure for one package is reported and the next one is processed.
    Demo(DemoArgs),

    /// Validate and print the configuration
    Config,
}

impl Cli {
    /// Parse arguments from the process command line.
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse arguments from an iterator, for tests.
    ///
    /// # Errors
    ///
    /// Returns clap's error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Run the selected command.
    ///
    /// # Errors
    ///
    /// Returns configuration, lookup and I/O failures.
    pub fn execute(&self) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            None => execute::execute_analyze(&self.config, &AnalyzeArgs::default(), output_mode),
            Some(Commands::Analyze(args)) => {
                execute::execute_analyze(&self.config, args, output_mode)
            }
            Some(Commands::Demo(args)) => execute::execute_demo(&self.config, args, output_mode),
            Some(Commands::Config) => execute::execute_config(&self.config, output_mode),
        }
    }
}

/// Headline and optional hint describing a failed run.
#[must_use]
pub fn describe_failure(err: &anyhow::Error) -> (String, Option<&'static str>) {
    match err.downcast_ref::<Error>() {
        Some(e @ Error::ConfigNotFound(_)) => (
            format!("Error: {e}"),
            Some("Create a config.json file with the configuration"),
        ),
        Some(e) if e.is_config() => (
            format!("Validation error: {e}"),
            Some("Check the structure of the configuration file"),
        ),
        Some(e @ (Error::Connection(_) | Error::Format(_))) => (
            format!("Connection error: {e}"),
            Some("Check the repository URL and your internet connection"),
        ),
        Some(e @ Error::PackageNotFound(_)) => (
            format!("Error: {e}"),
            Some("Check the package name against the repository"),
        ),
        _ => (format!("Unexpected error: {err:#}"), None),
    }
}

/// Print a categorized failure message to stderr.
pub fn report_failure(err: &anyhow::Error) {
    let config = OutputConfig::from_env();
    let (headline, hint) = describe_failure(err);
    eprintln!("{}", output::error(&headline, &config));
    if let Some(hint) = hint {
        eprintln!("{}", output::warning(hint, &config));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults_to_analyze_with_config_json() {
        let cli = Cli::try_parse_from(["depviz"]).expect("bare invocation parses");
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Path::new("config.json"));
        assert!(!cli.json);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["depviz", "analyze", "--json", "--config", "x.yaml"])
            .expect("global flags parse after subcommand");
        assert!(cli.json);
        assert_eq!(cli.config, Path::new("x.yaml"));
    }

    #[test]
    fn test_analyze_overrides() {
        let cli = Cli::try_parse_from([
            "depviz", "analyze", "--package", "curl", "--depth", "2", "--filter", "doc",
        ])
        .expect("overrides parse");
        let Some(Commands::Analyze(args)) = cli.command else {
            panic!("expected analyze command");
        };
        assert_eq!(args.package.as_deref(), Some("curl"));
        assert_eq!(args.depth, Some(2));
        assert_eq!(args.filter.as_deref(), Some("doc"));
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert!(Cli::try_parse_from(["depviz", "analyze", "--depth", "0"]).is_err());
    }

    #[test]
    fn test_demo_default_packages() {
        let cli = Cli::try_parse_from(["depviz", "demo"]).expect("demo parses");
        let Some(Commands::Demo(args)) = cli.command else {
            panic!("expected demo command");
        };
        assert_eq!(args.packages, vec!["A", "X", "M"]);
    }

    #[test]
    fn test_describe_failure_categories() {
        let not_found = anyhow::Error::from(Error::ConfigNotFound("config.json".into()));
        assert!(describe_failure(&not_found).0.starts_with("Error: "));

        let invalid = anyhow::Error::from(Error::InvalidDepth(0));
        assert!(describe_failure(&invalid).0.starts_with("Validation error: "));

        let connection = anyhow::Error::from(Error::Connection("refused".into()));
        assert!(describe_failure(&connection).0.starts_with("Connection error: "));

        let other = anyhow::anyhow!("boom");
        let (headline, hint) = describe_failure(&other);
        assert_eq!(headline, "Unexpected error: boom");
        assert!(hint.is_none());
    }
}
