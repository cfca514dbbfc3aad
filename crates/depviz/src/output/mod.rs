//! Output formatting for CLI commands.
//!
//! This module renders analysis results both as human-readable text and as
//! JSON for programmatic use.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers
//! - [`diagram`]: PlantUML rendering of a dependency graph
//! - [`report`]: The `analyze` report in text and JSON form
//! - [`tree`]: ASCII/Unicode dependency tree rendering

pub mod color;
pub mod diagram;
pub mod report;
pub mod tree;

use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};
pub use diagram::render_diagram;
pub use report::{AnalysisReport, print_report};
pub use tree::{TreeGlyphs, render_ascii_tree, render_ascii_tree_with};

use crate::config::Config;
use color::{bold, dimmed};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const MAX_RULE_WIDTH: usize = 60;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum width for separator rules.
    pub max_width: usize,
    /// Whether to draw trees with ASCII-only connectors.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` from the terminal and environment.
    ///
    /// Reads:
    /// - terminal width (default: 80)
    /// - `DEPVIZ_ASCII`: "1" or "true" for ASCII tree connectors (default: false)
    /// - `NO_COLOR`: standard env var to disable colors (any value disables colors)
    /// - `DEPVIZ_COLOR`: "0" or "false" to disable colors (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        let max_width = terminal_size::terminal_size()
            .map_or(usize::from(DEFAULT_TERMINAL_WIDTH), |(w, _)| usize::from(w.0));

        let use_ascii = match env::var("DEPVIZ_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "DEPVIZ_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("DEPVIZ_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Tree connectors matching `use_ascii`.
    #[must_use]
    pub fn glyphs(&self) -> &'static TreeGlyphs {
        if self.use_ascii {
            &TreeGlyphs::ASCII
        } else {
            &TreeGlyphs::UNICODE
        }
    }

    fn rule_width(&self) -> usize {
        self.max_width.clamp(1, MAX_RULE_WIDTH)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: usize::from(DEFAULT_TERMINAL_WIDTH),
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Shared Sections
// ============================================================================

/// Print the application banner.
pub fn print_banner<W: Write>(w: &mut W, config: &OutputConfig) -> io::Result<()> {
    writeln!(
        w,
        "{}",
        bold("=== Package Dependency Graph Visualizer ===", config)
    )
}

/// Print a full-width separator rule.
pub fn print_rule<W: Write>(w: &mut W, ch: char, config: &OutputConfig) -> io::Result<()> {
    let rule: String = std::iter::repeat_n(ch, config.rule_width()).collect();
    writeln!(w, "{}", dimmed(&rule, config))
}

/// Print the configuration block, one `key: value (type)` line per parameter.
pub fn print_config<W: Write>(w: &mut W, cfg: &Config, config: &OutputConfig) -> io::Result<()> {
    writeln!(w, "{}", bold("=== Configuration ===", config))?;
    for line in cfg.display_lines() {
        writeln!(w, "{line}")?;
    }
    print_rule(w, '=', config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false, false)
    }

    #[test]
    fn test_rule_is_capped() {
        let mut buffer = Vec::new();
        print_rule(&mut buffer, '=', &plain()).expect("rule should render");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert_eq!(output.trim_end().len(), MAX_RULE_WIDTH);
    }

    #[test]
    fn test_rule_follows_narrow_terminal() {
        let mut buffer = Vec::new();
        print_rule(&mut buffer, '-', &OutputConfig::new(20, false, false))
            .expect("rule should render");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert_eq!(output, format!("{}\n", "-".repeat(20)));
    }

    #[test]
    fn test_glyphs_follow_ascii_flag() {
        assert_eq!(plain().glyphs(), &TreeGlyphs::UNICODE);
        assert_eq!(OutputConfig::new(80, true, false).glyphs(), &TreeGlyphs::ASCII);
    }

    #[test]
    fn test_print_config_lists_parameters() {
        let cfg = Config {
            package_name: "curl".into(),
            repository_url: "repo.txt".into(),
            test_repository_mode: true,
            ascii_tree_output: true,
            max_dependency_depth: 2,
            package_filter: String::new(),
        };
        let mut buffer = Vec::new();
        print_config(&mut buffer, &cfg, &plain()).expect("config should render");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.starts_with("=== Configuration ===\n"));
        assert!(output.contains("package_name: curl (string)"));
        assert!(output.contains("test_repository_mode: true (bool)"));
    }
}
