//! Configuration loading and validation.
//!
//! The configuration is a JSON document (or YAML, when the file name ends in
//! `.yaml`/`.yml`) with six required keys:
//!
//! ```json
//! {
//!   "package_name": "nginx",
//!   "repository_url": "https://dl-cdn.alpinelinux.org/alpine/v3.19/main",
//!   "test_repository_mode": false,
//!   "ascii_tree_output": true,
//!   "max_dependency_depth": 3,
//!   "package_filter": ""
//! }
//! ```
//!
//! Validation runs on the raw document so that every missing key and every
//! type mismatch is reported in a single error.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// JSON type a required key must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    String,
    Bool,
    Integer,
}

impl Kind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::Integer => value.is_i64() || value.is_u64(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Integer => "int",
        }
    }
}

/// Required keys, in display order.
const REQUIRED_KEYS: [(&str, Kind); 6] = [
    ("package_name", Kind::String),
    ("repository_url", Kind::String),
    ("test_repository_mode", Kind::Bool),
    ("ascii_tree_output", Kind::Bool),
    ("max_dependency_depth", Kind::Integer),
    ("package_filter", Kind::String),
];

/// Validated depviz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root package to analyze.
    pub package_name: String,
    /// Repository URL, archive path, or manifest path in test mode.
    pub repository_url: String,
    /// Read `repository_url` as a `name: deps` manifest instead of an APKINDEX.
    pub test_repository_mode: bool,
    /// Print the ASCII tree in addition to the diagram.
    pub ascii_tree_output: bool,
    /// Number of BFS levels allowed to expand; at least 1.
    pub max_dependency_depth: usize,
    /// Case-insensitive substring excluding packages; empty disables it.
    pub package_filter: String,
}

impl Config {
    /// Load and validate the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if the file does not exist
    /// - `ConfigParse` if it is not a valid JSON/YAML mapping
    /// - `ConfigValidation`, `InvalidDepth`, `EmptyRepositoryUrl` on bad content
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let document: Value = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))?
        } else {
            serde_json::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))?
        };

        tracing::debug!(path = %path.display(), yaml = is_yaml, "Loaded configuration document");
        Self::from_value(document)
    }

    /// Validate a parsed document and build the configuration from it.
    ///
    /// Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn from_value(document: Value) -> Result<Self> {
        let Value::Object(map) = document else {
            return Err(Error::ConfigParse(
                "configuration must be a mapping of keys to values".to_string(),
            ));
        };

        validate(&map)?;
        serde_json::from_value(Value::Object(map)).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// `key: value (type)` lines for display, in a fixed key order.
    #[must_use]
    pub fn display_lines(&self) -> Vec<String> {
        vec![
            format!("package_name: {} (string)", self.package_name),
            format!("repository_url: {} (string)", self.repository_url),
            format!("test_repository_mode: {} (bool)", self.test_repository_mode),
            format!("ascii_tree_output: {} (bool)", self.ascii_tree_output),
            format!("max_dependency_depth: {} (int)", self.max_dependency_depth),
            format!("package_filter: {} (string)", self.package_filter),
        ]
    }
}

fn validate(map: &Map<String, Value>) -> Result<()> {
    let mut missing = Vec::new();
    let mut invalid = Vec::new();

    for (key, kind) in REQUIRED_KEYS {
        match map.get(key) {
            None => missing.push(key.to_string()),
            Some(value) if !kind.matches(value) => {
                invalid.push(format!("{key} (expected {})", kind.name()));
            }
            Some(_) => {}
        }
    }

    if !missing.is_empty() || !invalid.is_empty() {
        return Err(Error::ConfigValidation { missing, invalid });
    }

    // Integers beyond i64 are u64, hence positive.
    let depth = map
        .get("max_dependency_depth")
        .and_then(Value::as_i64)
        .unwrap_or(i64::MAX);
    if depth < 1 {
        return Err(Error::InvalidDepth(depth));
    }

    if map
        .get("repository_url")
        .and_then(Value::as_str)
        .is_some_and(str::is_empty)
    {
        return Err(Error::EmptyRepositoryUrl);
    }

    Ok(())
}
