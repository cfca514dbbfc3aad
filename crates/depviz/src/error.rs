//! Error types for depviz operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for depviz operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The configuration file does not exist.
    #[error("Configuration file {} not found", .0.display())]
    ConfigNotFound(PathBuf),

    /// The configuration document is not valid JSON/YAML.
    #[error("Configuration format error: {0}")]
    ConfigParse(String),

    /// Required keys are missing or have the wrong type.
    #[error("{}", describe_validation(.missing, .invalid))]
    ConfigValidation {
        /// Keys absent from the document.
        missing: Vec<String>,
        /// Keys present with the wrong type, as `key (expected type)`.
        invalid: Vec<String>,
    },

    /// `max_dependency_depth` is below 1.
    #[error("max_dependency_depth must be a positive number, got {0}")]
    InvalidDepth(i64),

    /// `repository_url` is empty.
    #[error("repository_url must be a non-empty string")]
    EmptyRepositoryUrl,

    /// The package has no record in the data source.
    #[error("Package '{0}' not found in repository")]
    PackageNotFound(String),

    /// The data source could not be retrieved.
    #[error("Repository connection error: {0}")]
    Connection(String),

    /// The data source could not be decoded.
    #[error("Repository format error: {0}")]
    Format(String),
}

impl Error {
    /// Whether this error stems from loading or validating configuration.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::ConfigParse(_)
                | Self::ConfigValidation { .. }
                | Self::InvalidDepth(_)
                | Self::EmptyRepositoryUrl
        )
    }
}

impl From<depviz_index::Error> for Error {
    fn from(err: depviz_index::Error) -> Self {
        Self::Format(err.to_string())
    }
}

fn describe_validation(missing: &[String], invalid: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("Missing required parameters: {}", missing.join(", ")));
    }
    if !invalid.is_empty() {
        parts.push(format!("Invalid parameter types: {}", invalid.join(", ")));
    }
    parts.join("; ")
}

/// A specialized Result type for depviz operations.
pub type Result<T> = std::result::Result<T, Error>;
