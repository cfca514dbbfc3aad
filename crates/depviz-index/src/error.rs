//! Error types for depviz-index operations.

use std::io;
use thiserror::Error;

/// The error type for depviz-index operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The gzip stream could not be decompressed.
    #[error("index is not a valid gzip archive: {0}")]
    Decompress(#[source] io::Error),

    /// A manifest line could not be parsed.
    #[error("invalid manifest format at line {line}: {message}")]
    InvalidFormat {
        /// 1-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        message: String,
    },
}

/// A specialized Result type for depviz-index operations.
pub type Result<T> = std::result::Result<T, Error>;
