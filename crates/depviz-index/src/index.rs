//! Whole-archive APKINDEX handling.
//!
//! An `APKINDEX.tar.gz` is a concatenation of gzip members wrapping a tar
//! stream. The package data inside is plain text, so after decompression the
//! archive is treated as text and split into blank-line separated blocks;
//! tar header bytes only ever pollute fields nobody looks up.

use std::collections::HashMap;
use std::io::Read;

use flate2::read::MultiGzDecoder;

use crate::error::{Error, Result};
use crate::record::PackageRecord;

/// Decompress and decode a raw `APKINDEX.tar.gz` payload.
///
/// All gzip members are read. The result is decoded as UTF-8, falling back
/// to Latin-1 (every byte maps to the code point of the same value) when the
/// payload is not valid UTF-8.
///
/// # Errors
///
/// Returns [`Error::Decompress`] if the payload is not a valid gzip stream.
pub fn decode_index(compressed: &[u8]) -> Result<String> {
    let mut decompressed = Vec::new();
    MultiGzDecoder::new(compressed)
        .read_to_end(&mut decompressed)
        .map_err(Error::Decompress)?;

    tracing::debug!(
        compressed = compressed.len(),
        decompressed = decompressed.len(),
        "Decompressed package index"
    );

    Ok(match String::from_utf8(decompressed) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!("Index is not valid UTF-8, decoding as Latin-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    })
}

/// A parsed package index.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    records: Vec<PackageRecord>,
    // name -> position of the first record carrying it
    by_name: HashMap<String, usize>,
}

impl PackageIndex {
    /// Split index text into package records.
    ///
    /// The text is trimmed and split on blank lines (`\n\n`); each block
    /// becomes one [`PackageRecord`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        let records: Vec<PackageRecord> =
            trimmed.split("\n\n").map(PackageRecord::parse).collect();
        let mut by_name = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if let Some(name) = record.name() {
                by_name.entry(name.to_string()).or_insert(pos);
            }
        }
        Self { records, by_name }
    }

    /// Find the first record whose name matches exactly.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&PackageRecord> {
        self.by_name.get(name).and_then(|&pos| self.records.get(pos))
    }

    /// Iterate over all records in index order.
    pub fn iter(&self) -> impl Iterator<Item = &PackageRecord> {
        self.records.iter()
    }

    /// Number of blocks in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index has no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
