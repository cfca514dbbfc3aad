//! Flat dependency manifests.
//!
//! A manifest is a text file describing a whole package universe, one
//! package per line:
//!
//! ```text
//! # comment
//! nginx: openssl pcre
//! curl: openssl
//! openssl:
//! ```

use indexmap::IndexMap;

use crate::deps::parse_dependency_field;
use crate::error::{Error, Result};

/// An ordered set of `name -> dependencies` declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticManifest {
    entries: IndexMap<String, Vec<String>>,
}

impl StaticManifest {
    /// Parse manifest text.
    ///
    /// Blank lines and lines starting with `#` are skipped. Dependencies are
    /// cleaned like an APKINDEX `D:` field. A name declared twice keeps its
    /// first position but takes the later dependency list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for a line without a `:` separator or
    /// with an empty package name.
    pub fn parse(text: &str) -> Result<Self> {
        let mut manifest = Self::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((name, deps)) = line.split_once(':') else {
                return Err(Error::InvalidFormat {
                    line: idx + 1,
                    message: format!("expected 'name: dependencies', got '{line}'"),
                });
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::InvalidFormat {
                    line: idx + 1,
                    message: "package name is empty".to_string(),
                });
            }

            manifest
                .entries
                .insert(name.to_string(), parse_dependency_field(deps));
        }

        tracing::debug!(packages = manifest.len(), "Parsed static manifest");
        Ok(manifest)
    }

    /// Dependencies declared for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Iterate over declarations in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, deps)| (name.as_str(), deps.as_slice()))
    }

    /// Number of declared packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for StaticManifest {
    type Item = (String, Vec<String>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
