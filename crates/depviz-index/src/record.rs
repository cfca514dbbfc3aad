//! A single package block from an APKINDEX.

use indexmap::IndexMap;

use crate::deps::parse_dependency_field;

/// Field key holding the package name.
pub const NAME_KEY: &str = "P";
/// Field key holding the package version.
pub const VERSION_KEY: &str = "V";
/// Field key holding the one-line description.
pub const DESCRIPTION_KEY: &str = "T";
/// Field key holding the dependency list.
pub const DEPENDS_KEY: &str = "D";

/// The key/value fields of one package block.
///
/// Fields keep the order in which their key first appears. When a key
/// repeats, the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRecord {
    fields: IndexMap<String, String>,
}

impl PackageRecord {
    /// Parse a block of `key:value` lines.
    ///
    /// Each line containing a `:` is split at its first colon; key and value
    /// are trimmed. Lines without a colon are ignored.
    #[must_use]
    pub fn parse(block: &str) -> Self {
        let fields = block
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();
        Self { fields }
    }

    /// Look up a field by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The package name (`P:` field).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get(NAME_KEY)
    }

    /// The package version (`V:` field).
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.get(VERSION_KEY)
    }

    /// The package description (`T:` field).
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.get(DESCRIPTION_KEY)
    }

    /// Direct dependencies from the `D:` field, constraints stripped.
    ///
    /// Returns an empty list when the field is absent or blank.
    #[must_use]
    pub fn dependencies(&self) -> Vec<String> {
        self.get(DEPENDS_KEY)
            .map(parse_dependency_field)
            .unwrap_or_default()
    }

    /// Number of distinct field keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the block had no `key:value` lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
