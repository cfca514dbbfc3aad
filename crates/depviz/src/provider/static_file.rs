//! Manifest-file provider used in test repository mode.

use std::path::{Path, PathBuf};

use depviz_index::StaticManifest;

use super::{DependencyProvider, InMemoryProvider};
use crate::error::{Error, Result};
use crate::graph::DependencyGraph;

/// Reads a `name: dep1 dep2 ...` manifest on first use and memoizes it.
#[derive(Debug, Clone)]
pub struct StaticFileProvider {
    path: PathBuf,
    cache: Option<InMemoryProvider>,
}

impl StaticFileProvider {
    /// Create a provider for the manifest at `path`. Nothing is read yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: None,
        }
    }

    /// Path of the manifest file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn loaded(&mut self) -> Result<&mut InMemoryProvider> {
        if self.cache.is_none() {
            let text = std::fs::read_to_string(&self.path).map_err(|e| {
                Error::Connection(format!(
                    "cannot read test repository {}: {e}",
                    self.path.display()
                ))
            })?;
            let manifest = StaticManifest::parse(&text)?;
            tracing::debug!(
                path = %self.path.display(),
                packages = manifest.len(),
                "Loaded test repository"
            );
            self.cache = Some(InMemoryProvider::new(manifest.into_iter().collect()));
        }
        Ok(self.cache.get_or_insert_with(InMemoryProvider::default))
    }
}

impl DependencyProvider for StaticFileProvider {
    fn direct_dependencies(&mut self, package: &str) -> Result<Vec<String>> {
        tracing::debug!(package, "Looking up package in test repository");
        self.loaded()?.direct_dependencies(package)
    }

    fn universe(&mut self) -> Result<Option<DependencyGraph>> {
        self.loaded()?.universe()
    }
}
