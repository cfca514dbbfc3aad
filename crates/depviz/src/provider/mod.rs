//! Dependency data sources.
//!
//! The graph code only needs one question answered: *what does this package
//! depend on directly?* [`DependencyProvider`] is that seam. Backends:
//!
//! - [`InMemoryProvider`]: a fixed `name -> deps` table
//! - [`StaticFileProvider`]: a `name: dep1 dep2` manifest file, loaded once
//! - [`LiveIndexProvider`]: an Alpine `APKINDEX.tar.gz`, over HTTP or from disk
//!
//! Every backend returns dependencies with version constraints stripped and
//! duplicates collapsed, in declaration order.

mod in_memory;
mod live;
mod static_file;

pub use in_memory::InMemoryProvider;
pub use live::{INDEX_ARCHIVE_PATH, LiveIndexProvider};
pub use static_file::StaticFileProvider;

use crate::config::Config;
use crate::error::Result;
use crate::graph::DependencyGraph;

/// Source of direct-dependency lists.
///
/// Methods take `&mut self` so backends can memoize lookups.
///
/// # Errors
///
/// Lookups fail with:
/// - `PackageNotFound`: the name has no record
/// - `Connection`: the underlying index could not be retrieved
/// - `Format`: the index could not be decoded
pub trait DependencyProvider {
    /// Direct dependencies of `package`.
    fn direct_dependencies(&mut self, package: &str) -> Result<Vec<String>>;

    /// Every declared `name -> deps` mapping, when the backend can enumerate
    /// its whole universe cheaply.
    ///
    /// Returns `Ok(None)` for backends that can only answer point lookups.
    fn universe(&mut self) -> Result<Option<DependencyGraph>> {
        Ok(None)
    }
}

impl<P: DependencyProvider + ?Sized> DependencyProvider for Box<P> {
    fn direct_dependencies(&mut self, package: &str) -> Result<Vec<String>> {
        (**self).direct_dependencies(package)
    }

    fn universe(&mut self) -> Result<Option<DependencyGraph>> {
        (**self).universe()
    }
}

/// Create the backend selected by the configuration.
///
/// `test_repository_mode` selects a [`StaticFileProvider`] reading
/// `repository_url` as a manifest path; otherwise a [`LiveIndexProvider`]
/// is pointed at it.
#[must_use]
pub fn create_provider(config: &Config) -> Box<dyn DependencyProvider> {
    if config.test_repository_mode {
        tracing::debug!(path = %config.repository_url, "Using static manifest backend");
        Box::new(StaticFileProvider::new(&config.repository_url))
    } else {
        tracing::debug!(location = %config.repository_url, "Using live APKINDEX backend");
        Box::new(LiveIndexProvider::new(&config.repository_url))
    }
}
