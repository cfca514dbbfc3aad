//! APKINDEX-backed provider.

use std::io::Read;
use std::path::PathBuf;

use depviz_index::{PackageIndex, decode_index};

use super::DependencyProvider;
use crate::error::{Error, Result};

/// Location of the index archive relative to a repository root.
pub const INDEX_ARCHIVE_PATH: &str = "x86_64/APKINDEX.tar.gz";

/// Answers lookups from an Alpine `APKINDEX.tar.gz`.
///
/// The location is either a repository URL (`http://` or `https://`), in
/// which case `<url>/x86_64/APKINDEX.tar.gz` is downloaded, or a local path
/// to the archive itself or to a repository directory containing it.
///
/// The archive is fetched and parsed on the first lookup and reused for the
/// lifetime of the provider.
#[derive(Debug, Clone)]
pub struct LiveIndexProvider {
    location: String,
    index: Option<PackageIndex>,
}

impl LiveIndexProvider {
    /// Create a provider for the given repository location.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            index: None,
        }
    }

    /// Whether the location is fetched over HTTP.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.location.starts_with("http://") || self.location.starts_with("https://")
    }

    /// Full URL or path of the index archive.
    #[must_use]
    pub fn index_location(&self) -> String {
        if self.is_remote() {
            format!(
                "{}/{INDEX_ARCHIVE_PATH}",
                self.location.trim_end_matches('/')
            )
        } else {
            let path = PathBuf::from(&self.location);
            if path.is_dir() {
                path.join(INDEX_ARCHIVE_PATH).display().to_string()
            } else {
                self.location.clone()
            }
        }
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        let location = self.index_location();

        if !self.is_remote() {
            tracing::debug!(path = %location, "Reading package index");
            return std::fs::read(&location)
                .map_err(|e| Error::Connection(format!("cannot read {location}: {e}")));
        }

        tracing::info!(url = %location, "Downloading package index");
        let response = match ureq::get(&location)
            .set("User-Agent", concat!("depviz/", env!("CARGO_PKG_VERSION")))
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(Error::Connection(format!(
                    "failed to download package index {location}: {code} {}",
                    response.status_text()
                )));
            }
            Err(err) => {
                return Err(Error::Connection(format!("{location}: {err}")));
            }
        };

        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| Error::Connection(format!("reading {location}: {e}")))?;
        Ok(body)
    }

    fn loaded(&mut self) -> Result<&PackageIndex> {
        if self.index.is_none() {
            let bytes = self.fetch()?;
            let text = decode_index(&bytes)?;
            let index = PackageIndex::parse(&text);
            tracing::debug!(records = index.len(), "Parsed package index");
            self.index = Some(index);
        }
        Ok(self.index.get_or_insert_with(PackageIndex::default))
    }
}

impl DependencyProvider for LiveIndexProvider {
    fn direct_dependencies(&mut self, package: &str) -> Result<Vec<String>> {
        tracing::debug!(package, "Looking up package in index");
        let index = self.loaded()?;
        index
            .find(package)
            .map(depviz_index::PackageRecord::dependencies)
            .ok_or_else(|| Error::PackageNotFound(package.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::TempDir;

    const INDEX: &str = "\
P:curl
V:8.5.0-r0
D:ca-certificates libcurl=8.5.0-r0 musl>=1.2

P:libcurl
V:8.5.0-r0
D:zlib musl

P:zlib
V:1.3.1-r0
";

    fn repository_with_index(text: &str) -> TempDir {
        let dir = TempDir::new().expect("create temp repository");
        let arch = dir.path().join("x86_64");
        std::fs::create_dir_all(&arch).expect("create arch dir");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).expect("compress index");
        let bytes = encoder.finish().expect("finish gzip");
        std::fs::write(arch.join("APKINDEX.tar.gz"), bytes).expect("write index");
        dir
    }

    #[test]
    fn test_remote_location_appends_archive_path() {
        let provider = LiveIndexProvider::new("https://dl-cdn.alpinelinux.org/alpine/v3.19/main/");
        assert!(provider.is_remote());
        assert_eq!(
            provider.index_location(),
            "https://dl-cdn.alpinelinux.org/alpine/v3.19/main/x86_64/APKINDEX.tar.gz"
        );
    }

    #[test]
    fn test_lookup_from_repository_directory() {
        let repo = repository_with_index(INDEX);
        let mut provider = LiveIndexProvider::new(repo.path().display().to_string());
        assert!(!provider.is_remote());
        assert_eq!(
            provider.direct_dependencies("curl").expect("curl is indexed"),
            vec!["ca-certificates", "libcurl", "musl"]
        );
        assert!(
            provider
                .direct_dependencies("zlib")
                .expect("zlib is indexed")
                .is_empty()
        );
    }

    #[test]
    fn test_lookup_from_archive_path() {
        let repo = repository_with_index(INDEX);
        let archive = repo.path().join(INDEX_ARCHIVE_PATH);
        let mut provider = LiveIndexProvider::new(archive.display().to_string());
        assert_eq!(
            provider.direct_dependencies("libcurl").expect("libcurl is indexed"),
            vec!["zlib", "musl"]
        );
    }

    #[test]
    fn test_unknown_package_is_not_found() {
        let repo = repository_with_index(INDEX);
        let mut provider = LiveIndexProvider::new(repo.path().display().to_string());
        let err = provider
            .direct_dependencies("wget")
            .expect_err("wget is not indexed");
        assert!(matches!(err, Error::PackageNotFound(_)));
    }

    #[test]
    fn test_corrupt_archive_is_format_error() {
        let dir = TempDir::new().expect("create temp dir");
        let archive = dir.path().join("APKINDEX.tar.gz");
        std::fs::write(&archive, b"not gzip at all").expect("write archive");
        let mut provider = LiveIndexProvider::new(archive.display().to_string());
        let err = provider
            .direct_dependencies("curl")
            .expect_err("corrupt archive should fail");
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_missing_archive_is_connection_error() {
        let dir = TempDir::new().expect("create temp dir");
        let mut provider = LiveIndexProvider::new(dir.path().display().to_string());
        let err = provider
            .direct_dependencies("curl")
            .expect_err("missing archive should fail");
        assert!(matches!(err, Error::Connection(_)));
    }
}
