//! Parsers for the package-index formats consumed by depviz.
//!
//! This library understands two data sources:
//!
//! - Alpine `APKINDEX.tar.gz` archives: gzip-compressed text made of
//!   blank-line separated blocks of single-letter `key:value` lines
//! - flat dependency manifests where every line reads `name: dep1 dep2 ...`
//!
//! Nothing here touches the network; callers hand over bytes or text.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod deps;
pub mod error;
pub mod index;
pub mod manifest;
pub mod record;

pub use deps::{parse_dependency_field, strip_constraint};
pub use error::{Error, Result};
pub use index::{PackageIndex, decode_index};
pub use manifest::StaticManifest;
pub use record::PackageRecord;
