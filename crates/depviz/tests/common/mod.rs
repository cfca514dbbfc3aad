//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};

/// Manifest used by most end-to-end tests.
///
/// `B <-> A` is a mutual dependency, `X -> Y -> Z -> X` a longer cycle and
/// `docs-c` is meant to be filtered out.
pub const SAMPLE_MANIFEST: &str = "\
# sample repository
A: B C
B: D A
C: docs-c
D:
docs-c:
X: Y
Y: Z
Z: X
M: N>=1.0 O
N:
O: N
";

/// Path of the compiled depviz binary.
pub fn depviz_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_depviz"))
}

/// Run the depviz binary in `dir` with colors disabled.
pub fn run_depviz_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(depviz_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("DEPVIZ_ASCII")
        .output()
        .expect("Failed to execute depviz binary")
}

/// Write `SAMPLE_MANIFEST` into `dir` and return its path.
pub fn write_manifest(dir: &Path) -> PathBuf {
    let path = dir.join("repo.txt");
    std::fs::write(&path, SAMPLE_MANIFEST).expect("Failed to write manifest");
    path
}

/// A valid configuration document for the static backend.
pub fn static_config(manifest: &Path, package: &str, depth: u64) -> Value {
    json!({
        "package_name": package,
        "repository_url": manifest.to_string_lossy(),
        "test_repository_mode": true,
        "ascii_tree_output": true,
        "max_dependency_depth": depth,
        "package_filter": ""
    })
}

/// Write `document` as `config.json` into `dir`.
pub fn write_config(dir: &Path, document: &Value) -> PathBuf {
    let path = dir.join("config.json");
    let content = serde_json::to_string_pretty(document).expect("config serializes");
    std::fs::write(&path, content).expect("Failed to write config");
    path
}
