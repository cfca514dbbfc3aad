//! Depviz CLI binary.

use std::process::ExitCode;

use depviz::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

/// Main entry point for the depviz CLI.
///
/// Every failure is reported on stderr and mapped to exit status 1.
fn main() -> ExitCode {
    // Logs go to stderr so they never mix with diagram output.
    // Example: RUST_LOG=depviz=debug,depviz_index=trace depviz
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("depviz=warn,depviz_index=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting depviz CLI");

    let cli = Cli::parse_args();
    match cli.execute() {
        Ok(()) => {
            tracing::debug!("Depviz CLI completed successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            cli::report_failure(&err);
            ExitCode::FAILURE
        }
    }
}
