//! Beadview CLI binary.

use anyhow::Result;
use beadview::cli::Cli;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "beadview=info,beadview_jsonl=info";
const VERBOSE_FILTER: &str = "beadview=debug,beadview_jsonl=debug";

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Controlled via RUST_LOG unless --verbose is given
    // Example: RUST_LOG=beadview=debug,beadview_jsonl=trace beadview stats
    let filter = if cli.verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting beadview CLI");

    cli.execute()?;

    tracing::debug!("Beadview CLI completed successfully");
    Ok(())
}
