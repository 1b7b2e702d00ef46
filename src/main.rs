//! distro_fetcher application
//!
//! Launches the interactive wizard: the catalog fetch starts immediately in
//! the background while the terminal UI comes up on the architecture screen.

use std::process;
use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use distro_fetcher::app::catalog::fetch_catalog;
use distro_fetcher::app::wizard::Wizard;
use distro_fetcher::cli::Cli;
use distro_fetcher::errors::Result;
use distro_fetcher::tui;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(&cli)?;

    info!("distro_fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    // One catalog fetch per process; the wizard awaits it lazily through the
    // channel while the first screens stay interactive.
    let (catalog_tx, catalog_rx) = oneshot::channel();
    tokio::spawn(async move {
        let outcome = fetch_catalog().await;
        if catalog_tx.send(outcome).is_err() {
            warn!("catalog result discarded; the wizard already exited");
        }
    });

    tui::run(Wizard::new(), catalog_rx)
}

/// Initialize logging based on CLI verbosity settings
///
/// Logging is file-only: the TUI owns the terminal, so writing to stderr
/// would corrupt the alternate screen.
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("distro_fetcher={}", cli.log_level()).parse().unwrap());

    fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}
