//! Command-line argument parsing for distro_fetcher
//!
//! The wizard itself takes no arguments; everything here controls logging.
//! Log output goes to a file because the alternate screen owns the terminal
//! for the whole session.

use std::path::PathBuf;

use clap::Parser;

/// distro_fetcher - interactive OS image download wizard
#[derive(Parser, Debug)]
#[command(
    name = "distro_fetcher",
    version,
    about = "Pick an operating system image from the remote catalog and download it",
    long_about = "An interactive terminal wizard: choose an architecture, operating system,
release and edition, then download every file of the chosen configuration
concurrently with live progress."
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long)]
    pub very_verbose: bool,

    /// Write logs to this file (logging is off without it)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the appropriate log level based on verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.very_verbose {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}
