//! Error types for distro_fetcher
//!
//! Errors fall into two families with very different propagation rules:
//! catalog errors are fatal to the whole wizard (nothing can be selected
//! without a catalog), while download errors are contained inside the job
//! they belong to and only ever surface as per-job status text.

use thiserror::Error;

/// Errors raised while fetching and decoding the remote catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request for the catalog payload failed
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog server answered with a non-success status
    #[error("catalog server returned HTTP {status}")]
    ServerError { status: u16 },

    /// Payload could not be gzip-inflated
    #[error("catalog payload is not valid gzip: {0}")]
    Inflate(#[source] std::io::Error),

    /// Inflated payload could not be parsed
    #[error("catalog payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The fetch task ended without delivering a result
    #[error("catalog fetch ended without a result")]
    Interrupted,
}

/// Errors raised by a single retrieval task
///
/// These never propagate past the job that produced them; the manager
/// records the rendered message in the job's `Failed` state.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned error status
    #[error("server error: HTTP {status}")]
    ServerError { status: u16 },

    /// No bytes arrived for the configured stall window
    #[error("transfer stalled for {seconds} seconds")]
    Stalled { seconds: u64 },

    /// Source URL in the catalog could not be parsed
    #[error("invalid source URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// I/O error writing the destination file
    #[error("file write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Generic I/O error (terminal setup, logging targets)
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Catalog result type alias
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;
