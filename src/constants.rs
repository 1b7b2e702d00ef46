//! Application constants for distro_fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Remote catalog location and shape
pub mod catalog {
    /// Daily-refreshed, gzip-compressed JSON catalog of operating systems
    pub const CATALOG_URL: &str =
        "https://github.com/lj3954/quickget_cigo/releases/download/daily/quickget_data.json.gz";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("distro-fetcher/", env!("CARGO_PKG_VERSION"));

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// A retrieval that produces no bytes for this long is failed rather
    /// than left hanging
    pub const READ_STALL_TIMEOUT: Duration = Duration::from_secs(20);
}

/// Terminal loop configuration
pub mod ui {
    use super::Duration;

    /// Input poll window; doubles as the progress republish interval
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
}
