//! Concurrent download manager
//!
//! Given a finalized configuration and a destination directory, one tokio
//! task per web source streams bytes to disk and reports progress over a
//! channel. The [`DownloadManager`] is the channel's only reader: it folds
//! events into its job records on each UI tick and hands the render layer a
//! consolidated snapshot. One job failing never cancels its siblings, and
//! nothing here retries.

pub mod client;
pub mod manager;
pub mod types;

// Re-export main public API
pub use manager::DownloadManager;
pub use types::{DownloadSnapshot, JobEvent, JobProgress, JobState};
