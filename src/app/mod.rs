//! Core application logic for distro_fetcher
//!
//! This module contains the wizard's working parts: the catalog data model
//! with its load-time cleansing and filtering engine, the selection state
//! machine, and the concurrent download manager. The terminal rendering that
//! drives all of this lives in [`crate::tui`].

pub mod catalog;
pub mod download;
pub mod wizard;

// Re-export main public API
pub use catalog::{Arch, CatalogStore, Configuration, OperatingSystem, WebSource};
pub use download::{DownloadManager, DownloadSnapshot, JobState};
pub use wizard::{Effect, KeyAction, Wizard, WizardEvent};
