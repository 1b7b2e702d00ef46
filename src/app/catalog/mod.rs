//! Catalog loading, caching and filtering
//!
//! The catalog is the full remote dataset of operating systems and their
//! release configurations. It is fetched once per process, cleansed of
//! entries the download manager cannot service, cached in a [`CatalogStore`],
//! and from then on only ever read; every screen works on its own clone of
//! the relevant slice, so repeated navigation always recomputes from the
//! pristine data.

pub mod fetch;
pub mod filter;
pub mod store;
pub mod types;

// Re-export main public API
pub use fetch::{fetch_catalog, parse_catalog, retain_downloadable, CatalogOutcome};
pub use filter::{filter_by_architecture, narrow_release, unique_editions, unique_releases, ReleaseOutcome};
pub use store::CatalogStore;
pub use types::{Arch, Configuration, DiskImage, OperatingSystem, SourceItem, WebSource};
