//! Once-initialized catalog cache
//!
//! The store is owned by the wizard and installed exactly once, when the
//! fetch task delivers its result. There is no reinitialization path;
//! screens read the shared slice and clone what they filter.

use std::cell::OnceCell;

use tracing::warn;

use super::types::OperatingSystem;

/// Process-wide cache of the cleansed catalog
#[derive(Debug, Default)]
pub struct CatalogStore {
    cell: OnceCell<Vec<OperatingSystem>>,
}

impl CatalogStore {
    /// Create an empty store; [`CatalogStore::install`] fills it later
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the fetched catalog; the one-time initialization path
    pub fn install(&self, list: Vec<OperatingSystem>) {
        if self.cell.set(list).is_err() {
            warn!("catalog already installed; duplicate load ignored");
        }
    }

    /// The cached catalog, or `None` while the fetch is still in flight
    pub fn get(&self) -> Option<&[OperatingSystem]> {
        self.cell.get().map(Vec::as_slice)
    }

    /// Whether the catalog has arrived
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
