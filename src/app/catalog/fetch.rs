//! Remote catalog retrieval and load-time cleansing
//!
//! The catalog travels as a gzip-compressed JSON document. After decoding,
//! every configuration the download manager cannot service (non-web sources,
//! pre-built disk images) is removed, and operating systems left with no
//! configurations are dropped with it. Downstream code can therefore rely on
//! every remaining configuration having retrievable sources.

use std::io::Read;

use flate2::read::GzDecoder;
use tracing::{debug, info};

use crate::constants::{catalog, http};
use crate::errors::{CatalogError, CatalogResult};

use super::types::{Configuration, OperatingSystem};

/// Outcome of the one-shot catalog fetch, as delivered to the wizard
pub type CatalogOutcome = CatalogResult<Vec<OperatingSystem>>;

/// Fetch, decode and cleanse the remote catalog
///
/// Called exactly once per process, from a task spawned at startup. Any
/// error here is fatal to the wizard.
pub async fn fetch_catalog() -> CatalogOutcome {
    let client = reqwest::Client::builder()
        .user_agent(http::USER_AGENT)
        .connect_timeout(http::CONNECT_TIMEOUT)
        .build()?;

    info!("fetching catalog from {}", catalog::CATALOG_URL);
    let response = client.get(catalog::CATALOG_URL).send().await?;
    if !response.status().is_success() {
        return Err(CatalogError::ServerError {
            status: response.status().as_u16(),
        });
    }

    let payload = response.bytes().await?;
    let list = parse_catalog(&payload)?;
    let list = retain_downloadable(list);
    info!(count = list.len(), "catalog ready");
    Ok(list)
}

/// Inflate and parse a compressed catalog payload
pub fn parse_catalog(payload: &[u8]) -> CatalogResult<Vec<OperatingSystem>> {
    let mut decoder = GzDecoder::new(payload);
    let mut json = Vec::new();
    decoder
        .read_to_end(&mut json)
        .map_err(CatalogError::Inflate)?;
    Ok(serde_json::from_slice(&json)?)
}

/// Remove everything the download manager cannot service
///
/// Configurations keeping any non-web source or any disk image are dropped;
/// operating systems whose configurations are all dropped disappear from the
/// catalog entirely.
pub fn retain_downloadable(mut list: Vec<OperatingSystem>) -> Vec<OperatingSystem> {
    for os in &mut list {
        let before = os.releases.len();
        os.releases.retain(Configuration::is_downloadable);
        if os.releases.len() < before {
            debug!(
                os = %os.name,
                removed = before - os.releases.len(),
                "removed configurations without retrievable sources"
            );
        }
    }
    list.retain(|os| !os.releases.is_empty());
    list
}
