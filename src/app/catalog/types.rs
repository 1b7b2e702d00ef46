//! Data model for the operating system catalog
//!
//! These types mirror the remote catalog's shape. Catalog entities are
//! created once at load time and are read-only afterwards; everything that
//! needs to mutate (filtering, screen state) works on clones.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hardware architecture a configuration is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    #[serde(rename = "x86_64")]
    X86_64,
    #[serde(rename = "aarch64")]
    Aarch64,
    #[serde(rename = "riscv64")]
    Riscv64,
}

impl Arch {
    /// Every architecture the wizard can offer, in display order
    pub const ALL: [Arch; 3] = [Arch::X86_64, Arch::Aarch64, Arch::Riscv64];

    /// The catalog's spelling of this architecture
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::Riscv64 => "riscv64",
        }
    }

    /// Architecture of the running platform, defaulting to x86_64 when the
    /// platform is not one the catalog covers
    pub fn native() -> Self {
        match std::env::consts::ARCH {
            "aarch64" => Arch::Aarch64,
            "riscv64" => Arch::Riscv64,
            _ => Arch::X86_64,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One operating system with its selectable release configurations
///
/// `releases` keeps catalog order; that order is display order on every
/// screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingSystem {
    /// Catalog identity, used for search matching
    pub name: String,
    /// Human-facing name shown in lists
    pub pretty_name: String,
    /// Optional one-line description
    #[serde(default)]
    pub description: Option<String>,
    /// Release configurations, in catalog order
    #[serde(default)]
    pub releases: Vec<Configuration>,
}

/// One selectable release/edition/architecture combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Release label (e.g. "24.04")
    pub release: String,
    /// Edition label, absent for editionless releases
    #[serde(default)]
    pub edition: Option<String>,
    /// Architecture tag; an absent tag means "x86_64-compatible"
    #[serde(default)]
    pub arch: Option<Arch>,
    /// Installer media sources
    #[serde(default)]
    pub iso: Vec<SourceItem>,
    /// Raw disk image sources
    #[serde(default)]
    pub img: Vec<SourceItem>,
    /// Non-bootable auxiliary ISO sources
    #[serde(default)]
    pub fixed_iso: Vec<SourceItem>,
    /// Floppy image sources
    #[serde(default)]
    pub floppy: Vec<SourceItem>,
    /// Pre-built disk images; their presence disqualifies the configuration
    #[serde(default)]
    pub disk_images: Vec<DiskImage>,
}

impl Configuration {
    /// All source items across the four groups, in catalog order
    pub fn source_items(&self) -> impl Iterator<Item = &SourceItem> {
        self.iso
            .iter()
            .chain(self.img.iter())
            .chain(self.fixed_iso.iter())
            .chain(self.floppy.iter())
    }

    /// The web-retrievable sources, in catalog order
    pub fn web_sources(&self) -> impl Iterator<Item = &WebSource> {
        self.source_items().filter_map(|item| match item {
            SourceItem::Web(source) => Some(source),
            _ => None,
        })
    }

    /// Whether the download manager can service every part of this
    /// configuration
    pub fn is_downloadable(&self) -> bool {
        self.disk_images.is_empty()
            && self
                .source_items()
                .all(|item| matches!(item, SourceItem::Web(_)))
    }

    /// Whether this configuration carries a non-empty edition label
    pub fn has_edition(&self) -> bool {
        self.edition.as_deref().is_some_and(|e| !e.is_empty())
    }

    /// Display key for the edition screen; editionless configurations share
    /// the "None" row
    pub fn edition_label(&self) -> &str {
        self.edition
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or("None")
    }
}

/// One artifact attached to a configuration
///
/// Only the `Web` variant is retrievable by this system; configurations
/// containing any other variant are removed at catalog load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceItem {
    /// Retrievable over the network
    Web(WebSource),
    /// Refers to a file expected to already exist locally
    FileName(String),
    /// Produced by custom tooling outside the catalog
    Custom,
    /// Container image reference
    Docker(String),
}

/// A web-retrievable file descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSource {
    /// Where to fetch the file from
    pub url: String,
    /// Checksum directive forwarded with the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    /// Destination file name; derived from the URL when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// A pre-built disk image entry
///
/// The download manager cannot service these, so they only matter to the
/// load-time cleansing pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskImage {
    #[serde(default)]
    pub source: Option<SourceItem>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub format: Option<String>,
}
