//! Filtering engine
//!
//! Pure functions over catalog slices. Every function clones out of the
//! shared catalog rather than mutating it, so navigating back and choosing
//! differently always recomputes from pristine data.

use std::collections::HashSet;

use super::types::{Arch, Configuration, OperatingSystem};

/// Narrow the catalog to one architecture
///
/// A configuration matches when its tag equals `arch`, or when it has no tag
/// and `arch` is x86_64 (untagged entries are x86_64-compatible only).
/// Operating systems left without configurations are dropped.
pub fn filter_by_architecture(list: &[OperatingSystem], arch: Arch) -> Vec<OperatingSystem> {
    list.iter()
        .filter_map(|os| {
            let releases: Vec<Configuration> = os
                .releases
                .iter()
                .filter(|config| matches_arch(config, arch))
                .cloned()
                .collect();
            (!releases.is_empty()).then(|| OperatingSystem {
                releases,
                ..os.clone()
            })
        })
        .collect()
}

fn matches_arch(config: &Configuration, arch: Arch) -> bool {
    match config.arch {
        Some(tag) => tag == arch,
        None => arch == Arch::X86_64,
    }
}

/// What committing a release leads to
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// More than one candidate, or a lone candidate with an edition label;
    /// the edition screen must run
    NeedsEdition(Vec<Configuration>),
    /// Exactly one editionless candidate; it is the finalized choice
    Finalized(Configuration),
}

/// Narrow a configuration list to one release and decide the next step
///
/// Returns `None` when no configuration carries the release label; a screen
/// offering such a label was built from inconsistent data, which is a defect
/// upstream, not a user-facing case.
pub fn narrow_release(configs: &[Configuration], release: &str) -> Option<ReleaseOutcome> {
    let mut matched: Vec<Configuration> = configs
        .iter()
        .filter(|config| config.release == release)
        .cloned()
        .collect();

    match matched.len() {
        0 => None,
        1 if !matched[0].has_edition() => Some(ReleaseOutcome::Finalized(matched.remove(0))),
        _ => Some(ReleaseOutcome::NeedsEdition(matched)),
    }
}

/// Release labels in first-seen catalog order, without duplicates
///
/// Configurations sharing a release label differ only in fields the release
/// screen does not show, so the first occurrence stands in for all of them.
pub fn unique_releases(configs: &[Configuration]) -> Vec<String> {
    let mut seen = HashSet::new();
    configs
        .iter()
        .filter(|config| seen.insert(config.release.clone()))
        .map(|config| config.release.clone())
        .collect()
}

/// Configurations deduplicated by edition display label, first seen wins
pub fn unique_editions(configs: &[Configuration]) -> Vec<Configuration> {
    let mut seen = HashSet::new();
    configs
        .iter()
        .filter(|config| seen.insert(config.edition_label().to_string()))
        .cloned()
        .collect()
}
