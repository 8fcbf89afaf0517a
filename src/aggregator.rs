//! Grouping of raw findings by (vulnerability id, package name).

use std::collections::HashMap;

use tracing::debug;

use crate::finding::{FindingKind, RawFinding};

/// Composite grouping key.
///
/// All findings sharing a key merge into exactly one normalized
/// vulnerability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FindingGroupKey {
    pub id: String,
    pub package_name: String,
}

impl FindingGroupKey {
    pub fn new(id: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            package_name: package_name.into(),
        }
    }
}

impl From<&RawFinding> for FindingGroupKey {
    fn from(finding: &RawFinding) -> Self {
        Self {
            id: finding.id.clone(),
            package_name: finding.package_name.clone(),
        }
    }
}

/// Group findings by (id, package name), dropping license issues.
///
/// Duplicates are never discarded: each occurrence keeps its dependency
/// path and accumulates under its key in arrival order.
pub fn aggregate(findings: Vec<RawFinding>) -> HashMap<FindingGroupKey, Vec<RawFinding>> {
    let mut groups: HashMap<FindingGroupKey, Vec<RawFinding>> = HashMap::new();
    for finding in findings {
        if finding.kind == FindingKind::License {
            debug!(id = %finding.id, package = %finding.package_name, "Skipping license issue");
            continue;
        }
        groups
            .entry(FindingGroupKey::from(&finding))
            .or_default()
            .push(finding);
    }
    groups
}
