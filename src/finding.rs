//! Raw finding models matching the Snyk issue wire shape.

use serde::{Deserialize, Serialize};

/// Issue type reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    /// Security vulnerability (`vuln` on the wire).
    #[serde(rename = "vuln", alias = "security")]
    Security,
    /// License issue. Never contributes to the report.
    License,
    /// Any issue type this crate does not recognize.
    #[serde(other)]
    Unknown,
}

/// External identifier lists attached to a finding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Identifiers {
    #[serde(rename = "CWE", default)]
    pub cwe: Vec<String>,
    #[serde(rename = "CVE", default)]
    pub cve: Vec<String>,
}

/// A reference link attached to a finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// One occurrence of a vulnerability as reported by Snyk.
///
/// The provider id is not unique: the same vulnerability recurs once per
/// affected package and dependency path. Merging duplicates is the
/// aggregator's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFinding {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FindingKind,
    #[serde(rename = "package")]
    pub package_name: String,
    pub title: String,
    /// Markdown long-form text with `## Overview` / `## Remediation`
    /// sections, as delivered by the provider.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cvss_score: f64,
    #[serde(default)]
    pub identifiers: Identifiers,
    #[serde(default)]
    pub references: Vec<Reference>,
    /// Dependency path from the scanned project down to the vulnerable
    /// package.
    #[serde(rename = "from", default)]
    pub introduced_through: Vec<String>,
}
