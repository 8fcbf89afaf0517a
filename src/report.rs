//! Normalized vulnerability report records.

use serde::Serialize;

/// One normalized vulnerability, the unit handed to the report collector.
///
/// Exactly one record exists per (vulnerability id, package name) pair;
/// duplicate occurrences contribute additional `details` lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vulnerability {
    /// Finding title and affected package, `"title: package"`.
    pub summary: String,
    /// Sanitized Overview section; empty when the description has none.
    pub description: String,
    /// One "Introduced through" line per grouped occurrence.
    pub details: String,
    /// CVSS score as reported by the provider.
    pub score: f64,
    /// Plain-text Remediation lines, markup stripped.
    pub recommendations: Vec<String>,
    /// Numeric CWE id, when the provider sent a parseable identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwe_id: Option<u32>,
    /// Reference URLs in provider order.
    pub references: Vec<String>,
}
