//! Conversion of one finding group into a normalized vulnerability record.

use tracing::{info, warn};

use crate::aggregator::FindingGroupKey;
use crate::error::{ReportError, Result};
use crate::extract::SectionExtractor;
use crate::finding::RawFinding;
use crate::report::Vulnerability;

/// Normalize a group of findings sharing one key into a single record.
///
/// The first finding in arrival order supplies the title, description,
/// score, CWE and references; every finding contributes its dependency
/// path to `details`. An empty group is the one structural error this
/// layer surfaces.
pub fn normalize(
    extractor: &SectionExtractor,
    key: &FindingGroupKey,
    group: &[RawFinding],
) -> Result<Vulnerability> {
    let first = group.first().ok_or_else(|| ReportError::EmptyGroup {
        id: key.id.clone(),
        package: key.package_name.clone(),
    })?;

    Ok(Vulnerability {
        summary: format!("{}: {}", first.title, key.package_name),
        description: extractor.overview(&first.description),
        details: render_details(group),
        score: first.cvss_score,
        recommendations: extractor.remediations(&first.description),
        cwe_id: parse_cwe_id(first),
        references: first.references.iter().map(|r| r.url.clone()).collect(),
    })
}

/// One "Introduced through" line per occurrence, in arrival order.
///
/// The separator is appended after element `i` only while `i + 2 < n`, so
/// the last two path elements run together. Report consumers parse this
/// exact format; do not change it without versioning the report.
fn render_details(group: &[RawFinding]) -> String {
    let mut details = String::new();
    for finding in group {
        details.push_str("Introduced through: ");
        let n = finding.introduced_through.len();
        for (i, part) in finding.introduced_through.iter().enumerate() {
            details.push_str(part);
            if i + 2 < n {
                details.push_str(" > ");
            }
        }
        details.push('\n');
    }
    details
}

/// First CWE identifier with the "CWE-" prefix stripped, parsed as a
/// number. Extra identifiers and unparseable suffixes degrade with a
/// diagnostic, never an error.
fn parse_cwe_id(finding: &RawFinding) -> Option<u32> {
    let cwe = finding.identifiers.cwe.first()?;
    if finding.identifiers.cwe.len() > 1 {
        info!(id = %finding.id, "Multiple CWE identifiers; keeping the first");
    }
    match cwe.replace("CWE-", "").parse::<u32>() {
        Ok(number) => Some(number),
        Err(_) => {
            warn!(id = %finding.id, cwe = %cwe, "Cannot parse CWE identifier");
            None
        }
    }
}
