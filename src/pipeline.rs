//! Pipeline driver: aggregate, then normalize each group.

use tracing::debug;

use crate::aggregator::aggregate;
use crate::error::Result;
use crate::extract::SectionExtractor;
use crate::finding::RawFinding;
use crate::normalizer::normalize;
use crate::report::Vulnerability;

/// Drives one feed of raw findings through grouping and normalization.
///
/// Group iteration order is unspecified: for a given input the output is
/// the same set of records, not the same ordering. A single normalization
/// failure aborts the run; no partial results are returned.
pub struct Pipeline {
    extractor: SectionExtractor,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            extractor: SectionExtractor::new(),
        }
    }

    /// Process one collection of findings to completion.
    pub fn run(&self, findings: Vec<RawFinding>) -> Result<Vec<Vulnerability>> {
        let total = findings.len();
        let groups = aggregate(findings);
        debug!(findings = total, groups = groups.len(), "Grouped findings");

        let mut vulnerabilities = Vec::with_capacity(groups.len());
        for (key, group) in &groups {
            vulnerabilities.push(normalize(&self.extractor, key, group)?);
        }
        Ok(vulnerabilities)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
