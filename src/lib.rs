//! Snyk vulnerability feed normalizer.
//!
//! Ingests raw Snyk findings for one repository, groups duplicate
//! occurrences by (vulnerability id, package name), extracts the Overview
//! and Remediation sections from the markdown descriptions, and emits
//! normalized vulnerability report records.
//!
//! Network retrieval, option parsing, and report persistence are owned by
//! the host; this crate starts at a decoded finding collection and ends at
//! a collection of [`Vulnerability`] records.

pub mod aggregator;
pub mod error;
pub mod extract;
pub mod finding;
pub mod normalizer;
pub mod pipeline;
pub mod report;

pub use aggregator::{aggregate, FindingGroupKey};
pub use error::{ReportError, Result};
pub use extract::SectionExtractor;
pub use finding::{FindingKind, Identifiers, RawFinding, Reference};
pub use normalizer::normalize;
pub use pipeline::Pipeline;
pub use report::Vulnerability;
