//! Inventory - read-view discovery, extraction and existence checks
//!
//! The walk and the probes are sequential; nothing is persisted between runs.

pub mod audit;
pub mod error;
pub mod extractor;
pub mod probe;
pub mod types;
pub mod walker;

pub use audit::Auditor;
pub use error::{AuditError, Result};
pub use extractor::{
    extract_field, parse_document, VersionPattern, DEFAULT_FIELD, DEFAULT_VERSION_PATTERN,
};
pub use probe::{CachedProbe, HttpIndexProbe, IndexProbe, DEFAULT_TIMEOUT_SECS};
pub use types::{AuditReport, IndexRecord, IndexStatus, SkipCounts};
pub use walker::{walk, CandidateFile, WalkRules};
