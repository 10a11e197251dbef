//! Core types for the inventory scan
//!
//! A run produces one [`IndexRecord`] per read-view file that carries the
//! configured field, plus counters for everything that was skipped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Existence Status
// ============================================================================

/// Outcome of an existence check against the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStatus {
    /// Endpoint answered 200
    Present,
    /// Endpoint answered 404
    Absent,
    /// Any other status, or the request never completed
    Unknown,
}

impl IndexStatus {
    /// Short label used in the report's `Exists` column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Present => "yes",
            Self::Absent => "no",
            Self::Unknown => "unknown",
        }
    }

    /// Map an HTTP status code to an existence outcome.
    pub fn from_http_status(code: u16) -> Self {
        match code {
            200 => Self::Present,
            404 => Self::Absent,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for IndexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Records
// ============================================================================

/// One index name found in a read-view file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// File the name was read from
    pub path: PathBuf,
    /// Value of the configured field
    pub name: String,
    /// Trailing version token, if the name carries one
    pub version: Option<String>,
    /// Existence check result (None = no check performed)
    pub status: Option<IndexStatus>,
}

impl IndexRecord {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            version: None,
            status: None,
        }
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    pub fn with_status(mut self, status: Option<IndexStatus>) -> Self {
        self.status = status;
        self
    }
}

/// Files that matched the walk rules but produced no record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounts {
    /// Could not be read from disk
    pub unreadable: usize,
    /// Not valid JSON, or not a JSON object
    pub invalid_json: usize,
    /// Field absent or not a string
    pub missing_field: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.unreadable + self.invalid_json + self.missing_field
    }
}

/// Complete result of one audit run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Directory that was walked
    pub root: PathBuf,
    /// Field the names were read from
    pub field: String,
    /// Records in walk order
    pub records: Vec<IndexRecord>,
    pub skipped: SkipCounts,
    /// Upstream existence checks actually sent (cache misses)
    pub lookups: usize,
}

impl AuditReport {
    pub fn total(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_http() {
        assert_eq!(IndexStatus::from_http_status(200), IndexStatus::Present);
        assert_eq!(IndexStatus::from_http_status(404), IndexStatus::Absent);
        assert_eq!(IndexStatus::from_http_status(204), IndexStatus::Unknown);
        assert_eq!(IndexStatus::from_http_status(500), IndexStatus::Unknown);
        assert_eq!(IndexStatus::from_http_status(401), IndexStatus::Unknown);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(IndexStatus::Present.to_string(), "yes");
        assert_eq!(IndexStatus::Absent.to_string(), "no");
        assert_eq!(IndexStatus::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&IndexStatus::Present).unwrap();
        assert_eq!(json, "\"present\"");
    }

    #[test]
    fn test_skip_total() {
        let skipped = SkipCounts {
            unreadable: 1,
            invalid_json: 2,
            missing_field: 3,
        };
        assert_eq!(skipped.total(), 6);
    }
}
