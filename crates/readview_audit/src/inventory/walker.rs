//! Candidate discovery
//!
//! Walks the root in file-name order, prunes excluded directories and keeps
//! the files whose path carries both the suffix and the marker.

use super::error::{AuditError, Result};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const DEFAULT_MARKER: &str = "read-view";
pub const DEFAULT_SUFFIX: &str = ".json";
pub const DEFAULT_EXCLUDE: &str = "target";

/// Rules deciding which paths are walked and which files are read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkRules {
    /// Substring that must appear somewhere in the file path
    pub marker: String,
    /// Required file name ending (case-sensitive)
    pub suffix: String,
    /// Path component whose subtree is never walked
    pub exclude: String,
}

impl Default for WalkRules {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            exclude: DEFAULT_EXCLUDE.to_string(),
        }
    }
}

impl WalkRules {
    /// True if any whole component of `path` equals the exclusion marker.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        path.components().any(|c| match c {
            Component::Normal(part) => part == self.exclude.as_str(),
            _ => false,
        })
    }

    /// True if the path ends with the suffix and contains the marker.
    pub fn is_candidate(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        text.ends_with(self.suffix.as_str()) && text.contains(self.marker.as_str())
    }
}

/// A file selected for field extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
}

/// Walk `root` and collect candidate files.
///
/// Errors on individual entries go to `on_error` and the walk continues.
/// Only a failure to read the root itself is returned.
pub fn walk<F>(root: &Path, rules: &WalkRules, mut on_error: F) -> Result<Vec<CandidateFile>>
where
    F: FnMut(&walkdir::Error),
{
    let mut candidates = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !rules.is_excluded(entry.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(AuditError::Walk(err)),
            Err(err) => {
                on_error(&err);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        if !rules.is_candidate(entry.path()) {
            continue;
        }

        debug!(path = %entry.path().display(), "candidate file");
        candidates.push(CandidateFile {
            path: entry.into_path(),
        });
    }

    Ok(candidates)
}

/// Default error sink: log and continue.
pub fn log_walk_error(err: &walkdir::Error) {
    match err.path() {
        Some(path) => warn!("Error accessing {}: {}", path.display(), err),
        None => warn!("Error during walk: {}", err),
    }
}
