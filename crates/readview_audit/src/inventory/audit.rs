//! Audit run: walk, read, extract, probe, collect.

use super::error::Result;
use super::extractor::{extract_field, parse_document, VersionPattern, DEFAULT_FIELD};
use super::probe::{CachedProbe, IndexProbe};
use super::types::{AuditReport, IndexRecord, SkipCounts};
use super::walker::{log_walk_error, walk, WalkRules};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Sequential auditor over one directory tree
pub struct Auditor {
    rules: WalkRules,
    field: String,
    version: Option<VersionPattern>,
    probe: Option<CachedProbe<Box<dyn IndexProbe>>>,
}

impl Default for Auditor {
    fn default() -> Self {
        Self {
            rules: WalkRules::default(),
            field: DEFAULT_FIELD.to_string(),
            version: Some(VersionPattern::default()),
            probe: None,
        }
    }
}

impl Auditor {
    pub fn new(rules: WalkRules, field: impl Into<String>) -> Self {
        Self {
            rules,
            field: field.into(),
            ..Self::default()
        }
    }

    /// Version extraction pattern; `None` disables version extraction.
    pub fn with_version_pattern(mut self, pattern: Option<VersionPattern>) -> Self {
        self.version = pattern;
        self
    }

    /// Enable the existence check through `probe`.
    pub fn with_probe(mut self, probe: Box<dyn IndexProbe>) -> Self {
        self.probe = Some(CachedProbe::new(probe));
        self
    }

    /// Audit `root`. Per-file problems are logged and counted; only a walk
    /// that cannot start is an error.
    pub fn run(&mut self, root: &Path) -> Result<AuditReport> {
        let candidates = walk(root, &self.rules, log_walk_error)?;
        info!(root = %root.display(), candidates = candidates.len(), "walk finished");

        let mut records = Vec::new();
        let mut skipped = SkipCounts::default();

        for candidate in candidates {
            let path = candidate.path;

            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!("Failed to read {}: {}", path.display(), err);
                    skipped.unreadable += 1;
                    continue;
                }
            };

            let doc = match parse_document(&bytes) {
                Ok(doc) => doc,
                Err(err) => {
                    warn!("Failed to parse JSON in {}: {}", path.display(), err);
                    skipped.invalid_json += 1;
                    continue;
                }
            };

            let Some(name) = extract_field(&doc, &self.field) else {
                warn!(
                    "No string field '{}' in {}, skipping",
                    self.field,
                    path.display()
                );
                skipped.missing_field += 1;
                continue;
            };

            let version = self.version.as_ref().and_then(|p| p.extract(&name));
            let status = self.probe.as_mut().map(|p| p.check(&name));

            debug!(path = %path.display(), %name, ?version, ?status, "record");
            records.push(
                IndexRecord::new(path, name)
                    .with_version(version)
                    .with_status(status),
            );
        }

        let lookups = self.probe.as_ref().map(|p| p.lookups()).unwrap_or(0);
        info!(
            records = records.len(),
            skipped = skipped.total(),
            lookups,
            "audit finished"
        );

        Ok(AuditReport {
            root: root.to_path_buf(),
            field: self.field.clone(),
            records,
            skipped,
            lookups,
        })
    }
}
