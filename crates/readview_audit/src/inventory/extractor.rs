//! Field and version extraction
//!
//! Everything here is pure: documents go in, optional values come out.

use super::error::{AuditError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

pub const DEFAULT_FIELD: &str = "indexName";

/// Trailing version token: `v` followed by ASCII digits and an optional
/// `.`/`-`/ASCII word-character tail, anchored at the end of the name.
pub const DEFAULT_VERSION_PATTERN: &str = r"(v[0-9]+(?:[.\-A-Za-z0-9_]*)?)$";

static DEFAULT_VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(DEFAULT_VERSION_PATTERN).expect("default version pattern is valid")
});

/// Parse file content as a JSON object.
pub fn parse_document(bytes: &[u8]) -> Result<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        Value::Array(_) => Err(AuditError::NotAnObject("array")),
        Value::String(_) => Err(AuditError::NotAnObject("string")),
        Value::Number(_) => Err(AuditError::NotAnObject("number")),
        Value::Bool(_) => Err(AuditError::NotAnObject("boolean")),
        Value::Null => Err(AuditError::NotAnObject("null")),
    }
}

/// Return the field's value when it is a JSON string.
pub fn extract_field(doc: &Map<String, Value>, field: &str) -> Option<String> {
    doc.get(field).and_then(Value::as_str).map(str::to_string)
}

/// Compiled version-suffix pattern
#[derive(Debug, Clone)]
pub struct VersionPattern {
    regex: Regex,
}

impl Default for VersionPattern {
    fn default() -> Self {
        Self {
            regex: DEFAULT_VERSION_REGEX.clone(),
        }
    }
}

impl VersionPattern {
    /// Compile a custom pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Extract the version from an index name.
    ///
    /// Uses the first capture group, or the whole match for patterns
    /// without groups. Empty matches count as no version.
    pub fn extract(&self, name: &str) -> Option<String> {
        let caps = self.regex.captures(name)?;
        let m = caps.get(1).or_else(|| caps.get(0))?;
        if m.as_str().is_empty() {
            None
        } else {
            Some(m.as_str().to_string())
        }
    }
}
