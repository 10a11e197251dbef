//! Helpful error types for the CLI
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug, Serialize)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Create a new helpful error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a suggestion for fixing the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add multiple suggestions
    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Path does not exist
    pub fn path_not_found(path: &Path) -> Self {
        Self::new(format!("Path not found: {}", path.display()))
            .with_context("The directory to audit does not exist on the filesystem")
            .with_suggestions([
                format!("TRY: Check that the path exists: ls -la {}", path.display()),
                "TRY: Check for typos in the path".to_string(),
            ])
    }

    /// Path exists but is not a directory
    pub fn not_a_directory(path: &Path) -> Self {
        Self::new(format!("Not a directory: {}", path.display()))
            .with_context("The audit walks a directory tree, not a single file")
            .with_suggestion(format!(
                "TRY: Audit the parent directory: readview-audit {}",
                path.parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| ".".to_string())
            ))
    }

    /// Config file could not be loaded
    pub fn invalid_config(path: Option<&Path>, details: &str) -> Self {
        let location = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| crate::config::default_config_path().display().to_string());
        Self::new(format!("Invalid configuration: {}", details))
            .with_context(format!("While loading {}", location))
            .with_suggestions([
                "TRY: Valid keys: marker, field, suffix, exclude, version_pattern, endpoint, timeout_secs, log_dir".to_string(),
                "TRY: Check the file is valid TOML".to_string(),
            ])
    }

    /// Version pattern does not compile
    pub fn invalid_pattern(pattern: &str, details: &str) -> Self {
        Self::new(format!("Invalid version pattern: '{}'", pattern))
            .with_context(details.to_string())
            .with_suggestions([
                "TRY: The first capture group is used as the version, e.g. '(v\\d+)$'".to_string(),
                "TRY: Pass --no-version to skip version extraction".to_string(),
            ])
    }

    /// Settings resolved to values the audit cannot run with
    pub fn invalid_settings(details: &str) -> Self {
        Self::new(format!("Invalid settings: {}", details))
            .with_context("While combining the config file with command-line flags")
            .with_suggestions([
                "TRY: Pass --timeout-secs with a value of 1 or more".to_string(),
                "TRY: Pass --no-check to skip the existence check".to_string(),
            ])
    }

    /// Endpoint URL cannot be used to build a client
    pub fn invalid_endpoint(endpoint: &str, details: &str) -> Self {
        Self::new(format!("Cannot use endpoint: {}", endpoint))
            .with_context(details.to_string())
            .with_suggestions([
                "TRY: Use a full base URL, e.g. http://localhost:9200".to_string(),
                "TRY: Pass --no-check to skip the existence check".to_string(),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Print a fatal error as a JSON object on stdout (for `--json` callers).
pub fn print_json_error(err: &anyhow::Error) {
    let payload = match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => serde_json::json!({ "error": helpful }),
        None => serde_json::json!({
            "error": {
                "message": err.to_string(),
                "context": err.chain().nth(1).map(|cause| cause.to_string()),
                "suggestions": [],
            }
        }),
    };
    match serde_json::to_string_pretty(&payload) {
        Ok(text) => println!("{}", text),
        Err(_) => eprintln!("{:?}", err),
    }
}
