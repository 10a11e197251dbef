//! Error types for the inventory scan

use std::io;
use thiserror::Error;

/// Inventory error type
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Not a JSON object: {0}")]
    NotAnObject(&'static str),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AuditError>;
