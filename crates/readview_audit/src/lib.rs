//! readview-audit - Core Library
//!
//! Inventories the index names declared in read-view JSON files and,
//! optionally, checks each one against a search endpoint.

pub mod cli;
pub mod config;
pub mod inventory;

pub use config::{AuditSettings, FileConfig, Overrides};
pub use inventory::{
    AuditError, AuditReport, Auditor, CachedProbe, HttpIndexProbe, IndexProbe, IndexRecord,
    IndexStatus, VersionPattern, WalkRules,
};
