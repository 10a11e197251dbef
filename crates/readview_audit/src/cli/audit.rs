//! Audit command - inventory read-view index names under a directory
//!
//! Walks the directory, reads every matching JSON file, and optionally
//! checks each distinct index name against the search endpoint.

use crate::cli::error::HelpfulError;
use crate::cli::output::{render_json, render_text};
use crate::config::AuditSettings;
use crate::inventory::{AuditReport, Auditor, HttpIndexProbe};
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the audit command
#[derive(Debug)]
pub struct AuditArgs {
    pub path: PathBuf,
    pub settings: AuditSettings,
    pub json: bool,
}

/// Execute the audit and print the report to stdout
pub fn run(args: AuditArgs) -> anyhow::Result<()> {
    let report = execute(&args)?;

    if args.json {
        println!("{}", render_json(&report)?);
    } else {
        println!("{}", render_text(&report));
    }

    Ok(())
}

/// Build the auditor from settings and run it, without printing.
pub fn execute(args: &AuditArgs) -> anyhow::Result<AuditReport> {
    if !args.path.exists() {
        return Err(HelpfulError::path_not_found(&args.path).into());
    }
    if !args.path.is_dir() {
        return Err(HelpfulError::not_a_directory(&args.path).into());
    }

    let settings = &args.settings;
    settings
        .validate()
        .map_err(|e| HelpfulError::invalid_settings(&e.to_string()))?;

    let version = settings.compile_version_pattern().map_err(|e| {
        HelpfulError::invalid_pattern(
            settings.version_pattern.as_deref().unwrap_or_default(),
            &e.to_string(),
        )
    })?;

    let mut auditor = Auditor::new(settings.rules.clone(), settings.field.clone())
        .with_version_pattern(version);

    if let Some(endpoint) = &settings.endpoint {
        let probe = HttpIndexProbe::new(endpoint, settings.timeout)
            .map_err(|e| HelpfulError::invalid_endpoint(endpoint, &e.to_string()))?;
        info!(endpoint = probe.base_url(), "existence check enabled");
        auditor = auditor.with_probe(Box::new(probe));
    }

    auditor
        .run(&args.path)
        .with_context(|| format!("Failed to walk {}", args.path.display()))
}
