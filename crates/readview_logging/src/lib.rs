//! Shared logging setup for the readview-audit binary.
//!
//! Logs never go to stdout: the report owns stdout, diagnostics go to
//! stderr and, optionally, to a daily rolling file.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "readview_audit=warn,readview_logging=warn";
const VERBOSE_LOG_FILTER: &str = "readview_audit=debug,readview_logging=debug";

/// Logging configuration for the audit binary.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// When set, a daily rolling log file is written in this directory.
    pub log_dir: Option<&'a Path>,
}

/// Keeps the non-blocking file writer alive. Drop it only at process exit.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Resolve the console filter: `RUST_LOG` wins, then `--verbose`, then the default.
pub fn resolve_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(VERBOSE_LOG_FILTER)
        } else {
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
    })
}

/// Initialize tracing with stderr output and an optional rolling file writer.
pub fn init_logging(config: LogConfig<'_>) -> Result<LogGuard> {
    let (file_layer, file_guard) = match config.log_dir {
        Some(dir) => {
            let dir = ensure_dir(dir)?;
            let appender =
                tracing_appender::rolling::daily(&dir, format!("{}.log", sanitize_name(config.app_name)));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(resolve_filter(config.verbose));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(resolve_filter(config.verbose)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

/// Ensure the log directory exists.
pub fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create logs directory: {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}
