//! readview-audit
//!
//! Lists the index names declared in read-view JSON files under a directory
//! and, when an endpoint is given, whether each index exists there.

use clap::Parser;
use readview_audit::cli::{self, HelpfulError};
use readview_audit::config::{AuditSettings, FileConfig, Overrides};
use readview_logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "readview-audit",
    version,
    about = "Inventory read-view index names and check them against a search endpoint"
)]
struct Cli {
    /// Directory to walk
    directory: PathBuf,

    /// Search endpoint base URL (e.g. http://localhost:9200); omit to skip the existence check
    #[arg(env = "READVIEW_AUDIT_ENDPOINT")]
    endpoint: Option<String>,

    /// Substring a file path must contain to be read
    #[arg(long)]
    marker: Option<String>,

    /// JSON field holding the index name
    #[arg(long)]
    field: Option<String>,

    /// Required file name ending
    #[arg(long)]
    suffix: Option<String>,

    /// Directory name whose subtree is skipped
    #[arg(long)]
    exclude: Option<String>,

    /// Regex for the trailing version token (first capture group is used)
    #[arg(long)]
    version_pattern: Option<String>,

    /// Do not extract versions
    #[arg(long, conflicts_with = "version_pattern")]
    no_version: bool,

    /// Timeout for each existence check, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Skip the existence check even if an endpoint is configured
    #[arg(long)]
    no_check: bool,

    /// Config file (defaults to ~/.readview_audit/config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            marker: self.marker.clone(),
            field: self.field.clone(),
            suffix: self.suffix.clone(),
            exclude: self.exclude.clone(),
            version_pattern: self.version_pattern.clone(),
            endpoint: self.endpoint.clone(),
            timeout_secs: self.timeout_secs,
            log_dir: self.log_dir.clone(),
            no_version: self.no_version,
            no_check: self.no_check,
        }
    }
}

fn report_error(err: &anyhow::Error, json_mode: bool) {
    if json_mode {
        cli::error::print_json_error(err);
    } else {
        eprintln!("{:?}", err);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_mode = cli.json;

    let file = match FileConfig::discover(cli.config.as_deref()) {
        Ok(file) => file,
        Err(err) => {
            let err = anyhow::Error::new(HelpfulError::invalid_config(
                cli.config.as_deref(),
                &err.to_string(),
            ));
            report_error(&err, json_mode);
            return ExitCode::from(1);
        }
    };
    let settings = AuditSettings::resolve(file, cli.overrides());

    let _log_guard = match init_logging(LogConfig {
        app_name: "readview-audit",
        verbose: cli.verbose,
        log_dir: settings.log_dir.as_deref(),
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    let result = cli::audit::run(cli::audit::AuditArgs {
        path: cli.directory,
        settings,
        json: json_mode,
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, json_mode);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_endpoint_is_optional() {
        let cli = Cli::try_parse_from(["readview-audit", "/data"]).unwrap();
        assert_eq!(cli.directory, PathBuf::from("/data"));
        assert!(!cli.no_check);

        let cli =
            Cli::try_parse_from(["readview-audit", "/data", "http://es:9200/", "--json"]).unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://es:9200/"));
        assert!(cli.json);
    }

    #[test]
    fn test_no_version_conflicts_with_pattern() {
        let result = Cli::try_parse_from([
            "readview-audit",
            "/data",
            "--no-version",
            "--version-pattern",
            "(v\\d+)$",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_mapping() {
        let cli = Cli::try_parse_from([
            "readview-audit",
            "/data",
            "--marker",
            "views",
            "--timeout-secs",
            "9",
            "--no-check",
        ])
        .unwrap();
        let o = cli.overrides();
        assert_eq!(o.marker.as_deref(), Some("views"));
        assert_eq!(o.timeout_secs, Some(9));
        assert!(o.no_check);
    }
}
