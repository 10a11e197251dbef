//! Configuration for readview-audit
//!
//! Layering, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `config.toml` (explicit `--config`, else `$READVIEW_AUDIT_HOME/config.toml` if present)
//! 3. Command-line flags and environment variables

use crate::inventory::{
    AuditError, Result, VersionPattern, WalkRules, DEFAULT_FIELD, DEFAULT_TIMEOUT_SECS,
    DEFAULT_VERSION_PATTERN,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const HOME_ENV: &str = "READVIEW_AUDIT_HOME";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the tool's home directory.
///
/// Priority:
/// 1) READVIEW_AUDIT_HOME
/// 2) ~/.readview_audit
/// 3) ./.readview_audit
pub fn audit_home() -> PathBuf {
    if let Ok(override_path) = std::env::var(HOME_ENV) {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .map(|home| home.join(".readview_audit"))
        .unwrap_or_else(|| PathBuf::from(".").join(".readview_audit"))
}

/// Default config file location: ~/.readview_audit/config.toml
pub fn default_config_path() -> PathBuf {
    audit_home().join(CONFIG_FILE_NAME)
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub marker: Option<String>,
    pub field: Option<String>,
    pub suffix: Option<String>,
    pub exclude: Option<String>,
    pub version_pattern: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AuditError::Config(e.to_string()))
    }

    /// Load the explicit file, or the default one if it exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = default_config_path();
                if path.is_file() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Values supplied on the command line; `None` defers to the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub marker: Option<String>,
    pub field: Option<String>,
    pub suffix: Option<String>,
    pub exclude: Option<String>,
    pub version_pattern: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub no_version: bool,
    pub no_check: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditSettings {
    pub rules: WalkRules,
    pub field: String,
    /// `None` when version extraction is disabled
    pub version_pattern: Option<String>,
    /// `None` when the existence check is disabled
    pub endpoint: Option<String>,
    pub timeout: Duration,
    pub log_dir: Option<PathBuf>,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self::resolve(FileConfig::default(), Overrides::default())
    }
}

impl AuditSettings {
    /// Merge file values under command-line values.
    pub fn resolve(file: FileConfig, cli: Overrides) -> Self {
        let defaults = WalkRules::default();
        let rules = WalkRules {
            marker: cli.marker.or(file.marker).unwrap_or(defaults.marker),
            suffix: cli.suffix.or(file.suffix).unwrap_or(defaults.suffix),
            exclude: cli.exclude.or(file.exclude).unwrap_or(defaults.exclude),
        };

        let version_pattern = if cli.no_version {
            None
        } else {
            Some(
                cli.version_pattern
                    .or(file.version_pattern)
                    .unwrap_or_else(|| DEFAULT_VERSION_PATTERN.to_string()),
            )
        };

        let endpoint = if cli.no_check {
            None
        } else {
            cli.endpoint
                .or(file.endpoint)
                .filter(|url| !url.trim().is_empty())
        };

        Self {
            rules,
            field: cli
                .field
                .or(file.field)
                .unwrap_or_else(|| DEFAULT_FIELD.to_string()),
            version_pattern,
            endpoint,
            timeout: Duration::from_secs(
                cli.timeout_secs
                    .or(file.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            log_dir: cli.log_dir.or(file.log_dir),
        }
    }

    /// Reject settings that would make every run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(AuditError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Compile the version pattern, if enabled.
    pub fn compile_version_pattern(&self) -> Result<Option<VersionPattern>> {
        self.version_pattern
            .as_deref()
            .map(VersionPattern::new)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = AuditSettings::default();
        assert_eq!(settings.rules.marker, "read-view");
        assert_eq!(settings.rules.suffix, ".json");
        assert_eq!(settings.rules.exclude, "target");
        assert_eq!(settings.field, "indexName");
        assert_eq!(settings.version_pattern.as_deref(), Some(DEFAULT_VERSION_PATTERN));
        assert_eq!(settings.endpoint, None);
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig::parse(
            r#"
            marker = "views"
            field = "alias"
            endpoint = "http://file:9200"
            timeout_secs = 10
            "#,
        )
        .unwrap();
        let cli = Overrides {
            field: Some("name".to_string()),
            endpoint: Some("http://cli:9200".to_string()),
            ..Overrides::default()
        };

        let settings = AuditSettings::resolve(file, cli);
        assert_eq!(settings.rules.marker, "views");
        assert_eq!(settings.field, "name");
        assert_eq!(settings.endpoint.as_deref(), Some("http://cli:9200"));
        assert_eq!(settings.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_no_check_and_no_version() {
        let file = FileConfig {
            endpoint: Some("http://file:9200".to_string()),
            version_pattern: Some("x$".to_string()),
            ..FileConfig::default()
        };
        let cli = Overrides {
            no_check: true,
            no_version: true,
            ..Overrides::default()
        };
        let settings = AuditSettings::resolve(file, cli);
        assert_eq!(settings.endpoint, None);
        assert_eq!(settings.version_pattern, None);
        assert!(settings.compile_version_pattern().unwrap().is_none());
    }

    #[test]
    fn test_blank_endpoint_disables_check() {
        let cli = Overrides {
            endpoint: Some("  ".to_string()),
            ..Overrides::default()
        };
        assert_eq!(AuditSettings::resolve(FileConfig::default(), cli).endpoint, None);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let cli = Overrides {
            timeout_secs: Some(0),
            ..Overrides::default()
        };
        let settings = AuditSettings::resolve(FileConfig::default(), cli);
        assert!(matches!(settings.validate(), Err(AuditError::Config(_))));

        let file = FileConfig::parse("timeout_secs = 0").unwrap();
        let settings = AuditSettings::resolve(file, Overrides::default());
        assert!(settings.validate().is_err());

        assert!(AuditSettings::default().validate().is_ok());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = FileConfig::parse("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, AuditError::Config(_)));
    }

    #[test]
    fn test_invalid_pattern_surfaces() {
        let cli = Overrides {
            version_pattern: Some("(unclosed".to_string()),
            ..Overrides::default()
        };
        let settings = AuditSettings::resolve(FileConfig::default(), cli);
        assert!(matches!(
            settings.compile_version_pattern(),
            Err(AuditError::Pattern(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "exclude = \"build\"\nsuffix = \".view.json\"\n").unwrap();

        let file = FileConfig::discover(Some(&path)).unwrap();
        assert_eq!(file.exclude.as_deref(), Some("build"));
        assert_eq!(file.suffix.as_deref(), Some(".view.json"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        let result = FileConfig::discover(Some(&temp.path().join("absent.toml")));
        assert!(matches!(result, Err(AuditError::Io(_))));
    }
}
