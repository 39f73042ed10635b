//! Configuration management.
//!
//! Settings come from a TOML file and are then overridden by environment
//! variables. File lookup order:
//!
//! 1. an explicit path (`--config`)
//! 2. `LESSONKIT_CONFIG_PATH`
//! 3. `.lessonkit.toml` in the working directory
//! 4. `<platform config dir>/lessonkit/config.toml`
//! 5. built-in defaults
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `LESSONKIT_PROJECT` | `project_path` |
//! | `LESSONKIT_DOCUMENT` | `document` |
//! | `LESSONKIT_COMMIT_LIMIT` | `commit_limit` |
//! | `LESSONKIT_POLL_INTERVAL_SECS` | `poll_interval_secs` |
//! | `LESSONKIT_LOG` | `logging.filter` |
//! | `LESSONKIT_LOG_FORMAT` | `logging.format` |
//! | `LESSONKIT_METRICS_ENABLED` | `metrics.enabled` |

mod features;

pub use features::{DEFAULT_CHAT_FEATURE, DEFAULT_COMMIT_FEATURE, FeatureNames, FeatureRule};

use crate::storage::DEFAULT_BACKUP_SUFFIX;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "LESSONKIT_CONFIG_PATH";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".lessonkit.toml";

/// Default knowledge-base file name.
pub const DEFAULT_DOCUMENT: &str = "CLAUDE.md";

/// Default number of commits read by `analyze-commits`.
pub const DEFAULT_COMMIT_LIMIT: usize = 10;

/// Default commit monitor interval.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Main configuration for lessonkit.
#[derive(Debug, Clone)]
pub struct LessonkitConfig {
    /// Repository analysed for commits.
    pub project_path: PathBuf,
    /// Knowledge-base document, relative to `project_path` unless absolute.
    pub document: PathBuf,
    /// Suffix appended to the document path for its backup.
    pub backup_suffix: String,
    /// Default commit count for `analyze-commits`.
    pub commit_limit: usize,
    /// Commit monitor tick in seconds.
    pub poll_interval_secs: u64,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Metrics settings.
    pub metrics: MetricsConfig,
    /// Feature-name inference tables.
    pub feature_names: FeatureNames,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name. Unknown names fall back to `Pretty`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directive.
    pub filter: String,
    /// Optional log file, appended to instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "info".to_string(),
            file: None,
        }
    }
}

/// Metrics settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder.
    pub enabled: bool,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Repository path.
    pub project_path: Option<String>,
    /// Document path.
    pub document: Option<String>,
    /// Backup suffix.
    pub backup_suffix: Option<String>,
    /// Commit limit.
    pub commit_limit: Option<usize>,
    /// Monitor interval.
    pub poll_interval_secs: Option<u64>,
    /// Logging section.
    pub logging: Option<ConfigFileLogging>,
    /// Metrics section.
    pub metrics: Option<ConfigFileMetrics>,
    /// Feature-name tables.
    pub feature_names: Option<ConfigFileFeatureNames>,
}

/// Logging section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLogging {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Filter directive.
    pub filter: Option<String>,
    /// Log file path.
    pub file: Option<String>,
}

/// Metrics section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileMetrics {
    /// Enable the Prometheus recorder.
    pub enabled: Option<bool>,
}

/// Feature-name section in config file. A present list replaces the default.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileFeatureNames {
    /// Chat rules.
    pub chat: Option<Vec<FeatureRule>>,
    /// Commit rules.
    pub commits: Option<Vec<FeatureRule>>,
}

impl Default for LessonkitConfig {
    fn default() -> Self {
        Self {
            project_path: PathBuf::from("."),
            document: PathBuf::from(DEFAULT_DOCUMENT),
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            commit_limit: DEFAULT_COMMIT_LIMIT,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            logging: LoggingConfig::default(),
            metrics: MetricsConfig::default(),
            feature_names: FeatureNames::default(),
        }
    }
}

impl LessonkitConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration following the lookup order, then applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file (argument or
    /// `LESSONKIT_CONFIG_PATH`) cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load_default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration file.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default locations.
    ///
    /// Checks `.lessonkit.toml` in the working directory, then the platform
    /// config dir (`~/.config/lessonkit/config.toml` on Linux). Unreadable
    /// files are skipped with a warning. Returns defaults if nothing is found.
    #[must_use]
    pub fn load_default() -> Self {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        let platform = directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("lessonkit").join("config.toml"));

        for candidate in std::iter::once(local).chain(platform) {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(
                    path = %candidate.display(),
                    error = %e,
                    "Ignoring unreadable config file"
                ),
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `LessonkitConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(path) = file.project_path {
            config.project_path = PathBuf::from(path);
        }
        if let Some(document) = file.document {
            config.document = PathBuf::from(document);
        }
        if let Some(suffix) = file.backup_suffix {
            config.backup_suffix = suffix;
        }
        if let Some(limit) = file.commit_limit {
            config.commit_limit = limit;
        }
        if let Some(secs) = file.poll_interval_secs {
            config.poll_interval_secs = secs;
        }
        if let Some(logging) = file.logging {
            if let Some(format) = logging.format {
                config.logging.format = LogFormat::parse(&format);
            }
            if let Some(filter) = logging.filter {
                config.logging.filter = filter;
            }
            config.logging.file = logging.file.map(PathBuf::from);
        }
        if let Some(metrics) = file.metrics
            && let Some(enabled) = metrics.enabled
        {
            config.metrics.enabled = enabled;
        }
        if let Some(names) = file.feature_names {
            if let Some(chat) = names.chat {
                config.feature_names.chat = normalize(chat);
            }
            if let Some(commits) = names.commits {
                config.feature_names.commits = normalize(commits);
            }
        }

        config
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Unparsable numeric or boolean values are ignored with a warning.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("LESSONKIT_PROJECT") {
            self.project_path = PathBuf::from(path);
        }
        if let Some(document) = lookup("LESSONKIT_DOCUMENT") {
            self.document = PathBuf::from(document);
        }
        if let Some(limit) = parse_env(&lookup, "LESSONKIT_COMMIT_LIMIT") {
            self.commit_limit = limit;
        }
        if let Some(secs) = parse_env(&lookup, "LESSONKIT_POLL_INTERVAL_SECS") {
            self.poll_interval_secs = secs;
        }
        if let Some(filter) = lookup("LESSONKIT_LOG") {
            self.logging.filter = filter;
        }
        if let Some(format) = lookup("LESSONKIT_LOG_FORMAT") {
            self.logging.format = LogFormat::parse(&format);
        }
        if let Some(enabled) = lookup("LESSONKIT_METRICS_ENABLED") {
            self.metrics.enabled = matches!(
                enabled.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }

    /// Resolved path of the knowledge-base document.
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        if self.document.is_absolute() {
            self.document.clone()
        } else {
            self.project_path.join(&self.document)
        }
    }

    /// Commit monitor interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Sets the project path.
    #[must_use]
    pub fn with_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = path.into();
        self
    }

    /// Sets the document path.
    #[must_use]
    pub fn with_document(mut self, path: impl Into<PathBuf>) -> Self {
        self.document = path.into();
        self
    }
}

fn normalize(rules: Vec<FeatureRule>) -> Vec<FeatureRule> {
    rules
        .into_iter()
        .map(|rule| FeatureRule::new(rule.keyword, rule.name))
        .collect()
}

fn parse_env<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring invalid environment override");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = LessonkitConfig::new();
        assert_eq!(config.document_path(), PathBuf::from("./CLAUDE.md"));
        assert_eq!(config.backup_suffix, ".backup");
        assert_eq!(config.commit_limit, 10);
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_from_toml() {
        let config = LessonkitConfig::from_toml(
            r#"
project_path = "/repo"
document = "docs/LESSONS.md"
commit_limit = 25

[logging]
format = "json"
filter = "lessonkit=debug"

[metrics]
enabled = true

[[feature_names.chat]]
keyword = "Checkout"
name = "Checkout Flow"
"#,
        )
        .unwrap_or_else(|e| panic!("parse: {e}"));

        assert_eq!(config.document_path(), PathBuf::from("/repo/docs/LESSONS.md"));
        assert_eq!(config.commit_limit, 25);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, "lessonkit=debug");
        assert!(config.metrics.enabled);
        assert_eq!(config.feature_names.for_chat("checkout page"), "Checkout Flow");
        // untouched table keeps its defaults
        assert_eq!(config.feature_names.for_commits("fix: build"), "Build Configuration");
    }

    #[test]
    fn test_builder_paths() {
        let config = LessonkitConfig::new()
            .with_project_path("/repo")
            .with_document("notes/LESSONS.md");
        assert_eq!(config.document_path(), PathBuf::from("/repo/notes/LESSONS.md"));
    }

    #[test]
    fn test_invalid_toml() {
        let result = LessonkitConfig::from_toml("commit_limit = \"many\"");
        assert!(matches!(result, Err(Error::OperationFailed { ref operation, .. }) if operation == "parse_config_file"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{e}"));
        let result = LessonkitConfig::load_from_file(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::OperationFailed { .. })));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "poll_interval_secs = 1\n").unwrap_or_else(|e| panic!("{e}"));
        let config = LessonkitConfig::load_from_file(&path).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(config.poll_interval_secs, 1);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LESSONKIT_PROJECT", "/work"),
            ("LESSONKIT_DOCUMENT", "/abs/NOTES.md"),
            ("LESSONKIT_COMMIT_LIMIT", "3"),
            ("LESSONKIT_POLL_INTERVAL_SECS", "soon"),
            ("LESSONKIT_LOG_FORMAT", "JSON"),
            ("LESSONKIT_METRICS_ENABLED", "true"),
        ]);
        let mut config = LessonkitConfig::new();
        config.apply_env(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.project_path, PathBuf::from("/work"));
        assert_eq!(config.document_path(), PathBuf::from("/abs/NOTES.md"));
        assert_eq!(config.commit_limit, 3);
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.metrics.enabled);
    }
}
