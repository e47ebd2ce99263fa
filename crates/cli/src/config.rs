//! Configuration file and CLI overrides
//!
//! ```toml
//! [database]
//! path = "data/chartbook.db"
//!
//! [hierarchy]
//! strict_codes = true
//! delete_policy = "reject-if-children"
//!
//! [logging]
//! level = "info"
//! ```

use chartbook_business::ChartOptions;
use chartbook_core::DeletePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub hierarchy: HierarchyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/chartbook.db")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Rules applied by the chart service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Reject malformed codes on write
    #[serde(default = "default_true")]
    pub strict_codes: bool,

    #[serde(default)]
    pub delete_policy: DeletePolicy,
}

fn default_true() -> bool {
    true
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            strict_codes: true,
            delete_policy: DeletePolicy::default(),
        }
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from string
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, db: Option<PathBuf>, log_level: Option<String>) -> Result<Self, ConfigError> {
        if let Some(db) = db {
            self.database.path = db;
        }
        if let Some(level) = log_level {
            self.logging.level = level;
        }
        self.validate()?;
        Ok(self)
    }

    /// Options for the chart service
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            strict_codes: self.hierarchy.strict_codes,
            delete_policy: self.hierarchy.delete_policy,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "database.path cannot be empty".to_string(),
            ));
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database.path, PathBuf::from("data/chartbook.db"));
        assert!(config.hierarchy.strict_codes);
        assert_eq!(config.hierarchy.delete_policy, DeletePolicy::Unrestricted);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_string() {
        let config_str = r#"
[database]
path = "/var/lib/chartbook/chart.db"

[hierarchy]
strict_codes = false
delete_policy = "reject-if-children"

[logging]
level = "debug"
"#;

        let config = AppConfig::load_str(config_str).unwrap();
        assert_eq!(config.database.path, PathBuf::from("/var/lib/chartbook/chart.db"));

        let options = config.chart_options();
        assert!(!options.strict_codes);
        assert_eq!(options.delete_policy, DeletePolicy::RejectIfChildren);
    }

    #[test]
    fn test_validation_bad_log_level() {
        let result = AppConfig::load_str("[logging]\nlevel = \"loud\"\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let result = AppConfig::load_str("[hierarchy]\ndelete_policy = \"cascade\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_overrides(Some(PathBuf::from("other.db")), Some("warn".to_string()))
            .unwrap();
        assert_eq!(config.database.path, PathBuf::from("other.db"));
        assert_eq!(config.logging.level, "warn");

        let result = AppConfig::default().with_overrides(Some(PathBuf::new()), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"error\"").unwrap();

        let config = AppConfig::load_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "error");

        let missing = AppConfig::load_file("/definitely/not/here.toml");
        assert!(matches!(missing, Err(ConfigError::NotFound(_))));
    }
}
