//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML
//! file, plus the conversions into the per-component settings the core
//! takes at construction.

use crate::config::SecretString;
use crate::core::download::TokenConfig;
use crate::core::export::{BuildSettings, SchedulerConfig};
use crate::domain::ids::UserId;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Shortest accepted signing secret, in characters
pub const MIN_SECRET_CHARS: usize = 16;

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// Export batch settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Download token settings
    pub download: DownloadConfig,

    /// Archive storage settings
    pub storage: StorageConfig,

    /// Course catalog settings
    pub catalog: CatalogConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ArchiveConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.download.validate()?;
        self.storage.validate()?;
        self.catalog.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Batch scheduler settings
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            time_limit: Duration::from_secs(self.export.time_limit_secs),
        }
    }

    /// Archive builder settings
    pub fn build_settings(&self) -> BuildSettings {
        BuildSettings {
            site_url: self.application.site_url.clone(),
            scratch_root: self.export.scratch_dir.as_ref().map(PathBuf::from),
            document_delay: Duration::from_millis(self.export.document_delay_ms),
        }
    }

    /// Token service settings
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            secret: self.download.secret.clone(),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Base URL of the learning site, used for links in metadata.xml
    pub site_url: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        let url = url::Url::parse(&self.site_url)
            .map_err(|e| format!("Invalid application.site_url '{}': {e}", self.site_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "application.site_url must use http or https, got '{}'",
                url.scheme()
            ));
        }
        Ok(())
    }
}

/// Export batch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Wall-clock budget for one batch run, in seconds
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: u64,

    /// Pause after each rendered document, in milliseconds
    #[serde(default)]
    pub document_delay_ms: u64,

    /// Parent directory for per-course scratch directories
    #[serde(default)]
    pub scratch_dir: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit_secs(),
            document_delay_ms: 0,
            scratch_dir: None,
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.time_limit_secs == 0 {
            return Err("export.time_limit_secs must be > 0".to_string());
        }
        if self.document_delay_ms > 60_000 {
            return Err("export.document_delay_ms must be <= 60000".to_string());
        }
        if matches!(&self.scratch_dir, Some(dir) if dir.is_empty()) {
            return Err("export.scratch_dir cannot be empty when set".to_string());
        }
        Ok(())
    }
}

/// Download token configuration
///
/// The link lifetime is fixed and deliberately not configurable here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Signing secret
    /// Stored securely in memory and automatically zeroized on drop
    pub secret: SecretString,

    /// User ids holding administrator rights
    #[serde(default)]
    pub admins: Vec<UserId>,

    /// Category whose courses the listing marks as in the recycle bin
    #[serde(default)]
    pub recycle_bin_category: Option<u64>,
}

impl DownloadConfig {
    fn validate(&self) -> Result<(), String> {
        if self.secret.expose_secret().char_count() < MIN_SECRET_CHARS {
            return Err(format!(
                "download.secret must be at least {MIN_SECRET_CHARS} characters"
            ));
        }
        Ok(())
    }
}

/// Archive storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `{course_id}.zip` archives
    pub archive_dir: String,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.archive_dir.is_empty() {
            return Err("storage.archive_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Course catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON manifest describing courses and content
    pub manifest_path: String,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        if self.manifest_path.is_empty() {
            return Err("catalog.manifest_path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when file logging is on".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_time_limit_secs() -> u64 {
    600
}

fn default_local_path() -> String {
    "/var/log/course-archive".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config() -> ArchiveConfig {
        ArchiveConfig {
            application: ApplicationConfig {
                log_level: "info".to_string(),
                site_url: "https://learn.example.org".to_string(),
            },
            export: ExportConfig::default(),
            download: DownloadConfig {
                secret: secret_string("0123456789abcdef".to_string()),
                admins: vec![UserId::new(2)],
                recycle_bin_category: None,
            },
            storage: StorageConfig {
                archive_dir: "/srv/archives".to_string(),
            },
            catalog: CatalogConfig {
                manifest_path: "/srv/catalog.json".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_application_config_validation() {
        let mut cfg = config();
        cfg.application.log_level = "invalid".to_string();
        assert!(cfg.validate().is_err());

        let mut cfg = config();
        cfg.application.site_url = "ftp://learn.example.org".to_string();
        assert!(cfg.validate().is_err());

        cfg.application.site_url = "not a url".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = config();
        config.download.secret = secret_string("short".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.contains("download.secret"));
    }

    #[test]
    fn test_export_validation() {
        let mut config = config();
        config.export.time_limit_secs = 0;
        assert!(config.validate().is_err());

        config.export.time_limit_secs = 60;
        config.export.scratch_dir = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_validation() {
        let mut config = config();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_component_settings() {
        let mut config = config();
        config.export.time_limit_secs = 90;
        config.export.document_delay_ms = 250;
        config.export.scratch_dir = Some("/tmp/scratch".to_string());

        assert_eq!(config.scheduler_config().time_limit, Duration::from_secs(90));

        let settings = config.build_settings();
        assert_eq!(settings.document_delay, Duration::from_millis(250));
        assert_eq!(settings.scratch_root, Some(PathBuf::from("/tmp/scratch")));
        assert_eq!(settings.site_url, "https://learn.example.org");

        assert_eq!(
            config.token_config().secret.expose_secret().as_ref(),
            "0123456789abcdef"
        );
    }
}
