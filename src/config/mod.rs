//! Configuration management for the course archive exporter.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - `COURSE_ARCHIVE_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use course_archive::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("course-archive.toml")?;
//!
//! println!("Site: {}", config.application.site_url);
//! println!("Archives: {}", config.storage.archive_dir);
//! println!("Time limit: {}s", config.export.time_limit_secs);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and site URL
//! - [`ExportConfig`] - Batch time limit, document pacing, scratch directory
//! - [`DownloadConfig`] - Token signing secret and administrators
//! - [`StorageConfig`] - Archive directory
//! - [`CatalogConfig`] - Course manifest location
//! - [`LoggingConfig`] - JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! site_url = "https://learn.example.org"
//!
//! [export]
//! time_limit_secs = 600
//! document_delay_ms = 0
//!
//! [download]
//! secret = "${COURSE_ARCHIVE_SECRET}"
//! admins = [2]
//!
//! [storage]
//! archive_dir = "/var/lib/course-archive"
//!
//! [catalog]
//! manifest_path = "/var/lib/course-archive/catalog.json"
//!
//! [logging]
//! local_enabled = true
//! local_path = "/var/log/course-archive"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ArchiveConfig, CatalogConfig, DownloadConfig, ExportConfig, LoggingConfig,
    StorageConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
