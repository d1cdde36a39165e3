//! Validate config command implementation
//!
//! This module implements the `validate-config` command.

use super::EXIT_CONFIG;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a loaded configuration is a valid one.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Site URL: {}", config.application.site_url);
        println!("  Time Limit: {}s", config.export.time_limit_secs);
        println!("  Document Delay: {}ms", config.export.document_delay_ms);
        println!(
            "  Scratch Directory: {}",
            config.export.scratch_dir.as_deref().unwrap_or("(system temp)")
        );
        println!("  Archive Directory: {}", config.storage.archive_dir);
        println!("  Catalog Manifest: {}", config.catalog.manifest_path);
        println!("  Administrators: {}", config.download.admins.len());
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}
