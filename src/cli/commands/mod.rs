//! CLI command implementations
//!
//! Commands return the process exit code: 0 on success, 1 on partial
//! failure, 2 on configuration errors, 5 on fatal errors.

pub mod download;
pub mod export;
pub mod init;
pub mod list;
pub mod token;
pub mod validate;

use crate::adapters::Components;
use crate::config::load_config;

/// Exit code for a configuration error
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for a fatal error
pub const EXIT_FATAL: i32 = 5;

/// Load configuration and open components, printing the failure if any
///
/// Returns the exit code to use when setup fails.
pub(crate) fn open_components(config_path: &str) -> Result<Components, i32> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("❌ Failed to load configuration file");
            eprintln!("   Error: {e}");
            return Err(EXIT_CONFIG);
        }
    };

    Components::from_config(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to open catalog or archive store");
        eprintln!("❌ Failed to open catalog or archive store");
        eprintln!("   Error: {e}");
        EXIT_FATAL
    })
}
