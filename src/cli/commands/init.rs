//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "course-archive.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set COURSE_ARCHIVE_SECRET (in the environment or a .env file)");
                println!("  3. Validate configuration: course-archive validate-config");
                println!("  4. Run export: course-archive export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Sample configuration with comments
    fn sample_config() -> String {
        r#"# Course Archive Configuration File

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Base URL of the learning site; used for links in metadata.xml
site_url = "https://learn.example.org"

[export]
# Wall-clock budget for one batch run, in seconds
time_limit_secs = 600

# Pause after each rendered document, in milliseconds
document_delay_ms = 0

# Parent directory for scratch files (defaults to the system temp dir)
# scratch_dir = "/var/tmp/course-archive"

[download]
# Token signing secret, at least 16 characters
secret = "${COURSE_ARCHIVE_SECRET}"

# User ids allowed to download archives
admins = [2]

# Category whose courses the archive list marks as in the recycle bin
# recycle_bin_category = 9

[storage]
# Directory holding {course_id}.zip archives
archive_dir = "/var/lib/course-archive/archives"

[catalog]
# JSON manifest describing courses, sections and content modules
manifest_path = "/var/lib/course-archive/catalog.json"

[logging]
# JSON log files next to console output
local_enabled = false
local_path = "/var/log/course-archive"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
