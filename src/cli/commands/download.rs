//! Download command implementation
//!
//! Verifies a token and writes the archive it unlocks to disk.

use super::open_components;
use crate::core::download::user_message;
use clap::Args;
use std::path::Path;

/// Arguments for the download command
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Download token
    pub token: String,

    /// Directory to write the archive into
    #[arg(short, long, default_value = ".")]
    pub output: String,
}

impl DownloadArgs {
    /// Execute the download command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let components = match open_components(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let download = match components.download_service().download(&self.token).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ {}", user_message(&e));
                return Ok(1);
            }
        };

        let target = Path::new(&self.output).join(&download.filename);
        tokio::fs::create_dir_all(&self.output).await?;
        tokio::fs::write(&target, &download.bytes).await?;

        tracing::info!(
            course_id = %download.course_id,
            path = %target.display(),
            bytes = download.bytes.len(),
            "Archive written"
        );
        println!("✅ Saved {}", target.display());
        Ok(0)
    }
}
