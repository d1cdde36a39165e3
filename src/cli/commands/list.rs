//! List command implementation
//!
//! Prints every stored archive with a fresh download token.

use super::{open_components, EXIT_FATAL};
use crate::core::download::LINK_EXPIRY_SECS;
use crate::domain::ids::UserId;
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Administrator the download tokens are issued to
    #[arg(long, value_name = "ID")]
    pub user: u64,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let components = match open_components(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let tokens = components.token_service();
        let entries = match components
            .listing()
            .entries(&tokens, UserId::new(self.user))
            .await
        {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list archives");
                eprintln!("Failed to list archives: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        if entries.is_empty() {
            println!("No archives found.");
            println!("Run 'course-archive export' to build them.");
            return Ok(0);
        }

        println!("📦 Course archives");
        println!();
        for entry in &entries {
            let hidden = if entry.hidden { " (hidden)" } else { "" };
            let recycled = if entry.in_recycle_bin {
                " (in recycle bin)"
            } else {
                ""
            };
            println!("  {}{}{}", entry.shortname, hidden, recycled);
            println!("    Course: {}", entry.course_id);
            println!(
                "    Last published: {}",
                entry.last_published.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("    Size: {}", entry.display_size());
            println!("    Token: {}", entry.token);
            println!();
        }
        println!(
            "Tokens are valid for {} hours.",
            LINK_EXPIRY_SECS / 3600
        );

        Ok(0)
    }
}
