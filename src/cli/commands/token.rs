//! Token command implementation

use super::open_components;
use crate::core::download::TokenService;
use crate::domain::ids::{CourseId, UserId};
use clap::Args;

/// Arguments for the token command
#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Course whose archive the token unlocks
    #[arg(long, value_name = "ID")]
    pub course: u64,

    /// Administrator the token is issued to
    #[arg(long, value_name = "ID")]
    pub user: u64,
}

impl TokenArgs {
    /// Execute the token command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let components = match open_components(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let token = components
            .token_service()
            .issue(CourseId::new(self.course), UserId::new(self.user));
        tracing::info!(course_id = self.course, user_id = self.user, "Issued download token");

        println!("{token}");
        if let Some(expires) = TokenService::expires_at(token.issued_at) {
            eprintln!("Valid until {}", expires.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        Ok(0)
    }
}
