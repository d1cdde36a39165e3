//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Course Archive - XML snapshot exporter for published course content
#[derive(Parser, Debug)]
#[command(name = "course-archive")]
#[command(version, about, long_about = None)]
#[command(author = "Course Archive Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "course-archive.toml",
        env = "COURSE_ARCHIVE_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "COURSE_ARCHIVE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refresh out-of-date course archives
    Export(commands::export::ExportArgs),

    /// List stored archives with download tokens
    List(commands::list::ListArgs),

    /// Issue a download token for one course
    Token(commands::token::TokenArgs),

    /// Download the archive a token unlocks
    Download(commands::download::DownloadArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
