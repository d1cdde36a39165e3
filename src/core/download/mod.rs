//! Archive downloads
//!
//! - [`token`] - signed, time-limited download tokens
//! - [`listing`] - archives an administrator can download
//! - [`service`] - token-gated delivery with an audit record

pub mod listing;
pub mod service;
pub mod token;

pub use listing::{display_size, ArchiveListing, ListingEntry};
pub use service::{user_message, ArchiveDownload, DownloadService};
pub use token::{DownloadToken, TokenConfig, TokenService, LINK_EXPIRY_SECS};
