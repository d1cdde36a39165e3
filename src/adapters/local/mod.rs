//! Filesystem-backed adapters used by the command line tool

pub mod manifest;
pub mod store;

pub use manifest::{Manifest, ManifestCatalog};
pub use store::LocalArchiveStore;

use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::SystemTime;

/// Set a file's modification time
///
/// Zip assembly reads entry timestamps from disk, so this is how publish
/// times reach the archive.
pub fn set_modified_time(path: &Path, modified: DateTime<Utc>) -> std::io::Result<()> {
    let file = std::fs::OpenOptions::new().write(true).open(path)?;
    file.set_modified(SystemTime::from(modified))
}

/// Read a file's modification time
pub fn modified_time(metadata: &std::fs::Metadata) -> std::io::Result<DateTime<Utc>> {
    metadata.modified().map(DateTime::<Utc>::from)
}
