//! Archive builder
//!
//! Builds one course's zip archive in a scratch directory on disk and hands
//! it to the archive store. Document XML files get their publish time as
//! modification time before zipping, and the zip entries carry those times.
//!
//! Scratch layout:
//!
//! ```text
//! course-42-XXXXXX/
//! ├── content/            zipped as the archive root
//! │   ├── 001.Week_1.Intro.xml
//! │   ├── restricted/002.Week_1.Quiz_notes.xml
//! │   └── metadata.xml
//! └── archive.zip
//! ```
//!
//! The scratch directory is a [`tempfile::TempDir`] and is removed when the
//! build returns, whichever way it returns.

use crate::adapters::local::{modified_time, set_modified_time};
use crate::adapters::traits::{ArchiveStore, ContentRenderer, CourseCatalog, StoredArchive};
use crate::core::export::details::gather_course_details;
use crate::core::export::document::export_document;
use crate::core::export::metadata::MetadataBuilder;
use crate::core::export::naming::{document_filename, METADATA_FILENAME};
use crate::domain::ids::CourseId;
use crate::domain::{ArchiveError, DocumentRecord, Result};
use crate::{log_course_complete, log_course_start, log_document_error};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_DIR: &str = "content";
const ARCHIVE_FILE: &str = "archive.zip";

/// Archive builder settings
#[derive(Debug, Clone, Default)]
pub struct BuildSettings {
    /// Base URL for links in metadata.xml
    pub site_url: String,

    /// Parent directory for scratch directories; system temp dir when unset
    pub scratch_root: Option<PathBuf>,

    /// Pause after each rendered document
    pub document_delay: Duration,
}

/// Result of building one course archive
#[derive(Debug, Clone)]
pub struct CourseOutcome {
    /// Course id
    pub course_id: CourseId,

    /// Documents listed in metadata.xml
    pub documents: usize,

    /// Documents whose XML made it into the archive
    pub written: usize,

    /// Documents recorded with an error
    pub failed: usize,

    /// The installed archive
    pub archive: StoredArchive,
}

/// Builds and installs course archives
pub struct ArchiveBuilder {
    catalog: Arc<dyn CourseCatalog>,
    renderer: Arc<dyn ContentRenderer>,
    store: Arc<dyn ArchiveStore>,
    metadata: MetadataBuilder,
    settings: BuildSettings,
}

impl ArchiveBuilder {
    /// Create a builder
    pub fn new(
        catalog: Arc<dyn CourseCatalog>,
        renderer: Arc<dyn ContentRenderer>,
        store: Arc<dyn ArchiveStore>,
        settings: BuildSettings,
    ) -> Self {
        Self {
            catalog,
            renderer,
            store,
            metadata: MetadataBuilder::new(settings.site_url.clone()),
            settings,
        }
    }

    /// Export one course and replace its stored archive
    ///
    /// # Errors
    ///
    /// Fails when the course cannot be loaded, metadata.xml cannot be
    /// written, the zip cannot be assembled or the store rejects it. The
    /// previously stored archive is untouched in all of those cases.
    pub async fn build(&self, course_id: CourseId) -> Result<CourseOutcome> {
        let start = Instant::now();
        let mut details = gather_course_details(self.catalog.as_ref(), course_id).await?;
        log_course_start!(course_id, details.documents.len());

        let scratch = self.scratch_dir(course_id)?;
        let content_dir = scratch.path().join(CONTENT_DIR);
        tokio::fs::create_dir_all(&content_dir).await?;

        for document in details.documents.iter_mut() {
            self.write_document(course_id, document, &content_dir).await;
        }

        let metadata = self.metadata.build(&details)?;
        let metadata_path = content_dir.join(METADATA_FILENAME);
        tokio::fs::write(&metadata_path, metadata).await.map_err(|e| {
            ArchiveError::Metadata(format!(
                "Unable to save metadata to {}: {e}",
                metadata_path.display()
            ))
        })?;
        tracing::debug!(course_id = %course_id, "Wrote metadata");

        let archive_path = scratch.path().join(ARCHIVE_FILE);
        let (source, target) = (content_dir.clone(), archive_path.clone());
        tokio::task::spawn_blocking(move || zip_directory(&source, &target))
            .await
            .map_err(|e| ArchiveError::Zip(format!("zip task failed: {e}")))??;
        tracing::debug!(course_id = %course_id, "Created zip");

        let archive = self
            .store
            .replace(course_id, &archive_path, details.max_published_at)
            .await?;
        tracing::debug!(course_id = %course_id, size = archive.size, "Stored archive");

        let failed = details.documents.iter().filter(|d| d.is_failed()).count();
        let written = details
            .documents
            .iter()
            .filter(|d| d.filename().is_some())
            .count();
        log_course_complete!(course_id, written, failed, start.elapsed());

        Ok(CourseOutcome {
            course_id,
            documents: details.documents.len(),
            written,
            failed,
            archive,
        })
    }

    fn scratch_dir(&self, course_id: CourseId) -> Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        let prefix = format!("course-{course_id}-");
        builder.prefix(&prefix);
        let dir = match &self.settings.scratch_root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };
        Ok(dir)
    }

    /// Render and write one document; failures are recorded on the record
    async fn write_document(
        &self,
        course_id: CourseId,
        document: &mut DocumentRecord,
        content_dir: &Path,
    ) {
        if let Some(reason) = document.error() {
            log_document_error!(course_id, document.sequence, reason);
            return;
        }

        tracing::debug!(
            course_id = %course_id,
            sequence = format!("{:03}", document.sequence),
            name = %document.name,
            "Exporting document"
        );

        let filename = document_filename(document);
        let path = content_dir.join(&filename);

        let outcome = match export_document(self.renderer.as_ref(), document.content_id).await {
            Ok(xml) => save_document(&path, &xml, document.published_at).await,
            Err(reason) => Err(reason),
        };

        match outcome {
            Ok(()) => document.mark_written(filename),
            Err(reason) => {
                log_document_error!(course_id, document.sequence, reason);
                document.fail(reason);
            }
        }

        if !self.settings.document_delay.is_zero() {
            tokio::time::sleep(self.settings.document_delay).await;
        }
    }
}

/// Write a document's XML and stamp it with its publish time
///
/// The `restricted/` subdirectory is created the first time it is needed.
async fn save_document(
    path: &Path,
    xml: &str,
    published_at: Option<DateTime<Utc>>,
) -> std::result::Result<(), String> {
    let modified = published_at.unwrap_or_default();
    save_document_with(path, xml, |p| set_modified_time(p, modified)).await
}

/// Write then stamp; on failure no file is left behind
///
/// Everything under the content directory is zipped, so a file that was
/// not fully saved must not survive into the archive.
async fn save_document_with<F>(path: &Path, xml: &str, stamp: F) -> std::result::Result<(), String>
where
    F: FnOnce(&Path) -> std::io::Result<()>,
{
    let unable = || format!("Unable to save XML to {}", path.display());

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|_| unable())?;
    }

    let saved = match tokio::fs::write(path, xml).await {
        Ok(()) => stamp(path).map_err(|_| "Unable to update modified time".to_string()),
        Err(_) => Err(unable()),
    };

    if saved.is_err() {
        if let Err(e) = tokio::fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove unsaved document");
            }
        }
    }
    saved
}

/// Zip a directory tree with archive-relative `/` paths
///
/// Entry timestamps come from each file's modification time.
pub fn zip_directory(source: &Path, target: &Path) -> Result<()> {
    let file = File::create(target)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| ArchiveError::Zip(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| ArchiveError::Zip(e.to_string()))?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let metadata = entry
            .metadata()
            .map_err(|e| ArchiveError::Zip(e.to_string()))?;
        let modified = modified_time(&metadata)?;
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip_timestamp(modified));

        zip.start_file(name, options)?;
        let mut input = File::open(entry.path())?;
        std::io::copy(&mut input, &mut zip)?;
    }

    zip.finish()?;
    Ok(())
}

/// Convert to a zip timestamp, clamping to the format's earliest date
pub fn zip_timestamp(value: DateTime<Utc>) -> zip::DateTime {
    u16::try_from(value.year())
        .ok()
        .and_then(|year| {
            zip::DateTime::from_date_and_time(
                year,
                value.month() as u8,
                value.day() as u8,
                value.hour() as u8,
                value.minute() as u8,
                value.second() as u8,
            )
            .ok()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_zip_timestamp() {
        let ts = zip_timestamp(Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 10).unwrap());
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.month(), 2);
        assert_eq!(ts.day(), 1);
        assert_eq!(ts.hour(), 9);
        assert_eq!(ts.minute(), 30);
        assert_eq!(ts.second(), 10);
    }

    #[test]
    fn test_zip_timestamp_before_dos_epoch() {
        let ts = zip_timestamp(DateTime::<Utc>::default());
        assert_eq!(ts.year(), 1980);
        assert_eq!(ts.month(), 1);
        assert_eq!(ts.day(), 1);
    }

    #[tokio::test]
    async fn test_failed_stamp_leaves_no_file_to_zip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("content");
        let when = Utc.with_ymd_and_hms(2022, 6, 15, 8, 0, 0).unwrap();

        save_document(&source.join("001.a.xml"), "<a/>", Some(when))
            .await
            .unwrap();

        let unstamped = source.join("restricted/002.b.xml");
        let err = save_document_with(&unstamped, "<b/>", |_| {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"))
        })
        .await
        .unwrap_err();
        assert_eq!(err, "Unable to update modified time");
        assert!(!unstamped.exists());

        let target = dir.path().join("out.zip");
        zip_directory(&source, &target).unwrap();
        let archive = zip::ZipArchive::new(File::open(&target).unwrap()).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names, vec!["001.a.xml"]);
    }

    #[tokio::test]
    async fn test_failed_write_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should go makes the write fail
        let path = dir.path().join("001.a.xml");
        std::fs::create_dir(&path).unwrap();

        let err = save_document(&path, "<a/>", None).await.unwrap_err();
        assert!(err.starts_with("Unable to save XML to"));
    }

    #[test]
    fn test_zip_directory_keeps_layout_and_times() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("content");
        std::fs::create_dir_all(source.join("restricted")).unwrap();
        std::fs::write(source.join("001.a.xml"), "<a/>").unwrap();
        std::fs::write(source.join("restricted/002.b.xml"), "<b/>").unwrap();
        let when = Utc.with_ymd_and_hms(2022, 6, 15, 8, 0, 0).unwrap();
        set_modified_time(&source.join("001.a.xml"), when).unwrap();

        let target = dir.path().join("out.zip");
        zip_directory(&source, &target).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&target).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        assert_eq!(names, vec!["001.a.xml", "restricted/002.b.xml"]);

        let entry = archive.by_name("001.a.xml").unwrap();
        let modified: Option<zip::DateTime> = entry.last_modified().into();
        let modified = modified.unwrap();
        assert_eq!(modified.year(), 2022);
        assert_eq!(modified.month(), 6);
        assert_eq!(modified.day(), 15);
        assert_eq!(modified.hour(), 8);
    }
}
