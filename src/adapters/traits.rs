//! Collaborator traits
//!
//! This module defines the interfaces the export pipeline needs from the
//! outside world: course metadata, content rendering, archive storage and
//! the administrator directory.

use crate::domain::ids::{ContentId, CourseId, ModuleId, SectionId, UserId};
use crate::domain::{
    CatalogError, ContentModule, CourseRef, ModuleInfo, SectionInfo, StorageError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;

/// A stored course archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArchive {
    /// Course the archive belongs to
    pub course_id: CourseId,

    /// Stored file name (`{course_id}.zip`)
    pub filename: String,

    /// Archive timestamp, equal to the course's latest publish time
    pub modified: DateTime<Utc>,

    /// Size in bytes
    pub size: u64,
}

/// Course metadata provider
///
/// All lookups may fail when the referenced entity does not exist; callers
/// decide whether that is fatal.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Courses with at least one content module, mapped to their latest
    /// publish time
    async fn published_courses(&self) -> Result<BTreeMap<CourseId, DateTime<Utc>>, CatalogError>;

    /// Load a course
    async fn course(&self, course_id: CourseId) -> Result<CourseRef, CatalogError>;

    /// Content modules of a course, in section order
    async fn content_modules(&self, course_id: CourseId)
        -> Result<Vec<ContentModule>, CatalogError>;

    /// Load a course module
    async fn module(&self, module_id: ModuleId) -> Result<ModuleInfo, CatalogError>;

    /// Load a course section
    async fn section(&self, section_id: SectionId) -> Result<SectionInfo, CatalogError>;
}

/// Renders one content record to its canonical XML
#[async_trait]
pub trait ContentRenderer: Send + Sync {
    /// Render the content record
    ///
    /// # Errors
    ///
    /// Any failure (missing record, malformed content, I/O) is returned as a
    /// message; the exporter records it against the document.
    async fn render(&self, content_id: ContentId) -> Result<String, String>;
}

/// Archive storage keyed by course id
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    /// All stored archives
    async fn list(&self) -> Result<Vec<StoredArchive>, StorageError>;

    /// The stored archive for a course, if any
    async fn get(&self, course_id: CourseId) -> Result<Option<StoredArchive>, StorageError>;

    /// Archive contents
    async fn read(&self, course_id: CourseId) -> Result<Vec<u8>, StorageError>;

    /// Replace the course's archive with the zip file at `source`
    ///
    /// Delete-then-create happens as one unit: a concurrent reader sees
    /// either the previous archive or the new one, never neither. The stored
    /// archive's timestamp is set to `modified`.
    async fn replace(
        &self,
        course_id: CourseId,
        source: &Path,
        modified: DateTime<Utc>,
    ) -> Result<StoredArchive, StorageError>;

    /// Delete the course's archive; returns whether one existed
    async fn delete(&self, course_id: CourseId) -> Result<bool, StorageError>;
}

/// Answers whether a user currently holds administrator rights
pub trait AdminDirectory: Send + Sync {
    /// Check administrator status at the time of the call
    fn is_admin(&self, user_id: UserId) -> bool;
}
