//! Administrator view of the stored archives

use crate::adapters::traits::{ArchiveStore, CourseCatalog};
use crate::core::download::token::TokenService;
use crate::domain::ids::{CourseId, UserId};
use crate::domain::{CatalogError, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// One downloadable archive
#[derive(Debug, Clone)]
pub struct ListingEntry {
    /// Course id
    pub course_id: CourseId,

    /// Course short name
    pub shortname: String,

    /// Whether the course is hidden from students
    pub hidden: bool,

    /// Whether the course sits in the recycle bin category
    pub in_recycle_bin: bool,

    /// Latest publish time covered by the archive
    pub last_published: DateTime<Utc>,

    /// Archive size in bytes
    pub size: u64,

    /// Download token issued to the requesting administrator
    pub token: String,
}

impl ListingEntry {
    /// Size for display, e.g. `1.4 MB`
    pub fn display_size(&self) -> String {
        display_size(self.size)
    }
}

/// Human-readable byte count
pub fn display_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} bytes");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Builds the archive listing for an administrator
pub struct ArchiveListing {
    catalog: Arc<dyn CourseCatalog>,
    store: Arc<dyn ArchiveStore>,
    recycle_bin_category: Option<u64>,
}

impl ArchiveListing {
    /// Create a listing over a catalog and an archive store
    pub fn new(catalog: Arc<dyn CourseCatalog>, store: Arc<dyn ArchiveStore>) -> Self {
        Self {
            catalog,
            store,
            recycle_bin_category: None,
        }
    }

    /// Flag courses in this category as being in the recycle bin
    pub fn with_recycle_bin(mut self, category_id: Option<u64>) -> Self {
        self.recycle_bin_category = category_id;
        self
    }

    /// Archives of existing courses, sorted by short name, each with a fresh
    /// download token for `user_id`
    ///
    /// Archives whose course no longer exists are left out.
    pub async fn entries(
        &self,
        tokens: &TokenService,
        user_id: UserId,
    ) -> Result<Vec<ListingEntry>> {
        let mut entries = Vec::new();

        for archive in self.store.list().await? {
            let course = match self.catalog.course(archive.course_id).await {
                Ok(course) => course,
                Err(CatalogError::CourseNotFound(_)) => continue,
                Err(e) => return Err(e.into()),
            };

            entries.push(ListingEntry {
                course_id: archive.course_id,
                shortname: course.shortname,
                hidden: !course.visible,
                in_recycle_bin: self.recycle_bin_category == Some(course.category_id),
                last_published: archive.modified,
                size: archive.size,
                token: tokens.issue(archive.course_id, user_id).to_string(),
            });
        }

        entries.sort_by(|a, b| a.shortname.cmp(&b.shortname));
        Ok(entries)
    }
}
