//! Incremental change detection
//!
//! A course needs a new archive when it has none, or when its content was
//! published after the stored archive's timestamp. Archives are stamped
//! with the course's latest publish time, so the comparison is between two
//! content times and never involves the wall clock.

use crate::adapters::traits::{ArchiveStore, CourseCatalog, StoredArchive};
use crate::domain::ids::CourseId;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

/// What a batch run has to do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePlan {
    /// Courses to export, oldest outstanding publish time first
    pub pending: Vec<CourseId>,

    /// Stored archives whose course no longer exists
    pub orphaned: Vec<CourseId>,
}

/// Compare source publish times against stored archives
///
/// Ties on publish time are broken by course id.
pub fn plan_updates(
    published: &BTreeMap<CourseId, DateTime<Utc>>,
    stored: &[StoredArchive],
) -> UpdatePlan {
    let stored_at: BTreeMap<CourseId, DateTime<Utc>> =
        stored.iter().map(|a| (a.course_id, a.modified)).collect();

    let orphaned = stored_at
        .keys()
        .filter(|id| !published.contains_key(*id))
        .copied()
        .collect();

    let mut pending: Vec<(DateTime<Utc>, CourseId)> = published
        .iter()
        .filter(|(id, latest)| match stored_at.get(*id) {
            Some(archived) => *latest > archived,
            None => true,
        })
        .map(|(id, latest)| (*latest, *id))
        .collect();
    pending.sort();

    UpdatePlan {
        pending: pending.into_iter().map(|(_, id)| id).collect(),
        orphaned,
    }
}

/// Builds the worklist for a batch run
pub struct ChangeDetector {
    catalog: Arc<dyn CourseCatalog>,
    store: Arc<dyn ArchiveStore>,
}

impl ChangeDetector {
    /// Create a detector over a catalog and an archive store
    pub fn new(catalog: Arc<dyn CourseCatalog>, store: Arc<dyn ArchiveStore>) -> Self {
        Self { catalog, store }
    }

    /// Courses needing export, oldest first
    ///
    /// Archives of courses missing from the catalog are deleted on the way.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or the store cannot be listed, or an
    /// orphaned archive cannot be deleted.
    pub async fn list_courses_for_update(&self) -> Result<Vec<CourseId>> {
        let published = self.catalog.published_courses().await?;
        let stored = self.store.list().await?;
        let plan = plan_updates(&published, &stored);

        for course_id in &plan.orphaned {
            self.store.delete(*course_id).await?;
            tracing::info!(course_id = %course_id, "Deleted archive of removed course");
        }

        tracing::debug!(
            courses = published.len(),
            archives = stored.len(),
            pending = plan.pending.len(),
            "Planned export worklist"
        );

        Ok(plan.pending)
    }
}
