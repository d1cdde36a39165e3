//! JSON manifest course catalog
//!
//! The manifest describes courses, their sections and modules, and where the
//! canonical XML for each content record lives on disk. Paths are resolved
//! relative to the manifest file.
//!
//! ```json
//! {
//!   "courses": [{"id": 2, "shortname": "B101", "fullname": "Biology"}],
//!   "sections": [{"id": 10, "number": 1, "name": "Week 1", "available_for_all": true}],
//!   "modules": [
//!     {"id": 100, "course_id": 2, "section_id": 10, "name": "Cells",
//!      "content_id": 7, "source": "content/cells.xml",
//!      "published_at": "2024-02-01T09:00:00Z"}
//!   ]
//! }
//! ```

use crate::adapters::memory::MemoryCatalog;
use crate::adapters::traits::{ContentRenderer, CourseCatalog};
use crate::domain::ids::{ContentId, CourseId, ModuleId, SectionId};
use crate::domain::{CatalogError, ContentModule, CourseRef, ModuleInfo, SectionInfo};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk manifest layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Courses
    #[serde(default)]
    pub courses: Vec<CourseRef>,

    /// Sections of all courses
    #[serde(default)]
    pub sections: Vec<SectionInfo>,

    /// Modules of all courses, in section order
    #[serde(default)]
    pub modules: Vec<ManifestModule>,
}

/// A course module entry
///
/// Entries with a `content_id` are exported; the others only exist so that
/// availability conditions can refer to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestModule {
    pub id: ModuleId,
    pub course_id: CourseId,
    pub section_id: SectionId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub available_for_all: bool,
    #[serde(default)]
    pub content_id: Option<ContentId>,
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Course catalog and renderer loaded from a [`Manifest`]
#[derive(Debug)]
pub struct ManifestCatalog {
    index: MemoryCatalog,
    sources: BTreeMap<ContentId, PathBuf>,
}

impl ManifestCatalog {
    /// Load a manifest file
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unavailable`] if the file cannot be read or
    /// is not a valid manifest.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Unavailable(format!("{}: {e}", path.display())))?;
        let manifest: Manifest = serde_json::from_str(&content)
            .map_err(|e| CatalogError::Unavailable(format!("{}: {e}", path.display())))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        tracing::debug!(
            path = %path.display(),
            courses = manifest.courses.len(),
            modules = manifest.modules.len(),
            "Loaded course manifest"
        );

        Ok(Self::from_manifest(manifest, base_dir))
    }

    /// Build the catalog from an already parsed manifest
    pub fn from_manifest(manifest: Manifest, base_dir: &Path) -> Self {
        let index = MemoryCatalog::new();
        let mut sources = BTreeMap::new();

        for course in manifest.courses {
            index.add_course(course);
        }
        for section in manifest.sections {
            index.add_section(section);
        }
        for module in manifest.modules {
            match module.content_id {
                Some(content_id) => {
                    if let Some(source) = &module.source {
                        sources.insert(content_id, base_dir.join(source));
                    }
                    index.add_content(
                        module.course_id,
                        ContentModule {
                            module_id: module.id,
                            content_id,
                            name: module.name,
                            section_id: module.section_id,
                            published_at: module.published_at,
                        },
                        module.visible,
                        module.available_for_all,
                        Err(String::new()),
                    );
                }
                None => index.add_module(ModuleInfo {
                    id: module.id,
                    visible: module.visible,
                    available_for_all: module.available_for_all,
                    section_id: module.section_id,
                }),
            }
        }

        Self { index, sources }
    }
}

#[async_trait]
impl CourseCatalog for ManifestCatalog {
    async fn published_courses(&self) -> Result<BTreeMap<CourseId, DateTime<Utc>>, CatalogError> {
        self.index.published_courses().await
    }

    async fn course(&self, course_id: CourseId) -> Result<CourseRef, CatalogError> {
        self.index.course(course_id).await
    }

    async fn content_modules(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<ContentModule>, CatalogError> {
        self.index.content_modules(course_id).await
    }

    async fn module(&self, module_id: ModuleId) -> Result<ModuleInfo, CatalogError> {
        self.index.module(module_id).await
    }

    async fn section(&self, section_id: SectionId) -> Result<SectionInfo, CatalogError> {
        self.index.section(section_id).await
    }
}

#[async_trait]
impl ContentRenderer for ManifestCatalog {
    async fn render(&self, content_id: ContentId) -> Result<String, String> {
        let source = self
            .sources
            .get(&content_id)
            .ok_or_else(|| CatalogError::ContentNotFound(content_id.get()).to_string())?;
        tokio::fs::read_to_string(source)
            .await
            .map_err(|e| format!("{}: {e}", source.display()))
    }
}
