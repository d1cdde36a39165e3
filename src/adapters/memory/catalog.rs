//! In-memory course catalog and renderer

use crate::adapters::traits::{ContentRenderer, CourseCatalog};
use crate::domain::ids::{ContentId, CourseId, ModuleId, SectionId};
use crate::domain::{CatalogError, ContentModule, CourseRef, ModuleInfo, SectionInfo};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct CatalogData {
    courses: BTreeMap<CourseId, CourseRef>,
    sections: BTreeMap<SectionId, SectionInfo>,
    modules: BTreeMap<ModuleId, ModuleInfo>,
    contents: BTreeMap<CourseId, Vec<ContentModule>>,
    rendered: BTreeMap<ContentId, Result<String, String>>,
}

/// Course catalog held in memory
///
/// Content modules are reported in section-number order; modules within a
/// section keep the order they were added in. The same value doubles as the
/// content renderer, returning whatever XML (or failure) was registered for
/// each content id.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    data: RwLock<CatalogData>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogData>, CatalogError> {
        self.data
            .read()
            .map_err(|_| CatalogError::Unavailable("catalog lock poisoned".to_string()))
    }

    fn write(&self) -> Option<RwLockWriteGuard<'_, CatalogData>> {
        self.data.write().ok()
    }

    /// Register a course
    pub fn add_course(&self, course: CourseRef) {
        if let Some(mut data) = self.write() {
            data.contents.entry(course.id).or_default();
            data.courses.insert(course.id, course);
        }
    }

    /// Remove a course and its content modules
    pub fn remove_course(&self, course_id: CourseId) {
        if let Some(mut data) = self.write() {
            data.courses.remove(&course_id);
            data.contents.remove(&course_id);
        }
    }

    /// Register a section
    pub fn add_section(&self, section: SectionInfo) {
        if let Some(mut data) = self.write() {
            data.sections.insert(section.id, section);
        }
    }

    /// Register a module that is not itself exported (quiz, forum, ...)
    pub fn add_module(&self, module: ModuleInfo) {
        if let Some(mut data) = self.write() {
            data.modules.insert(module.id, module);
        }
    }

    /// Register an exported content module together with its visibility and
    /// the renderer outcome for its content record
    pub fn add_content(
        &self,
        course_id: CourseId,
        content: ContentModule,
        visible: bool,
        available_for_all: bool,
        rendered: Result<String, String>,
    ) {
        if let Some(mut data) = self.write() {
            data.modules.insert(
                content.module_id,
                ModuleInfo {
                    id: content.module_id,
                    visible,
                    available_for_all,
                    section_id: content.section_id,
                },
            );
            data.rendered.insert(content.content_id, rendered);
            data.contents.entry(course_id).or_default().push(content);
        }
    }

    /// Change the publish time of a content module
    pub fn set_published(&self, module_id: ModuleId, published_at: Option<DateTime<Utc>>) {
        if let Some(mut data) = self.write() {
            for module in data.contents.values_mut().flatten() {
                if module.module_id == module_id {
                    module.published_at = published_at;
                }
            }
        }
    }

    /// Forget a module so lookups for it fail
    pub fn remove_module(&self, module_id: ModuleId) {
        if let Some(mut data) = self.write() {
            data.modules.remove(&module_id);
        }
    }
}

#[async_trait]
impl CourseCatalog for MemoryCatalog {
    async fn published_courses(&self) -> Result<BTreeMap<CourseId, DateTime<Utc>>, CatalogError> {
        let data = self.read()?;
        Ok(data
            .contents
            .iter()
            .filter(|(id, modules)| data.courses.contains_key(id) && !modules.is_empty())
            .map(|(id, modules)| {
                let max = modules
                    .iter()
                    .filter_map(|m| m.published_at)
                    .max()
                    .unwrap_or_default();
                (*id, max)
            })
            .collect())
    }

    async fn course(&self, course_id: CourseId) -> Result<CourseRef, CatalogError> {
        self.read()?
            .courses
            .get(&course_id)
            .cloned()
            .ok_or(CatalogError::CourseNotFound(course_id.get()))
    }

    async fn content_modules(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<ContentModule>, CatalogError> {
        let data = self.read()?;
        if !data.courses.contains_key(&course_id) {
            return Err(CatalogError::CourseNotFound(course_id.get()));
        }
        let mut modules = data.contents.get(&course_id).cloned().unwrap_or_default();
        modules.sort_by_key(|m| {
            data.sections
                .get(&m.section_id)
                .map(|s| s.number)
                .unwrap_or(u32::MAX)
        });
        Ok(modules)
    }

    async fn module(&self, module_id: ModuleId) -> Result<ModuleInfo, CatalogError> {
        self.read()?
            .modules
            .get(&module_id)
            .cloned()
            .ok_or(CatalogError::ModuleNotFound(module_id.get()))
    }

    async fn section(&self, section_id: SectionId) -> Result<SectionInfo, CatalogError> {
        self.read()?
            .sections
            .get(&section_id)
            .cloned()
            .ok_or(CatalogError::SectionNotFound(section_id.get()))
    }
}

#[async_trait]
impl ContentRenderer for MemoryCatalog {
    async fn render(&self, content_id: ContentId) -> Result<String, String> {
        let data = self.read().map_err(|e| e.to_string())?;
        match data.rendered.get(&content_id) {
            Some(outcome) => outcome.clone(),
            None => Err(CatalogError::ContentNotFound(content_id.get()).to_string()),
        }
    }
}
