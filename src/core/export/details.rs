//! Gather everything needed to export one course

use crate::adapters::traits::CourseCatalog;
use crate::core::restriction::is_restricted;
use crate::domain::ids::CourseId;
use crate::domain::{CourseExportDetails, DocumentRecord, Result, SectionPlacement};

/// Collect course attributes and one record per content module
///
/// Per-document lookups that fail are recorded on the document and do not
/// stop the course. Only failures to load the course or its module list are
/// returned as errors.
pub async fn gather_course_details(
    catalog: &dyn CourseCatalog,
    course_id: CourseId,
) -> Result<CourseExportDetails> {
    let course = catalog.course(course_id).await?;
    let modules = catalog.content_modules(course_id).await?;

    let mut details = CourseExportDetails::new(&course);

    for module in modules {
        let mut document = DocumentRecord::new(
            details.next_sequence(),
            module.module_id,
            module.content_id,
            module.name,
        );

        document.published_at = module.published_at;
        if document.published_at.is_none() {
            document.fail("Cannot find published time");
            details.push_document(document);
            continue;
        }

        match catalog.section(module.section_id).await {
            Ok(section) => {
                document.section = Some(SectionPlacement {
                    id: section.id,
                    number: section.number,
                    name: section.name,
                });
            }
            Err(e) => {
                document.fail(format!("Error getting section {}: {e}", module.section_id));
                details.push_document(document);
                continue;
            }
        }

        match is_restricted(catalog, module.module_id).await {
            Ok(restricted) => document.restricted = restricted,
            Err(e) => document.fail(format!("Error getting restriction data: {e}")),
        }

        details.push_document(document);
    }

    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryCatalog;
    use crate::domain::ids::{ContentId, ModuleId, SectionId};
    use crate::domain::{ContentModule, CourseRef, SectionInfo};
    use chrono::{TimeZone, Utc};

    fn catalog() -> MemoryCatalog {
        let catalog = MemoryCatalog::new();
        catalog.add_course(CourseRef {
            id: CourseId::new(5),
            shortname: "C5".to_string(),
            fullname: "Course five".to_string(),
            visible: false,
            category_id: 2,
        });
        catalog.add_section(SectionInfo {
            id: SectionId::new(50),
            number: 1,
            name: "Intro".to_string(),
            available_for_all: true,
            availability: None,
        });
        catalog
    }

    fn content(module: u64, section: u64, published: Option<i64>) -> ContentModule {
        ContentModule {
            module_id: ModuleId::new(module),
            content_id: ContentId::new(module + 1000),
            name: format!("Doc {module}"),
            section_id: SectionId::new(section),
            published_at: published.map(|t| Utc.timestamp_opt(t, 0).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_sequences_and_max_published() {
        let catalog = catalog();
        let course = CourseId::new(5);
        catalog.add_content(course, content(1, 50, Some(300)), true, true, Ok(String::new()));
        catalog.add_content(course, content(2, 50, Some(900)), false, true, Ok(String::new()));
        catalog.add_content(course, content(3, 50, Some(600)), true, true, Ok(String::new()));

        let details = gather_course_details(&catalog, course).await.unwrap();
        assert_eq!(details.shortname, "C5");
        assert!(!details.visible);
        assert_eq!(details.max_published_at.timestamp(), 900);

        let sequences: Vec<u32> = details.documents.iter().map(|d| d.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert!(!details.documents[0].restricted);
        assert!(details.documents[1].restricted);
        assert_eq!(details.documents[2].section.as_ref().unwrap().name, "Intro");
    }

    #[tokio::test]
    async fn test_soft_failures_keep_sequence() {
        let catalog = catalog();
        let course = CourseId::new(5);
        catalog.add_content(course, content(1, 50, None), true, true, Ok(String::new()));
        catalog.add_content(course, content(2, 50, Some(20)), true, true, Ok(String::new()));
        catalog.add_content(course, content(3, 77, Some(10)), true, true, Ok(String::new()));
        catalog.remove_module(ModuleId::new(2));

        let details = gather_course_details(&catalog, course).await.unwrap();
        assert_eq!(details.documents.len(), 3);
        assert_eq!(
            details.documents[0].error(),
            Some("Cannot find published time")
        );
        assert!(details.documents[1]
            .error()
            .unwrap()
            .starts_with("Error getting restriction data:"));
        assert_eq!(
            details.documents[2].error(),
            Some("Error getting section 77: Course section not found: 77")
        );
        assert_eq!(details.max_published_at.timestamp(), 20);
    }

    #[tokio::test]
    async fn test_unknown_course_is_error() {
        let catalog = catalog();
        assert!(gather_course_details(&catalog, CourseId::new(404))
            .await
            .is_err());
    }
}
