//! Per-document export record
//!
//! A [`DocumentRecord`] is created for every content module of a course and
//! accumulates what is learned about it as the export proceeds. Whether the
//! document made it into the archive is tracked by [`DocumentStatus`]: a file
//! name only exists once a file was written, and an error reason only exists
//! once processing stopped early.

use crate::domain::ids::{ContentId, ModuleId, SectionId};
use chrono::{DateTime, Utc};

/// Section a document was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPlacement {
    /// Section id
    pub id: SectionId,

    /// Section number within the course
    pub number: u32,

    /// Section display name
    pub name: String,
}

/// Processing state of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// Metadata resolved, no file written yet
    Pending,

    /// XML written into the archive under this relative path
    Written {
        /// Path relative to the archive root
        filename: String,
    },

    /// Processing stopped early
    Failed {
        /// Human-readable reason, copied into metadata.xml
        reason: String,
    },
}

/// One exported content item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// 1-based position within the course, in section order
    pub sequence: u32,

    /// Course module id
    pub module_id: ModuleId,

    /// Content id passed to the renderer
    pub content_id: ContentId,

    /// Document display name
    pub name: String,

    /// Last published time, absent when unknown
    pub published_at: Option<DateTime<Utc>>,

    /// Containing section, absent when it could not be resolved
    pub section: Option<SectionPlacement>,

    /// Whether the document is hidden from some or all students
    pub restricted: bool,

    /// Processing state
    pub status: DocumentStatus,
}

impl DocumentRecord {
    /// Create a record with nothing resolved yet
    pub fn new(
        sequence: u32,
        module_id: ModuleId,
        content_id: ContentId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            sequence,
            module_id,
            content_id,
            name: name.into(),
            published_at: None,
            section: None,
            restricted: false,
            status: DocumentStatus::Pending,
        }
    }

    /// Stop processing this document with the given reason
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.status = DocumentStatus::Failed {
            reason: reason.into(),
        };
    }

    /// Record that the document's XML was written to `filename`
    pub fn mark_written(&mut self, filename: impl Into<String>) {
        self.status = DocumentStatus::Written {
            filename: filename.into(),
        };
    }

    /// Error reason, if processing stopped early
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            DocumentStatus::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    /// Written file name, if a file made it into the archive
    pub fn filename(&self) -> Option<&str> {
        match &self.status {
            DocumentStatus::Written { filename } => Some(filename),
            _ => None,
        }
    }

    /// Whether processing stopped early
    pub fn is_failed(&self) -> bool {
        matches!(self.status, DocumentStatus::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DocumentRecord {
        DocumentRecord::new(1, ModuleId::new(10), ContentId::new(20), "Doc")
    }

    #[test]
    fn test_new_record_is_pending() {
        let doc = record();
        assert_eq!(doc.status, DocumentStatus::Pending);
        assert!(doc.error().is_none());
        assert!(doc.filename().is_none());
        assert!(!doc.restricted);
        assert!(doc.section.is_none());
    }

    #[test]
    fn test_fail_sets_reason() {
        let mut doc = record();
        doc.fail("Cannot find published time");
        assert!(doc.is_failed());
        assert_eq!(doc.error(), Some("Cannot find published time"));
        assert!(doc.filename().is_none());
    }

    #[test]
    fn test_mark_written_sets_filename() {
        let mut doc = record();
        doc.mark_written("001.Week_1.Doc.xml");
        assert_eq!(doc.filename(), Some("001.Week_1.Doc.xml"));
        assert!(doc.error().is_none());
    }
}
