//! Course structure as seen by the exporter
//!
//! These types mirror what the course metadata provider hands out: the
//! course itself, its content modules in section order, module visibility
//! and section availability. They are read-only inputs to the pipeline.

use crate::domain::document::DocumentRecord;
use crate::domain::ids::{ContentId, CourseId, ModuleId, SectionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Course reference supplied by the course provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    /// Course id
    pub id: CourseId,

    /// Short name, used for download file names
    pub shortname: String,

    /// Full display name
    pub fullname: String,

    /// Whether the course is visible to students
    #[serde(default = "default_true")]
    pub visible: bool,

    /// Category the course belongs to
    #[serde(default)]
    pub category_id: u64,
}

/// One exportable content module of a course, in section order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentModule {
    /// Course module id
    pub module_id: ModuleId,

    /// Content record rendered to XML
    pub content_id: ContentId,

    /// Module display name
    pub name: String,

    /// Section that contains the module
    pub section_id: SectionId,

    /// Last published time of the content, if it was ever published
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Visibility and availability of a single course module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// Course module id
    pub id: ModuleId,

    /// Whether the module is shown to students at all
    pub visible: bool,

    /// Whether the module's own availability conditions let every student in
    pub available_for_all: bool,

    /// Section that contains the module
    pub section_id: SectionId,
}

/// Course section details relevant to the export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInfo {
    /// Section id
    pub id: SectionId,

    /// Position of the section within the course
    pub number: u32,

    /// Display name of the section
    pub name: String,

    /// Whether the section's availability conditions let every student in
    pub available_for_all: bool,

    /// Section availability condition tree, if any
    #[serde(default)]
    pub availability: Option<AvailabilityNode>,
}

/// Node of an availability condition tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AvailabilityNode {
    /// Group of child conditions
    Tree {
        /// Child nodes
        #[serde(default)]
        children: Vec<AvailabilityNode>,
    },

    /// Depends on the completion or state of another activity
    OtherActivity {
        /// The activity acting as the unlock switch
        module_id: ModuleId,
    },

    /// Any other condition (date, group, grade, ...)
    Condition {
        /// Condition plugin name
        kind: String,
    },
}

impl AvailabilityNode {
    /// All nodes below this one, depth first, excluding the node itself
    pub fn descendants(&self) -> Vec<&AvailabilityNode> {
        let mut out = Vec::new();
        if let AvailabilityNode::Tree { children } = self {
            for child in children {
                out.push(child);
                out.extend(child.descendants());
            }
        }
        out
    }

    /// The referenced activity, when the tree holds exactly one node and that
    /// node is an other-activity condition
    pub fn sole_other_activity(&self) -> Option<ModuleId> {
        match self.descendants().as_slice() {
            [AvailabilityNode::OtherActivity { module_id }] => Some(*module_id),
            _ => None,
        }
    }
}

/// Everything needed to build one course archive
#[derive(Debug, Clone)]
pub struct CourseExportDetails {
    /// Course id
    pub course_id: CourseId,

    /// Course short name
    pub shortname: String,

    /// Course full name
    pub fullname: String,

    /// Course visibility
    pub visible: bool,

    /// Latest document publish time, the archive's effective timestamp
    pub max_published_at: DateTime<Utc>,

    /// Documents keyed by position; `documents[i].sequence == i + 1`
    pub documents: Vec<DocumentRecord>,
}

impl CourseExportDetails {
    /// Start an empty export description for a course
    pub fn new(course: &CourseRef) -> Self {
        Self {
            course_id: course.id,
            shortname: course.shortname.clone(),
            fullname: course.fullname.clone(),
            visible: course.visible,
            max_published_at: DateTime::<Utc>::default(),
            documents: Vec::new(),
        }
    }

    /// Sequence number the next document will receive
    pub fn next_sequence(&self) -> u32 {
        self.documents.len() as u32 + 1
    }

    /// Append a document and fold its publish time into the course maximum
    pub fn push_document(&mut self, document: DocumentRecord) {
        if let Some(published_at) = document.published_at {
            self.max_published_at = self.max_published_at.max(published_at);
        }
        self.documents.push(document);
    }
}

fn default_true() -> bool {
    true
}
