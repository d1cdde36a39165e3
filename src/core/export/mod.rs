//! Course export pipeline
//!
//! This module provides the export logic, leaves first:
//! - File naming and sanitization
//! - Course detail gathering (sequence, section, restriction)
//! - Document rendering
//! - metadata.xml generation
//! - Archive assembly and installation
//! - Time-boxed batch scheduling and reporting

pub mod archive;
pub mod details;
pub mod document;
pub mod metadata;
pub mod naming;
pub mod scheduler;
pub mod summary;

pub use archive::{ArchiveBuilder, BuildSettings, CourseOutcome};
pub use details::gather_course_details;
pub use document::export_document;
pub use metadata::MetadataBuilder;
pub use naming::{document_filename, download_filename, sanitize};
pub use scheduler::{BatchScheduler, SchedulerConfig};
pub use summary::{BatchSummary, CourseFailure, StopReason};
