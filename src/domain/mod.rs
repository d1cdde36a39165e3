//! Domain models and types.
//!
//! This module contains the core domain models and error types shared by the
//! export pipeline, the adapters and the CLI.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CourseId`], [`ModuleId`], [`UserId`], ...)
//! - **Course structure** ([`CourseRef`], [`ContentModule`], [`ModuleInfo`], [`SectionInfo`])
//! - **Export records** ([`CourseExportDetails`], [`DocumentRecord`])
//! - **Error types** ([`ArchiveError`], [`CatalogError`], [`StorageError`], [`TokenError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers are newtypes so different kinds of id cannot be mixed:
//!
//! ```rust
//! use course_archive::domain::{CourseId, ModuleId};
//!
//! let course_id = CourseId::new(12);
//! let module_id = ModuleId::new(12);
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: CourseId = module_id;
//! # let _ = (course_id, module_id);
//! ```

pub mod course;
pub mod document;
pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use course::{
    AvailabilityNode, ContentModule, CourseExportDetails, CourseRef, ModuleInfo, SectionInfo,
};
pub use document::{DocumentRecord, DocumentStatus, SectionPlacement};
pub use errors::{ArchiveError, CatalogError, StorageError, TokenError};
pub use ids::{ContentId, CourseId, ModuleId, SectionId, UserId};
pub use result::Result;
