//! Core business logic for the course archive exporter.
//!
//! # Modules
//!
//! - [`export`] - Archive building, metadata, batch scheduling
//! - [`state`] - Change detection against stored archives
//! - [`restriction`] - Restricted-content classification
//! - [`download`] - Download tokens, listing and delivery
//! - [`clock`] - Injectable time source
//!
//! # Export Workflow
//!
//! 1. **Plan**: compare course publish times with stored archive timestamps
//!    and drop archives of deleted courses
//! 2. **Gather**: resolve sequence, section and restriction per document
//! 3. **Render**: write each document's XML with its publish time as mtime
//! 4. **Describe**: write metadata.xml
//! 5. **Install**: zip and atomically replace the stored archive
//! 6. **Report**: summarize the batch and the remaining backlog
//!
//! # Example
//!
//! ```rust,no_run
//! use course_archive::adapters::memory::{MemoryArchiveStore, MemoryCatalog};
//! use course_archive::core::clock::SystemClock;
//! use course_archive::core::export::{
//!     ArchiveBuilder, BatchScheduler, BuildSettings, SchedulerConfig,
//! };
//! use course_archive::core::state::ChangeDetector;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(MemoryCatalog::new());
//! let store = Arc::new(MemoryArchiveStore::new());
//!
//! let detector = ChangeDetector::new(catalog.clone(), store.clone());
//! let builder = ArchiveBuilder::new(
//!     catalog.clone(),
//!     catalog.clone(),
//!     store.clone(),
//!     BuildSettings::default(),
//! );
//! let scheduler = BatchScheduler::new(
//!     detector,
//!     builder,
//!     Arc::new(SystemClock),
//!     SchedulerConfig::default(),
//! );
//!
//! let summary = scheduler.run().await?;
//! println!("Exported: {}", summary.courses_exported);
//! println!("Remaining: {}", summary.remaining);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod download;
pub mod export;
pub mod restriction;
pub mod state;
