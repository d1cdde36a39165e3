// Course Archive - XML snapshot exporter for published course content
// Copyright (c) 2025 Course Archive Contributors
// Licensed under the MIT License

//! # Course Archive
//!
//! Keeps one zip archive per course holding the canonical XML of every
//! published content page, plus a `metadata.xml` index, and hands those
//! archives to administrators through signed, time-limited links.
//!
//! ## Overview
//!
//! - **Detecting** courses whose content changed after their archive was built
//! - **Exporting** each document's XML with its publish time as file mtime
//! - **Classifying** documents students cannot freely see as restricted
//! - **Replacing** stored archives atomically within a batch time budget
//! - **Delivering** archives to administrators via download tokens
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export pipeline, change detection, downloads
//! - [`adapters`] - Catalog, renderer and archive store implementations
//! - [`domain`] - Identifiers, course records and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use course_archive::adapters::Components;
//! use course_archive::config::load_config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("course-archive.toml")?;
//!     let components = Components::from_config(&config)?;
//!
//!     let summary = components.scheduler().run().await?;
//!     println!(
//!         "Exported {} courses, {} left for the next run",
//!         summary.courses_exported, summary.remaining
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Archive Layout
//!
//! ```text
//! 12.zip
//! ├── metadata.xml
//! ├── 001.Week_1.Welcome.xml
//! ├── 003.Week_1.Notes.xml
//! └── restricted/
//!     └── 002.Week_1.Answers.xml
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], whose error type is
//! [`domain::ArchiveError`]. Per-document problems do not fail a course;
//! they are recorded as `error` attributes in `metadata.xml`.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
