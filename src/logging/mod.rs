//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output
//! - JSON log files with daily or hourly rotation
//! - A dedicated `audit` target for archive downloads
//!
//! # Example
//!
//! ```no_run
//! use course_archive::logging::init_logging;
//! use course_archive::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a course export
///
/// # Example
///
/// ```no_run
/// use course_archive::log_course_start;
/// use course_archive::domain::CourseId;
///
/// log_course_start!(CourseId::new(12), 4);
/// ```
#[macro_export]
macro_rules! log_course_start {
    ($course_id:expr, $documents:expr) => {
        tracing::info!(
            course_id = %$course_id,
            documents = $documents,
            "Exporting course"
        );
    };
}

/// Log the completion of a course export
///
/// # Example
///
/// ```no_run
/// use course_archive::log_course_complete;
/// use course_archive::domain::CourseId;
/// use std::time::Duration;
///
/// log_course_complete!(CourseId::new(12), 3, 1, Duration::from_secs(2));
/// ```
#[macro_export]
macro_rules! log_course_complete {
    ($course_id:expr, $written:expr, $failed:expr, $duration:expr) => {
        tracing::info!(
            course_id = %$course_id,
            written = $written,
            failed = $failed,
            duration_ms = $duration.as_millis(),
            "Course export complete"
        );
    };
}

/// Log a document that could not be exported
///
/// # Example
///
/// ```no_run
/// use course_archive::log_document_error;
/// use course_archive::domain::CourseId;
///
/// log_document_error!(CourseId::new(12), 3, "Error getting XML: timeout");
/// ```
#[macro_export]
macro_rules! log_document_error {
    ($course_id:expr, $sequence:expr, $reason:expr) => {
        tracing::warn!(
            course_id = %$course_id,
            sequence = $sequence,
            reason = %$reason,
            "Document not exported"
        );
    };
}

/// Record an archive download in the audit log
///
/// # Example
///
/// ```no_run
/// use course_archive::log_download;
/// use course_archive::domain::{CourseId, UserId};
///
/// log_download!(CourseId::new(12), UserId::new(2));
/// ```
#[macro_export]
macro_rules! log_download {
    ($course_id:expr, $user_id:expr) => {
        tracing::info!(
            target: "audit",
            course_id = %$course_id,
            user_id = %$user_id,
            "Course export downloaded"
        );
    };
}
