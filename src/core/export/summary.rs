//! Batch summary and reporting
//!
//! This module defines structures for tracking and reporting batch results.

use crate::core::export::archive::CourseOutcome;
use crate::domain::ids::CourseId;
use std::time::Duration;

/// Why a batch stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Worklist drained
    Completed,
    /// Time budget used up
    Deadline,
    /// Shutdown requested
    Shutdown,
}

/// A course whose export failed
#[derive(Debug, Clone)]
pub struct CourseFailure {
    /// Course id
    pub course_id: CourseId,

    /// Error message
    pub message: String,
}

/// Summary of one batch run
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Courses on the worklist at the start of the run
    pub total_courses: usize,

    /// Courses whose archive was replaced
    pub courses_exported: usize,

    /// Courses that failed as a whole
    pub courses_failed: usize,

    /// Courses not reached before the run stopped
    pub remaining: usize,

    /// Document files written across all exported courses
    pub documents_written: usize,

    /// Documents recorded with an error across all exported courses
    pub documents_failed: usize,

    /// How the run ended
    pub stop_reason: StopReason,

    /// Duration of the run
    pub duration: Duration,

    /// Per-course failures
    pub failures: Vec<CourseFailure>,
}

impl BatchSummary {
    /// Create an empty summary for a worklist of `total_courses`
    pub fn new(total_courses: usize) -> Self {
        Self {
            total_courses,
            courses_exported: 0,
            courses_failed: 0,
            remaining: total_courses,
            documents_written: 0,
            documents_failed: 0,
            stop_reason: StopReason::Completed,
            duration: Duration::ZERO,
            failures: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a successfully exported course
    pub fn record_success(&mut self, outcome: &CourseOutcome) {
        self.courses_exported += 1;
        self.documents_written += outcome.written;
        self.documents_failed += outcome.failed;
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Record a course that failed as a whole
    pub fn record_failure(&mut self, course_id: CourseId, message: impl Into<String>) {
        self.courses_failed += 1;
        self.remaining = self.remaining.saturating_sub(1);
        self.failures.push(CourseFailure {
            course_id,
            message: message.into(),
        });
    }

    /// Whether every attempted course was exported
    pub fn is_successful(&self) -> bool {
        self.courses_failed == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_courses = self.total_courses,
            exported = self.courses_exported,
            failed = self.courses_failed,
            remaining = self.remaining,
            documents_written = self.documents_written,
            documents_failed = self.documents_failed,
            stop_reason = ?self.stop_reason,
            duration_secs = self.duration.as_secs(),
            "Export batch finished"
        );

        for failure in &self.failures {
            tracing::warn!(
                course_id = %failure.course_id,
                message = %failure.message,
                "Course export failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::traits::StoredArchive;
    use chrono::{DateTime, Utc};

    fn outcome(written: usize, failed: usize) -> CourseOutcome {
        CourseOutcome {
            course_id: CourseId::new(1),
            documents: written + failed,
            written,
            failed,
            archive: StoredArchive {
                course_id: CourseId::new(1),
                filename: "1.zip".to_string(),
                modified: DateTime::<Utc>::default(),
                size: 10,
            },
        }
    }

    #[test]
    fn test_counts() {
        let mut summary = BatchSummary::new(4);
        summary.record_success(&outcome(3, 1));
        summary.record_failure(CourseId::new(2), "Metadata error: disk full");

        assert_eq!(summary.courses_exported, 1);
        assert_eq!(summary.courses_failed, 1);
        assert_eq!(summary.remaining, 2);
        assert_eq!(summary.documents_written, 3);
        assert_eq!(summary.documents_failed, 1);
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_empty_run_is_successful() {
        let summary = BatchSummary::new(0).with_duration(Duration::from_millis(5));
        assert!(summary.is_successful());
        assert_eq!(summary.remaining, 0);
        assert_eq!(summary.stop_reason, StopReason::Completed);
    }
}
