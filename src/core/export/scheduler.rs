//! Batch scheduler
//!
//! Drains the export worklist one course at a time until it is empty, the
//! time budget is spent or shutdown is requested. The budget and shutdown
//! flag are only checked between courses, so a run can overshoot by up to
//! one course. A failing course is logged and skipped.

use crate::core::clock::Clock;
use crate::core::export::archive::{ArchiveBuilder, CourseOutcome};
use crate::core::export::summary::{BatchSummary, StopReason};
use crate::core::state::ChangeDetector;
use crate::domain::ids::CourseId;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Wall-clock budget for one run, measured from its start
    pub time_limit: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(600),
        }
    }
}

/// Runs export batches
pub struct BatchScheduler {
    detector: ChangeDetector,
    builder: ArchiveBuilder,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
    shutdown_signal: Option<watch::Receiver<bool>>,
}

impl BatchScheduler {
    /// Create a scheduler
    pub fn new(
        detector: ChangeDetector,
        builder: ArchiveBuilder,
        clock: Arc<dyn Clock>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            detector,
            builder,
            clock,
            config,
            shutdown_signal: None,
        }
    }

    /// Stop at the next course boundary once `signal` turns true
    pub fn with_shutdown_signal(mut self, signal: watch::Receiver<bool>) -> Self {
        self.shutdown_signal = Some(signal);
        self
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown_signal
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }

    /// Run one batch
    ///
    /// # Errors
    ///
    /// Only fails when the worklist itself cannot be built. Course failures
    /// are reported in the summary.
    pub async fn run(&self) -> Result<BatchSummary> {
        let started = Instant::now();
        let budget = chrono::Duration::from_std(self.config.time_limit)
            .unwrap_or(chrono::Duration::MAX);
        let deadline = self
            .clock
            .now()
            .checked_add_signed(budget)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let worklist = self.detector.list_courses_for_update().await?;
        let mut summary = BatchSummary::new(worklist.len());
        tracing::info!(
            pending = worklist.len(),
            time_limit_secs = self.config.time_limit.as_secs(),
            "Starting export batch"
        );

        for course_id in worklist {
            if self.shutdown_requested() {
                tracing::info!("Shutdown requested, stopping batch");
                summary.stop_reason = StopReason::Shutdown;
                break;
            }
            if self.clock.now() >= deadline {
                summary.stop_reason = StopReason::Deadline;
                break;
            }

            match self.builder.build(course_id).await {
                Ok(outcome) => summary.record_success(&outcome),
                Err(e) => {
                    tracing::error!(course_id = %course_id, error = %e, "Course export failed");
                    summary.record_failure(course_id, e.to_string());
                }
            }
        }

        if summary.remaining > 0 {
            tracing::info!(remaining = summary.remaining, "Courses left for the next run");
        }

        Ok(summary.with_duration(started.elapsed()))
    }

    /// Export one course now, whether or not it is out of date
    pub async fn export_course(&self, course_id: CourseId) -> Result<CourseOutcome> {
        self.builder.build(course_id).await
    }
}
