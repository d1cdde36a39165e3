//! Export command implementation
//!
//! This module implements the `export` command, which refreshes stale
//! course archives within the configured time budget.

use super::{open_components, EXIT_FATAL};
use crate::core::export::{BatchSummary, StopReason};
use crate::domain::ids::CourseId;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export only this course, whether or not its archive is stale
    #[arg(long, value_name = "ID")]
    pub course: Option<u64>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let components = match open_components(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let scheduler = components.scheduler().with_shutdown_signal(shutdown_signal);

        if let Some(course) = self.course {
            let course_id = CourseId::new(course);
            println!("🚀 Exporting course {course_id}...");
            return match scheduler.export_course(course_id).await {
                Ok(outcome) => {
                    println!("✅ Archive written: {}", outcome.archive.filename);
                    println!("  Documents: {}", outcome.documents);
                    println!("  Written: {}", outcome.written);
                    println!("  Failed: {}", outcome.failed);
                    Ok(0)
                }
                Err(e) => {
                    tracing::error!(course_id = %course_id, error = %e, "Course export failed");
                    eprintln!("Export failed: {e}");
                    Ok(1)
                }
            };
        }

        println!("🚀 Starting export...");
        println!();

        let summary = match scheduler.run().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(EXIT_FATAL);
            }
        };
        summary.log_summary();
        print_summary(&summary);

        Ok(exit_code(&summary))
    }
}

fn print_summary(summary: &BatchSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Stale courses: {}", summary.total_courses);
    println!("  Exported: {}", summary.courses_exported);
    println!("  Failed: {}", summary.courses_failed);
    println!("  Remaining: {}", summary.remaining);
    println!("  Documents written: {}", summary.documents_written);
    println!("  Document errors: {}", summary.documents_failed);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.failures.is_empty() {
        println!("⚠️  Errors encountered:");
        for failure in &summary.failures {
            println!("  - course {}: {}", failure.course_id, failure.message);
        }
        println!();
    }

    match summary.stop_reason {
        StopReason::Completed => {}
        StopReason::Deadline => {
            println!("⏱️  Time limit reached; remaining courses will be picked up next run.")
        }
        StopReason::Shutdown => {
            println!("⚠️  Export interrupted; remaining courses will be picked up next run.")
        }
    }
}

fn exit_code(summary: &BatchSummary) -> i32 {
    if !summary.is_successful() {
        println!("⚠️  Export completed with failures");
        1
    } else {
        println!("✅ Export completed");
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_args_defaults() {
        let args = ExportArgs { course: None };
        assert!(args.course.is_none());
    }

    #[test]
    fn test_exit_code() {
        let mut summary = BatchSummary::new(2);
        assert_eq!(exit_code(&summary), 0);

        summary.record_failure(CourseId::new(4), "boom".to_string());
        assert_eq!(exit_code(&summary), 1);
    }
}
