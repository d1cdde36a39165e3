//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so only
//! one test here initializes logging.

use course_archive::config::LoggingConfig;
use course_archive::domain::ids::{CourseId, UserId};
use course_archive::logging::init_logging;
use course_archive::log_download;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_file_logging_writes_json_with_audit_target() {
    std::env::remove_var("RUST_LOG");
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("info", &config).unwrap();
    assert!(log_path.is_dir());

    log_download!(CourseId::new(12), UserId::new(2));
    drop(guard);

    let contents = std::fs::read_to_string(log_path.join("course-archive.log")).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let audit = lines
        .iter()
        .find(|line| line["target"] == "audit")
        .expect("audit record written");
    assert_eq!(audit["fields"]["message"], "Course export downloaded");
    assert_eq!(audit["fields"]["course_id"], "12");
    assert_eq!(audit["fields"]["user_id"], "2");
}
