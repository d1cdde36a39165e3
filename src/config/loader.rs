//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ArchiveConfig;
use super::secret::secret_string;
use crate::domain::errors::ArchiveError;
use crate::domain::ids::UserId;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "COURSE_ARCHIVE_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ArchiveConfig
/// 4. Applies environment variable overrides (COURSE_ARCHIVE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ArchiveError::Configuration`] if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use course_archive::config::loader::load_config;
///
/// let config = load_config("course-archive.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ArchiveConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ArchiveError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ArchiveError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses, overrides and validates configuration text
///
/// # Errors
///
/// Same as [`load_config`], minus the file handling
pub fn parse_config(contents: &str) -> Result<ArchiveConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ArchiveConfig = toml::from_str(&contents)
        .map_err(|e| ArchiveError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ArchiveError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_pattern();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(ArchiveError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        ArchiveError::Configuration(format!(
            "Invalid value '{value}' for {ENV_PREFIX}{key}"
        ))
    })
}

/// Applies environment variable overrides using the COURSE_ARCHIVE_* prefix
///
/// Variables follow the pattern COURSE_ARCHIVE_<SECTION>_<KEY>, for example
/// COURSE_ARCHIVE_EXPORT_TIME_LIMIT_SECS. `DOWNLOAD_ADMINS` takes a
/// comma-separated list of user ids.
fn apply_env_overrides(config: &mut ArchiveConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env_override("APPLICATION_SITE_URL") {
        config.application.site_url = val;
    }

    // Export overrides
    if let Some(val) = env_override("EXPORT_TIME_LIMIT_SECS") {
        config.export.time_limit_secs = parse_override("EXPORT_TIME_LIMIT_SECS", &val)?;
    }
    if let Some(val) = env_override("EXPORT_DOCUMENT_DELAY_MS") {
        config.export.document_delay_ms = parse_override("EXPORT_DOCUMENT_DELAY_MS", &val)?;
    }
    if let Some(val) = env_override("EXPORT_SCRATCH_DIR") {
        config.export.scratch_dir = Some(val);
    }

    // Download overrides
    if let Some(val) = env_override("DOWNLOAD_SECRET") {
        config.download.secret = secret_string(val);
    }
    if let Some(val) = env_override("DOWNLOAD_ADMINS") {
        config.download.admins = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| parse_override::<UserId>("DOWNLOAD_ADMINS", s))
            .collect::<Result<Vec<_>>>()?;
    }
    if let Some(val) = env_override("DOWNLOAD_RECYCLE_BIN_CATEGORY") {
        config.download.recycle_bin_category =
            Some(parse_override("DOWNLOAD_RECYCLE_BIN_CATEGORY", &val)?);
    }

    // Storage and catalog overrides
    if let Some(val) = env_override("STORAGE_ARCHIVE_DIR") {
        config.storage.archive_dir = val;
    }
    if let Some(val) = env_override("CATALOG_MANIFEST_PATH") {
        config.catalog.manifest_path = val;
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID: &str = r#"
[application]
log_level = "debug"
site_url = "https://learn.example.org"

[export]
time_limit_secs = 120

[download]
secret = "0123456789abcdef0123"
admins = [2, 7]

[storage]
archive_dir = "/srv/archives"

[catalog]
manifest_path = "/srv/catalog.json"
"#;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CA_TEST_SUBST_VAR", "test_value");
        let input = "secret = \"${CA_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "secret = \"test_value\"");
        std::env::remove_var("CA_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CA_TEST_MISSING_VAR");
        let input = "secret = \"${CA_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("CA_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("CA_TEST_COMMENTED_VAR");
        let input = "# secret = \"${CA_TEST_COMMENTED_VAR}\"\nkey = 1";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(ArchiveError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(VALID.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.application.site_url, "https://learn.example.org");
        assert_eq!(config.export.time_limit_secs, 120);
        assert_eq!(config.export.document_delay_ms, 0);
        assert_eq!(config.download.admins, vec![UserId::new(2), UserId::new(7)]);
        assert_eq!(
            config.download.secret.expose_secret().as_ref(),
            "0123456789abcdef0123"
        );
        assert!(!config.logging.local_enabled);
        assert_eq!(config.logging.local_rotation, "daily");
    }

    #[test]
    fn test_validation_failure_reported() {
        let contents = VALID.replace("0123456789abcdef0123", "short");
        let err = parse_config(&contents).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = parse_config("[application\nsite_url = 1").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_parse_override_rejects_garbage() {
        let err = parse_override::<u64>("EXPORT_TIME_LIMIT_SECS", "soon").unwrap_err();
        assert!(err
            .to_string()
            .contains("COURSE_ARCHIVE_EXPORT_TIME_LIMIT_SECS"));
    }
}
