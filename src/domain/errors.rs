//! Domain error types
//!
//! This module defines the error hierarchy for the course archive exporter.
//! Collaborator failures (catalog, storage) and token verification failures
//! have their own enums so callers can match on them; everything else is
//! carried as a message on [`ArchiveError`].

use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Course metadata provider errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Archive storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Download token verification errors
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// metadata.xml generation or write errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Zip assembly errors
    #[error("Zip error: {0}")]
    Zip(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Course metadata provider errors
///
/// Raised when course, module or section metadata cannot be resolved.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Course does not exist
    #[error("Course not found: {0}")]
    CourseNotFound(u64),

    /// Course module does not exist
    #[error("Course module not found: {0}")]
    ModuleNotFound(u64),

    /// Course section does not exist
    #[error("Course section not found: {0}")]
    SectionNotFound(u64),

    /// Content record does not exist
    #[error("Content not found: {0}")]
    ContentNotFound(u64),

    /// Catalog source could not be read or parsed
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Archive storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// No archive stored for the course
    #[error("Archive not found for course {0}")]
    NotFound(u64),

    /// Failed to write or replace an archive
    #[error("Failed to write archive: {0}")]
    WriteFailed(String),

    /// Failed to read an archive or the archive listing
    #[error("Failed to read archive: {0}")]
    ReadFailed(String),

    /// Failed to delete an archive
    #[error("Failed to delete archive: {0}")]
    DeleteFailed(String),
}

/// Download token verification failures
///
/// Each variant is a distinct check in the verification sequence. The
/// `Display` output is the short reason code; callers facing end users
/// should show [`TokenError::user_message`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token string does not match the expected format
    #[error("malformed")]
    Malformed,

    /// Token is future-dated or older than the expiry window
    #[error("expired")]
    Expired,

    /// Bound user is not currently an administrator
    #[error("notadmin")]
    NotAdmin,

    /// Signature does not match the token fields
    #[error("invalidtoken")]
    InvalidToken,

    /// No archive is stored for the bound course
    #[error("nofile")]
    NoFile,
}

impl TokenError {
    /// Generic message shown to users regardless of the failed check
    pub fn user_message(&self) -> &'static str {
        "This download link is invalid or has expired."
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ArchiveError {
    fn from(err: std::io::Error) -> Self {
        ArchiveError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ArchiveError {
    fn from(err: serde_json::Error) -> Self {
        ArchiveError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ArchiveError {
    fn from(err: toml::de::Error) -> Self {
        ArchiveError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from zip errors
impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        ArchiveError::Zip(err.to_string())
    }
}
