//! Result type alias
//!
//! This module provides a convenient Result type alias that uses
//! [`ArchiveError`] as the error type.

use super::errors::ArchiveError;

/// Result type alias for exporter operations
///
/// # Examples
///
/// ```
/// use course_archive::domain::result::Result;
/// use course_archive::domain::errors::ArchiveError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ArchiveError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ArchiveError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{ArchiveError, TokenError};

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(ArchiveError::Zip("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> std::result::Result<i32, TokenError> {
            Err(TokenError::Expired)
        }

        fn outer() -> Result<i32> {
            Ok(inner()?)
        }

        assert!(matches!(
            outer(),
            Err(ArchiveError::Token(TokenError::Expired))
        ));
        Ok(())
    }
}
