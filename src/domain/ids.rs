//! Domain identifier types
//!
//! Newtype wrappers for the numeric identifiers handed out by the course
//! platform. Keeping them distinct prevents passing a module id where a
//! course id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|e| format!("Invalid {} '{}': {}", $label, s, e))
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Course identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use course_archive::domain::ids::CourseId;
    /// use std::str::FromStr;
    ///
    /// let course_id = CourseId::from_str("123").unwrap();
    /// assert_eq!(course_id.get(), 123);
    /// assert_eq!(course_id.archive_filename(), "123.zip");
    /// ```
    CourseId,
    "course id"
);

numeric_id!(
    /// Course module identifier (one activity placed in a course section)
    ModuleId,
    "module id"
);

numeric_id!(
    /// Content record identifier, the input of the content renderer
    ContentId,
    "content id"
);

numeric_id!(
    /// Course section identifier
    SectionId,
    "section id"
);

numeric_id!(
    /// Platform user identifier
    UserId,
    "user id"
);

impl CourseId {
    /// Name of the stored archive for this course
    pub fn archive_filename(self) -> String {
        format!("{}.zip", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_id_from_str() {
        let id = CourseId::from_str("42").unwrap();
        assert_eq!(id, CourseId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_from_str_rejects_garbage() {
        assert!(CourseId::from_str("abc").is_err());
        assert!(UserId::from_str("-1").is_err());
        assert!(ModuleId::from_str("").is_err());
    }

    #[test]
    fn test_archive_filename() {
        assert_eq!(CourseId::new(7).archive_filename(), "7.zip");
    }

    #[test]
    fn test_ids_order_numerically() {
        let mut ids = vec![CourseId::new(10), CourseId::new(2), CourseId::new(33)];
        ids.sort();
        assert_eq!(ids, vec![CourseId::new(2), CourseId::new(10), CourseId::new(33)]);
    }

    #[test]
    fn test_id_serde_transparent() {
        let json = serde_json::to_string(&SectionId::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: SectionId = serde_json::from_str("5").unwrap();
        assert_eq!(back, SectionId::new(5));
    }
}
