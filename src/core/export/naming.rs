//! File names inside and outside the archive

use crate::domain::DocumentRecord;

/// Longest file stem before the `.xml` extension is added
pub const MAX_STEM_CHARS: usize = 200;

/// Subdirectory holding documents not available to every student
pub const RESTRICTED_DIR: &str = "restricted";

/// Name of the course summary file at the archive root
pub const METADATA_FILENAME: &str = "metadata.xml";

/// Replace every character outside `[A-Za-z0-9_-]` with `_`
///
/// Works per character, so a multi-byte character becomes a single `_`.
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Archive-relative path for a document's XML file
///
/// `{sequence:03}.{section}.{name}` cut to [`MAX_STEM_CHARS`], plus `.xml`,
/// under [`RESTRICTED_DIR`] when the document is restricted.
pub fn document_filename(document: &DocumentRecord) -> String {
    let section_name = document
        .section
        .as_ref()
        .map(|s| s.name.as_str())
        .unwrap_or_default();
    let stem = format!(
        "{:03}.{}.{}",
        document.sequence,
        sanitize(section_name),
        sanitize(&document.name)
    );
    let stem: String = stem.chars().take(MAX_STEM_CHARS).collect();

    if document.restricted {
        format!("{RESTRICTED_DIR}/{stem}.xml")
    } else {
        format!("{stem}.xml")
    }
}

/// File name an archive is delivered under
pub fn download_filename(shortname: &str) -> String {
    format!("{}.zip", sanitize(shortname))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ContentId, ModuleId, SectionId};
    use crate::domain::SectionPlacement;
    use test_case::test_case;

    #[test_case("some invalid!/", "some_invalid__" ; "punctuation")]
    #[test_case("unicode\u{697D}character", "unicode_character" ; "multibyte")]
    #[test_case("Week_1-intro", "Week_1-intro" ; "already safe")]
    #[test_case("", "" ; "empty")]
    fn test_sanitize(input: &str, expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    fn document(sequence: u32, name: &str, section: &str, restricted: bool) -> DocumentRecord {
        let mut doc = DocumentRecord::new(sequence, ModuleId::new(1), ContentId::new(1), name);
        doc.section = Some(SectionPlacement {
            id: SectionId::new(3),
            number: 1,
            name: section.to_string(),
        });
        doc.restricted = restricted;
        doc
    }

    #[test]
    fn test_document_filename() {
        let doc = document(7, "Cells & tissues", "Week 1", false);
        assert_eq!(document_filename(&doc), "007.Week_1.Cells___tissues.xml");
    }

    #[test]
    fn test_restricted_filename() {
        let doc = document(12, "Quiz", "Week 2", true);
        assert_eq!(document_filename(&doc), "restricted/012.Week_2.Quiz.xml");
    }

    #[test]
    fn test_filename_truncated_before_extension() {
        let doc = document(1, &"x".repeat(500), "S", false);
        let name = document_filename(&doc);
        assert_eq!(name.len(), MAX_STEM_CHARS + ".xml".len());
        assert!(name.starts_with("001.S.xxx"));
        assert!(name.ends_with("x.xml"));
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(download_filename("BIO 101/2024"), "BIO_101_2024.zip");
    }
}
