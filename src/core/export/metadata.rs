//! metadata.xml builder
//!
//! The metadata file describes the course and every document the exporter
//! looked at, including the ones that failed. Optional attributes are left
//! out entirely when they do not apply, so a consumer can tell "not
//! applicable" apart from zero:
//!
//! ```xml
//! <?xml version="1.0"?>
//! <course id="2" shortname="B101" fullname="Biology" visible="true"
//!         href="https://learn.example.org/course/view.php?id=2"
//!         lastpublished="2024-02-01T09:00:00+00:00">
//!   <document sequence="1" name="Cells" href="..." cmid="100" contentid="7"
//!             restricted="false" sectionid="10" sectionnumber="1"
//!             sectionname="Week 1" filename="001.Week_1.Cells.xml"
//!             published="2024-02-01T09:00:00+00:00"/>
//! </course>
//! ```

use crate::domain::{ArchiveError, CourseExportDetails, DocumentRecord, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

/// ISO-8601 rendering used for every timestamp in the metadata
pub fn iso8601(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Builds metadata.xml for a course
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    site_url: String,
}

impl MetadataBuilder {
    /// Create a builder producing links below `site_url`
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Link to the course page
    pub fn course_href(&self, details: &CourseExportDetails) -> String {
        format!("{}/course/view.php?id={}", self.site_url, details.course_id)
    }

    /// Link to a document's page
    pub fn document_href(&self, document: &DocumentRecord) -> String {
        format!(
            "{}/mod/oucontent/view.php?id={}",
            self.site_url, document.module_id
        )
    }

    /// Serialize the course and its documents
    pub fn build(&self, details: &CourseExportDetails) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
            .map_err(|e| ArchiveError::Metadata(e.to_string()))?;

        let id = details.course_id.to_string();
        let href = self.course_href(details);
        let last_published = iso8601(details.max_published_at);
        let mut course = BytesStart::new("course");
        course.push_attribute(("id", id.as_str()));
        course.push_attribute(("shortname", details.shortname.as_str()));
        course.push_attribute(("fullname", details.fullname.as_str()));
        course.push_attribute(("visible", bool_attr(details.visible)));
        course.push_attribute(("href", href.as_str()));
        course.push_attribute(("lastpublished", last_published.as_str()));

        writer
            .write_event(Event::Start(course))
            .map_err(|e| ArchiveError::Metadata(e.to_string()))?;

        for document in &details.documents {
            writer
                .write_event(Event::Empty(self.document_element(document)))
                .map_err(|e| ArchiveError::Metadata(e.to_string()))?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("course")))
            .map_err(|e| ArchiveError::Metadata(e.to_string()))?;

        String::from_utf8(writer.into_inner()).map_err(|e| ArchiveError::Metadata(e.to_string()))
    }

    fn document_element(&self, document: &DocumentRecord) -> BytesStart<'static> {
        let mut element = BytesStart::new("document");
        element.push_attribute(("sequence", document.sequence.to_string().as_str()));
        element.push_attribute(("name", document.name.as_str()));
        element.push_attribute(("href", self.document_href(document).as_str()));
        element.push_attribute(("cmid", document.module_id.to_string().as_str()));
        element.push_attribute(("contentid", document.content_id.to_string().as_str()));
        element.push_attribute(("restricted", bool_attr(document.restricted)));

        if let Some(error) = document.error().filter(|e| !e.is_empty()) {
            element.push_attribute(("error", error));
        }

        if let Some(section) = document.section.as_ref().filter(|s| s.id.get() != 0) {
            element.push_attribute(("sectionid", section.id.to_string().as_str()));
            element.push_attribute(("sectionnumber", section.number.to_string().as_str()));
            element.push_attribute(("sectionname", section.name.as_str()));
        }

        if let Some(filename) = document.filename() {
            element.push_attribute(("filename", filename));
        }

        if let Some(published) = document.published_at.filter(|p| p.timestamp() != 0) {
            element.push_attribute(("published", iso8601(published).as_str()));
        }

        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ContentId, CourseId, ModuleId, SectionId};
    use crate::domain::{CourseRef, SectionPlacement};
    use chrono::TimeZone;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use std::collections::BTreeMap;

    type Element = (String, BTreeMap<String, String>);

    fn parse(xml: &str) -> Vec<Element> {
        let mut reader = Reader::from_str(xml);
        let mut elements = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) | Event::Empty(e) => {
                    let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                    let attrs = e
                        .attributes()
                        .map(|a| {
                            let a = a.unwrap();
                            (
                                String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                                a.unescape_value().unwrap().into_owned(),
                            )
                        })
                        .collect();
                    elements.push((name, attrs));
                }
                Event::Eof => break,
                _ => {}
            }
        }
        elements
    }

    fn details() -> CourseExportDetails {
        let mut details = CourseExportDetails::new(&CourseRef {
            id: CourseId::new(2),
            shortname: "B101".to_string(),
            fullname: "Biology & more".to_string(),
            visible: true,
            category_id: 0,
        });

        let mut written = DocumentRecord::new(1, ModuleId::new(100), ContentId::new(7), "Cells");
        written.published_at = Some(Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap());
        written.section = Some(SectionPlacement {
            id: SectionId::new(10),
            number: 1,
            name: "Week 1".to_string(),
        });
        written.mark_written("001.Week_1.Cells.xml");
        details.push_document(written);

        let mut failed = DocumentRecord::new(2, ModuleId::new(101), ContentId::new(8), "Genes");
        failed.fail("Cannot find published time");
        details.push_document(failed);

        let mut zero = DocumentRecord::new(3, ModuleId::new(102), ContentId::new(9), "Zero");
        zero.published_at = Some(DateTime::<Utc>::default());
        zero.section = Some(SectionPlacement {
            id: SectionId::new(0),
            number: 0,
            name: String::new(),
        });
        details.push_document(zero);

        details
    }

    #[test]
    fn test_course_attributes() {
        let xml = MetadataBuilder::new("https://learn.example.org/")
            .build(&details())
            .unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\"?>"));

        let elements = parse(&xml);
        let (name, course) = &elements[0];
        assert_eq!(name, "course");
        assert_eq!(course["id"], "2");
        assert_eq!(course["fullname"], "Biology & more");
        assert_eq!(course["visible"], "true");
        assert_eq!(
            course["href"],
            "https://learn.example.org/course/view.php?id=2"
        );
        assert_eq!(course["lastpublished"], "2024-02-01T09:00:00+00:00");
    }

    #[test]
    fn test_document_attributes() {
        let xml = MetadataBuilder::new("https://learn.example.org")
            .build(&details())
            .unwrap();
        let documents: Vec<_> = parse(&xml)
            .into_iter()
            .filter(|(name, _)| name == "document")
            .map(|(_, attrs)| attrs)
            .collect();
        assert_eq!(documents.len(), 3);

        let written = &documents[0];
        assert_eq!(written["sequence"], "1");
        assert_eq!(written["cmid"], "100");
        assert_eq!(written["contentid"], "7");
        assert_eq!(written["restricted"], "false");
        assert_eq!(written["sectionname"], "Week 1");
        assert_eq!(written["filename"], "001.Week_1.Cells.xml");
        assert_eq!(written["published"], "2024-02-01T09:00:00+00:00");
        assert_eq!(
            written["href"],
            "https://learn.example.org/mod/oucontent/view.php?id=100"
        );
        assert!(!written.contains_key("error"));

        let failed = &documents[1];
        assert_eq!(failed["error"], "Cannot find published time");
        assert!(!failed.contains_key("filename"));
        assert!(!failed.contains_key("sectionid"));
        assert!(!failed.contains_key("published"));

        let zero = &documents[2];
        assert!(!zero.contains_key("published"));
        assert!(!zero.contains_key("sectionid"));
        assert!(!zero.contains_key("sectionnumber"));
    }
}
