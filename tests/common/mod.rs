//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use course_archive::adapters::memory::MemoryCatalog;
use course_archive::domain::ids::{ContentId, CourseId, ModuleId, SectionId};
use course_archive::domain::{ContentModule, CourseRef, SectionInfo};

pub const SITE_URL: &str = "https://learn.example.org";

pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

pub fn course(id: u64, shortname: &str) -> CourseRef {
    CourseRef {
        id: CourseId::new(id),
        shortname: shortname.to_string(),
        fullname: format!("{shortname} full name"),
        visible: true,
        category_id: 1,
    }
}

pub fn section(id: u64, number: u32, name: &str) -> SectionInfo {
    SectionInfo {
        id: SectionId::new(id),
        number,
        name: name.to_string(),
        available_for_all: true,
        availability: None,
    }
}

/// Content module `id` with content id `id * 10`
pub fn content(id: u64, name: &str, section_id: u64, published: Option<i64>) -> ContentModule {
    ContentModule {
        module_id: ModuleId::new(id),
        content_id: ContentId::new(id * 10),
        name: name.to_string(),
        section_id: SectionId::new(section_id),
        published_at: published.map(at),
    }
}

/// Course 1 "Intro" with three documents in one section; the second is
/// hidden and so restricted
pub fn three_document_course(catalog: &MemoryCatalog) {
    catalog.add_course(course(1, "Intro"));
    catalog.add_section(section(11, 1, "Week 1"));
    add_page(catalog, 1, content(101, "Welcome", 11, Some(1_000)), true);
    add_page(catalog, 1, content(102, "Answers", 11, Some(2_000)), false);
    add_page(catalog, 1, content(103, "Notes", 11, Some(3_000)), true);
}

/// Register a page whose XML renders successfully
pub fn add_page(catalog: &MemoryCatalog, course_id: u64, module: ContentModule, visible: bool) {
    let xml = format!("<page><title>{}</title></page>", module.name);
    catalog.add_content(CourseId::new(course_id), module, visible, true, Ok(xml));
}

/// Course `id` with a single visible page published at `published`
pub fn single_page_course(catalog: &MemoryCatalog, id: u64, published: i64) {
    catalog.add_course(course(id, &format!("C{id}")));
    catalog.add_section(section(id * 100, 1, "Main"));
    add_page(
        catalog,
        id,
        content(id * 1000, "Page", id * 100, Some(published)),
        true,
    );
}

/// Entry names of a zip archive, sorted
pub fn zip_entries(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    names
}

/// Contents of one zip entry
pub fn zip_entry(bytes: &[u8], name: &str) -> String {
    use std::io::Read;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut out = String::new();
    entry.read_to_string(&mut out).unwrap();
    out
}
