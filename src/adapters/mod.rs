//! External system integrations for the course archive exporter.
//!
//! The export pipeline talks to the outside world only through the traits in
//! [`traits`]:
//!
//! - [`CourseCatalog`] - course, module and section metadata
//! - [`ContentRenderer`] - canonical XML for one content record
//! - [`ArchiveStore`] - stored course archives keyed by course id
//! - [`AdminDirectory`] - current administrator set
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** so the core never depends on a
//! concrete backend. Two families of implementations are bundled:
//!
//! - [`local`] - filesystem archive directory and a JSON manifest catalog,
//!   used by the CLI
//! - [`memory`] - in-process store and catalog, used by tests
//!
//! ```rust,no_run
//! use course_archive::adapters::local::{LocalArchiveStore, ManifestCatalog};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = LocalArchiveStore::new("/var/lib/course-archive/archives")?;
//! let catalog = ManifestCatalog::load("/var/lib/course-archive/catalog.json")?;
//! # let _ = (store, catalog);
//! # Ok(())
//! # }
//! ```

pub mod admins;
pub mod factory;
pub mod local;
pub mod memory;
pub mod traits;

pub use admins::StaticAdmins;
pub use factory::Components;
pub use traits::{AdminDirectory, ArchiveStore, ContentRenderer, CourseCatalog, StoredArchive};
