//! In-memory adapters
//!
//! Both adapters keep their state behind locks so every trait method works
//! on `&self`. They are what the integration tests run the pipeline against.

pub mod catalog;
pub mod store;

pub use catalog::MemoryCatalog;
pub use store::MemoryArchiveStore;
