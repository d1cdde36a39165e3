//! In-memory archive store

use crate::adapters::traits::{ArchiveStore, StoredArchive};
use crate::domain::ids::CourseId;
use crate::domain::StorageError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;

/// Archive store backed by a map of course id to (timestamp, bytes)
///
/// Replacement swaps the entry while holding the write lock, so readers see
/// either the previous archive or the new one.
#[derive(Debug, Default)]
pub struct MemoryArchiveStore {
    archives: RwLock<BTreeMap<CourseId, (DateTime<Utc>, Vec<u8>)>>,
}

impl MemoryArchiveStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an archive directly
    pub async fn insert(&self, course_id: CourseId, bytes: Vec<u8>, modified: DateTime<Utc>) {
        self.archives
            .write()
            .await
            .insert(course_id, (modified, bytes));
    }

    /// Number of stored archives
    pub async fn len(&self) -> usize {
        self.archives.read().await.len()
    }

    /// Whether the store holds no archives
    pub async fn is_empty(&self) -> bool {
        self.archives.read().await.is_empty()
    }

    fn describe(course_id: CourseId, modified: DateTime<Utc>, bytes: &[u8]) -> StoredArchive {
        StoredArchive {
            course_id,
            filename: course_id.archive_filename(),
            modified,
            size: bytes.len() as u64,
        }
    }
}

#[async_trait]
impl ArchiveStore for MemoryArchiveStore {
    async fn list(&self) -> Result<Vec<StoredArchive>, StorageError> {
        Ok(self
            .archives
            .read()
            .await
            .iter()
            .map(|(id, (modified, bytes))| Self::describe(*id, *modified, bytes))
            .collect())
    }

    async fn get(&self, course_id: CourseId) -> Result<Option<StoredArchive>, StorageError> {
        Ok(self
            .archives
            .read()
            .await
            .get(&course_id)
            .map(|(modified, bytes)| Self::describe(course_id, *modified, bytes)))
    }

    async fn read(&self, course_id: CourseId) -> Result<Vec<u8>, StorageError> {
        self.archives
            .read()
            .await
            .get(&course_id)
            .map(|(_, bytes)| bytes.clone())
            .ok_or(StorageError::NotFound(course_id.get()))
    }

    async fn replace(
        &self,
        course_id: CourseId,
        source: &Path,
        modified: DateTime<Utc>,
    ) -> Result<StoredArchive, StorageError> {
        let bytes = tokio::fs::read(source).await.map_err(|e| {
            StorageError::WriteFailed(format!("cannot read {}: {e}", source.display()))
        })?;
        let stored = Self::describe(course_id, modified, &bytes);

        let mut archives = self.archives.write().await;
        archives.remove(&course_id);
        archives.insert(course_id, (modified, bytes));

        Ok(stored)
    }

    async fn delete(&self, course_id: CourseId) -> Result<bool, StorageError> {
        Ok(self.archives.write().await.remove(&course_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_replace_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("new.zip");
        std::fs::write(&source, b"zipbytes").unwrap();

        let store = MemoryArchiveStore::new();
        store
            .insert(CourseId::new(4), b"old".to_vec(), Utc.timestamp_opt(10, 0).unwrap())
            .await;

        let modified = Utc.timestamp_opt(500, 0).unwrap();
        let stored = store
            .replace(CourseId::new(4), &source, modified)
            .await
            .unwrap();

        assert_eq!(stored.filename, "4.zip");
        assert_eq!(stored.size, 8);
        assert_eq!(stored.modified, modified);
        assert_eq!(store.read(CourseId::new(4)).await.unwrap(), b"zipbytes");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_archive() {
        let store = MemoryArchiveStore::new();
        assert!(store.get(CourseId::new(1)).await.unwrap().is_none());
        assert!(matches!(
            store.read(CourseId::new(1)).await,
            Err(StorageError::NotFound(1))
        ));
        assert!(!store.delete(CourseId::new(1)).await.unwrap());
    }
}
