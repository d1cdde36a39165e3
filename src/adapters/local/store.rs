//! Local filesystem archive store
//!
//! Archives live in one directory as `{course_id}.zip`. The file's
//! modification time is the archive timestamp used for staleness checks.

use crate::adapters::local::{modified_time, set_modified_time};
use crate::adapters::traits::{ArchiveStore, StoredArchive};
use crate::domain::ids::CourseId;
use crate::domain::StorageError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn archive_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([0-9]+)\.zip$").expect("archive name pattern is valid"))
}

/// Archive store backed by a directory
#[derive(Debug, Clone)]
pub struct LocalArchiveStore {
    root: PathBuf,
}

impl LocalArchiveStore {
    /// Open (and create if needed) the archive directory
    ///
    /// # Errors
    ///
    /// Returns an error if the path exists but is not a directory, or if it
    /// cannot be created.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        if root.exists() {
            if !root.is_dir() {
                return Err(StorageError::ReadFailed(format!(
                    "{} is not a directory",
                    root.display()
                )));
            }
        } else {
            // One-off at startup, no need for async here
            std::fs::create_dir_all(&root).map_err(|e| {
                StorageError::WriteFailed(format!("cannot create {}: {e}", root.display()))
            })?;
        }
        Ok(Self { root })
    }

    /// Directory holding the archives
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn archive_path(&self, course_id: CourseId) -> PathBuf {
        self.root.join(course_id.archive_filename())
    }

    fn describe(
        course_id: CourseId,
        metadata: &std::fs::Metadata,
    ) -> Result<StoredArchive, StorageError> {
        let modified = modified_time(metadata)
            .map_err(|e| StorageError::ReadFailed(format!("no modification time: {e}")))?;
        Ok(StoredArchive {
            course_id,
            filename: course_id.archive_filename(),
            modified,
            size: metadata.len(),
        })
    }
}

#[async_trait]
impl ArchiveStore for LocalArchiveStore {
    async fn list(&self) -> Result<Vec<StoredArchive>, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| StorageError::ReadFailed(format!("{}: {e}", self.root.display())))?;

        let mut archives = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
        {
            let name = entry.file_name();
            let Some(captures) = name.to_str().and_then(|n| archive_name_pattern().captures(n))
            else {
                continue;
            };
            let Ok(course_id) = captures[1].parse::<CourseId>() else {
                continue;
            };
            let metadata = entry
                .metadata()
                .await
                .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            if metadata.is_file() {
                archives.push(Self::describe(course_id, &metadata)?);
            }
        }

        archives.sort_by_key(|a| a.course_id);
        Ok(archives)
    }

    async fn get(&self, course_id: CourseId) -> Result<Option<StoredArchive>, StorageError> {
        match tokio::fs::metadata(self.archive_path(course_id)).await {
            Ok(metadata) if metadata.is_file() => Ok(Some(Self::describe(course_id, &metadata)?)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(e.to_string())),
        }
    }

    async fn read(&self, course_id: CourseId) -> Result<Vec<u8>, StorageError> {
        tokio::fs::read(self.archive_path(course_id))
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StorageError::NotFound(course_id.get()),
                _ => StorageError::ReadFailed(e.to_string()),
            })
    }

    async fn replace(
        &self,
        course_id: CourseId,
        source: &Path,
        modified: DateTime<Utc>,
    ) -> Result<StoredArchive, StorageError> {
        let target = self.archive_path(course_id);
        let staging = self
            .root
            .join(format!(".{}.tmp", course_id.archive_filename()));

        let write = async {
            tokio::fs::copy(source, &staging).await?;
            set_modified_time(&staging, modified)?;
            // rename over the target swaps old for new in one step
            tokio::fs::rename(&staging, &target).await?;
            tokio::fs::metadata(&target).await
        };

        match write.await {
            Ok(metadata) => Self::describe(course_id, &metadata),
            Err(e) => {
                let _ = tokio::fs::remove_file(&staging).await;
                Err(StorageError::WriteFailed(format!(
                    "{}: {e}",
                    target.display()
                )))
            }
        }
    }

    async fn delete(&self, course_id: CourseId) -> Result<bool, StorageError> {
        match tokio::fs::remove_file(self.archive_path(course_id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::DeleteFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_list_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("12.zip"), b"a").unwrap();
        std::fs::write(dir.path().join("3.zip"), b"bb").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("abc.zip"), b"x").unwrap();
        std::fs::write(dir.path().join(".5.zip.tmp"), b"x").unwrap();

        let store = LocalArchiveStore::new(dir.path()).unwrap();
        let listed = store.list().await.unwrap();
        let ids: Vec<u64> = listed.iter().map(|a| a.course_id.get()).collect();
        assert_eq!(ids, vec![3, 12]);
        assert_eq!(listed[0].size, 2);
    }

    #[tokio::test]
    async fn test_replace_sets_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join("archives");
        let store = LocalArchiveStore::new(&store_dir).unwrap();

        let source = dir.path().join("build.zip");
        std::fs::write(&source, b"first").unwrap();
        let first = Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap();
        store.replace(CourseId::new(7), &source, first).await.unwrap();

        std::fs::write(&source, b"second!").unwrap();
        let second = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let stored = store.replace(CourseId::new(7), &source, second).await.unwrap();

        assert_eq!(stored.modified, second);
        assert_eq!(stored.size, 7);
        assert_eq!(store.read(CourseId::new(7)).await.unwrap(), b"second!");
        assert_eq!(store.get(CourseId::new(7)).await.unwrap(), Some(stored));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("9.zip"), b"a").unwrap();
        let store = LocalArchiveStore::new(dir.path()).unwrap();

        assert!(store.delete(CourseId::new(9)).await.unwrap());
        assert!(!store.delete(CourseId::new(9)).await.unwrap());
        assert!(matches!(
            store.read(CourseId::new(9)).await,
            Err(StorageError::NotFound(9))
        ));
    }

    #[test]
    fn test_new_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, b"").unwrap();
        assert!(LocalArchiveStore::new(&file).is_err());
    }
}
