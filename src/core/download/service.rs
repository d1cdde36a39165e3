//! Archive delivery

use crate::adapters::traits::{ArchiveStore, CourseCatalog};
use crate::core::download::token::TokenService;
use crate::core::export::naming::download_filename;
use crate::domain::ids::{CourseId, UserId};
use crate::domain::{ArchiveError, Result};
use crate::log_download;
use std::sync::Arc;

/// An archive ready to hand to the user
#[derive(Debug, Clone)]
pub struct ArchiveDownload {
    /// Course the archive belongs to
    pub course_id: CourseId,

    /// Administrator who downloaded it
    pub user_id: UserId,

    /// File name to deliver under
    pub filename: String,

    /// Archive contents
    pub bytes: Vec<u8>,
}

/// Verifies tokens and delivers archives
pub struct DownloadService {
    tokens: Arc<TokenService>,
    catalog: Arc<dyn CourseCatalog>,
    store: Arc<dyn ArchiveStore>,
}

impl DownloadService {
    /// Create a download service
    pub fn new(
        tokens: Arc<TokenService>,
        catalog: Arc<dyn CourseCatalog>,
        store: Arc<dyn ArchiveStore>,
    ) -> Self {
        Self {
            tokens,
            catalog,
            store,
        }
    }

    /// Deliver the archive a token unlocks
    ///
    /// Every download is written to the `audit` log target.
    ///
    /// # Errors
    ///
    /// Token failures come back as [`ArchiveError::Token`] with the specific
    /// reason; show users [`user_message`] instead of the error itself.
    pub async fn download(&self, token: &str) -> Result<ArchiveDownload> {
        let (token, archive) = match self.tokens.verify(token).await {
            Ok(verified) => verified,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected download token");
                return Err(e);
            }
        };

        log_download!(token.course_id, token.user_id);

        let course = self.catalog.course(archive.course_id).await?;
        let bytes = self.store.read(archive.course_id).await?;

        Ok(ArchiveDownload {
            course_id: archive.course_id,
            user_id: token.user_id,
            filename: download_filename(&course.shortname),
            bytes,
        })
    }
}

/// Message shown to a user whose download failed
///
/// Token failures all map to the same text so the reason is not leaked.
pub fn user_message(error: &ArchiveError) -> String {
    match error {
        ArchiveError::Token(reason) => reason.user_message().to_string(),
        other => other.to_string(),
    }
}
