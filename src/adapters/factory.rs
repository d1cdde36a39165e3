//! Component factory
//!
//! Builds the catalog, store and services described by a configuration.

use crate::adapters::admins::StaticAdmins;
use crate::adapters::local::{LocalArchiveStore, ManifestCatalog};
use crate::adapters::traits::{AdminDirectory, ArchiveStore, ContentRenderer, CourseCatalog};
use crate::config::ArchiveConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::core::download::{ArchiveListing, DownloadService, TokenService};
use crate::core::export::{ArchiveBuilder, BatchScheduler};
use crate::core::state::ChangeDetector;
use crate::domain::Result;
use std::sync::Arc;

/// Collaborators shared by every command
#[derive(Clone)]
pub struct Components {
    config: ArchiveConfig,
    catalog: Arc<dyn CourseCatalog>,
    renderer: Arc<dyn ContentRenderer>,
    store: Arc<dyn ArchiveStore>,
    admins: Arc<dyn AdminDirectory>,
    clock: Arc<dyn Clock>,
}

impl Components {
    /// Open the manifest catalog and the local archive store
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or the archive
    /// directory cannot be created
    pub fn from_config(config: &ArchiveConfig) -> Result<Self> {
        tracing::info!(path = %config.catalog.manifest_path, "Loading course manifest");
        let catalog = Arc::new(ManifestCatalog::load(&config.catalog.manifest_path)?);

        tracing::info!(path = %config.storage.archive_dir, "Opening archive store");
        let store = Arc::new(LocalArchiveStore::new(&config.storage.archive_dir)?);

        Ok(Self::with_parts(
            config.clone(),
            catalog.clone(),
            catalog,
            store,
            Arc::new(SystemClock),
        ))
    }

    /// Assemble components from explicit parts
    pub fn with_parts(
        config: ArchiveConfig,
        catalog: Arc<dyn CourseCatalog>,
        renderer: Arc<dyn ContentRenderer>,
        store: Arc<dyn ArchiveStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let admins = Arc::new(StaticAdmins::new(config.download.admins.iter().copied()));
        Self {
            config,
            catalog,
            renderer,
            store,
            admins,
            clock,
        }
    }

    /// Configuration the components were built from
    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Batch scheduler over these components
    pub fn scheduler(&self) -> BatchScheduler {
        let detector = ChangeDetector::new(self.catalog.clone(), self.store.clone());
        let builder = ArchiveBuilder::new(
            self.catalog.clone(),
            self.renderer.clone(),
            self.store.clone(),
            self.config.build_settings(),
        );
        BatchScheduler::new(
            detector,
            builder,
            self.clock.clone(),
            self.config.scheduler_config(),
        )
    }

    /// Token service over these components
    pub fn token_service(&self) -> Arc<TokenService> {
        Arc::new(TokenService::new(
            self.config.token_config(),
            self.admins.clone(),
            self.store.clone(),
            self.clock.clone(),
        ))
    }

    /// Archive listing over these components
    pub fn listing(&self) -> ArchiveListing {
        ArchiveListing::new(self.catalog.clone(), self.store.clone())
            .with_recycle_bin(self.config.download.recycle_bin_category)
    }

    /// Download service over these components
    pub fn download_service(&self) -> DownloadService {
        DownloadService::new(
            self.token_service(),
            self.catalog.clone(),
            self.store.clone(),
        )
    }
}
