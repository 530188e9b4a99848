//! Wiring of stores, repositories and services from a [`BuilderConfig`]

use std::sync::Arc;
use tracing::info;

use crate::config::{BuilderConfig, ConfigError, StorageBackend};
use crate::core::site::Template;
use crate::runtime::brochure::BrochureGenerator;
use crate::runtime::publish::Publisher;
use crate::runtime::resolve::Resolver;
use crate::runtime::session::{SiteSession, TemplateSession};
use crate::service::{LocalWebsiteService, ServiceError, WebsiteService};
use crate::storage::{FileStore, KeyValueStore, KvRepository, MemoryStore};

/// Everything an embedding application needs, built once
#[derive(Clone)]
pub struct Workspace {
    pub config: BuilderConfig,
    pub store: Arc<dyn KeyValueStore>,
    /// Short-lived previews; always in memory
    pub session_store: Arc<dyn KeyValueStore>,
    pub repository: Arc<KvRepository>,
    pub publisher: Publisher,
    pub resolver: Resolver,
    pub brochures: BrochureGenerator,
    pub service: Arc<LocalWebsiteService>,
}

impl Workspace {
    pub fn from_config(config: BuilderConfig) -> Result<Self, ConfigError> {
        let store: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => Arc::new(FileStore::open(config.storage.data_dir.clone())?),
        };
        let workspace = Self::with_store(config, store);
        info!(
            backend = ?workspace.config.storage.backend,
            origin = %workspace.config.public_origin,
            "workspace ready"
        );
        Ok(workspace)
    }

    /// In-memory workspace with default settings.
    pub fn in_memory() -> Self {
        Self::with_store(BuilderConfig::default(), Arc::new(MemoryStore::new()))
    }

    fn with_store(config: BuilderConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let session_store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let repository = Arc::new(KvRepository::new(Arc::clone(&store)));
        let publisher = Publisher::new(
            Arc::clone(&store),
            Arc::clone(&session_store),
            repository.clone(),
            config.public_origin.clone(),
        );
        let resolver = Resolver::new(Arc::clone(&store), Arc::clone(&session_store));
        let brochures = BrochureGenerator::new(repository.clone(), publisher.clone());
        let service = Arc::new(LocalWebsiteService::new(
            repository.clone(),
            repository.clone(),
            publisher.clone(),
            config.platform_domain.clone(),
        ));
        Self {
            config,
            store,
            session_store,
            repository,
            publisher,
            resolver,
            brochures,
            service,
        }
    }

    pub fn template_session(&self, template: Template) -> TemplateSession {
        TemplateSession::new(template, self.repository.clone())
    }

    /// Open an editing session on a stored site.
    pub async fn site_session(&self, site_id: &str) -> Result<SiteSession, ServiceError> {
        let site = self.service.get_site(site_id).await?;
        Ok(SiteSession::new(site, self.service.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    #[tokio::test]
    async fn test_file_backed_workspace_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuilderConfig {
            storage: StorageConfig {
                backend: StorageBackend::File,
                data_dir: dir.path().to_path_buf(),
            },
            ..BuilderConfig::default()
        };
        let site_id = {
            let workspace = Workspace::from_config(config.clone()).unwrap();
            workspace.service.create_site("Demo", "demo").await.unwrap().id
        };
        let reopened = Workspace::from_config(config).unwrap();
        let session = reopened.site_session(&site_id).await.unwrap();
        assert_eq!(session.site().slug, "demo");
    }

    #[tokio::test]
    async fn test_unknown_site_session() {
        let workspace = Workspace::in_memory();
        assert!(matches!(
            workspace.site_session("nope").await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
