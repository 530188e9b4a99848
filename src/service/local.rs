//! Store-backed implementation of [`WebsiteService`]

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use super::inventory::{default_manufacturers, demo_inventory};
use super::{MediaUpload, ServiceError, WebsiteService};
use crate::core::fresh_id;
use crate::core::site::{
    normalize_path, validate_slug, DomainConfig, Listing, Manufacturer, MediaAsset, Page, Site,
};
use crate::runtime::domain::{validate_domain, DomainResult};
use crate::runtime::publish::{PublishReceipt, Publisher};
use crate::storage::{MediaRepository, SiteRepository};

/// Largest accepted media upload
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// [`WebsiteService`] over local repositories
#[derive(Clone)]
pub struct LocalWebsiteService {
    sites: Arc<dyn SiteRepository>,
    media: Arc<dyn MediaRepository>,
    publisher: Publisher,
    platform_domain: String,
}

impl LocalWebsiteService {
    pub fn new(
        sites: Arc<dyn SiteRepository>,
        media: Arc<dyn MediaRepository>,
        publisher: Publisher,
        platform_domain: impl Into<String>,
    ) -> Self {
        Self {
            sites,
            media,
            publisher,
            platform_domain: platform_domain.into(),
        }
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    async fn load(&self, site_id: &str) -> Result<Site, ServiceError> {
        self.sites
            .get_site(site_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("site {}", site_id)))
    }

    async fn store(&self, mut site: Site) -> Result<Site, ServiceError> {
        site.updated_at = Utc::now();
        self.sites.save_site(&site).await?;
        Ok(site)
    }

    async fn ensure_slug_free(&self, slug: &str, site_id: Option<&str>) -> Result<(), ServiceError> {
        if let Some(existing) = self.sites.find_site_by_slug(slug).await? {
            if Some(existing.id.as_str()) != site_id {
                return Err(ServiceError::Conflict(format!("slug '{}' is taken", slug)));
            }
        }
        Ok(())
    }
}

fn check_slug(slug: &str) -> Result<(), ServiceError> {
    let result = validate_slug(slug);
    match result.errors.into_iter().next() {
        Some(message) => Err(ServiceError::InvalidInput(message)),
        None => Ok(()),
    }
}

fn check_unique_paths(site: &Site) -> Result<(), ServiceError> {
    let mut seen = HashSet::new();
    for page in &site.pages {
        if !seen.insert(page.path.as_str()) {
            return Err(ServiceError::Conflict(format!(
                "more than one page uses the path {}",
                page.path
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl WebsiteService for LocalWebsiteService {
    async fn list_sites(&self) -> Result<Vec<Site>, ServiceError> {
        Ok(self.sites.list_sites().await?)
    }

    async fn get_site(&self, site_id: &str) -> Result<Site, ServiceError> {
        self.load(site_id).await
    }

    async fn create_site(&self, name: &str, slug: &str) -> Result<Site, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("site name is required".into()));
        }
        check_slug(slug)?;
        self.ensure_slug_free(slug, None).await?;
        let mut site = Site::new(name.trim(), slug);
        site.manufacturers = default_manufacturers();
        self.sites.save_site(&site).await?;
        info!(site_id = %site.id, slug, "created site");
        Ok(site)
    }

    async fn update_site(&self, site: &Site) -> Result<Site, ServiceError> {
        self.load(&site.id).await?;
        check_slug(&site.slug)?;
        self.ensure_slug_free(&site.slug, Some(&site.id)).await?;
        check_unique_paths(site)?;
        self.store(site.clone()).await
    }

    async fn delete_site(&self, site_id: &str) -> Result<(), ServiceError> {
        if self.sites.delete_site(site_id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!("site {}", site_id)))
        }
    }

    async fn publish_site(&self, site_id: &str) -> Result<PublishReceipt, ServiceError> {
        let mut site = self.load(site_id).await?;
        Ok(self.publisher.publish(&mut site, None).await?)
    }

    async fn set_domain(
        &self,
        site_id: &str,
        config: DomainConfig,
    ) -> Result<DomainResult, ServiceError> {
        let mut site = self.load(site_id).await?;
        let result = validate_domain(&config, &self.platform_domain);
        if result.success {
            site.domain = Some(config);
            self.store(site).await?;
            info!(site_id, address = ?result.address, "recorded domain intent");
        } else {
            warn!(site_id, message = %result.message, "domain request rejected");
        }
        Ok(result)
    }

    async fn get_pages(&self, site_id: &str) -> Result<Vec<Page>, ServiceError> {
        Ok(self.load(site_id).await?.pages)
    }

    async fn create_page(
        &self,
        site_id: &str,
        title: &str,
        path: &str,
    ) -> Result<Page, ServiceError> {
        let mut site = self.load(site_id).await?;
        let mut page = Page::new(title, path);
        page.path = site.unique_path(&page.path, None);
        site.pages.push(page.clone());
        self.store(site).await?;
        Ok(page)
    }

    async fn update_page(&self, site_id: &str, page: &Page) -> Result<Page, ServiceError> {
        let mut site = self.load(site_id).await?;
        let mut page = page.clone();
        page.path = normalize_path(&page.path);
        if site.pages.iter().any(|p| p.path == page.path && p.id != page.id) {
            return Err(ServiceError::Conflict(format!(
                "another page already uses {}",
                page.path
            )));
        }
        let slot = site
            .page_mut(&page.id)
            .ok_or_else(|| ServiceError::NotFound(format!("page {}", page.id)))?;
        *slot = page.clone();
        self.store(site).await?;
        Ok(page)
    }

    async fn delete_page(&self, site_id: &str, page_id: &str) -> Result<(), ServiceError> {
        let mut site = self.load(site_id).await?;
        if site.page(page_id).is_none() {
            return Err(ServiceError::NotFound(format!("page {}", page_id)));
        }
        if site.pages.len() == 1 {
            return Err(ServiceError::InvalidInput(
                "a site must keep at least one page".into(),
            ));
        }
        site.pages.retain(|p| p.id != page_id);
        self.store(site).await?;
        Ok(())
    }

    async fn reorder_pages(
        &self,
        site_id: &str,
        page_ids: &[String],
    ) -> Result<Vec<Page>, ServiceError> {
        let mut site = self.load(site_id).await?;
        if !site.reorder_pages(page_ids) {
            return Err(ServiceError::InvalidInput(
                "page order must list every page exactly once".into(),
            ));
        }
        Ok(self.store(site).await?.pages)
    }

    async fn get_media(&self, site_id: &str) -> Result<Vec<MediaAsset>, ServiceError> {
        Ok(self.media.list_media(site_id).await?)
    }

    async fn upload_media(
        &self,
        site_id: &str,
        upload: MediaUpload,
    ) -> Result<MediaAsset, ServiceError> {
        self.load(site_id).await?;
        if upload.file_name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("file name is required".into()));
        }
        if upload.bytes.is_empty() {
            return Err(ServiceError::InvalidInput("file is empty".into()));
        }
        if upload.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ServiceError::InvalidInput(format!(
                "file is larger than {} bytes",
                MAX_UPLOAD_BYTES
            )));
        }
        let asset = MediaAsset {
            id: fresh_id(),
            site_id: site_id.to_string(),
            file_name: upload.file_name.trim().to_string(),
            url: format!(
                "data:{};base64,{}",
                upload.content_type,
                STANDARD.encode(&upload.bytes)
            ),
            content_type: upload.content_type,
            size: upload.bytes.len() as u64,
            uploaded_at: Utc::now(),
        };
        self.media.save_media(&asset).await?;
        Ok(asset)
    }

    async fn delete_media(&self, site_id: &str, asset_id: &str) -> Result<(), ServiceError> {
        if self.media.delete_media(site_id, asset_id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!("media {}", asset_id)))
        }
    }

    async fn get_default_manufacturers(&self) -> Result<Vec<Manufacturer>, ServiceError> {
        Ok(default_manufacturers())
    }

    async fn get_demo_inventory(&self) -> Result<Vec<Listing>, ServiceError> {
        Ok(demo_inventory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KvRepository, MemoryStore};

    fn service() -> LocalWebsiteService {
        let store = Arc::new(MemoryStore::new());
        let repo = Arc::new(KvRepository::new(store.clone()));
        let publisher = Publisher::new(
            store,
            Arc::new(MemoryStore::new()),
            repo.clone(),
            "http://localhost:3000",
        );
        LocalWebsiteService::new(repo.clone(), repo, publisher, "dealersites.app")
    }

    #[tokio::test]
    async fn test_create_site_validates_slug() {
        let service = service();
        let site = service.create_site("Main St Motors", "main-st-motors").await.unwrap();
        assert!(!site.manufacturers.is_empty());
        assert!(matches!(
            service.create_site("Other", "main-st-motors").await,
            Err(ServiceError::Conflict(_))
        ));
        assert!(matches!(
            service.create_site("Bad", "Bad Slug").await,
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_page_crud() {
        let service = service();
        let site = service.create_site("Demo", "demo").await.unwrap();
        let about = service.create_page(&site.id, "About", "/about").await.unwrap();
        let again = service.create_page(&site.id, "About", "/about").await.unwrap();
        assert_eq!(again.path, "/about-2");

        let mut renamed = about.clone();
        renamed.path = "/about-2".into();
        assert!(matches!(
            service.update_page(&site.id, &renamed).await,
            Err(ServiceError::Conflict(_))
        ));

        let pages = service.get_pages(&site.id).await.unwrap();
        let mut ids: Vec<String> = pages.iter().map(|p| p.id.clone()).collect();
        ids.reverse();
        let reordered = service.reorder_pages(&site.id, &ids).await.unwrap();
        assert_eq!(reordered[0].id, again.id);
        assert!(service.reorder_pages(&site.id, &ids[..1]).await.is_err());

        service.delete_page(&site.id, &about.id).await.unwrap();
        service.delete_page(&site.id, &again.id).await.unwrap();
        let last = service.get_pages(&site.id).await.unwrap();
        assert!(matches!(
            service.delete_page(&site.id, &last[0].id).await,
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_set_domain_records_only_on_success() {
        let service = service();
        let site = service.create_site("Demo", "demo").await.unwrap();
        let rejected = service
            .set_domain(&site.id, DomainConfig::Subdomain { subdomain: "www".into() })
            .await
            .unwrap();
        assert!(!rejected.success);
        assert!(service.get_site(&site.id).await.unwrap().domain.is_none());

        let accepted = service
            .set_domain(&site.id, DomainConfig::Subdomain { subdomain: "demo".into() })
            .await
            .unwrap();
        assert!(accepted.success);
        assert!(service.get_site(&site.id).await.unwrap().domain.is_some());
    }

    #[tokio::test]
    async fn test_media_upload() {
        let service = service();
        let site = service.create_site("Demo", "demo").await.unwrap();
        let asset = service
            .upload_media(
                &site.id,
                MediaUpload {
                    file_name: "logo.png".into(),
                    content_type: "image/png".into(),
                    bytes: vec![1, 2, 3],
                },
            )
            .await
            .unwrap();
        assert_eq!(asset.url, "data:image/png;base64,AQID");
        assert_eq!(asset.size, 3);
        assert_eq!(service.get_media(&site.id).await.unwrap().len(), 1);
        service.delete_media(&site.id, &asset.id).await.unwrap();
        assert!(service.delete_media(&site.id, &asset.id).await.is_err());
    }

    #[tokio::test]
    async fn test_publish_through_service() {
        let service = service();
        let site = service.create_site("Demo", "demo").await.unwrap();
        let receipt = service.publish_site(&site.id).await.unwrap();
        assert_eq!(receipt.url, "http://localhost:3000/s/demo/");
        assert!(service.get_site(&site.id).await.unwrap().is_published());
    }
}
