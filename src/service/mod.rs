//! Website service collaborator
//!
//! The website builder talks to its backend only through [`WebsiteService`].
//! [`LocalWebsiteService`] implements it over the key-value store so the
//! builder works without a server.

pub mod inventory;
pub mod local;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::site::{DomainConfig, Listing, Manufacturer, MediaAsset, Page, Site};
use crate::runtime::domain::DomainResult;
use crate::runtime::publish::PublishReceipt;
use crate::storage::StoreError;

pub use local::LocalWebsiteService;

/// A file being added to a site's media library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Backend operations of the website builder
#[async_trait]
pub trait WebsiteService: Send + Sync {
    async fn list_sites(&self) -> Result<Vec<Site>, ServiceError>;

    async fn get_site(&self, site_id: &str) -> Result<Site, ServiceError>;

    async fn create_site(&self, name: &str, slug: &str) -> Result<Site, ServiceError>;

    /// Replace a site wholesale. Returns the stored copy.
    async fn update_site(&self, site: &Site) -> Result<Site, ServiceError>;

    async fn delete_site(&self, site_id: &str) -> Result<(), ServiceError>;

    async fn publish_site(&self, site_id: &str) -> Result<PublishReceipt, ServiceError>;

    /// Validate and record a domain request. A rejected request is a
    /// successful call with `success: false`.
    async fn set_domain(
        &self,
        site_id: &str,
        config: DomainConfig,
    ) -> Result<DomainResult, ServiceError>;

    async fn get_pages(&self, site_id: &str) -> Result<Vec<Page>, ServiceError>;

    async fn create_page(&self, site_id: &str, title: &str, path: &str)
        -> Result<Page, ServiceError>;

    async fn update_page(&self, site_id: &str, page: &Page) -> Result<Page, ServiceError>;

    async fn delete_page(&self, site_id: &str, page_id: &str) -> Result<(), ServiceError>;

    /// `page_ids` must be a permutation of the site's pages.
    async fn reorder_pages(
        &self,
        site_id: &str,
        page_ids: &[String],
    ) -> Result<Vec<Page>, ServiceError>;

    async fn get_media(&self, site_id: &str) -> Result<Vec<MediaAsset>, ServiceError>;

    async fn upload_media(
        &self,
        site_id: &str,
        upload: MediaUpload,
    ) -> Result<MediaAsset, ServiceError>;

    async fn delete_media(&self, site_id: &str, asset_id: &str) -> Result<(), ServiceError>;

    async fn get_default_manufacturers(&self) -> Result<Vec<Manufacturer>, ServiceError>;

    async fn get_demo_inventory(&self) -> Result<Vec<Listing>, ServiceError>;
}

/// Service errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation such as a taken slug or path
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}
