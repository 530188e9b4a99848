//! Typed repositories over the key-value store
//!
//! The editors never touch storage keys directly; they are handed one of
//! these traits. [`KvRepository`] implements all of them on top of any
//! [`KeyValueStore`], keeping each collection as a JSON array.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::{keys, read_records, write_json, KeyValueStore, StoreError};
use crate::core::site::{GeneratedBrochure, MediaAsset, Site, Template};

/// Persistence for websites
#[async_trait]
pub trait SiteRepository: Send + Sync {
    async fn list_sites(&self) -> Result<Vec<Site>, StoreError>;

    async fn get_site(&self, id: &str) -> Result<Option<Site>, StoreError>;

    async fn find_site_by_slug(&self, slug: &str) -> Result<Option<Site>, StoreError>;

    /// Insert or replace by id.
    async fn save_site(&self, site: &Site) -> Result<(), StoreError>;

    /// Returns whether a site was removed.
    async fn delete_site(&self, id: &str) -> Result<bool, StoreError>;
}

/// Persistence for brochure templates
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn list_templates(&self) -> Result<Vec<Template>, StoreError>;

    async fn get_template(&self, id: &str) -> Result<Option<Template>, StoreError>;

    async fn save_template(&self, template: &Template) -> Result<(), StoreError>;

    async fn delete_template(&self, id: &str) -> Result<bool, StoreError>;
}

/// Persistence for generated brochures
#[async_trait]
pub trait BrochureRepository: Send + Sync {
    async fn list_brochures(&self) -> Result<Vec<GeneratedBrochure>, StoreError>;

    async fn get_brochure(&self, id: &str) -> Result<Option<GeneratedBrochure>, StoreError>;

    async fn find_brochure_by_public_id(
        &self,
        public_id: &str,
    ) -> Result<Option<GeneratedBrochure>, StoreError>;

    async fn save_brochure(&self, brochure: &GeneratedBrochure) -> Result<(), StoreError>;
}

/// Persistence for uploaded media
#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn list_media(&self, site_id: &str) -> Result<Vec<MediaAsset>, StoreError>;

    async fn save_media(&self, asset: &MediaAsset) -> Result<(), StoreError>;

    async fn delete_media(&self, site_id: &str, asset_id: &str) -> Result<bool, StoreError>;
}

/// Records stored in an id-keyed collection
trait Record: Serialize + DeserializeOwned + Clone {
    fn record_id(&self) -> &str;
}

impl Record for Site {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for Template {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for GeneratedBrochure {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for MediaAsset {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Store-backed implementation of every repository trait
#[derive(Clone)]
pub struct KvRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    fn load<T: Record>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        read_records(self.store.as_ref(), key)
    }

    fn upsert<T: Record>(&self, key: &str, record: &T) -> Result<(), StoreError> {
        let mut records: Vec<T> = self.load(key)?;
        match records.iter_mut().find(|r| r.record_id() == record.record_id()) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        debug!(key, id = record.record_id(), "upsert record");
        write_json(self.store.as_ref(), key, &records)
    }

    fn remove_where<T: Record>(
        &self,
        key: &str,
        predicate: impl Fn(&T) -> bool,
    ) -> Result<bool, StoreError> {
        let mut records: Vec<T> = self.load(key)?;
        let before = records.len();
        records.retain(|r| !predicate(r));
        if records.len() == before {
            return Ok(false);
        }
        write_json(self.store.as_ref(), key, &records)?;
        Ok(true)
    }

    fn find<T: Record>(&self, key: &str, predicate: impl Fn(&T) -> bool) -> Result<Option<T>, StoreError> {
        Ok(self.load::<T>(key)?.into_iter().find(|r| predicate(r)))
    }
}

#[async_trait]
impl SiteRepository for KvRepository {
    async fn list_sites(&self) -> Result<Vec<Site>, StoreError> {
        self.load(keys::SITES)
    }

    async fn get_site(&self, id: &str) -> Result<Option<Site>, StoreError> {
        self.find(keys::SITES, |s: &Site| s.id == id)
    }

    async fn find_site_by_slug(&self, slug: &str) -> Result<Option<Site>, StoreError> {
        self.find(keys::SITES, |s: &Site| s.slug == slug)
    }

    async fn save_site(&self, site: &Site) -> Result<(), StoreError> {
        self.upsert(keys::SITES, site)
    }

    async fn delete_site(&self, id: &str) -> Result<bool, StoreError> {
        self.remove_where(keys::SITES, |s: &Site| s.id == id)
    }
}

#[async_trait]
impl TemplateRepository for KvRepository {
    async fn list_templates(&self) -> Result<Vec<Template>, StoreError> {
        self.load(keys::TEMPLATES)
    }

    async fn get_template(&self, id: &str) -> Result<Option<Template>, StoreError> {
        self.find(keys::TEMPLATES, |t: &Template| t.id == id)
    }

    async fn save_template(&self, template: &Template) -> Result<(), StoreError> {
        self.upsert(keys::TEMPLATES, template)
    }

    async fn delete_template(&self, id: &str) -> Result<bool, StoreError> {
        self.remove_where(keys::TEMPLATES, |t: &Template| t.id == id)
    }
}

#[async_trait]
impl BrochureRepository for KvRepository {
    async fn list_brochures(&self) -> Result<Vec<GeneratedBrochure>, StoreError> {
        self.load(keys::BROCHURES)
    }

    async fn get_brochure(&self, id: &str) -> Result<Option<GeneratedBrochure>, StoreError> {
        self.find(keys::BROCHURES, |b: &GeneratedBrochure| b.id == id)
    }

    async fn find_brochure_by_public_id(
        &self,
        public_id: &str,
    ) -> Result<Option<GeneratedBrochure>, StoreError> {
        self.find(keys::BROCHURES, |b: &GeneratedBrochure| b.public_id == public_id)
    }

    async fn save_brochure(&self, brochure: &GeneratedBrochure) -> Result<(), StoreError> {
        self.upsert(keys::BROCHURES, brochure)
    }
}

#[async_trait]
impl MediaRepository for KvRepository {
    async fn list_media(&self, site_id: &str) -> Result<Vec<MediaAsset>, StoreError> {
        Ok(self
            .load::<MediaAsset>(keys::MEDIA)?
            .into_iter()
            .filter(|m| m.site_id == site_id)
            .collect())
    }

    async fn save_media(&self, asset: &MediaAsset) -> Result<(), StoreError> {
        self.upsert(keys::MEDIA, asset)
    }

    async fn delete_media(&self, site_id: &str, asset_id: &str) -> Result<bool, StoreError> {
        self.remove_where(keys::MEDIA, |m: &MediaAsset| {
            m.site_id == site_id && m.id == asset_id
        })
    }
}
