//! Publishing and public URLs
//!
//! Publishing writes an immutable snapshot of a site under its slug in the
//! published-sites map, then saves the site itself with `published_at` set
//! and a new version appended. If the second write fails the snapshot is
//! rolled back and the caller's site is left untouched.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::fresh_id;
use crate::core::site::{GeneratedBrochure, Site, Version};
use crate::storage::{keys, read_json, write_json, KeyValueStore, SiteRepository, StoreError};

/// A published copy of a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedSnapshot {
    pub site: Site,
    pub published_at: DateTime<Utc>,
    pub version: u32,
}

/// Map of slug to snapshot as stored
pub type PublishedSites = BTreeMap<String, PublishedSnapshot>;

/// What a successful publish returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    pub site_id: String,
    pub slug: String,
    pub url: String,
    pub version: u32,
    pub published_at: DateTime<Utc>,
}

/// Publishes sites and computes public URLs
#[derive(Clone)]
pub struct Publisher {
    store: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    sites: Arc<dyn SiteRepository>,
    origin: String,
}

impl Publisher {
    /// `store` holds persistent collections; `session` holds previews.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
        sites: Arc<dyn SiteRepository>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            store,
            session,
            sites,
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// `{origin}/s/{slug}/`
    pub fn site_url(&self, slug: &str) -> String {
        format!("{}/s/{}/", self.origin, slug)
    }

    /// `{origin}/b/{public_id}`
    pub fn brochure_url(&self, public_id: &str) -> String {
        format!("{}/b/{}", self.origin, public_id)
    }

    /// `{origin}/b/{public_id}.pdf`
    pub fn brochure_pdf_url(&self, public_id: &str) -> String {
        format!("{}/b/{}.pdf", self.origin, public_id)
    }

    /// Publish `site`. On success the site carries the new `published_at`
    /// and version; on failure it is unchanged.
    pub async fn publish(
        &self,
        site: &mut Site,
        note: Option<String>,
    ) -> Result<PublishReceipt, StoreError> {
        let now = Utc::now();
        let mut updated = site.clone();
        let number = updated.next_version();
        updated.versions.push(Version {
            id: fresh_id(),
            number,
            published_at: now,
            note,
        });
        updated.published_at = Some(now);
        updated.updated_at = now;

        let previous = self.published_sites()?;
        let mut published = previous.clone();
        published.insert(
            updated.slug.clone(),
            PublishedSnapshot {
                site: updated.clone(),
                published_at: now,
                version: number,
            },
        );
        write_json(self.store.as_ref(), keys::PUBLISHED_SITES, &published)?;

        if let Err(e) = self.sites.save_site(&updated).await {
            warn!(slug = %updated.slug, error = %e, "site save failed after publish; rolling back snapshot");
            if let Err(rollback) = write_json(self.store.as_ref(), keys::PUBLISHED_SITES, &previous) {
                warn!(slug = %updated.slug, error = %rollback, "snapshot rollback failed");
            }
            return Err(e);
        }

        info!(slug = %updated.slug, version = number, "published site");
        let receipt = PublishReceipt {
            site_id: updated.id.clone(),
            slug: updated.slug.clone(),
            url: self.site_url(&updated.slug),
            version: number,
            published_at: now,
        };
        *site = updated;
        Ok(receipt)
    }

    pub fn published_sites(&self) -> Result<PublishedSites, StoreError> {
        Ok(read_json(self.store.as_ref(), keys::PUBLISHED_SITES)?.unwrap_or_default())
    }

    /// The published snapshot for `slug`, if any.
    pub fn published(&self, slug: &str) -> Result<Option<PublishedSnapshot>, StoreError> {
        Ok(self.published_sites()?.remove(slug))
    }

    /// Stage an unpublished preview in the session store and return its URL.
    pub fn preview(&self, site: &Site) -> Result<String, StoreError> {
        write_json(self.session.as_ref(), &keys::preview_site(&site.slug), site)?;
        Ok(format!("{}?preview=1", self.site_url(&site.slug)))
    }

    /// Self-contained preview URL carrying the site in a `data` parameter.
    pub fn preview_data_url(&self, site: &Site) -> Result<String, StoreError> {
        let json = serde_json::to_vec(site)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(format!(
            "{}?data={}",
            self.site_url(&site.slug),
            URL_SAFE_NO_PAD.encode(json)
        ))
    }

    /// Stage a brochure preview in the session store and return its URL.
    pub fn preview_brochure(&self, brochure: &GeneratedBrochure) -> Result<String, StoreError> {
        write_json(
            self.session.as_ref(),
            &keys::brochure_preview(&brochure.public_id),
            brochure,
        )?;
        Ok(self.brochure_url(&brochure.public_id))
    }
}
