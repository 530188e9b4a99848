//! Brochure generation
//!
//! Binds a template to a selection of inventory listings and freezes the
//! result into a [`GeneratedBrochure`] with public links and zeroed
//! analytics. Only the analytics counters change after creation.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::site::{
    BrochureAnalytics, BrochureEvent, GeneratedBrochure, Listing, Template,
};
use crate::core::{fresh_id, public_id};
use crate::storage::{BrochureRepository, StoreError};

use super::publish::Publisher;

/// Generates and tracks brochures
#[derive(Clone)]
pub struct BrochureGenerator {
    repo: Arc<dyn BrochureRepository>,
    publisher: Publisher,
}

impl BrochureGenerator {
    pub fn new(repo: Arc<dyn BrochureRepository>, publisher: Publisher) -> Self {
        Self { repo, publisher }
    }

    /// Build a brochure without persisting it. Listing ids missing from
    /// `inventory` are skipped.
    pub fn build(
        &self,
        template: &Template,
        listing_ids: &[String],
        inventory: &[Listing],
    ) -> GeneratedBrochure {
        let mut listings = Vec::with_capacity(listing_ids.len());
        for id in listing_ids {
            match inventory.iter().find(|l| &l.id == id) {
                Some(listing) => listings.push(listing.clone()),
                None => warn!(listing_id = %id, "skipping unknown listing"),
            }
        }
        let public_id = public_id();
        GeneratedBrochure {
            id: fresh_id(),
            pdf_url: self.publisher.brochure_pdf_url(&public_id),
            share_url: self.publisher.brochure_url(&public_id),
            public_id,
            template_id: template.id.clone(),
            template_name: template.name.clone(),
            listing_ids: listings.iter().map(|l| l.id.clone()).collect(),
            blocks: template.ordered_blocks().into_iter().cloned().collect(),
            listings,
            theme: template.theme.clone(),
            branding: template.branding.clone(),
            analytics: BrochureAnalytics::default(),
            created_at: Utc::now(),
        }
    }

    /// Build and persist a brochure.
    pub async fn generate(
        &self,
        template: &Template,
        listing_ids: &[String],
        inventory: &[Listing],
    ) -> Result<GeneratedBrochure, StoreError> {
        let brochure = self.build(template, listing_ids, inventory);
        self.repo.save_brochure(&brochure).await?;
        info!(
            public_id = %brochure.public_id,
            template = %brochure.template_name,
            listings = brochure.listings.len(),
            "generated brochure"
        );
        Ok(brochure)
    }

    pub async fn record_view(&self, brochure_id: &str) -> Result<Option<BrochureAnalytics>, StoreError> {
        self.record(brochure_id, BrochureEvent::View).await
    }

    pub async fn record_download(&self, brochure_id: &str) -> Result<Option<BrochureAnalytics>, StoreError> {
        self.record(brochure_id, BrochureEvent::Download).await
    }

    pub async fn record_share(&self, brochure_id: &str) -> Result<Option<BrochureAnalytics>, StoreError> {
        self.record(brochure_id, BrochureEvent::Share).await
    }

    /// Increment a counter. Returns `None` for an unknown brochure.
    pub async fn record(
        &self,
        brochure_id: &str,
        event: BrochureEvent,
    ) -> Result<Option<BrochureAnalytics>, StoreError> {
        let Some(mut brochure) = self.repo.get_brochure(brochure_id).await? else {
            return Ok(None);
        };
        brochure.analytics.record(event);
        self.repo.save_brochure(&brochure).await?;
        Ok(Some(brochure.analytics))
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }
}
