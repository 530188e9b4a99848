//! Public resolution of sites and brochures
//!
//! A public URL is resolved by trying, in order, the session store (editor
//! previews), a `data` query parameter carrying the document itself, and
//! the persisted collections. The first hit wins. A miss is a value, not an
//! error, and storage failures along the way count as misses.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::site::{GeneratedBrochure, Site};
use crate::storage::{keys, read_json, read_records, KeyValueStore, StoreError};

use super::publish::PublishedSites;

/// Where a resolved document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionSource {
    /// Preview staged in the session store
    Session,
    /// Document embedded in the `data` query parameter
    DataParam,
    /// Published snapshot
    Published,
    /// Persisted draft collection
    Stored,
}

/// Result of a public lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Found { value: T, source: ResolutionSource },
    NotFound,
}

impl<T> Resolution<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }

    pub fn source(&self) -> Option<ResolutionSource> {
        match self {
            Resolution::Found { source, .. } => Some(*source),
            Resolution::NotFound => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Resolution::Found { value, .. } => Some(value),
            Resolution::NotFound => None,
        }
    }
}

/// Resolves public site and brochure URLs
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl Resolver {
    pub fn new(store: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self { store, session }
    }

    /// Resolve `/s/{slug}/`. `query` is the raw query string, with or
    /// without the leading `?`.
    pub fn resolve_site(&self, slug: &str, query: Option<&str>) -> Resolution<Site> {
        if let Some(site) = lookup::<Site>(self.session.as_ref(), &keys::preview_site(slug)) {
            return found(site, ResolutionSource::Session);
        }
        if let Some(mut site) = query.and_then(data_param::<Site>) {
            if site.slug == slug {
                // Head markup from a link is never trusted.
                site.tracking.custom_head_html = None;
                return found(site, ResolutionSource::DataParam);
            }
            debug!(slug, embedded = %site.slug, "ignoring data payload for another slug");
        }
        if let Some(mut published) = lookup::<PublishedSites>(self.store.as_ref(), keys::PUBLISHED_SITES) {
            if let Some(snapshot) = published.remove(slug) {
                return found(snapshot.site, ResolutionSource::Published);
            }
        }
        if let Some(site) = lookup_records::<Site>(self.store.as_ref(), keys::SITES)
            .into_iter()
            .find(|s| s.slug == slug)
        {
            return found(site, ResolutionSource::Stored);
        }
        debug!(slug, "site not found");
        Resolution::NotFound
    }

    /// Resolve `/b/{public_id}`.
    pub fn get_public_brochure(
        &self,
        public_id: &str,
        query: Option<&str>,
    ) -> Resolution<GeneratedBrochure> {
        if let Some(brochure) = lookup::<GeneratedBrochure>(
            self.session.as_ref(),
            &keys::brochure_preview(public_id),
        ) {
            return found(brochure, ResolutionSource::Session);
        }
        if let Some(brochure) = query.and_then(data_param::<GeneratedBrochure>) {
            if brochure.public_id == public_id {
                return found(brochure, ResolutionSource::DataParam);
            }
        }
        if let Some(brochure) = lookup_records::<GeneratedBrochure>(self.store.as_ref(), keys::BROCHURES)
            .into_iter()
            .find(|b| b.public_id == public_id)
        {
            return found(brochure, ResolutionSource::Stored);
        }
        debug!(public_id, "brochure not found");
        Resolution::NotFound
    }
}

fn found<T>(value: T, source: ResolutionSource) -> Resolution<T> {
    Resolution::Found { value, source }
}

fn lookup<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match read_json::<T>(store, key) {
        Ok(value) => value,
        Err(StoreError::Serialization(e)) => {
            warn!(key, error = %e, "ignoring unreadable stored value");
            None
        }
        Err(e) => {
            warn!(key, error = %e, "store unavailable during resolution");
            None
        }
    }
}

fn lookup_records<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    read_records(store, key).unwrap_or_else(|e| {
        warn!(key, error = %e, "ignoring unreadable stored collection");
        Vec::new()
    })
}

/// Decode the `data` query parameter: base64 or base64url JSON, padding
/// optional.
pub fn data_param<T: DeserializeOwned>(query: &str) -> Option<T> {
    let query = query.trim_start_matches('?');
    let raw = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "data")
        .map(|(_, value)| value.into_owned())?;
    decode_payload(&raw)
}

/// Decode a base64/base64url JSON payload.
pub fn decode_payload<T: DeserializeOwned>(raw: &str) -> Option<T> {
    // Form decoding turns `+` into a space; map it back.
    let normalized: String = raw
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            ' ' => '+',
            other => other,
        })
        .collect();
    let bytes = match STANDARD_NO_PAD.decode(normalized.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(error = %e, "data payload is not base64");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "data payload is not a valid document");
            None
        }
    }
}
