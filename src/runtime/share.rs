//! Share links for published sites and brochures
//!
//! Produces `mailto:`/`sms:` links and social intent URLs. Every component is
//! percent-encoded; nothing here performs I/O.

use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::core::site::{GeneratedBrochure, Site};

/// Social networks with a share intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Facebook,
    /// X, formerly Twitter
    X,
    Linkedin,
    Whatsapp,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 4] = [
        SharePlatform::Facebook,
        SharePlatform::X,
        SharePlatform::Linkedin,
        SharePlatform::Whatsapp,
    ];
}

/// What is being shared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareContent {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
}

impl ShareContent {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            url: url.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn for_brochure(brochure: &GeneratedBrochure) -> Self {
        let title = if brochure.branding.dealer_name.is_empty() {
            brochure.template_name.clone()
        } else {
            format!("{} from {}", brochure.template_name, brochure.branding.dealer_name)
        };
        let mut content = Self::new(title, brochure.share_url.as_str());
        if !brochure.listings.is_empty() {
            let names: Vec<String> = brochure.listings.iter().map(|l| l.title()).collect();
            content.description = Some(names.join(", "));
        }
        content
    }

    pub fn for_site(site: &Site, url: impl Into<String>) -> Self {
        Self {
            title: site.seo.title.clone().unwrap_or_else(|| site.name.clone()),
            description: site.seo.description.clone(),
            url: url.into(),
        }
    }

    /// `mailto:` link with the title as subject and the description and URL
    /// as body.
    pub fn mailto(&self, recipient: Option<&str>) -> String {
        let to = recipient.map(|r| encode(r.trim()).into_owned()).unwrap_or_default();
        format!(
            "mailto:{}?subject={}&body={}",
            to,
            encode(&self.title),
            encode(&self.body())
        )
    }

    pub fn sms(&self) -> String {
        format!("sms:?&body={}", encode(&format!("{} {}", self.title, self.url)))
    }

    /// Intent URL for a social network.
    pub fn intent(&self, platform: SharePlatform) -> String {
        let url = encode(&self.url);
        match platform {
            SharePlatform::Facebook => {
                format!("https://www.facebook.com/sharer/sharer.php?u={}", url)
            }
            SharePlatform::X => format!(
                "https://twitter.com/intent/tweet?url={}&text={}",
                url,
                encode(&self.title)
            ),
            SharePlatform::Linkedin => {
                format!("https://www.linkedin.com/sharing/share-offsite/?url={}", url)
            }
            SharePlatform::Whatsapp => format!(
                "https://wa.me/?text={}",
                encode(&format!("{} {}", self.title, self.url))
            ),
        }
    }

    /// Plain text for copying to the clipboard.
    pub fn clipboard_text(&self) -> String {
        let mut text = self.title.clone();
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            text.push('\n');
            text.push_str(description);
        }
        text.push('\n');
        text.push_str(&self.url);
        text
    }

    fn body(&self) -> String {
        match self.description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => format!("{}\n\n{}", description, self.url),
            None => self.url.clone(),
        }
    }
}
