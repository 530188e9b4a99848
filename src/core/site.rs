//! Document records: sites, pages, brochure templates and generated brochures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::block::{Block, BlockContent, BlockType};
use super::field::ValidationResult;
use super::fresh_id;
use super::theme::{Branding, Theme};

/// Per-page or site-wide SEO metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub og_image: Option<String>,
    pub keywords: Vec<String>,
    pub no_index: bool,
}

impl SeoMeta {
    /// Overlay `self` on top of `defaults`, field by field.
    pub fn merged_over(&self, defaults: &SeoMeta) -> SeoMeta {
        SeoMeta {
            title: self.title.clone().or_else(|| defaults.title.clone()),
            description: self
                .description
                .clone()
                .or_else(|| defaults.description.clone()),
            og_image: self.og_image.clone().or_else(|| defaults.og_image.clone()),
            keywords: if self.keywords.is_empty() {
                defaults.keywords.clone()
            } else {
                self.keywords.clone()
            },
            no_index: self.no_index || defaults.no_index,
        }
    }
}

/// A navigation entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub open_in_new_tab: bool,
}

impl NavItem {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            open_in_new_tab: false,
        }
    }
}

/// Site navigation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavConfig {
    /// Extra items appended after the visible pages
    pub items: Vec<NavItem>,
    /// Show manufacturer logos in the header
    pub show_manufacturers: bool,
    pub sticky: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            show_manufacturers: true,
            sticky: true,
        }
    }
}

/// Third-party tracking snippets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackingConfig {
    pub google_analytics_id: Option<String>,
    pub facebook_pixel_id: Option<String>,
    pub custom_head_html: Option<String>,
}

/// Requested public address for a site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DomainConfig {
    /// `{subdomain}.{platform domain}`
    Subdomain { subdomain: String },
    /// A dealer-owned domain
    #[serde(rename_all = "camelCase")]
    CustomDomain { domain: String },
    /// `{subdomain}.{base domain}` on a dealer-owned base
    #[serde(rename_all = "camelCase")]
    SubdomainOnCustomBase { subdomain: String, base_domain: String },
    /// A dealer inside a multi-tenant dealer-group domain
    #[serde(rename_all = "camelCase")]
    DealerGroup { group_domain: String, dealer_slug: String },
}

/// A manufacturer shown in site navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
}

/// An uploaded asset in a site's media library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub id: String,
    pub site_id: String,
    pub file_name: String,
    pub url: String,
    pub content_type: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// One entry in a site's publish history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    pub number: u32,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A page of a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    /// Unique within the owning site
    pub path: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub seo: Option<SeoMeta>,
    #[serde(default = "default_true")]
    pub is_visible: bool,
}

fn default_true() -> bool {
    true
}

impl Page {
    pub fn new(title: impl Into<String>, path: &str) -> Self {
        Self {
            id: fresh_id(),
            title: title.into(),
            path: normalize_path(path),
            blocks: Vec::new(),
            seo: None,
            is_visible: true,
        }
    }

    /// Blocks sorted by ascending `order`.
    pub fn ordered_blocks(&self) -> Vec<&Block> {
        ordered(&self.blocks)
    }
}

/// A multi-page marketing website
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    /// Globally unique, used in the public URL
    pub slug: String,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub branding: Branding,
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub seo: SeoMeta,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub domain: Option<DomainConfig>,
    #[serde(default)]
    pub manufacturers: Vec<Manufacturer>,
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Site {
    /// A new draft site with a home page.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let name = name.into();
        let now = Utc::now();
        let mut home = Page::new("Home", "/");
        home.blocks.push(Block::new(BlockContent::default_for(BlockType::Hero), 0));
        Self {
            id: fresh_id(),
            branding: Branding::new(name.clone()),
            name,
            slug: slug.into(),
            pages: vec![home],
            theme: Theme::default(),
            nav: NavConfig::default(),
            seo: SeoMeta::default(),
            tracking: TrackingConfig::default(),
            domain: None,
            manufacturers: Vec::new(),
            versions: Vec::new(),
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    pub fn page_by_path(&self, path: &str) -> Option<&Page> {
        let path = normalize_path(path);
        self.pages.iter().find(|p| p.path == path)
    }

    /// Return `path` normalized, suffixed with `-2`, `-3`, ... until it does
    /// not collide with another page. An existing numeric suffix is replaced
    /// rather than extended. `except` is ignored when checking.
    pub fn unique_path(&self, path: &str, except: Option<&str>) -> String {
        let base = normalize_path(path);
        let taken = |candidate: &str| {
            self.pages
                .iter()
                .any(|p| p.path == candidate && Some(p.id.as_str()) != except)
        };
        if !taken(&base) {
            return base;
        }
        let stem = if base == "/" { "/home" } else { strip_counter(&base) };
        (2..)
            .map(|n| format!("{}-{}", stem, n))
            .find(|candidate| !taken(candidate))
            .unwrap_or(base)
    }

    /// The next publish version number.
    pub fn next_version(&self) -> u32 {
        self.versions.iter().map(|v| v.number).max().unwrap_or(0) + 1
    }

    /// Reorder pages to follow `page_ids`. Unless `page_ids` names every
    /// page exactly once the pages are left as they were and `false` is
    /// returned.
    pub fn reorder_pages(&mut self, page_ids: &[String]) -> bool {
        let unique: HashSet<&String> = page_ids.iter().collect();
        if page_ids.len() != self.pages.len() || unique.len() != page_ids.len() {
            return false;
        }
        let reordered: Option<Vec<Page>> = page_ids
            .iter()
            .map(|id| self.page(id).cloned())
            .collect();
        match reordered {
            Some(pages) => {
                self.pages = pages;
                true
            }
            None => false,
        }
    }
}

/// A reusable brochure blueprint: a single implicit page of blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Older records call the block list `sections`.
    #[serde(default, alias = "sections")]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub branding: Branding,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id(),
            name: name.into(),
            description: None,
            blocks: Vec::new(),
            theme: Theme::default(),
            branding: Branding::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn ordered_blocks(&self) -> Vec<&Block> {
        ordered(&self.blocks)
    }
}

/// An inventory listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub year: u16,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub trim: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub mileage: Option<u64>,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub stock_number: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
}

impl Listing {
    /// `2024 Ford F-150 XLT`
    pub fn title(&self) -> String {
        let mut title = format!("{} {} {}", self.year, self.make, self.model);
        if let Some(trim) = self.trim.as_deref().filter(|t| !t.is_empty()) {
            title.push(' ');
            title.push_str(trim);
        }
        title
    }
}

/// Counters attached to a generated brochure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrochureAnalytics {
    pub views: u64,
    pub downloads: u64,
    pub shares: u64,
}

/// Interactions counted on a generated brochure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrochureEvent {
    View,
    Download,
    Share,
}

impl BrochureAnalytics {
    pub fn record(&mut self, event: BrochureEvent) {
        match event {
            BrochureEvent::View => self.views += 1,
            BrochureEvent::Download => self.downloads += 1,
            BrochureEvent::Share => self.shares += 1,
        }
    }
}

/// Snapshot produced once from a template and a listing selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBrochure {
    pub id: String,
    pub public_id: String,
    pub template_id: String,
    pub template_name: String,
    pub listing_ids: Vec<String>,
    pub blocks: Vec<Block>,
    pub listings: Vec<Listing>,
    pub theme: Theme,
    pub branding: Branding,
    pub pdf_url: String,
    pub share_url: String,
    #[serde(default)]
    pub analytics: BrochureAnalytics,
    pub created_at: DateTime<Utc>,
}

fn ordered(blocks: &[Block]) -> Vec<&Block> {
    let mut sorted: Vec<&Block> = blocks.iter().collect();
    sorted.sort_by_key(|b| b.order);
    sorted
}

/// `/about-2` becomes `/about`. Paths without a numeric suffix are unchanged.
fn strip_counter(path: &str) -> &str {
    match path.rsplit_once('-') {
        Some((stem, n))
            if stem.len() > 1 && !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) =>
        {
            stem
        }
        _ => path,
    }
}

/// Normalize a page path: leading slash, no trailing slash, lowercase,
/// spaces turned into dashes.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    let segments: Vec<String> = trimmed
        .split('/')
        .filter(|s| !s.is_empty())
        .map(slugify)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}", segments.join("/"))
}

/// Turn arbitrary text into a URL slug: `"Main St. Motors"` -> `"main-st-motors"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Advisory check on a site slug.
pub fn validate_slug(slug: &str) -> ValidationResult {
    if slug.is_empty() {
        return ValidationResult::error("Slug is required");
    }
    if slug.len() > 63 {
        return ValidationResult::error("Slug must be at most 63 characters");
    }
    if slugify(slug) != slug {
        return ValidationResult::error(
            "Slug may only contain lowercase letters, digits and single dashes",
        );
    }
    ValidationResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Main St. Motors"), "main-st-motors");
        assert_eq!(slugify("  --Hello__World--  "), "hello-world");
        assert_eq!(slugify("Ünïcode Cars"), "n-code-cars");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("main-st-motors").valid);
        assert!(!validate_slug("").valid);
        assert!(!validate_slug("Main St").valid);
        assert!(!validate_slug("trailing-").valid);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("About Us"), "/about-us");
        assert_eq!(normalize_path("/service//specials/"), "/service/specials");
    }

    #[test]
    fn test_unique_path() {
        let mut site = Site::new("Demo", "demo");
        assert_eq!(site.unique_path("/", None), "/home-2");
        let home_id = site.pages[0].id.clone();
        assert_eq!(site.unique_path("/", Some(&home_id)), "/");
        site.pages.push(Page::new("About", "/about"));
        assert_eq!(site.unique_path("about", None), "/about-2");
        assert_eq!(site.unique_path("contact", None), "/contact");

        site.pages.push(Page::new("About", "/about-2"));
        assert_eq!(site.unique_path("/about-2", None), "/about-3");
        assert_eq!(site.unique_path("/about", None), "/about-3");
    }

    #[test]
    fn test_reorder_pages() {
        let mut site = Site::new("Demo", "demo");
        site.pages.push(Page::new("About", "/about"));
        let home = site.pages[0].id.clone();
        let about = site.pages[1].id.clone();
        assert!(!site.reorder_pages(&[about.clone()]));
        assert!(!site.reorder_pages(&[about.clone(), about.clone()]));
        assert!(!site.reorder_pages(&[about.clone(), "ghost".into()]));
        assert_eq!(site.pages[0].id, home);
        assert!(site.reorder_pages(&[about.clone(), home]));
        assert_eq!(site.pages[0].id, about);
    }

    #[test]
    fn test_new_site_has_home_page() {
        let site = Site::new("Main St Motors", "main-st-motors");
        assert_eq!(site.pages.len(), 1);
        assert_eq!(site.pages[0].path, "/");
        assert_eq!(site.pages[0].blocks.len(), 1);
        assert!(!site.is_published());
        assert_eq!(site.next_version(), 1);
        assert_eq!(site.branding.dealer_name, "Main St Motors");
    }

    #[test]
    fn test_seo_merge() {
        let defaults = SeoMeta {
            title: Some("Dealer".into()),
            description: Some("Best cars".into()),
            keywords: vec!["cars".into()],
            ..SeoMeta::default()
        };
        let page = SeoMeta {
            title: Some("Service".into()),
            ..SeoMeta::default()
        };
        let merged = page.merged_over(&defaults);
        assert_eq!(merged.title.as_deref(), Some("Service"));
        assert_eq!(merged.description.as_deref(), Some("Best cars"));
        assert_eq!(merged.keywords, vec!["cars".to_string()]);
    }

    #[test]
    fn test_template_accepts_sections_alias() {
        let raw = json!({
            "id": "t1",
            "name": "Spring",
            "sections": [{"id": "a", "type": "hero", "content": {}, "order": 0}],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });
        let template: Template = serde_json::from_value(raw).unwrap();
        assert_eq!(template.blocks.len(), 1);
    }

    #[test]
    fn test_domain_config_shape() {
        let config = DomainConfig::SubdomainOnCustomBase {
            subdomain: "ford".into(),
            base_domain: "mainstmotors.com".into(),
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["kind"], "subdomain-on-custom-base");
        assert_eq!(value["baseDomain"], "mainstmotors.com");
    }

    #[test]
    fn test_listing_title_and_analytics() {
        let listing = Listing {
            id: "l1".into(),
            year: 2024,
            make: "Ford".into(),
            model: "F-150".into(),
            trim: Some("XLT".into()),
            price: None,
            mileage: None,
            vin: None,
            stock_number: None,
            image_url: None,
            condition: None,
        };
        assert_eq!(listing.title(), "2024 Ford F-150 XLT");

        let mut analytics = BrochureAnalytics::default();
        analytics.record(BrochureEvent::View);
        analytics.record(BrochureEvent::View);
        analytics.record(BrochureEvent::Share);
        assert_eq!(analytics.views, 2);
        assert_eq!(analytics.shares, 1);
        assert_eq!(analytics.downloads, 0);
    }
}
