//! Full HTML documents for published pages and brochures
//!
//! Wraps rendered blocks in a document shell: theme CSS variables, SEO and
//! Open Graph tags, tracking snippets, navigation and a footer.

use crate::core::node::{el, Element, Node};
use crate::core::site::{GeneratedBrochure, Page, SeoMeta, Site};
use crate::core::theme::{Branding, Theme};

use super::renderer::Renderer;

const DOCTYPE: &str = "<!DOCTYPE html>";

/// Render one page of a site as a standalone HTML document.
pub fn render_site_page(site: &Site, page: &Page) -> String {
    let seo = page
        .seo
        .as_ref()
        .map(|s| s.merged_over(&site.seo))
        .unwrap_or_else(|| site.seo.clone());
    let title = seo
        .title
        .clone()
        .unwrap_or_else(|| format!("{} | {}", page.title, site.name));

    let mut head = document_head(&title, &seo, &site.theme);
    head = head.children(tracking_snippets(site));

    let main = el("main").child(Node::raw(
        Renderer::new(&site.theme, &site.branding).render_html(&page.blocks),
    ));
    let body = el("body")
        .style(site.theme.css_variables())
        .child(site_header(site, page))
        .child(main)
        .child(footer(&site.branding));
    finish(head, body)
}

/// Render a generated brochure as a standalone HTML document.
pub fn render_brochure(brochure: &GeneratedBrochure) -> String {
    let seo = SeoMeta {
        title: Some(format!(
            "{} | {}",
            brochure.template_name, brochure.branding.dealer_name
        )),
        no_index: true,
        ..SeoMeta::default()
    };
    let title = seo.title.clone().unwrap_or_default();
    let head = document_head(&title, &seo, &brochure.theme)
        .child(el("link").attr("rel", "alternate").attr("type", "application/pdf").attr("href", brochure.pdf_url.as_str()));
    let blocks = Renderer::new(&brochure.theme, &brochure.branding)
        .with_listings(&brochure.listings)
        .render_html(&brochure.blocks);
    let body = el("body")
        .class("brochure")
        .style(brochure.theme.css_variables())
        .child(brand_mark(&brochure.branding))
        .child(el("main").child(Node::raw(blocks)))
        .child(footer(&brochure.branding));
    finish(head, body)
}

fn finish(head: Element, body: Element) -> String {
    let html: Node = el("html").attr("lang", "en").child(head).child(body).into();
    format!("{}{}", DOCTYPE, html.to_html())
}

fn document_head(title: &str, seo: &SeoMeta, theme: &Theme) -> Element {
    let mut head = el("head")
        .child(el("meta").attr("charset", "utf-8"))
        .child(
            el("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(el("title").text(title))
        .child(el("meta").attr("property", "og:title").attr("content", title));
    if let Some(description) = seo.description.as_deref() {
        head = head
            .child(el("meta").attr("name", "description").attr("content", description))
            .child(el("meta").attr("property", "og:description").attr("content", description));
    }
    if let Some(image) = seo.og_image.as_deref() {
        head = head.child(el("meta").attr("property", "og:image").attr("content", image));
    }
    if !seo.keywords.is_empty() {
        head = head.child(
            el("meta")
                .attr("name", "keywords")
                .attr("content", seo.keywords.join(", ")),
        );
    }
    if seo.no_index {
        head = head.child(el("meta").attr("name", "robots").attr("content", "noindex, nofollow"));
    }
    head.child(el("style").child(Node::raw(format!(
        ":root {{ {} }} body {{ font-family: var(--font-family); }}",
        theme.css_variables()
    ))))
}

/// Keep only characters that are valid in tracking ids.
fn tracking_id(raw: &str) -> Option<String> {
    let id: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    (!id.is_empty()).then_some(id)
}

fn tracking_snippets(site: &Site) -> Vec<Node> {
    let tracking = &site.tracking;
    let mut nodes = Vec::new();
    if let Some(id) = tracking.google_analytics_id.as_deref().and_then(tracking_id) {
        nodes.push(
            el("script")
                .attr("async", "")
                .attr("src", format!("https://www.googletagmanager.com/gtag/js?id={}", id))
                .into(),
        );
        nodes.push(
            el("script")
                .child(Node::raw(format!(
                    "window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}\
                     gtag('js',new Date());gtag('config','{}');",
                    id
                )))
                .into(),
        );
    }
    if let Some(id) = tracking.facebook_pixel_id.as_deref().and_then(tracking_id) {
        nodes.push(
            el("script")
                .attr("src", "https://connect.facebook.net/en_US/fbevents.js")
                .attr("async", "")
                .into(),
        );
        nodes.push(
            el("script")
                .child(Node::raw(format!(
                    "window.fbq=window.fbq||function(){{(fbq.q=fbq.q||[]).push(arguments)}};\
                     fbq('init','{}');fbq('track','PageView');",
                    id
                )))
                .into(),
        );
    }
    if let Some(custom) = tracking.custom_head_html.as_deref().filter(|h| !h.trim().is_empty()) {
        nodes.push(Node::raw(custom));
    }
    nodes
}

fn brand_mark(branding: &Branding) -> Element {
    let mut brand = el("div").class("brand");
    if let Some(logo) = branding.logo_url.as_deref().filter(|l| !l.is_empty()) {
        brand = brand.child(
            el("img")
                .class("brand-logo")
                .attr("src", logo)
                .attr("alt", branding.dealer_name.as_str()),
        );
    }
    brand.child(el("span").class("brand-name").text(branding.dealer_name.as_str()))
}

fn site_header(site: &Site, current: &Page) -> Element {
    let mut items: Vec<Node> = site
        .pages
        .iter()
        .filter(|p| p.is_visible)
        .map(|p| {
            let mut anchor = el("a").attr("href", p.path.as_str()).text(p.title.as_str());
            if p.id == current.id {
                anchor = anchor.attr("aria-current", "page");
            }
            Node::from(el("li").child(anchor))
        })
        .collect();
    items.extend(site.nav.items.iter().map(|item| {
        let mut anchor = el("a").attr("href", item.href.as_str()).text(item.label.as_str());
        if item.open_in_new_tab {
            anchor = anchor.attr("target", "_blank").attr("rel", "noopener noreferrer");
        }
        Node::from(el("li").child(anchor))
    }));

    let class = if site.nav.sticky {
        "site-header sticky"
    } else {
        "site-header"
    };
    let mut header = el("header")
        .class(class)
        .child(brand_mark(&site.branding))
        .child(el("nav").child(el("ul").children(items)));
    if site.nav.show_manufacturers && !site.manufacturers.is_empty() {
        header = header.child(
            el("ul").class("manufacturers").children(site.manufacturers.iter().map(|m| {
                let label: Node = match m.logo_url.as_deref() {
                    Some(logo) => el("img").attr("src", logo).attr("alt", m.name.as_str()).into(),
                    None => Node::text(m.name.as_str()),
                };
                Node::from(el("li").child(label))
            })),
        );
    }
    header
}

fn footer(branding: &Branding) -> Element {
    let mut footer = el("footer").class("site-footer");
    if let Some(address) = branding.address.as_deref() {
        footer = footer.child(el("p").text(address));
    }
    if let Some(phone) = branding.phone.as_deref() {
        footer = footer.child(el("p").text(phone));
    }
    footer.child(el("small").text(format!("© {}", branding.dealer_name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::site::{NavItem, TrackingConfig};

    #[test]
    fn test_site_page_document() {
        let mut site = Site::new("Main St Motors", "main-st-motors");
        site.seo.description = Some("Family owned since 1962".into());
        site.nav.items.push(NavItem::new("Blog", "https://blog.example.com"));
        let mut hidden = Page::new("Hidden", "/hidden");
        hidden.is_visible = false;
        site.pages.push(hidden);
        let page = site.pages[0].clone();

        let html = render_site_page(&site, &page);
        assert!(html.starts_with("<!DOCTYPE html><html lang=\"en\">"));
        assert!(html.contains("<title>Home | Main St Motors</title>"));
        assert!(html.contains("content=\"Family owned since 1962\""));
        assert!(html.contains("--primary-color: #1d4ed8;"));
        assert!(html.contains("aria-current=\"page\""));
        assert!(html.contains("https://blog.example.com"));
        assert!(!html.contains("/hidden"));
        assert!(html.contains("block-hero"));
    }

    #[test]
    fn test_page_seo_overrides_site() {
        let mut site = Site::new("Main St Motors", "main-st-motors");
        site.seo.title = Some("Main St Motors".into());
        let mut page = site.pages[0].clone();
        page.seo = Some(SeoMeta {
            title: Some("Service Specials".into()),
            no_index: true,
            ..SeoMeta::default()
        });
        let html = render_site_page(&site, &page);
        assert!(html.contains("<title>Service Specials</title>"));
        assert!(html.contains("noindex, nofollow"));
    }

    #[test]
    fn test_tracking_ids_are_sanitized() {
        let mut site = Site::new("Demo", "demo");
        site.tracking = TrackingConfig {
            google_analytics_id: Some("G-ABC123');alert(1)//".into()),
            facebook_pixel_id: Some("  ".into()),
            custom_head_html: None,
        };
        let nodes = tracking_snippets(&site);
        assert_eq!(nodes.len(), 2);
        let html: String = nodes.iter().map(Node::to_html).collect();
        assert!(html.contains("gtag('config','G-ABC123alert1')"));
        assert!(!html.contains("fbq"));
    }
}
