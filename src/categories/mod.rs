//! Block categories and per-type implementations
//!
//! Each block type lives in its own module under the category it belongs to.
//! A module owns the typed properties struct, its default content, its field
//! list, its palette metadata and its view function.

pub mod content;
pub mod dealer;
pub mod media;
pub mod vehicle;

use serde::{Deserialize, Serialize};

use crate::core::block::BlockType;
use crate::core::node::{el, Element, Node};
use crate::core::registry::BlockTypeInfo;

/// Block category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockCategory {
    /// Headlines, copy and calls to action
    Content,
    /// Images, galleries and maps
    Media,
    /// Vehicle specs, pricing and inventory
    Vehicle,
    /// Dealer contact details, social links and disclaimers
    Dealer,
}

impl BlockCategory {
    /// Get a human-readable name for the category
    pub fn display_name(&self) -> &str {
        match self {
            BlockCategory::Content => "Content",
            BlockCategory::Media => "Media",
            BlockCategory::Vehicle => "Vehicle",
            BlockCategory::Dealer => "Dealer",
        }
    }
}

impl std::fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Palette metadata for a block type.
pub fn block_info(block_type: BlockType) -> BlockTypeInfo {
    match block_type {
        BlockType::Hero => content::hero::info(),
        BlockType::Text => content::text::info(),
        BlockType::MultiText => content::multi_text::info(),
        BlockType::Cta => content::cta::info(),
        BlockType::Features => content::features::info(),
        BlockType::Image => media::image::info(),
        BlockType::Gallery => media::gallery::info(),
        BlockType::Map => media::map::info(),
        BlockType::Specs => vehicle::specs::info(),
        BlockType::Price => vehicle::price::info(),
        BlockType::Inventory => vehicle::inventory::info(),
        BlockType::Contact => dealer::contact::info(),
        BlockType::SocialLinks => dealer::social_links::info(),
        BlockType::Legal => dealer::legal::info(),
    }
}

pub(crate) fn metadata(
    block_type: BlockType,
    label: &str,
    description: &str,
    icon: &str,
    category: BlockCategory,
    tags: &[&str],
) -> BlockTypeInfo {
    BlockTypeInfo {
        block_type,
        label: label.into(),
        description: description.into(),
        icon: icon.into(),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

// ---------------------------------------------------------------------------
// Shared view helpers
// ---------------------------------------------------------------------------

/// Horizontal alignment of block content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub const OPTIONS: &'static [&'static str] = &["left", "center", "right"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Outer `<section>` every block view is wrapped in.
pub(crate) fn section(block_type: BlockType) -> Element {
    el("section").class(format!("block block-{}", block_type.tag()))
}

/// Optional block heading.
pub(crate) fn heading(title: Option<&str>) -> Option<Node> {
    title
        .filter(|t| !t.trim().is_empty())
        .map(|t| el("h2").class("block-title").text(t).into())
}

/// Visible stand-in for missing content.
pub(crate) fn placeholder(message: &str) -> Node {
    el("div").class("placeholder").text(message).into()
}

/// Anchor that opens in a new tab when asked to.
pub(crate) fn link(href: &str, open_in_new_tab: bool) -> Element {
    let anchor = el("a").attr("href", href);
    if open_in_new_tab {
        anchor.attr("target", "_blank").attr("rel", "noopener noreferrer")
    } else {
        anchor
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Make a URL safe to embed in a CSS `url('...')`.
pub(crate) fn css_url(url: &str) -> String {
    url.chars()
        .filter(|c| !matches!(c, '\'' | '"' | '(' | ')' | '\\' | ';') && !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(BlockCategory::Vehicle.to_string(), "Vehicle");
        assert_eq!(BlockCategory::Dealer.display_name(), "Dealer");
    }

    #[test]
    fn test_block_info_matches_type() {
        for block_type in BlockType::ALL {
            assert_eq!(block_info(block_type).block_type, block_type);
        }
    }

    #[test]
    fn test_link_new_tab() {
        let anchor = link("https://example.com", true);
        assert_eq!(anchor.get_attr("target"), Some("_blank"));
        assert!(link("/about", false).get_attr("target").is_none());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("  x ".into())), Some("x"));
        assert_eq!(non_empty(&Some("   ".into())), None);
        assert_eq!(non_empty(&None), None);
    }
}
