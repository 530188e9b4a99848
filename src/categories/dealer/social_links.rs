//! Social Links Block

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{heading, link, metadata, placeholder, section, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;

/// Networks with a known icon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    X,
    Youtube,
    Tiktok,
    Linkedin,
    #[default]
    Website,
}

impl SocialPlatform {
    pub fn display_name(&self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::X => "X",
            SocialPlatform::Youtube => "YouTube",
            SocialPlatform::Tiktok => "TikTok",
            SocialPlatform::Linkedin => "LinkedIn",
            SocialPlatform::Website => "Website",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLinksProps {
    pub title: Option<String>,
    pub links: Vec<SocialLink>,
    pub open_in_new_tab: bool,
}

impl Default for SocialLinksProps {
    fn default() -> Self {
        let link = |platform, href: &str| SocialLink {
            platform,
            href: href.into(),
        };
        Self {
            title: Some("Follow Us".into()),
            links: vec![
                link(SocialPlatform::Facebook, "https://facebook.com/"),
                link(SocialPlatform::Instagram, "https://instagram.com/"),
                link(SocialPlatform::Youtube, "https://youtube.com/"),
            ],
            open_in_new_tab: true,
        }
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::SocialLinks,
        "Social Links",
        "Icons linking to the dealership's social profiles",
        "share-2",
        BlockCategory::Dealer,
        &["facebook", "instagram", "youtube", "social"],
    )
}

impl BlockProps for SocialLinksProps {
    fn block_type(&self) -> BlockType {
        BlockType::SocialLinks
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("title", "Heading"),
            FieldControl::list("links", "Links"),
            FieldControl::toggle("openInNewTab", "Open links in new tab"),
        ]
    }

    fn view(&self, _ctx: &RenderContext<'_>) -> Node {
        let items: Vec<Node> = self
            .links
            .iter()
            .filter(|l| !l.href.trim().is_empty())
            .map(|l| {
                let name = l.platform.display_name();
                let anchor = link(l.href.trim(), self.open_in_new_tab)
                    .class(format!("social-link social-{}", name.to_lowercase()))
                    .attr("aria-label", name)
                    .text(name);
                Node::from(el("li").child(anchor))
            })
            .collect();
        let body: Node = if items.is_empty() {
            placeholder("Add social links")
        } else {
            el("ul").class("social-links").children(items).into()
        };
        section(BlockType::SocialLinks)
            .children(heading(self.title.as_deref()))
            .child(body)
            .into()
    }

    fn to_bag(&self) -> Map<String, Value> {
        props_to_bag(self)
    }
}
