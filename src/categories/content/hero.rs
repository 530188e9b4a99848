//! Hero Block
//!
//! Full-width banner with a headline, optional subtitle, background image and
//! a single call-to-action button. Without a background image the banner
//! falls back to the theme's primary color.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{css_url, link, metadata, non_empty, placeholder, section, Alignment, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroProps {
    pub title: String,
    pub subtitle: Option<String>,
    pub background_image: Option<String>,
    pub button_label: Option<String>,
    pub button_link: Option<String>,
    pub alignment: Alignment,
}

impl Default for HeroProps {
    fn default() -> Self {
        Self {
            title: "Drive Home Something New".into(),
            subtitle: Some("Explore our latest inventory and seasonal offers.".into()),
            background_image: None,
            button_label: Some("View Inventory".into()),
            button_link: Some("/inventory".into()),
            alignment: Alignment::Center,
        }
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::Hero,
        "Hero",
        "Large banner with headline, background image and a call to action",
        "layout-template",
        BlockCategory::Content,
        &["banner", "header", "headline"],
    )
}

impl BlockProps for HeroProps {
    fn block_type(&self) -> BlockType {
        BlockType::Hero
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("title", "Headline").required(),
            FieldControl::text_area("subtitle", "Subtitle"),
            FieldControl::image("backgroundImage", "Background image"),
            FieldControl::text("buttonLabel", "Button label"),
            FieldControl::url("buttonLink", "Button link"),
            FieldControl::select("alignment", "Alignment", Alignment::OPTIONS),
        ]
    }

    fn view(&self, _ctx: &RenderContext<'_>) -> Node {
        let background = match non_empty(&self.background_image) {
            Some(src) => format!("background-image: url('{}'); background-size: cover;", css_url(src)),
            None => "background-color: var(--primary-color);".to_string(),
        };
        let mut inner = el("div").class("hero-inner");
        inner = match self.title.trim() {
            "" => inner.child(placeholder("Add a headline")),
            title => inner.child(el("h1").class("hero-title").text(title)),
        };
        if let Some(subtitle) = non_empty(&self.subtitle) {
            inner = inner.child(el("p").class("hero-subtitle").text(subtitle));
        }
        if let Some(label) = non_empty(&self.button_label) {
            let href = non_empty(&self.button_link).unwrap_or("#");
            inner = inner.child(link(href, false).class("button button-primary").text(label));
        }
        section(BlockType::Hero)
            .attr("data-align", self.alignment.as_str())
            .style(background)
            .child(inner)
            .into()
    }

    fn to_bag(&self) -> Map<String, Value> {
        props_to_bag(self)
    }
}
