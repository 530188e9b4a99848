//! Call-to-Action Block
//!
//! Headline, supporting copy and one button. Clicking the button navigates;
//! nothing happens at render time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{link, metadata, non_empty, placeholder, section, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;

/// Button styles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
}

impl ButtonVariant {
    pub const OPTIONS: &'static [&'static str] = &["primary", "secondary", "outline"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Outline => "outline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaProps {
    pub title: String,
    pub description: Option<String>,
    pub label: String,
    pub href: String,
    pub variant: ButtonVariant,
    pub open_in_new_tab: bool,
}

impl Default for CtaProps {
    fn default() -> Self {
        Self {
            title: "Ready for a Test Drive?".into(),
            description: Some("Schedule a visit and we'll have your vehicle ready.".into()),
            label: "Book Now".into(),
            href: "/contact".into(),
            variant: ButtonVariant::Primary,
            open_in_new_tab: false,
        }
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::Cta,
        "Call to Action",
        "Prompt visitors to take the next step with a prominent button",
        "mouse-pointer-click",
        BlockCategory::Content,
        &["button", "cta", "conversion"],
    )
}

impl BlockProps for CtaProps {
    fn block_type(&self) -> BlockType {
        BlockType::Cta
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("title", "Headline").required(),
            FieldControl::text_area("description", "Description"),
            FieldControl::text("label", "Button label").required(),
            FieldControl::url("href", "Button link"),
            FieldControl::select("variant", "Button style", ButtonVariant::OPTIONS),
            FieldControl::toggle("openInNewTab", "Open in new tab"),
        ]
    }

    fn view(&self, _ctx: &RenderContext<'_>) -> Node {
        let mut block = section(BlockType::Cta);
        block = match self.title.trim() {
            "" => block.child(placeholder("Add a headline")),
            title => block.child(el("h2").class("cta-title").text(title)),
        };
        if let Some(description) = non_empty(&self.description) {
            block = block.child(el("p").class("cta-description").text(description));
        }
        let label = match self.label.trim() {
            "" => "Button",
            label => label,
        };
        let href = match self.href.trim() {
            "" => "#",
            href => href,
        };
        let button = link(href, self.open_in_new_tab)
            .class(format!("button button-{}", self.variant.as_str()))
            .text(label);
        block.child(button).into()
    }

    fn to_bag(&self) -> Map<String, Value> {
        props_to_bag(self)
    }
}
