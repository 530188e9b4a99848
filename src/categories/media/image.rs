//! Image Block

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{link, metadata, non_empty, section, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    pub src: Option<String>,
    pub alt: String,
    pub caption: Option<String>,
    /// Optional click-through target
    pub image_link: Option<String>,
    pub open_in_new_tab: bool,
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::Image,
        "Image",
        "A single image with optional caption and link",
        "image",
        BlockCategory::Media,
        &["photo", "picture"],
    )
}

/// Grey tile shown where an image has not been chosen yet.
pub(crate) fn empty_tile(label: &str) -> Node {
    el("div")
        .class("image-placeholder")
        .attr("role", "img")
        .attr("aria-label", label)
        .text(label)
        .into()
}

impl BlockProps for ImageProps {
    fn block_type(&self) -> BlockType {
        BlockType::Image
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::image("src", "Image"),
            FieldControl::text("alt", "Alt text")
                .with_help_text("Describe the image for screen readers"),
            FieldControl::text("caption", "Caption"),
            FieldControl::url("imageLink", "Link"),
            FieldControl::toggle("openInNewTab", "Open link in new tab"),
        ]
    }

    fn view(&self, _ctx: &RenderContext<'_>) -> Node {
        let picture: Node = match non_empty(&self.src) {
            Some(src) => el("img")
                .attr("src", src)
                .attr("alt", self.alt.trim())
                .attr("loading", "lazy")
                .into(),
            None => empty_tile("No image selected"),
        };
        let picture: Node = match non_empty(&self.image_link) {
            Some(href) => link(href, self.open_in_new_tab).child(picture).into(),
            None => picture,
        };
        let mut figure = el("figure").child(picture);
        if let Some(caption) = non_empty(&self.caption) {
            figure = figure.child(el("figcaption").text(caption));
        }
        section(BlockType::Image).child(figure).into()
    }

    fn to_bag(&self) -> Map<String, Value> {
        props_to_bag(self)
    }
}
