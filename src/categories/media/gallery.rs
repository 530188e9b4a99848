//! Gallery Block
//!
//! Responsive grid of images. An empty gallery renders a row of empty-state
//! tiles so the editor preview keeps its shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::image::empty_tile;
use crate::categories::{heading, metadata, non_empty, section, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;

const MAX_COLUMNS: u8 = 6;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryImage {
    pub src: Option<String>,
    pub alt: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryProps {
    pub title: Option<String>,
    pub images: Vec<GalleryImage>,
    pub columns: u8,
}

impl Default for GalleryProps {
    fn default() -> Self {
        Self {
            title: Some("Gallery".into()),
            images: Vec::new(),
            columns: 3,
        }
    }
}

impl GalleryProps {
    /// Column count clamped to `1..=6`.
    pub fn column_count(&self) -> u8 {
        self.columns.clamp(1, MAX_COLUMNS)
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::Gallery,
        "Gallery",
        "Grid of photos for showrooms, events or vehicle walkarounds",
        "images",
        BlockCategory::Media,
        &["photos", "grid", "images"],
    )
}

impl BlockProps for GalleryProps {
    fn block_type(&self) -> BlockType {
        BlockType::Gallery
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("title", "Heading"),
            FieldControl::number("columns", "Columns"),
            FieldControl::list("images", "Images")
                .with_help_text("Add, remove and reorder images in the gallery editor"),
        ]
    }

    fn view(&self, _ctx: &RenderContext<'_>) -> Node {
        let columns = self.column_count();
        let tiles: Vec<Node> = if self.images.is_empty() {
            (0..columns).map(|_| empty_tile("Add images")).collect()
        } else {
            self.images
                .iter()
                .map(|image| {
                    let picture: Node = match non_empty(&image.src) {
                        Some(src) => el("img")
                            .attr("src", src)
                            .attr("alt", image.alt.trim())
                            .attr("loading", "lazy")
                            .into(),
                        None => empty_tile("No image"),
                    };
                    let mut figure = el("figure").class("gallery-item").child(picture);
                    if let Some(caption) = non_empty(&image.caption) {
                        figure = figure.child(el("figcaption").text(caption));
                    }
                    Node::from(figure)
                })
                .collect()
        };
        let grid_class = if self.images.is_empty() {
            "gallery-grid gallery-empty"
        } else {
            "gallery-grid"
        };
        section(BlockType::Gallery)
            .children(heading(self.title.as_deref()))
            .child(
                el("div")
                    .class(grid_class)
                    .style(format!("grid-template-columns: repeat({}, 1fr);", columns))
                    .children(tiles),
            )
            .into()
    }

    fn to_bag(&self) -> Map<String, Value> {
        props_to_bag(self)
    }
}
