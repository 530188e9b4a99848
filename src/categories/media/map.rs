//! Map Block
//!
//! Embedded map for the dealership location. Coordinates win over the
//! address when both are set; with neither the block shows an empty state
//! instead of an iframe.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{heading, metadata, non_empty, placeholder, section, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;

const EMBED_BASE: &str = "https://maps.google.com/maps";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapProps {
    pub title: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub zoom: u8,
    pub height: u32,
}

impl Default for MapProps {
    fn default() -> Self {
        Self {
            title: Some("Find Us".into()),
            address: None,
            latitude: None,
            longitude: None,
            zoom: 14,
            height: 360,
        }
    }
}

impl MapProps {
    /// Embed URL for the configured location, if any.
    pub fn embed_url(&self) -> Option<String> {
        let query = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                format!("{},{}", lat, lng)
            }
            _ => non_empty(&self.address)?.to_string(),
        };
        Some(format!(
            "{}?q={}&z={}&output=embed",
            EMBED_BASE,
            urlencoding::encode(&query),
            self.zoom.clamp(1, 20)
        ))
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::Map,
        "Map",
        "Embedded map showing the dealership location",
        "map-pin",
        BlockCategory::Media,
        &["location", "directions", "address"],
    )
}

impl BlockProps for MapProps {
    fn block_type(&self) -> BlockType {
        BlockType::Map
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("title", "Heading"),
            FieldControl::text("address", "Address"),
            FieldControl::number("latitude", "Latitude"),
            FieldControl::number("longitude", "Longitude"),
            FieldControl::number("zoom", "Zoom"),
            FieldControl::number("height", "Height (px)"),
        ]
    }

    fn view(&self, ctx: &RenderContext<'_>) -> Node {
        let body: Node = match self.embed_url() {
            Some(src) => el("iframe")
                .class("map-embed")
                .attr("src", src)
                .attr("height", self.height.max(120).to_string())
                .attr("loading", "lazy")
                .attr("title", format!("Map of {}", ctx.branding.dealer_name))
                .into(),
            None => placeholder("Add an address or coordinates"),
        };
        section(BlockType::Map)
            .children(heading(self.title.as_deref()))
            .child(body)
            .into()
    }

    fn to_bag(&self) -> Map<String, Value> {
        props_to_bag(self)
    }
}
