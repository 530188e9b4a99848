//! Text Block
//!
//! A heading plus authored rich text. The HTML comes from the editor's rich
//! text control and is emitted as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{heading, metadata, placeholder, section, Alignment, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    pub title: Option<String>,
    pub html: String,
    pub alignment: Alignment,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            title: Some("About Our Dealership".into()),
            html: "<p>Family owned and serving our community for over 30 years.</p>".into(),
            alignment: Alignment::Left,
        }
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::Text,
        "Text",
        "Heading with a paragraph of rich text",
        "type",
        BlockCategory::Content,
        &["paragraph", "copy", "rich text"],
    )
}

impl BlockProps for TextProps {
    fn block_type(&self) -> BlockType {
        BlockType::Text
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("title", "Heading"),
            FieldControl::text_area("html", "Body"),
            FieldControl::select("alignment", "Alignment", Alignment::OPTIONS),
        ]
    }

    fn view(&self, _ctx: &RenderContext<'_>) -> Node {
        let body = if self.html.trim().is_empty() {
            placeholder("Add some text")
        } else {
            el("div").class("rich-text").child(Node::raw(self.html.clone())).into()
        };
        section(BlockType::Text)
            .attr("data-align", self.alignment.as_str())
            .children(heading(self.title.as_deref()))
            .child(body)
            .into()
    }

    fn to_bag(&self) -> Map<String, Value> {
        props_to_bag(self)
    }
}
