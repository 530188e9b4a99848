//! Multi-Text Block
//!
//! Side-by-side text columns. The column list is edited with a bespoke
//! column editor rather than the generic inspector.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{heading, metadata, non_empty, placeholder, section, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextColumn {
    pub title: Option<String>,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiTextProps {
    pub title: Option<String>,
    pub columns: Vec<TextColumn>,
}

impl Default for MultiTextProps {
    fn default() -> Self {
        let column = |title: &str, body: &str| TextColumn {
            title: Some(title.into()),
            html: format!("<p>{}</p>", body),
        };
        Self {
            title: Some("Why Buy From Us".into()),
            columns: vec![
                column("Sales", "Transparent pricing on every vehicle."),
                column("Service", "Factory-trained technicians."),
                column("Finance", "Options for every credit profile."),
            ],
        }
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::MultiText,
        "Multi-Column Text",
        "Two to four columns of text side by side",
        "columns",
        BlockCategory::Content,
        &["columns", "grid", "copy"],
    )
}

impl BlockProps for MultiTextProps {
    fn block_type(&self) -> BlockType {
        BlockType::MultiText
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("title", "Heading"),
            FieldControl::list("columns", "Columns")
                .with_help_text("Edit columns with the column editor"),
        ]
    }

    fn view(&self, _ctx: &RenderContext<'_>) -> Node {
        let body: Node = if self.columns.is_empty() {
            placeholder("Add columns")
        } else {
            el("div")
                .class("columns")
                .attr("data-count", self.columns.len().to_string())
                .children(self.columns.iter().map(|column| {
                    let mut col = el("div").class("column");
                    if let Some(title) = non_empty(&column.title) {
                        col = col.child(el("h3").text(title));
                    }
                    Node::from(col.child(Node::raw(column.html.clone())))
                }))
                .into()
        };
        section(BlockType::MultiText)
            .children(heading(self.title.as_deref()))
            .child(body)
            .into()
    }

    fn to_bag(&self) -> Map<String, Value> {
        props_to_bag(self)
    }
}
