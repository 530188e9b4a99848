//! Specs Block
//!
//! Two-column label/value table of vehicle specifications.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{heading, metadata, placeholder, section, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::format::MISSING_VALUE;
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecItem {
    pub label: String,
    pub value: String,
}

impl SpecItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecsProps {
    pub title: Option<String>,
    pub items: Vec<SpecItem>,
}

impl Default for SpecsProps {
    fn default() -> Self {
        Self {
            title: Some("Specifications".into()),
            items: vec![
                SpecItem::new("Engine", "2.5L 4-Cylinder"),
                SpecItem::new("Transmission", "8-Speed Automatic"),
                SpecItem::new("Drivetrain", "All-Wheel Drive"),
                SpecItem::new("Fuel Economy", "28 city / 35 hwy"),
            ],
        }
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::Specs,
        "Specifications",
        "Table of vehicle specifications such as engine and fuel economy",
        "clipboard-list",
        BlockCategory::Vehicle,
        &["engine", "mpg", "table"],
    )
}

impl BlockProps for SpecsProps {
    fn block_type(&self) -> BlockType {
        BlockType::Specs
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("title", "Heading"),
            FieldControl::list("items", "Specifications"),
        ]
    }

    fn view(&self, _ctx: &RenderContext<'_>) -> Node {
        let rows: Vec<Node> = self
            .items
            .iter()
            .filter(|item| !item.label.trim().is_empty())
            .map(|item| {
                let value = match item.value.trim() {
                    "" => MISSING_VALUE,
                    v => v,
                };
                Node::from(
                    el("tr")
                        .child(el("th").attr("scope", "row").text(item.label.trim()))
                        .child(el("td").text(value)),
                )
            })
            .collect();
        let body: Node = if rows.is_empty() {
            placeholder("Add specifications")
        } else {
            el("table")
                .class("spec-table")
                .child(el("tbody").children(rows))
                .into()
        };
        section(BlockType::Specs)
            .children(heading(self.title.as_deref()))
            .child(body)
            .into()
    }

    fn to_bag(&self) -> Map<String, Value> {
        props_to_bag(self)
    }
}
