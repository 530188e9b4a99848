//! Features Block
//!
//! Grid of short feature highlights, each with an optional icon.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{heading, metadata, non_empty, placeholder, section, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureItem {
    pub icon: Option<String>,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturesProps {
    pub title: Option<String>,
    pub items: Vec<FeatureItem>,
}

impl Default for FeaturesProps {
    fn default() -> Self {
        let item = |icon: &str, title: &str, description: &str| FeatureItem {
            icon: Some(icon.into()),
            title: title.into(),
            description: Some(description.into()),
        };
        Self {
            title: Some("Key Features".into()),
            items: vec![
                item("shield", "Certified Pre-Owned", "172-point inspection on every vehicle"),
                item("wrench", "Complimentary Maintenance", "Two years of scheduled service"),
                item("badge-dollar-sign", "Price Match", "We'll match any local advertised price"),
            ],
        }
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::Features,
        "Features",
        "Grid of highlights with icons and short descriptions",
        "list-checks",
        BlockCategory::Content,
        &["benefits", "highlights", "grid"],
    )
}

impl BlockProps for FeaturesProps {
    fn block_type(&self) -> BlockType {
        BlockType::Features
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("title", "Heading"),
            FieldControl::list("items", "Features"),
        ]
    }

    fn view(&self, _ctx: &RenderContext<'_>) -> Node {
        let items: Vec<&FeatureItem> = self
            .items
            .iter()
            .filter(|i| !i.title.trim().is_empty() || non_empty(&i.description).is_some())
            .collect();
        let body: Node = if items.is_empty() {
            placeholder("Add features")
        } else {
            el("ul")
                .class("feature-grid")
                .children(items.into_iter().map(|item| {
                    let mut li = el("li").class("feature");
                    if let Some(icon) = non_empty(&item.icon) {
                        li = li.child(el("span").class("icon").attr("data-icon", icon));
                    }
                    li = li.child(el("h3").text(item.title.trim()));
                    if let Some(description) = non_empty(&item.description) {
                        li = li.child(el("p").text(description));
                    }
                    Node::from(li)
                }))
                .into()
        };
        section(BlockType::Features)
            .children(heading(self.title.as_deref()))
            .child(body)
            .into()
    }

    fn to_bag(&self) -> Map<String, Value> {
        props_to_bag(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::{Branding, Theme};

    #[test]
    fn test_blank_items_are_skipped() {
        let theme = Theme::default();
        let branding = Branding::default();
        let ctx = RenderContext { theme: &theme, branding: &branding, listings: &[] };
        let mut props = FeaturesProps::default();
        props.items.push(FeatureItem::default());
        let node = props.view(&ctx);
        assert_eq!(node.find_class("feature-grid").unwrap().children.len(), 3);

        props.items.clear();
        assert!(props.view(&ctx).find_class("placeholder").is_some());
    }
}
