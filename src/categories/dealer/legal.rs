//! Legal Block
//!
//! Fine-print disclaimer rendered at reduced size at the foot of a page or
//! brochure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{metadata, placeholder, section, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegalProps {
    pub title: Option<String>,
    pub description: String,
}

impl Default for LegalProps {
    fn default() -> Self {
        Self {
            title: None,
            description: "Prices exclude tax, title, license and dealer fees. \
                          Vehicle availability subject to prior sale. \
                          See dealer for complete details."
                .into(),
        }
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::Legal,
        "Legal",
        "Disclaimer and fine print",
        "scale",
        BlockCategory::Dealer,
        &["disclaimer", "fine print"],
    )
}

impl BlockProps for LegalProps {
    fn block_type(&self) -> BlockType {
        BlockType::Legal
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("title", "Heading"),
            FieldControl::text_area("description", "Disclaimer").required(),
        ]
    }

    fn view(&self, ctx: &RenderContext<'_>) -> Node {
        let body: Node = if self.description.trim().is_empty() {
            placeholder("Add disclaimer text")
        } else {
            el("p").class("legal-text").text(self.description.trim()).into()
        };
        let mut block = section(BlockType::Legal);
        if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            block = block.child(el("h4").text(title));
        }
        let mut block = block.child(body);
        if !ctx.branding.dealer_name.is_empty() {
            block = block.child(
                el("small")
                    .class("legal-dealer")
                    .text(format!("© {}", ctx.branding.dealer_name)),
            );
        }
        block.into()
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
    fn test_legal_text_and_dealer() {
        let theme = Theme::default();
        let branding = Branding::new("Main St Motors");
        let ctx = RenderContext { theme: &theme, branding: &branding, listings: &[] };
        let text = LegalProps::default().view(&ctx).text_content();
        assert!(text.starts_with("Prices exclude tax"));
        assert!(text.ends_with("© Main St Motors"));
    }

    #[test]
    fn test_description_is_required() {
        let fields = LegalProps::default().fields();
        let description = fields.iter().find(|f| f.field == "description").unwrap();
        assert!(!description.validate(&serde_json::json!("")).valid);
    }
}
