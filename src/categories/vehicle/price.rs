//! Price Block
//!
//! Headline price with optional MSRP strike-through and disclaimer. A missing
//! or malformed amount renders as an em dash.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{metadata, non_empty, section, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::format::format_price;
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceProps {
    pub label: String,
    pub amount: Option<f64>,
    /// ISO 4217 code
    pub currency: String,
    pub msrp: Option<f64>,
    pub disclaimer: Option<String>,
}

impl Default for PriceProps {
    fn default() -> Self {
        Self {
            label: "Starting at".into(),
            amount: None,
            currency: "USD".into(),
            msrp: None,
            disclaimer: Some("Plus tax, title and license. See dealer for details.".into()),
        }
    }
}

impl PriceProps {
    /// Savings against MSRP, when both prices are known and MSRP is higher.
    pub fn savings(&self) -> Option<f64> {
        match (self.amount, self.msrp) {
            (Some(amount), Some(msrp)) if msrp > amount => Some(msrp - amount),
            _ => None,
        }
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::Price,
        "Price",
        "Featured price with MSRP comparison and disclaimer",
        "tag",
        BlockCategory::Vehicle,
        &["pricing", "msrp", "offer"],
    )
}

impl BlockProps for PriceProps {
    fn block_type(&self) -> BlockType {
        BlockType::Price
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("label", "Label"),
            FieldControl::number("amount", "Price"),
            FieldControl::select("currency", "Currency", &["USD", "CAD", "AUD", "EUR", "GBP", "MXN"]),
            FieldControl::number("msrp", "MSRP"),
            FieldControl::text_area("disclaimer", "Disclaimer"),
        ]
    }

    fn view(&self, _ctx: &RenderContext<'_>) -> Node {
        let mut body = el("div").class("price-box");
        if !self.label.trim().is_empty() {
            body = body.child(el("span").class("price-label").text(self.label.trim()));
        }
        body = body.child(
            el("strong")
                .class("price-amount")
                .text(format_price(self.amount, &self.currency)),
        );
        if let Some(savings) = self.savings() {
            body = body
                .child(
                    el("s")
                        .class("price-msrp")
                        .text(format!("MSRP {}", format_price(self.msrp, &self.currency))),
                )
                .child(
                    el("span")
                        .class("price-savings")
                        .text(format!("Save {}", format_price(Some(savings), &self.currency))),
                );
        }
        if let Some(disclaimer) = non_empty(&self.disclaimer) {
            body = body.child(el("small").class("price-disclaimer").text(disclaimer));
        }
        section(BlockType::Price).child(body).into()
    }

    fn to_bag(&self) -> Map<String, Value> {
        props_to_bag(self)
    }
}
