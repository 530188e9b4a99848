//! Inventory Block
//!
//! Card grid of vehicles from the dealer's inventory. Listings come from the
//! render context; the block only stores which ones to show.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::media::image::empty_tile;
use crate::categories::{heading, metadata, non_empty, placeholder, section, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::format::{format_mileage, format_price};
use crate::core::node::{el, Node};
use crate::core::registry::BlockTypeInfo;
use crate::core::site::Listing;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryProps {
    pub title: Option<String>,
    /// Explicit selection; empty means "the first `max_items` listings"
    pub listing_ids: Vec<String>,
    pub max_items: usize,
    pub show_price: bool,
    pub show_mileage: bool,
    pub view_all_link: Option<String>,
}

impl Default for InventoryProps {
    fn default() -> Self {
        Self {
            title: Some("Featured Inventory".into()),
            listing_ids: Vec::new(),
            max_items: 6,
            show_price: true,
            show_mileage: true,
            view_all_link: Some("/inventory".into()),
        }
    }
}

impl InventoryProps {
    /// Listings this block displays, in selection order.
    pub fn select<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        let limit = self.max_items.max(1);
        if self.listing_ids.is_empty() {
            return listings.iter().take(limit).collect();
        }
        self.listing_ids
            .iter()
            .filter_map(|id| listings.iter().find(|l| &l.id == id))
            .take(limit)
            .collect()
    }

    fn card(&self, listing: &Listing) -> Node {
        let picture: Node = match non_empty(&listing.image_url) {
            Some(src) => el("img")
                .attr("src", src)
                .attr("alt", listing.title())
                .attr("loading", "lazy")
                .into(),
            None => empty_tile("Photo coming soon"),
        };
        let mut card = el("article")
            .class("vehicle-card")
            .attr("data-listing-id", listing.id.as_str())
            .child(picture)
            .child(el("h3").text(listing.title()));
        if self.show_price {
            card = card.child(
                el("p")
                    .class("vehicle-price")
                    .text(format_price(listing.price, "USD")),
            );
        }
        if self.show_mileage {
            card = card.child(
                el("p")
                    .class("vehicle-mileage")
                    .text(format_mileage(listing.mileage)),
            );
        }
        if let Some(stock) = non_empty(&listing.stock_number) {
            card = card.child(el("small").text(format!("Stock #{}", stock)));
        }
        card.into()
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::Inventory,
        "Inventory",
        "Grid of vehicles pulled from your current inventory",
        "car",
        BlockCategory::Vehicle,
        &["vehicles", "listings", "stock"],
    )
}

impl BlockProps for InventoryProps {
    fn block_type(&self) -> BlockType {
        BlockType::Inventory
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("title", "Heading"),
            FieldControl::list("listingIds", "Vehicles")
                .with_help_text("Leave empty to show the newest vehicles"),
            FieldControl::number("maxItems", "Maximum vehicles"),
            FieldControl::toggle("showPrice", "Show price"),
            FieldControl::toggle("showMileage", "Show mileage"),
            FieldControl::url("viewAllLink", "View all link"),
        ]
    }

    fn view(&self, ctx: &RenderContext<'_>) -> Node {
        let selected = self.select(ctx.listings);
        let body: Node = if selected.is_empty() {
            placeholder("No vehicles to show")
        } else {
            el("div")
                .class("inventory-grid")
                .children(selected.into_iter().map(|listing| self.card(listing)))
                .into()
        };
        let mut block = section(BlockType::Inventory)
            .children(heading(self.title.as_deref()))
            .child(body);
        if let Some(href) = non_empty(&self.view_all_link) {
            block = block.child(
                el("a")
                    .class("view-all")
                    .attr("href", href)
                    .text("View all inventory"),
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

    fn listing(id: &str, price: Option<f64>) -> Listing {
        Listing {
            id: id.into(),
            year: 2023,
            make: "Toyota".into(),
            model: "RAV4".into(),
            trim: None,
            price,
            mileage: Some(12500),
            vin: None,
            stock_number: Some(format!("S-{}", id)),
            image_url: None,
            condition: Some("used".into()),
        }
    }

    #[test]
    fn test_select_by_ids_skips_unknown() {
        let listings = vec![listing("a", None), listing("b", None), listing("c", None)];
        let props = InventoryProps {
            listing_ids: vec!["c".into(), "zzz".into(), "a".into()],
            ..InventoryProps::default()
        };
        let ids: Vec<&str> = props.select(&listings).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_select_first_n() {
        let listings: Vec<Listing> = (0..10).map(|i| listing(&i.to_string(), None)).collect();
        let props = InventoryProps { max_items: 4, ..InventoryProps::default() };
        assert_eq!(props.select(&listings).len(), 4);
    }

    #[test]
    fn test_cards_render_price_and_mileage() {
        let listings = vec![listing("a", Some(31999.0)), listing("b", None)];
        let theme = Theme::default();
        let branding = Branding::default();
        let ctx = RenderContext { theme: &theme, branding: &branding, listings: &listings };
        let text = InventoryProps::default().view(&ctx).text_content();
        assert!(text.contains("2023 Toyota RAV4"));
        assert!(text.contains("$31,999"));
        assert!(text.contains("12,500 mi"));
        assert!(text.contains("—"));
    }

    #[test]
    fn test_no_listings_placeholder() {
        let theme = Theme::default();
        let branding = Branding::default();
        let ctx = RenderContext { theme: &theme, branding: &branding, listings: &[] };
        let node = InventoryProps::default().view(&ctx);
        assert!(node.find_class("placeholder").is_some());
        assert!(node.find_class("view-all").is_some());
    }
}
