//! Block model and the typed content enum
//!
//! A block is an ordered, typed, independently editable unit of page or
//! brochure content. Its type tag and property bag are held together as one
//! [`BlockContent`] variant, so the compiler checks that every block type has
//! a default, a field list and a view. Content that names a type this build
//! does not know is kept verbatim in [`BlockContent::Unknown`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::field::FieldControl;
use super::node::Node;
use super::site::Listing;
use super::theme::{Branding, Theme};
use super::BlockId;
use crate::categories::content::{CtaProps, FeaturesProps, HeroProps, MultiTextProps, TextProps};
use crate::categories::dealer::{ContactProps, LegalProps, SocialLinksProps};
use crate::categories::media::{GalleryProps, ImageProps, MapProps};
use crate::categories::vehicle::{InventoryProps, PriceProps, SpecsProps};

/// The fixed block vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Hero,
    Text,
    MultiText,
    Cta,
    Features,
    Image,
    Gallery,
    Map,
    Specs,
    Price,
    Inventory,
    Contact,
    SocialLinks,
    Legal,
}

impl BlockType {
    /// Every block type in palette order.
    pub const ALL: [BlockType; 14] = [
        BlockType::Hero,
        BlockType::Text,
        BlockType::MultiText,
        BlockType::Cta,
        BlockType::Features,
        BlockType::Image,
        BlockType::Gallery,
        BlockType::Map,
        BlockType::Specs,
        BlockType::Price,
        BlockType::Inventory,
        BlockType::Contact,
        BlockType::SocialLinks,
        BlockType::Legal,
    ];

    /// The tag written to storage.
    pub fn tag(&self) -> &'static str {
        match self {
            BlockType::Hero => "hero",
            BlockType::Text => "text",
            BlockType::MultiText => "multi-text",
            BlockType::Cta => "cta",
            BlockType::Features => "features",
            BlockType::Image => "image",
            BlockType::Gallery => "gallery",
            BlockType::Map => "map",
            BlockType::Specs => "specs",
            BlockType::Price => "price",
            BlockType::Inventory => "inventory",
            BlockType::Contact => "contact",
            BlockType::SocialLinks => "social-links",
            BlockType::Legal => "legal",
        }
    }

    /// Parse a stored tag. Accepts the camelCase and snake_case spellings
    /// older editors wrote.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized: String = tag
            .trim()
            .chars()
            .flat_map(|c| c.to_lowercase())
            .filter(|c| *c != '-' && *c != '_')
            .collect();
        let block_type = match normalized.as_str() {
            "hero" => BlockType::Hero,
            "text" | "richtext" => BlockType::Text,
            "multitext" => BlockType::MultiText,
            "cta" | "calltoaction" => BlockType::Cta,
            "features" => BlockType::Features,
            "image" => BlockType::Image,
            "gallery" => BlockType::Gallery,
            "map" => BlockType::Map,
            "specs" | "specifications" => BlockType::Specs,
            "price" | "pricing" => BlockType::Price,
            "inventory" => BlockType::Inventory,
            "contact" => BlockType::Contact,
            "sociallinks" | "social" => BlockType::SocialLinks,
            "legal" | "disclaimer" => BlockType::Legal,
            _ => return None,
        };
        Some(block_type)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BlockType {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| BlockError::UnknownType(s.to_string()))
    }
}

/// Shared inputs to every block view
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub branding: &'a Branding,
    /// Inventory available to inventory blocks
    pub listings: &'a [Listing],
}

/// Behaviour every typed block properties struct provides
pub trait BlockProps: Send + Sync {
    /// The block type these properties belong to
    fn block_type(&self) -> BlockType;

    /// Declarative list of editable fields
    fn fields(&self) -> Vec<FieldControl>;

    /// Pure view function. Missing fields degrade to placeholders.
    fn view(&self, ctx: &RenderContext<'_>) -> Node;

    /// Serialize back to an untyped property bag
    fn to_bag(&self) -> Map<String, Value>;
}

/// Typed block content, one variant per block type
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Hero(HeroProps),
    Text(TextProps),
    MultiText(MultiTextProps),
    Cta(CtaProps),
    Features(FeaturesProps),
    Image(ImageProps),
    Gallery(GalleryProps),
    Map(MapProps),
    Specs(SpecsProps),
    Price(PriceProps),
    Inventory(InventoryProps),
    Contact(ContactProps),
    SocialLinks(SocialLinksProps),
    Legal(LegalProps),
    /// Content whose type tag is not part of the vocabulary
    Unknown {
        type_tag: String,
        content: Map<String, Value>,
    },
}

impl BlockContent {
    /// Default content for a block type
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Hero => BlockContent::Hero(HeroProps::default()),
            BlockType::Text => BlockContent::Text(TextProps::default()),
            BlockType::MultiText => BlockContent::MultiText(MultiTextProps::default()),
            BlockType::Cta => BlockContent::Cta(CtaProps::default()),
            BlockType::Features => BlockContent::Features(FeaturesProps::default()),
            BlockType::Image => BlockContent::Image(ImageProps::default()),
            BlockType::Gallery => BlockContent::Gallery(GalleryProps::default()),
            BlockType::Map => BlockContent::Map(MapProps::default()),
            BlockType::Specs => BlockContent::Specs(SpecsProps::default()),
            BlockType::Price => BlockContent::Price(PriceProps::default()),
            BlockType::Inventory => BlockContent::Inventory(InventoryProps::default()),
            BlockType::Contact => BlockContent::Contact(ContactProps::default()),
            BlockType::SocialLinks => BlockContent::SocialLinks(SocialLinksProps::default()),
            BlockType::Legal => BlockContent::Legal(LegalProps::default()),
        }
    }

    /// Build typed content from a stored tag and property bag.
    ///
    /// Never fails: unknown tags are preserved as `Unknown`, and malformed
    /// fields fall back to their defaults.
    pub fn from_bag(type_tag: &str, bag: &Map<String, Value>) -> Self {
        let Some(block_type) = BlockType::from_tag(type_tag) else {
            return BlockContent::Unknown {
                type_tag: type_tag.to_string(),
                content: bag.clone(),
            };
        };
        match block_type {
            BlockType::Hero => BlockContent::Hero(props_from_bag(bag)),
            BlockType::Text => BlockContent::Text(props_from_bag(bag)),
            BlockType::MultiText => BlockContent::MultiText(props_from_bag(bag)),
            BlockType::Cta => BlockContent::Cta(props_from_bag(bag)),
            BlockType::Features => BlockContent::Features(props_from_bag(bag)),
            BlockType::Image => BlockContent::Image(props_from_bag(bag)),
            BlockType::Gallery => BlockContent::Gallery(props_from_bag(bag)),
            BlockType::Map => BlockContent::Map(props_from_bag(bag)),
            BlockType::Specs => BlockContent::Specs(props_from_bag(bag)),
            BlockType::Price => BlockContent::Price(props_from_bag(bag)),
            BlockType::Inventory => BlockContent::Inventory(props_from_bag(bag)),
            BlockType::Contact => BlockContent::Contact(props_from_bag(bag)),
            BlockType::SocialLinks => BlockContent::SocialLinks(props_from_bag(bag)),
            BlockType::Legal => BlockContent::Legal(props_from_bag(bag)),
        }
    }

    /// Strict variant of [`from_bag`](Self::from_bag): fails instead of
    /// dropping a field that does not fit its type.
    pub fn try_from_bag(
        block_type: BlockType,
        bag: &Map<String, Value>,
    ) -> Result<Self, serde_json::Error> {
        fn parse<T: DeserializeOwned>(bag: &Map<String, Value>) -> Result<T, serde_json::Error> {
            serde_json::from_value(Value::Object(bag.clone()))
        }
        Ok(match block_type {
            BlockType::Hero => BlockContent::Hero(parse(bag)?),
            BlockType::Text => BlockContent::Text(parse(bag)?),
            BlockType::MultiText => BlockContent::MultiText(parse(bag)?),
            BlockType::Cta => BlockContent::Cta(parse(bag)?),
            BlockType::Features => BlockContent::Features(parse(bag)?),
            BlockType::Image => BlockContent::Image(parse(bag)?),
            BlockType::Gallery => BlockContent::Gallery(parse(bag)?),
            BlockType::Map => BlockContent::Map(parse(bag)?),
            BlockType::Specs => BlockContent::Specs(parse(bag)?),
            BlockType::Price => BlockContent::Price(parse(bag)?),
            BlockType::Inventory => BlockContent::Inventory(parse(bag)?),
            BlockType::Contact => BlockContent::Contact(parse(bag)?),
            BlockType::SocialLinks => BlockContent::SocialLinks(parse(bag)?),
            BlockType::Legal => BlockContent::Legal(parse(bag)?),
        })
    }

    /// The typed properties, or `None` for unknown content.
    pub fn props(&self) -> Option<&dyn BlockProps> {
        let props: &dyn BlockProps = match self {
            BlockContent::Hero(p) => p,
            BlockContent::Text(p) => p,
            BlockContent::MultiText(p) => p,
            BlockContent::Cta(p) => p,
            BlockContent::Features(p) => p,
            BlockContent::Image(p) => p,
            BlockContent::Gallery(p) => p,
            BlockContent::Map(p) => p,
            BlockContent::Specs(p) => p,
            BlockContent::Price(p) => p,
            BlockContent::Inventory(p) => p,
            BlockContent::Contact(p) => p,
            BlockContent::SocialLinks(p) => p,
            BlockContent::Legal(p) => p,
            BlockContent::Unknown { .. } => return None,
        };
        Some(props)
    }

    pub fn block_type(&self) -> Option<BlockType> {
        self.props().map(|p| p.block_type())
    }

    /// The tag written to storage, including unknown tags.
    pub fn type_tag(&self) -> &str {
        match self {
            BlockContent::Unknown { type_tag, .. } => type_tag,
            other => other.block_type().map(|t| t.tag()).unwrap_or_default(),
        }
    }

    /// Untyped property bag view of the content
    pub fn to_bag(&self) -> Map<String, Value> {
        match self {
            BlockContent::Unknown { content, .. } => content.clone(),
            other => other.props().map(|p| p.to_bag()).unwrap_or_default(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, BlockContent::Unknown { .. })
    }
}

/// A block placed on a page or template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredBlock", into = "StoredBlock")]
pub struct Block {
    pub id: BlockId,
    pub content: BlockContent,
    /// Position within the page, dense from 0
    pub order: usize,
}

impl Block {
    pub fn new(content: BlockContent, order: usize) -> Self {
        Self {
            id: BlockId::new(),
            content,
            order,
        }
    }

    pub fn type_tag(&self) -> &str {
        self.content.type_tag()
    }
}

/// Storage shape of a block: `{id, type, content, order}`
#[derive(Serialize, Deserialize)]
struct StoredBlock {
    #[serde(default)]
    id: BlockId,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    order: usize,
}

impl From<StoredBlock> for Block {
    fn from(stored: StoredBlock) -> Self {
        let bag = match stored.content {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Block {
            id: stored.id,
            content: BlockContent::from_bag(&stored.block_type, &bag),
            order: stored.order,
        }
    }
}

impl From<Block> for StoredBlock {
    fn from(block: Block) -> Self {
        StoredBlock {
            block_type: block.content.type_tag().to_string(),
            content: Value::Object(block.content.to_bag()),
            id: block.id,
            order: block.order,
        }
    }
}

/// Serialize typed properties into a property bag.
pub fn props_to_bag<T: Serialize>(props: &T) -> Map<String, Value> {
    match serde_json::to_value(props) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Deserialize typed properties from a property bag, dropping any field
/// that does not fit the expected shape instead of failing the block.
pub fn props_from_bag<T>(bag: &Map<String, Value>) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    if let Ok(props) = serde_json::from_value(Value::Object(bag.clone())) {
        return props;
    }
    let mut accepted = props_to_bag(&T::default());
    for (key, value) in bag {
        let mut candidate = accepted.clone();
        candidate.insert(key.clone(), value.clone());
        if serde_json::from_value::<T>(Value::Object(candidate.clone())).is_ok() {
            accepted = candidate;
        } else {
            debug!(field = %key, "dropping malformed block field");
        }
    }
    serde_json::from_value(Value::Object(accepted)).unwrap_or_default()
}

/// Block errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlockError {
    /// Type tag outside the block vocabulary
    #[error("Unknown block type: {0}")]
    UnknownType(String),

    /// No block with the given id
    #[error("Block not found: {0}")]
    NotFound(String),

    /// Field write rejected
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tags_round_trip_through_from_tag() {
        for block_type in BlockType::ALL {
            assert_eq!(BlockType::from_tag(block_type.tag()), Some(block_type));
        }
    }

    #[test]
    fn test_legacy_tag_spellings() {
        assert_eq!(BlockType::from_tag("socialLinks"), Some(BlockType::SocialLinks));
        assert_eq!(BlockType::from_tag("social_links"), Some(BlockType::SocialLinks));
        assert_eq!(BlockType::from_tag("multiText"), Some(BlockType::MultiText));
        assert_eq!(BlockType::from_tag("HERO"), Some(BlockType::Hero));
        assert_eq!(BlockType::from_tag("carousel"), None);
        assert!("carousel".parse::<BlockType>().is_err());
    }

    #[test]
    fn test_block_deserializes_from_storage_shape() {
        let raw = json!({
            "id": "b1",
            "type": "price",
            "content": {"label": "Now", "amount": 45000, "currency": "USD"},
            "order": 2
        });
        let block: Block = serde_json::from_value(raw).unwrap();
        assert_eq!(block.id, BlockId::from("b1"));
        assert_eq!(block.order, 2);
        match &block.content {
            BlockContent::Price(p) => {
                assert_eq!(p.amount, Some(45000.0));
                assert_eq!(p.label, "Now");
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let raw = json!({"id": "x", "type": "carousel", "content": {"speed": 3}, "order": 0});
        let block: Block = serde_json::from_value(raw.clone()).unwrap();
        assert!(block.content.is_unknown());
        assert_eq!(block.type_tag(), "carousel");
        assert_eq!(serde_json::to_value(&block).unwrap(), raw);
    }

    #[test]
    fn test_malformed_field_falls_back_to_default() {
        let raw = json!({
            "id": "p",
            "type": "price",
            "content": {"label": "Sale", "amount": "call us"},
            "order": 0
        });
        let block: Block = serde_json::from_value(raw).unwrap();
        match block.content {
            BlockContent::Price(p) => {
                assert_eq!(p.label, "Sale");
                assert_eq!(p.amount, None);
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn test_null_content_uses_defaults() {
        let raw = json!({"id": "h", "type": "hero", "content": null});
        let block: Block = serde_json::from_value(raw).unwrap();
        assert_eq!(block.content, BlockContent::Hero(HeroProps::default()));
        assert_eq!(block.order, 0);
    }

    #[test]
    fn test_serialized_block_uses_type_tag() {
        let block = Block::new(BlockContent::default_for(BlockType::SocialLinks), 0);
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "social-links");
        assert!(value["content"].is_object());
    }

    #[test]
    fn test_every_default_reports_its_type() {
        for block_type in BlockType::ALL {
            let content = BlockContent::default_for(block_type);
            assert_eq!(content.block_type(), Some(block_type));
            assert_eq!(content.type_tag(), block_type.tag());
        }
    }
}
