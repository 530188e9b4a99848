//! Block Registry - static catalog of the block vocabulary
//!
//! The registry maps each block type to its palette metadata and default
//! content. It is exhaustive by construction: `BlockType::ALL` drives the
//! listing and every lookup is a `match` over `BlockType`.

use serde::{Deserialize, Serialize};

use super::block::{BlockContent, BlockType};
use crate::categories::{self, BlockCategory};

/// Palette entry for a block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTypeInfo {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub label: String,
    pub description: String,
    /// Icon identifier understood by the editor UI
    pub icon: String,
    pub category: BlockCategory,
    pub tags: Vec<String>,
}

/// Block registry for the fixed block vocabulary
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockRegistry;

impl BlockRegistry {
    pub fn new() -> Self {
        BlockRegistry
    }

    /// All block types in palette order
    ///
    /// # Example
    /// ```
    /// use block_builder::core::registry::BlockRegistry;
    ///
    /// let types = BlockRegistry::new().list_block_types();
    /// assert_eq!(types[0].label, "Hero");
    /// ```
    pub fn list_block_types(&self) -> Vec<BlockTypeInfo> {
        BlockType::ALL.iter().map(|t| self.info(*t)).collect()
    }

    /// Metadata for a single block type
    pub fn info(&self, block_type: BlockType) -> BlockTypeInfo {
        categories::block_info(block_type)
    }

    /// Default content bag for a block type
    pub fn default_content_for(&self, block_type: BlockType) -> BlockContent {
        BlockContent::default_for(block_type)
    }

    /// Block types belonging to a category
    pub fn block_types_in(&self, category: BlockCategory) -> Vec<BlockTypeInfo> {
        self.list_block_types()
            .into_iter()
            .filter(|info| info.category == category)
            .collect()
    }

    /// Case-insensitive search over label, description and tags
    pub fn search(&self, query: &str) -> Vec<BlockTypeInfo> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.list_block_types();
        }
        self.list_block_types()
            .into_iter()
            .filter(|info| {
                info.label.to_lowercase().contains(&query)
                    || info.description.to_lowercase().contains(&query)
                    || info.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Resolve a type tag coming from the UI or storage
    pub fn resolve_tag(&self, tag: &str) -> Result<BlockType, RegistryError> {
        BlockType::from_tag(tag).ok_or_else(|| RegistryError::UnknownBlockType(tag.to_string()))
    }
}

/// All block types in palette order.
pub fn list_block_types() -> Vec<BlockTypeInfo> {
    BlockRegistry.list_block_types()
}

/// Default content for a block type.
pub fn default_content_for(block_type: BlockType) -> BlockContent {
    BlockRegistry.default_content_for(block_type)
}

/// Registry error types
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Tag outside the block vocabulary
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),
}
