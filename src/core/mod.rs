//! Core block abstractions and types
//!
//! This module defines the block model shared by the brochure and website
//! builders: block identifiers, the typed block content enum, field control
//! descriptors, the renderable node tree, theme/branding, and the document
//! records (sites, pages, templates, brochures).

pub mod block;
pub mod field;
pub mod format;
pub mod node;
pub mod registry;
pub mod site;
pub mod theme;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub use block::{Block, BlockContent, BlockError, BlockProps, BlockType, RenderContext};
pub use node::Node;
pub use registry::{BlockRegistry, BlockTypeInfo};
pub use theme::{Branding, Theme};

/// Unique identifier for a block within a page or template
///
/// Freshly minted ids are UUID v4 strings, but any string loaded from storage
/// is accepted so that data written by older editors still opens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    /// Generate a new random block ID
    pub fn new() -> Self {
        BlockId(fresh_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        BlockId(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        BlockId(s)
    }
}

/// Mint a random identifier for sites, pages, templates and media.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Short URL-safe identifier used for public brochure links.
pub fn public_id() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}
