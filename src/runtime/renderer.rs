//! Block renderer
//!
//! Dispatches each block, in ascending `order`, to its view with the shared
//! theme, branding and inventory. Rendering never fails: content with an
//! unknown type tag becomes a visible placeholder and every view tolerates
//! missing fields.

use serde::Serialize;

use crate::core::block::{Block, RenderContext};
use crate::core::node::{el, Node};
use crate::core::site::Listing;
use crate::core::theme::{Branding, Theme};
use crate::core::BlockId;

/// One block's rendered output
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock {
    pub block_id: BlockId,
    /// Stored type tag, which may be outside the vocabulary
    pub block_type: String,
    pub node: Node,
}

impl RenderedBlock {
    pub fn to_html(&self) -> String {
        self.node.to_html()
    }
}

/// Serializable preview payload handed to hosts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedBlockHtml {
    pub block_id: BlockId,
    pub block_type: String,
    pub html: String,
}

impl From<&RenderedBlock> for RenderedBlockHtml {
    fn from(rendered: &RenderedBlock) -> Self {
        Self {
            block_id: rendered.block_id.clone(),
            block_type: rendered.block_type.clone(),
            html: rendered.to_html(),
        }
    }
}

/// Renders block lists against a theme and branding
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    theme: &'a Theme,
    branding: &'a Branding,
    listings: &'a [Listing],
}

impl<'a> Renderer<'a> {
    pub fn new(theme: &'a Theme, branding: &'a Branding) -> Self {
        Self {
            theme,
            branding,
            listings: &[],
        }
    }

    /// Inventory available to inventory blocks.
    pub fn with_listings(mut self, listings: &'a [Listing]) -> Self {
        self.listings = listings;
        self
    }

    pub fn context(&self) -> RenderContext<'a> {
        RenderContext {
            theme: self.theme,
            branding: self.branding,
            listings: self.listings,
        }
    }

    /// Render a single block. The outer element carries `data-block-id` so
    /// editor previews can map clicks back to blocks.
    pub fn render_block(&self, block: &Block) -> Node {
        let node = match block.content.props() {
            Some(props) => props.view(&self.context()),
            None => unknown_block(block.type_tag()),
        };
        match node {
            Node::Element(element) => element.attr("data-block-id", block.id.as_str()).into(),
            other => other,
        }
    }

    /// Render every block in ascending `order`.
    pub fn render(&self, blocks: &[Block]) -> Vec<RenderedBlock> {
        let mut sorted: Vec<&Block> = blocks.iter().collect();
        sorted.sort_by_key(|b| b.order);
        sorted
            .into_iter()
            .map(|block| RenderedBlock {
                block_id: block.id.clone(),
                block_type: block.type_tag().to_string(),
                node: self.render_block(block),
            })
            .collect()
    }

    /// Render every block and concatenate the HTML.
    pub fn render_html(&self, blocks: &[Block]) -> String {
        let mut out = String::new();
        for rendered in self.render(blocks) {
            rendered.node.write_html(&mut out);
        }
        out
    }
}

/// Render `blocks` with a theme and branding and no inventory.
pub fn render(blocks: &[Block], theme: &Theme, branding: &Branding) -> Vec<RenderedBlock> {
    Renderer::new(theme, branding).render(blocks)
}

fn unknown_block(type_tag: &str) -> Node {
    el("section")
        .class("block block-unknown")
        .child(
            el("div")
                .class("placeholder")
                .text(format!("unknown block type: {}", type_tag)),
        )
        .into()
}
