//! Block editor: ordered CRUD over a page's block list
//!
//! The editor owns the block list and the current selection. After every
//! mutation the list is stored in ascending `order`, orders are dense from
//! zero and ids are unique. Operations on an id that is not present are
//! silent no-ops that report `false`/`None`.

use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

use super::inspector::{self, FieldUpdate};
use crate::core::block::{Block, BlockContent, BlockError, BlockType};
use crate::core::BlockId;

/// Direction for [`BlockEditor::move_block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Editor errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error(transparent)]
    Block(#[from] BlockError),
}

/// In-memory editor for one ordered block list
#[derive(Debug, Clone, Default)]
pub struct BlockEditor {
    blocks: Vec<Block>,
    selected: Option<BlockId>,
}

impl BlockEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load blocks from storage, repairing order gaps, ties and duplicate ids.
    pub fn from_blocks(mut blocks: Vec<Block>) -> Self {
        blocks.sort_by_key(|b| b.order);
        let mut seen = HashSet::new();
        for block in &mut blocks {
            if block.id.as_str().is_empty() || !seen.insert(block.id.clone()) {
                let fresh = BlockId::new();
                debug!(old = %block.id, new = %fresh, "re-keyed duplicate block id");
                block.id = fresh.clone();
                seen.insert(fresh);
            }
        }
        let mut editor = Self {
            blocks,
            selected: None,
        };
        editor.renumber();
        editor
    }

    /// Blocks in ascending order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn selected_id(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Block> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Append a block with registry defaults and select it.
    pub fn add_block(&mut self, block_type: BlockType) -> BlockId {
        self.add_content(BlockContent::default_for(block_type))
    }

    /// Append a block with the given content and select it.
    pub fn add_content(&mut self, content: BlockContent) -> BlockId {
        let block = Block::new(content, self.blocks.len());
        let id = block.id.clone();
        debug!(block_id = %id, block_type = block.type_tag(), "add block");
        self.blocks.push(block);
        self.selected = Some(id.clone());
        id
    }

    /// Replace a block's content wholesale.
    pub fn update_block(&mut self, id: &BlockId, content: BlockContent) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.blocks[index].content = content;
                true
            }
            None => false,
        }
    }

    /// Write a single field through the inspector.
    pub fn update_field(
        &mut self,
        id: &BlockId,
        field: &str,
        value: Value,
    ) -> Result<FieldUpdate, EditorError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| EditorError::BlockNotFound(id.to_string()))?;
        Ok(inspector::set_field(&mut self.blocks[index].content, field, value)?)
    }

    /// Swap with the neighbour. No-op at either end.
    pub fn move_block(&mut self, id: &BlockId, direction: Direction) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.blocks.len() => index + 1,
            _ => return false,
        };
        self.blocks.swap(index, target);
        self.renumber();
        true
    }

    /// Remove a block and renumber. Clears the selection if it pointed at
    /// the removed block.
    pub fn delete_block(&mut self, id: &BlockId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.blocks.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.renumber();
        true
    }

    /// Insert a copy directly after the original, with a fresh id, and
    /// select it.
    pub fn duplicate_block(&mut self, id: &BlockId) -> Option<BlockId> {
        let index = self.index_of(id)?;
        let copy = Block::new(self.blocks[index].content.clone(), index + 1);
        let copy_id = copy.id.clone();
        self.blocks.insert(index + 1, copy);
        self.renumber();
        self.selected = Some(copy_id.clone());
        Some(copy_id)
    }

    pub fn select(&mut self, id: &BlockId) -> bool {
        if self.index_of(id).is_some() {
            self.selected = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    fn renumber(&mut self) {
        for (order, block) in self.blocks.iter_mut().enumerate() {
            block.order = order;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn orders(editor: &BlockEditor) -> Vec<usize> {
        editor.blocks().iter().map(|b| b.order).collect()
    }

    #[test]
    fn test_add_hero_to_empty_editor() {
        let mut editor = BlockEditor::new();
        let id = editor.add_block(BlockType::Hero);
        assert_eq!(editor.len(), 1);
        let block = &editor.blocks()[0];
        assert_eq!(block.order, 0);
        assert_eq!(block.content, BlockContent::default_for(BlockType::Hero));
        assert_eq!(editor.selected_id(), Some(&id));
    }

    #[test]
    fn test_delete_middle_renumbers() {
        let mut editor = BlockEditor::new();
        let a = editor.add_block(BlockType::Hero);
        let b = editor.add_block(BlockType::Text);
        let c = editor.add_block(BlockType::Cta);
        assert!(editor.delete_block(&b));
        assert_eq!(orders(&editor), vec![0, 1]);
        let ids: Vec<&BlockId> = editor.blocks().iter().map(|b| &b.id).collect();
        assert_eq!(ids, vec![&a, &c]);
    }

    #[test]
    fn test_move_at_boundaries_is_noop() {
        let mut editor = BlockEditor::new();
        let first = editor.add_block(BlockType::Hero);
        let last = editor.add_block(BlockType::Legal);
        assert!(!editor.move_block(&first, Direction::Up));
        assert!(!editor.move_block(&last, Direction::Down));
        assert!(editor.move_block(&last, Direction::Up));
        assert_eq!(editor.blocks()[0].id, last);
        assert_eq!(orders(&editor), vec![0, 1]);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut editor = BlockEditor::new();
        editor.add_block(BlockType::Hero);
        let ghost = BlockId::from("ghost");
        assert!(!editor.delete_block(&ghost));
        assert!(!editor.move_block(&ghost, Direction::Down));
        assert!(!editor.update_block(&ghost, BlockContent::default_for(BlockType::Text)));
        assert!(!editor.select(&ghost));
        assert!(editor.duplicate_block(&ghost).is_none());
        assert_eq!(editor.len(), 1);
        assert!(matches!(
            editor.update_field(&ghost, "title", json!("x")),
            Err(EditorError::BlockNotFound(_))
        ));
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut editor = BlockEditor::new();
        let a = editor.add_block(BlockType::Hero);
        let b = editor.add_block(BlockType::Text);
        editor.select(&a);
        editor.delete_block(&b);
        assert_eq!(editor.selected_id(), Some(&a));
        editor.delete_block(&a);
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_duplicate_inserts_after_original() {
        let mut editor = BlockEditor::new();
        let a = editor.add_block(BlockType::Hero);
        editor.add_block(BlockType::Text);
        let copy = editor.duplicate_block(&a).unwrap();
        assert_ne!(copy, a);
        assert_eq!(editor.blocks()[1].id, copy);
        assert_eq!(editor.blocks()[1].content, editor.blocks()[0].content);
        assert_eq!(orders(&editor), vec![0, 1, 2]);
        assert_eq!(editor.selected_id(), Some(&copy));
    }

    #[test]
    fn test_from_blocks_normalizes() {
        let mut a = Block::new(BlockContent::default_for(BlockType::Hero), 7);
        let mut b = Block::new(BlockContent::default_for(BlockType::Text), 3);
        b.id = a.id.clone();
        a.order = 7;
        let editor = BlockEditor::from_blocks(vec![a, b]);
        assert_eq!(orders(&editor), vec![0, 1]);
        assert_eq!(editor.blocks()[0].type_tag(), "text");
        assert_ne!(editor.blocks()[0].id, editor.blocks()[1].id);
    }

    #[test]
    fn test_update_field_through_editor() {
        let mut editor = BlockEditor::new();
        let id = editor.add_block(BlockType::Cta);
        let update = editor.update_field(&id, "href", json!("not a url")).unwrap();
        assert!(!update.validation.valid);
        assert_eq!(editor.get(&id).unwrap().content.to_bag()["href"], json!("not a url"));
    }
}
