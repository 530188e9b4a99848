//! Editing scenarios
//!
//! Each test walks through a sequence of editor and inspector operations
//! the way a user would in the builder UI, checking the block list after
//! every step.

#[cfg(test)]
mod editor_tests {
    use serde_json::json;

    use crate::core::block::{Block, BlockContent, BlockType};
    use crate::core::BlockId;
    use crate::runtime::editor::{BlockEditor, Direction, EditorError};
    use crate::runtime::inspector::{controls_for, get_field};

    fn orders(editor: &BlockEditor) -> Vec<usize> {
        editor.blocks().iter().map(|b| b.order).collect()
    }

    fn tags(editor: &BlockEditor) -> Vec<String> {
        editor.blocks().iter().map(|b| b.type_tag().to_string()).collect()
    }

    /// Build a small brochure: hero, specs, price, then rearrange it.
    #[test]
    fn test_build_and_rearrange_brochure() {
        let mut editor = BlockEditor::new();
        let hero = editor.add_block(BlockType::Hero);
        let specs = editor.add_block(BlockType::Specs);
        let price = editor.add_block(BlockType::Price);
        assert_eq!(tags(&editor), vec!["hero", "specs", "price"]);
        assert_eq!(editor.selected_id(), Some(&price));

        // Price above specs
        assert!(editor.move_block(&price, Direction::Up));
        assert_eq!(tags(&editor), vec!["hero", "price", "specs"]);

        // Hero is already first
        assert!(!editor.move_block(&hero, Direction::Up));

        // Specs to the end is a no-op, it's already there
        assert!(!editor.move_block(&specs, Direction::Down));
        assert_eq!(orders(&editor), vec![0, 1, 2]);
    }

    /// Edit a CTA through the inspector, including an invalid URL that is
    /// still stored.
    #[test]
    fn test_inspector_edits_cta() {
        let mut editor = BlockEditor::new();
        let cta = editor.add_block(BlockType::Cta);

        let update = editor
            .update_field(&cta, "href", json!("not a url"))
            .unwrap();
        assert!(!update.validation.valid);
        let block = editor.get(&cta).unwrap();
        assert_eq!(get_field(&block.content, "href"), Some(json!("not a url")));

        let update = editor.update_field(&cta, "href", json!("/inventory")).unwrap();
        assert!(update.validation.valid);

        editor
            .update_field(&cta, "title", json!("Test drive today"))
            .unwrap();
        let block = editor.get(&cta).unwrap();
        assert_eq!(get_field(&block.content, "title"), Some(json!("Test drive today")));
        assert_eq!(get_field(&block.content, "href"), Some(json!("/inventory")));
    }

    /// Writes against a missing block or a field the block type lacks are
    /// errors and leave the list untouched.
    #[test]
    fn test_rejected_writes() {
        let mut editor = BlockEditor::new();
        let hero = editor.add_block(BlockType::Hero);
        let before = editor.blocks().to_vec();

        assert!(matches!(
            editor.update_field(&BlockId::from("ghost"), "title", json!("x")),
            Err(EditorError::BlockNotFound(_))
        ));
        assert!(matches!(
            editor.update_field(&hero, "noSuchField", json!("x")),
            Err(EditorError::Block(_))
        ));
        assert_eq!(editor.blocks(), before.as_slice());
    }

    /// A block written by a newer editor survives loading, editing around
    /// it, and serialization.
    #[test]
    fn test_unknown_block_survives_editing() {
        let stored: Vec<Block> = serde_json::from_value(json!([
            {"id": "a", "type": "hero", "content": {"title": "Spring"}, "order": 0},
            {"id": "b", "type": "countdown", "content": {"endsAt": "2025-05-01", "label": "Ends soon"}, "order": 1}
        ]))
        .unwrap();
        let mut editor = BlockEditor::from_blocks(stored);
        let unknown = BlockId::from("b");
        assert!(editor.get(&unknown).unwrap().content.is_unknown());

        let controls = controls_for(&editor.get(&unknown).unwrap().content);
        assert!(controls.iter().any(|c| c.field == "label"));

        editor.update_field(&unknown, "label", json!("Last day")).unwrap();
        editor.add_block(BlockType::Legal);
        assert!(editor.move_block(&unknown, Direction::Down));

        let saved = serde_json::to_value(editor.blocks()).unwrap();
        assert_eq!(saved[2]["type"], "countdown");
        assert_eq!(saved[2]["content"]["endsAt"], "2025-05-01");
        assert_eq!(saved[2]["content"]["label"], "Last day");
        assert_eq!(saved[2]["order"], 2);
    }

    /// Duplicate then delete the original: the copy takes its place.
    #[test]
    fn test_duplicate_then_delete_original() {
        let mut editor = BlockEditor::new();
        editor.add_block(BlockType::Text);
        let gallery = editor.add_block(BlockType::Gallery);
        editor.add_block(BlockType::Map);

        let copy = editor.duplicate_block(&gallery).unwrap();
        assert_eq!(tags(&editor), vec!["text", "gallery", "gallery", "map"]);
        assert!(editor.delete_block(&gallery));
        assert_eq!(tags(&editor), vec!["text", "gallery", "map"]);
        assert_eq!(editor.get(&copy).unwrap().order, 1);
        assert_eq!(editor.selected_id(), Some(&copy));
    }

    #[test]
    fn test_replace_content_wholesale() {
        let mut editor = BlockEditor::new();
        let id = editor.add_block(BlockType::Text);
        assert!(editor.update_block(&id, BlockContent::default_for(BlockType::MultiText)));
        assert_eq!(editor.get(&id).unwrap().type_tag(), "multi-text");
        assert!(!editor.update_block(&BlockId::from("ghost"), BlockContent::default_for(BlockType::Text)));
    }
}
