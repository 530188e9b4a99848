//! Inspector: field controls and partial field writes
//!
//! Typed blocks describe their own fields. Content with an unknown type tag
//! is an opaque bag, so its controls are inferred from field names and
//! value shapes. Writes are partial: only the named field changes.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::categories::content::ButtonVariant;
use crate::categories::Alignment;
use crate::core::block::{BlockContent, BlockError};
use crate::core::field::{FieldControl, ValidationResult};

/// Outcome of a field write
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUpdate {
    pub field: String,
    /// The value as stored
    pub value: Value,
    /// Advisory only; the write already happened
    pub validation: ValidationResult,
}

/// Infer a control for an untyped field.
///
/// Objects and arrays return `None`: they need a bespoke editor.
pub fn infer_control(field: &str, value: &Value) -> Option<FieldControl> {
    if value.is_object() || value.is_array() {
        return None;
    }
    let label = humanize(field);
    let control = match field {
        "openInNewTab" => FieldControl::toggle(field, &label),
        "title" | "label" => FieldControl::text(field, &label),
        "description" | "html" => FieldControl::text_area(field, &label),
        "href" => FieldControl::url(field, &label),
        f if f.ends_with("Link") => FieldControl::url(field, &label),
        "src" => FieldControl::image(field, &label),
        f if f.ends_with("Image") => FieldControl::image(field, &label),
        "alignment" => FieldControl::select(field, &label, Alignment::OPTIONS),
        "variant" => FieldControl::select(field, &label, ButtonVariant::OPTIONS),
        _ => FieldControl::text(field, &label),
    };
    Some(control)
}

/// Controls for every editable field of `content`, in display order.
pub fn controls_for(content: &BlockContent) -> Vec<FieldControl> {
    match content.props() {
        Some(props) => props.fields(),
        None => {
            let bag = content.to_bag();
            let mut names: Vec<&String> = bag.keys().collect();
            names.sort();
            names
                .into_iter()
                .filter_map(|name| infer_control(name, &bag[name.as_str()]))
                .collect()
        }
    }
}

/// Current value of one field.
pub fn get_field(content: &BlockContent, field: &str) -> Option<Value> {
    content.to_bag().remove(field)
}

/// Write one field, leaving every other field untouched.
///
/// Validation is advisory: an invalid URL is stored verbatim and reported
/// in the returned [`FieldUpdate`]. A write is rejected only when a typed
/// block has no such field or the value cannot be held by the field's type.
pub fn set_field(
    content: &mut BlockContent,
    field: &str,
    value: Value,
) -> Result<FieldUpdate, BlockError> {
    let control = controls_for(content)
        .into_iter()
        .find(|c| c.field == field)
        .or_else(|| infer_control(field, &value));
    let validation = control
        .map(|c| c.validate(&value))
        .unwrap_or_default();

    match content {
        BlockContent::Unknown { content: bag, .. } => {
            bag.insert(field.to_string(), value.clone());
        }
        typed => {
            let Some(block_type) = typed.block_type() else {
                return Err(BlockError::UnknownType(typed.type_tag().to_string()));
            };
            let mut bag = typed.to_bag();
            if !bag.contains_key(field) {
                return Err(BlockError::InvalidField {
                    field: field.to_string(),
                    reason: format!("{} blocks have no such field", block_type),
                });
            }
            bag.insert(field.to_string(), value.clone());
            *typed = BlockContent::try_from_bag(block_type, &bag).map_err(|e| {
                BlockError::InvalidField {
                    field: field.to_string(),
                    reason: e.to_string(),
                }
            })?;
        }
    }
    if validation.has_errors() {
        debug!(field, errors = ?validation.errors, "stored field with validation errors");
    }
    Ok(FieldUpdate {
        field: field.to_string(),
        value,
        validation,
    })
}

/// `backgroundImage` -> `Background image`
fn humanize(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, ch) in field.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.extend(ch.to_lowercase());
        } else if ch == '_' || ch == '-' {
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::BlockType;
    use crate::core::field::ControlKind;
    use serde_json::{json, Map};

    fn kind(field: &str, value: Value) -> Option<ControlKind> {
        infer_control(field, &value).map(|c| c.kind)
    }

    #[test]
    fn test_inference_rules() {
        assert_eq!(kind("title", json!("x")), Some(ControlKind::Text));
        assert_eq!(kind("label", json!("x")), Some(ControlKind::Text));
        assert_eq!(kind("description", json!("x")), Some(ControlKind::TextArea));
        assert_eq!(kind("html", json!("<p>x</p>")), Some(ControlKind::TextArea));
        assert_eq!(kind("href", json!("/")), Some(ControlKind::Url));
        assert_eq!(kind("imageLink", json!("")), Some(ControlKind::Url));
        assert_eq!(kind("backgroundImage", json!("")), Some(ControlKind::Image));
        assert_eq!(kind("src", json!("")), Some(ControlKind::Image));
        assert_eq!(kind("openInNewTab", json!(true)), Some(ControlKind::Toggle));
        assert_eq!(kind("alignment", json!("left")), Some(ControlKind::Select));
        assert_eq!(kind("variant", json!("primary")), Some(ControlKind::Select));
        assert_eq!(kind("speed", json!(3)), Some(ControlKind::Text));
        assert_eq!(kind("items", json!([1, 2])), None);
        assert_eq!(kind("style", json!({"a": 1})), None);
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("backgroundImage"), "Background image");
        assert_eq!(humanize("title"), "Title");
        assert_eq!(humanize("stock_number"), "Stock number");
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut content = BlockContent::default_for(BlockType::Hero);
        let before = content.to_bag();
        let update = set_field(&mut content, "title", json!("Spring Sale")).unwrap();
        assert!(update.validation.valid);
        let after = content.to_bag();
        assert_eq!(after["title"], json!("Spring Sale"));
        for (key, value) in before {
            if key != "title" {
                assert_eq!(after[&key], value, "field {} changed", key);
            }
        }
    }

    #[test]
    fn test_invalid_url_is_stored_verbatim() {
        let mut content = BlockContent::default_for(BlockType::Cta);
        let update = set_field(&mut content, "href", json!("not a url")).unwrap();
        assert!(!update.validation.valid);
        assert_eq!(get_field(&content, "href"), Some(json!("not a url")));

        let update = set_field(&mut content, "href", json!("/about")).unwrap();
        assert!(update.validation.valid);
        let update = set_field(&mut content, "href", json!("")).unwrap();
        assert!(update.validation.valid);
    }

    #[test]
    fn test_typed_write_rejections() {
        let mut content = BlockContent::default_for(BlockType::Price);
        let err = set_field(&mut content, "nope", json!(1)).unwrap_err();
        assert!(matches!(err, BlockError::InvalidField { .. }));
        let err = set_field(&mut content, "amount", json!("lots")).unwrap_err();
        assert!(matches!(err, BlockError::InvalidField { .. }));
        assert_eq!(content, BlockContent::default_for(BlockType::Price));

        set_field(&mut content, "amount", json!(45000)).unwrap();
        match &content {
            BlockContent::Price(p) => assert_eq!(p.amount, Some(45000.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_bag_accepts_any_field() {
        let mut bag = Map::new();
        bag.insert("title".into(), json!("Legacy"));
        bag.insert("slides".into(), json!([1, 2, 3]));
        let mut content = BlockContent::Unknown {
            type_tag: "carousel".into(),
            content: bag,
        };
        let controls = controls_for(&content);
        assert_eq!(controls.len(), 1);
        assert_eq!(controls[0].field, "title");

        set_field(&mut content, "ctaLink", json!("https://example.com")).unwrap();
        assert_eq!(get_field(&content, "ctaLink"), Some(json!("https://example.com")));
        assert_eq!(get_field(&content, "slides"), Some(json!([1, 2, 3])));
    }

    #[test]
    fn test_select_value_outside_options_is_rejected_by_type() {
        let mut content = BlockContent::default_for(BlockType::Hero);
        assert!(set_field(&mut content, "alignment", json!("diagonal")).is_err());
        let update = set_field(&mut content, "alignment", json!("left")).unwrap();
        assert!(update.validation.valid);
    }
}
