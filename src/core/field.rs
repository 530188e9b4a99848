//! Field control descriptors for block content
//!
//! Every typed block declares its editable fields as a list of
//! [`FieldControl`]s: which property, which UI control renders it, and which
//! advisory validation applies. Validation never blocks a write; it only
//! decides whether the inspector shows error styling.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Control kinds the inspector knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    /// Single-line text input
    Text,
    /// Multi-line text area or rich text
    TextArea,
    /// URL input with format validation
    Url,
    /// Image picker with URL fallback
    Image,
    /// Boolean toggle
    Toggle,
    /// Enumeration select
    Select,
    /// Numeric input
    Number,
    /// Object or array value that needs a bespoke per-block editor
    List,
}

/// Advisory validation applied to a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Validation {
    None,
    /// Empty, a `/`-relative path, or an absolute URL
    Url,
    /// Non-empty text
    Required,
}

impl Validation {
    pub fn check(&self, value: &Value) -> ValidationResult {
        match self {
            Validation::None => ValidationResult::ok(),
            Validation::Url => match value {
                Value::String(s) => validate_url(s),
                Value::Null => ValidationResult::ok(),
                _ => ValidationResult::error("Expected a URL string"),
            },
            Validation::Required => match value {
                Value::String(s) if !s.trim().is_empty() => ValidationResult::ok(),
                Value::Number(_) | Value::Bool(_) => ValidationResult::ok(),
                _ => ValidationResult::error("This field is required"),
            },
        }
    }
}

/// UI descriptor for a single editable field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldControl {
    /// Property name inside the block content
    pub field: String,
    /// Human-readable label
    pub label: String,
    pub kind: ControlKind,
    /// Allowed values for `Select` controls
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub validation: Validation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl FieldControl {
    pub fn new(field: impl Into<String>, label: impl Into<String>, kind: ControlKind) -> Self {
        let validation = match kind {
            ControlKind::Url | ControlKind::Image => Validation::Url,
            _ => Validation::None,
        };
        Self {
            field: field.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            validation,
            help_text: None,
        }
    }

    pub fn text(field: &str, label: &str) -> Self {
        Self::new(field, label, ControlKind::Text)
    }

    pub fn text_area(field: &str, label: &str) -> Self {
        Self::new(field, label, ControlKind::TextArea)
    }

    pub fn url(field: &str, label: &str) -> Self {
        Self::new(field, label, ControlKind::Url)
    }

    pub fn image(field: &str, label: &str) -> Self {
        Self::new(field, label, ControlKind::Image)
    }

    pub fn toggle(field: &str, label: &str) -> Self {
        Self::new(field, label, ControlKind::Toggle)
    }

    pub fn number(field: &str, label: &str) -> Self {
        Self::new(field, label, ControlKind::Number)
    }

    pub fn list(field: &str, label: &str) -> Self {
        Self::new(field, label, ControlKind::List)
    }

    pub fn select(field: &str, label: &str, options: &[&str]) -> Self {
        Self {
            options: options.iter().map(|o| o.to_string()).collect(),
            ..Self::new(field, label, ControlKind::Select)
        }
    }

    /// Mark the field as required text
    pub fn required(mut self) -> Self {
        self.validation = Validation::Required;
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Run this control's advisory validation against a value.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        let result = self.validation.check(value);
        if self.kind == ControlKind::Select && !self.options.is_empty() {
            if let Value::String(s) = value {
                if !self.options.iter().any(|o| o == s) {
                    return result.merge(ValidationResult::error(format!(
                        "'{}' is not one of: {}",
                        s,
                        self.options.join(", ")
                    )));
                }
            }
        }
        result
    }
}

/// Validation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether validation passed
    pub valid: bool,
    /// Error messages
    pub errors: Vec<String>,
    /// Warning messages
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a validation result with an error
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![msg.into()],
            warnings: Vec::new(),
        }
    }

    /// Add a warning to the validation result
    pub fn with_warning(mut self, msg: impl Into<String>) -> Self {
        self.warnings.push(msg.into());
        self
    }

    /// Check if the validation has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the validation has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Merge another validation result into this one
    pub fn merge(mut self, other: ValidationResult) -> Self {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validate a URL-valued field.
///
/// Empty is valid (the field is optional), anything starting with `/` is taken
/// as a relative path without further parsing, and everything else must parse
/// as an absolute URL.
pub fn validate_url(value: &str) -> ValidationResult {
    let value = value.trim();
    if value.is_empty() || value.starts_with('/') {
        return ValidationResult::ok();
    }
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" && url.host_str().is_none() => {
            ValidationResult::error(format!("'{}' has no host", value))
        }
        Ok(url) => {
            if url.scheme() == "http" {
                ValidationResult::ok().with_warning("Consider using https")
            } else {
                ValidationResult::ok()
            }
        }
        Err(e) => ValidationResult::error(format!("'{}' is not a valid URL: {}", value, e)),
    }
}
