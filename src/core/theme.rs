//! Theme palette and dealer branding shared by every block view

use serde::{Deserialize, Serialize};

/// Site or brochure theme palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#1d4ed8".into(),
            secondary_color: "#0f172a".into(),
            font_family: "Inter, system-ui, sans-serif".into(),
        }
    }
}

impl Theme {
    /// CSS custom properties consumed by the rendered markup.
    pub fn css_variables(&self) -> String {
        format!(
            "--primary-color: {}; --secondary-color: {}; --font-family: {};",
            sanitize_css_value(&self.primary_color),
            sanitize_css_value(&self.secondary_color),
            sanitize_css_value(&self.font_family),
        )
    }
}

/// Dealer identity rendered in headers, footers and contact blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Branding {
    pub dealer_name: String,
    pub logo_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
}

impl Branding {
    pub fn new(dealer_name: impl Into<String>) -> Self {
        Self {
            dealer_name: dealer_name.into(),
            ..Self::default()
        }
    }
}

/// Strip characters that would let a theme value escape its declaration.
fn sanitize_css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect()
}
