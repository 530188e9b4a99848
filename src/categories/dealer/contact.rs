//! Contact Block
//!
//! Dealer contact card. Any field left empty falls back to the site or
//! brochure branding, so a fresh block shows real details immediately.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{heading, metadata, non_empty, placeholder, section, BlockCategory};
use crate::core::block::{props_to_bag, BlockProps, BlockType, RenderContext};
use crate::core::field::FieldControl;
use crate::core::node::{el, Element, Node};
use crate::core::registry::BlockTypeInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactProps {
    pub title: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// One line per opening-hours entry
    pub hours: Vec<String>,
    pub show_form: bool,
}

impl Default for ContactProps {
    fn default() -> Self {
        Self {
            title: Some("Contact Us".into()),
            phone: None,
            email: None,
            address: None,
            hours: vec![
                "Mon-Fri 9am - 8pm".into(),
                "Sat 9am - 6pm".into(),
                "Sun Closed".into(),
            ],
            show_form: false,
        }
    }
}

pub(crate) fn info() -> BlockTypeInfo {
    metadata(
        BlockType::Contact,
        "Contact",
        "Phone, email, address and opening hours",
        "phone",
        BlockCategory::Dealer,
        &["phone", "email", "hours", "address"],
    )
}

fn detail(class: &'static str, label: &str, value: Node) -> Element {
    el("p")
        .class(class)
        .child(el("span").class("contact-label").text(label))
        .child(value)
}

/// Digits and a leading `+` only, for `tel:` links.
fn tel_href(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .enumerate()
        .filter(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '+'))
        .map(|(_, c)| c)
        .collect();
    format!("tel:{}", digits)
}

impl BlockProps for ContactProps {
    fn block_type(&self) -> BlockType {
        BlockType::Contact
    }

    fn fields(&self) -> Vec<FieldControl> {
        vec![
            FieldControl::text("title", "Heading"),
            FieldControl::text("phone", "Phone")
                .with_help_text("Leave empty to use the dealer phone number"),
            FieldControl::text("email", "Email"),
            FieldControl::text_area("address", "Address"),
            FieldControl::list("hours", "Opening hours"),
            FieldControl::toggle("showForm", "Show contact form"),
        ]
    }

    fn view(&self, ctx: &RenderContext<'_>) -> Node {
        let branding = ctx.branding;
        let phone = non_empty(&self.phone).or_else(|| non_empty(&branding.phone));
        let email = non_empty(&self.email).or_else(|| non_empty(&branding.email));
        let address = non_empty(&self.address).or_else(|| non_empty(&branding.address));

        let mut details: Vec<Node> = Vec::new();
        if let Some(phone) = phone {
            let anchor = el("a").attr("href", tel_href(phone)).text(phone);
            details.push(detail("contact-phone", "Phone", anchor.into()).into());
        }
        if let Some(email) = email {
            let anchor = el("a").attr("href", format!("mailto:{}", email)).text(email);
            details.push(detail("contact-email", "Email", anchor.into()).into());
        }
        if let Some(address) = address {
            details.push(detail("contact-address", "Address", Node::text(address)).into());
        }
        let hours: Vec<Node> = self
            .hours
            .iter()
            .map(|h| h.trim())
            .filter(|h| !h.is_empty())
            .map(|h| Node::from(el("li").text(h)))
            .collect();
        if !hours.is_empty() {
            details.push(el("ul").class("contact-hours").children(hours).into());
        }

        let body: Node = if details.is_empty() {
            placeholder("Add contact details")
        } else {
            el("div").class("contact-details").children(details).into()
        };
        let mut block = section(BlockType::Contact)
            .children(heading(self.title.as_deref()))
            .child(body);
        if self.show_form {
            block = block.child(
                el("form")
                    .class("contact-form")
                    .attr("method", "post")
                    .attr("data-dealer", branding.dealer_name.as_str())
                    .child(el("input").attr("name", "name").attr("placeholder", "Name"))
                    .child(el("input").attr("name", "email").attr("type", "email").attr("placeholder", "Email"))
                    .child(el("textarea").attr("name", "message").attr("placeholder", "Message"))
                    .child(el("button").attr("type", "submit").text("Send")),
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

    #[test]
    fn test_falls_back_to_branding() {
        let theme = Theme::default();
        let branding = Branding {
            phone: Some("+1 (555) 010-2000".into()),
            email: Some("sales@mainst.example".into()),
            ..Branding::new("Main St Motors")
        };
        let ctx = RenderContext { theme: &theme, branding: &branding, listings: &[] };
        let html = ContactProps::default().view(&ctx).to_html();
        assert!(html.contains("href=\"tel:+15550102000\""));
        assert!(html.contains("mailto:sales@mainst.example"));
        assert!(html.contains("Sun Closed"));
    }

    #[test]
    fn test_own_values_override_branding() {
        let theme = Theme::default();
        let branding = Branding {
            phone: Some("555-0000".into()),
            ..Branding::default()
        };
        let ctx = RenderContext { theme: &theme, branding: &branding, listings: &[] };
        let props = ContactProps {
            phone: Some("555-1111".into()),
            ..ContactProps::default()
        };
        let text = props.view(&ctx).text_content();
        assert!(text.contains("555-1111"));
        assert!(!text.contains("555-0000"));
    }

    #[test]
    fn test_nothing_to_show() {
        let theme = Theme::default();
        let branding = Branding::default();
        let ctx = RenderContext { theme: &theme, branding: &branding, listings: &[] };
        let props = ContactProps { hours: vec![], ..ContactProps::default() };
        assert!(props.view(&ctx).find_class("placeholder").is_some());
    }
}
