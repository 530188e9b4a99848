//! Renderable node tree
//!
//! Block views produce a small HTML-shaped tree instead of strings so that
//! previews can be inspected in tests and serialized once, with escaping
//! applied in a single place.

use std::fmt::Write;

/// Elements that never carry children or a closing tag.
const VOID_TAGS: &[&str] = &["img", "br", "hr", "meta", "link", "input", "source"];

/// A renderable node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element with attributes and children
    Element(Element),
    /// Escaped text
    Text(String),
    /// Markup emitted verbatim without escaping. Callers own its safety.
    Raw(String),
    /// A sequence of siblings without a wrapper
    Fragment(Vec<Node>),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Node::Raw(s.into())
    }

    /// True if the node would serialize to nothing visible.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Element(_) => false,
            Node::Text(s) | Node::Raw(s) => s.trim().is_empty(),
            Node::Fragment(children) => children.iter().all(Node::is_empty),
        }
    }

    /// Concatenated text content, ignoring markup.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            Node::Text(s) | Node::Raw(s) => out.push_str(s),
            Node::Fragment(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for the first element carrying `class`.
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        match self {
            Node::Element(el) => {
                if el.has_class(class) {
                    return Some(el);
                }
                el.children.iter().find_map(|c| c.find_class(class))
            }
            Node::Fragment(children) => children.iter().find_map(|c| c.find_class(class)),
            _ => None,
        }
    }

    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(s) => out.push_str(&escape_html(s)),
            Node::Raw(s) => out.push_str(s),
            Node::Fragment(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

/// An HTML element
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Add an attribute only when a value is present.
    pub fn attr_opt(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.attr(name, v),
            _ => self,
        }
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn style(self, style: impl Into<String>) -> Self {
        self.attr("style", style)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            // Writing into a String cannot fail.
            let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Shorthand for `Element::new`.
pub fn el(tag: &'static str) -> Element {
    Element::new(tag)
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
