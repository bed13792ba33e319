//! Detached node trees.
//!
//! Rendering produces owned [`Node`] trees that are not attached to any
//! document. The caller takes ownership of a fragment and decides where it
//! goes (typically a lane column). Templates are stored in the same shape,
//! so "cloning a template" is a plain [`Clone`].
//!
//! Elements are addressed by their `name` attribute, the same way template
//! placeholders are marked up:
//!
//! ```rust
//! use revlane_render::dom::{Element, Node};
//!
//! let mut card = Element::new("div")
//!     .with_attr("class", "card")
//!     .with_child(Element::new("span").with_attr("name", "title"));
//!
//! card.named_mut("title").unwrap().set_text("Gold plan");
//! assert_eq!(Node::from(card).to_html(), r#"<div class="card"><span name="title">Gold plan</span></div>"#);
//! ```

use std::fmt;

use serde::Serialize;

/// Attribute carrying the placeholder / slot name.
pub const NAME_ATTR: &str = "name";

/// Elements that never carry children and serialize without an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A node in a detached tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Creates a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Serializes the node as HTML, escaping text and attribute values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub(crate) fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => escape_into(text, false, out),
            Node::Element(el) => el.write_html(out),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// An element with a tag, ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    tag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attrs: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`set_attr`](Self::set_attr).
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder form of [`append`](Self::append).
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.append(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(pos).1)
    }

    /// The `name` attribute, if any.
    pub fn name(&self) -> Option<&str> {
        self.attr(NAME_ATTR)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Adds a class token unless already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attr("class", classes);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Replaces all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(text.into()));
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Path (child indices) to the first descendant matching `pred`, in
    /// document order. The element itself is never considered.
    pub fn descendant_path<P>(&self, pred: P) -> Option<Vec<usize>>
    where
        P: Fn(&Element) -> bool,
    {
        self.descendant_path_dyn(&pred)
    }

    fn descendant_path_dyn(&self, pred: &dyn Fn(&Element) -> bool) -> Option<Vec<usize>> {
        for (i, child) in self.children.iter().enumerate() {
            if let Node::Element(el) = child {
                if pred(el) {
                    return Some(vec![i]);
                }
                if let Some(mut rest) = el.descendant_path_dyn(pred) {
                    rest.insert(0, i);
                    return Some(rest);
                }
            }
        }
        None
    }

    /// Resolves a path returned by [`descendant_path`](Self::descendant_path).
    /// The empty path is the element itself.
    pub fn at_path(&self, path: &[usize]) -> Option<&Element> {
        let mut current = self;
        for &i in path {
            current = match current.children.get(i) {
                Some(Node::Element(el)) => el,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut current = self;
        for &i in path {
            current = match current.children.get_mut(i) {
                Some(Node::Element(el)) => el,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Detaches the node at `path`. The empty path cannot be removed.
    pub fn remove_at(&mut self, path: &[usize]) -> Option<Node> {
        let (&last, parent_path) = path.split_last()?;
        let parent = self.at_path_mut(parent_path)?;
        if last < parent.children.len() {
            Some(parent.children.remove(last))
        } else {
            None
        }
    }

    /// First descendant whose `name` attribute equals `name`.
    pub fn named(&self, name: &str) -> Option<&Element> {
        let path = self.descendant_path(|el| el.name() == Some(name))?;
        self.at_path(&path)
    }

    pub fn named_mut(&mut self, name: &str) -> Option<&mut Element> {
        let path = self.descendant_path(|el| el.name() == Some(name))?;
        self.at_path_mut(&path)
    }

    /// Drops every descendant element for which `pred` returns false,
    /// together with its subtree. Kept elements are visited recursively.
    pub fn retain_descendants<P>(&mut self, pred: P)
    where
        P: Fn(&Element) -> bool,
    {
        self.retain_descendants_dyn(&pred);
    }

    fn retain_descendants_dyn(&mut self, pred: &dyn Fn(&Element) -> bool) {
        self.children.retain(|child| match child {
            Node::Element(el) => pred(el),
            Node::Text(_) => true,
        });
        for child in &mut self.children {
            if let Node::Element(el) = child {
                el.retain_descendants_dyn(pred);
            }
        }
    }

    /// Visits this element and every descendant element in document order.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        visit(self);
        for child in &self.children {
            if let Node::Element(el) = child {
                el.walk(visit);
            }
        }
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            escape_into(value, true, out);
            out.push('"');
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag.as_str()) && self.children.is_empty() {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
