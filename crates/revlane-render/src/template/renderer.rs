//! Recursive value-to-node renderer.
//!
//! This module provides [`Renderer`], which turns a `(schema key, value)`
//! pair into a detached node fragment using the templates of a
//! [`TemplateRegistry`].
//!
//! # Dispatch
//!
//! The decoded [`ViewValue`] variant picks the branch:
//!
//! | Variant | Output |
//! |---------|--------|
//! | `Date` | `<span>` holding the UTC date (`YYYY-MM-DD`) |
//! | `Scalar` | template clone with the value in its `text` slot, or a bare `<span>` |
//! | `Array` | template clone (or `<div>`) with one `<key>_item` child per element in its `content` slot; `None` when empty |
//! | `Object` | template clone (or `<div>`) with each field rendered into its placeholder |
//! | `Null`, `Unrenderable` | `None`, logged |
//!
//! # Placeholders
//!
//! Inside an object template, an element carrying `name="<field>"` receives
//! the rendered field. Its `use_template` attribute, when present, overrides
//! the schema key used for the field. A field that renders to nothing takes
//! its placeholder with it, which is how absent data collapses regions of a
//! template without per-field conditionals.
//!
//! Form controls, anchors, frames and the other elements for which HTML
//! gives `name` a meaning of its own are never placeholders: they are
//! neither filled nor pruned.
//!
//! ```rust
//! use revlane_render::{Renderer, TemplateRegistry};
//! use serde_json::json;
//!
//! let mut registry = TemplateRegistry::new();
//! registry
//!     .add_inline("plan", r#"<div><h3 name="name"/><ul name="tags"/></div>"#)
//!     .unwrap();
//! let renderer = Renderer::new(registry);
//!
//! let node = renderer
//!     .render_json("plan", &json!({"id": "p1", "name": "Gold", "tags": []}))
//!     .unwrap();
//! assert_eq!(
//!     node.to_html(),
//!     r#"<div objectId="p1"><h3 name="name"><span>Gold</span></h3></div>"#
//! );
//! ```

use serde_json::Value;

use super::registry::{TemplateRegistry, TEMPLATE_SUFFIX};
use crate::dom::{Element, Node};
use crate::error::UnrenderableValue;
use crate::value::{DateValue, Scalar, ViewValue};

/// Slot receiving scalar content.
pub const TEXT_SLOT: &str = "text";

/// Slot receiving array items.
pub const CONTENT_SLOT: &str = "content";

/// Placeholder attribute overriding the nested schema key.
pub const USE_TEMPLATE_ATTR: &str = "use_template";

/// Attribute stamped with the identifier of a rendered object.
pub const OBJECT_ID_ATTR: &str = "objectId";

/// Suffix appended to a schema key for array elements.
pub const ITEM_SUFFIX: &str = "_item";

/// Renders decoded values against a template registry.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    registry: TemplateRegistry,
}

impl Renderer {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TemplateRegistry {
        &mut self.registry
    }

    /// Decodes a JSON value and renders it.
    pub fn render_json(&self, key: &str, value: &Value) -> Option<Node> {
        self.render(key, &ViewValue::from_json(value))
    }

    /// Renders `value` under schema key `key`.
    ///
    /// Returns `None` for empty arrays and for values that cannot be
    /// rendered; callers decide how to present "nothing".
    pub fn render(&self, key: &str, value: &ViewValue) -> Option<Node> {
        match value {
            ViewValue::Date(date) => Some(render_date(date)),
            ViewValue::Scalar(scalar) => Some(self.render_scalar(key, scalar)),
            ViewValue::Array(items) if items.is_empty() => None,
            ViewValue::Array(items) => Some(self.render_array(key, items)),
            ViewValue::Object(fields) => Some(self.render_object(key, value, fields)),
            ViewValue::Null | ViewValue::Unrenderable(_) => {
                let err = UnrenderableValue::new(key, value);
                tracing::error!(key, kind = value.kind(), "{}", err);
                None
            }
        }
    }

    fn template_or(&self, key: &str, fallback: &str) -> Element {
        self.registry
            .lookup(key)
            .cloned()
            .unwrap_or_else(|| Element::new(fallback))
    }

    fn render_scalar(&self, key: &str, scalar: &Scalar) -> Node {
        let mut out = self.template_or(key, "span");
        let text = scalar.to_string();
        match out.named_mut(TEXT_SLOT) {
            Some(slot) => slot.set_text(text),
            None => out.set_text(text),
        }
        out.into()
    }

    fn render_array(&self, key: &str, items: &[ViewValue]) -> Node {
        let mut out = self.template_or(key, "div");
        let item_key = format!("{}{}", key, ITEM_SUFFIX);
        let children: Vec<Node> = items
            .iter()
            .filter_map(|item| self.render(&item_key, item))
            .collect();

        let target = match out.descendant_path(|el| el.name() == Some(CONTENT_SLOT)) {
            Some(path) => out.at_path_mut(&path),
            None => Some(&mut out),
        };
        if let Some(target) = target {
            for child in children {
                target.append(child);
            }
        }
        out.into()
    }

    fn render_object(&self, key: &str, value: &ViewValue, fields: &[(String, ViewValue)]) -> Node {
        let mut out = self.template_or(key, "div");

        // Placeholders for fields without data are dropped up front.
        out.retain_descendants(|el| match el.name() {
            Some(name) if is_placeholder_name(name) && !has_native_name(el) => fields
                .iter()
                .any(|(field, v)| field == name && !v.is_null()),
            _ => true,
        });

        for (field, field_value) in fields {
            if field_value.is_null() {
                continue;
            }
            let Some(path) =
                out.descendant_path(|el| el.name() == Some(field.as_str()) && !has_native_name(el))
            else {
                continue;
            };
            let nested_key = out
                .at_path(&path)
                .and_then(|placeholder| placeholder.attr(USE_TEMPLATE_ATTR))
                .unwrap_or(field.as_str())
                .to_string();

            match self.render(&nested_key, field_value) {
                Some(node) => {
                    if let Some(placeholder) = out.at_path_mut(&path) {
                        placeholder.append(node);
                    }
                }
                None => {
                    out.remove_at(&path);
                }
            }
        }

        if let Some(id) = value.object_id() {
            out.set_attr(OBJECT_ID_ATTR, id);
        }
        out.into()
    }
}

/// Whether a `name` attribute marks a field placeholder rather than a
/// structural slot or a nested template definition.
fn is_placeholder_name(name: &str) -> bool {
    name != TEXT_SLOT && name != CONTENT_SLOT && !name.ends_with(TEMPLATE_SUFFIX)
}

/// Elements whose `name` attribute HTML already uses for something else.
const NATIVE_NAME_TAGS: &[&str] = &[
    "a", "button", "fieldset", "form", "iframe", "input", "map", "meta", "object", "output",
    "param", "select", "textarea",
];

fn has_native_name(el: &Element) -> bool {
    NATIVE_NAME_TAGS.contains(&el.tag())
}

fn render_date(date: &DateValue) -> Node {
    Element::new("span")
        .with_child(Node::text(date.display_date()))
        .into()
}

/// Builds the "nothing here" message node shown by views for empty results.
pub fn message_node(text: &str) -> Node {
    let mut el = Element::new("div");
    el.add_class("message");
    el.add_class("tmfbox");
    el.set_text(text);
    el.into()
}
