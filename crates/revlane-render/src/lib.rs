//! # Revlane Render - JSON to node-tree rendering
//!
//! `revlane-render` turns backend JSON into detached HTML node trees using
//! named XHTML templates. It knows nothing about where the nodes end up;
//! the `revlane` crate places them into lanes.
//!
//! ## Core Concepts
//!
//! - [`ViewValue`]: JSON classified once (date, scalar, array, object)
//! - [`TemplateRegistry`]: schema key to template resolution
//! - [`Renderer`]: recursive rendering of a value under a schema key
//! - [`Node`] / [`Element`]: owned output tree, serializable as HTML
//!
//! ## Quick Start
//!
//! ```rust
//! use revlane_render::{Renderer, TemplateRegistry};
//! use serde_json::json;
//!
//! let mut registry = TemplateRegistry::new();
//! registry
//!     .add_inline("bill", r#"<div class="bill"><p name="amount"/><p name="estimated"/></div>"#)
//!     .unwrap();
//! let renderer = Renderer::new(registry);
//!
//! let node = renderer
//!     .render_json("bill", &json!({"id": "b1", "amount": 12.5}))
//!     .unwrap();
//! assert_eq!(
//!     node.to_html(),
//!     r#"<div class="bill" objectId="b1"><p name="amount"><span>12.5</span></p></div>"#
//! );
//! ```
//!
//! ## Template Sources
//!
//! Templates come from inline markup, container documents (files or
//! directories of `.xhtml`/`.html`/`.xml`), and a built-in set covering the
//! revenue-sharing resources. See [`template::registry`] for the
//! resolution order.

pub mod dom;
mod error;
pub mod template;
pub mod value;

pub use dom::{Element, Node};
pub use error::UnrenderableValue;
pub use template::{
    message_node, parse_fragment, MarkupError, RegistryError, Renderer, TemplateRegistry,
};
pub use value::{DateValue, Scalar, ViewValue};
