//! Template lookup and rendering.
//!
//! Templates are XHTML fragments. An element named `<key>_template` is the
//! template for schema key `key`; inside it, elements named after object
//! fields are placeholders, and the reserved names `text` and `content`
//! mark where scalar text and array items go.
//!
//! - [`markup`] parses XHTML into [`Node`](crate::dom::Node) trees.
//! - [`registry`] collects templates from inline markup, containers,
//!   template directories and the built-in set.
//! - [`renderer`] walks a decoded value and fills template clones.

pub mod builtin;
pub mod markup;
pub mod registry;
pub mod renderer;

pub use builtin::BUILTIN_TEMPLATES;
pub use markup::{parse_fragment, MarkupError};
pub use registry::{template_name, RegistryError, TemplateRegistry, TEMPLATE_SUFFIX};
pub use renderer::{message_node, Renderer, CONTENT_SLOT, OBJECT_ID_ATTR, TEXT_SLOT};
