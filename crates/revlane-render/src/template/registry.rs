//! Template registry for inline, file-based and built-in templates.
//!
//! This module provides [`TemplateRegistry`], which resolves a schema key to
//! the node fragment used as its rendering template.
//!
//! # Template Containers
//!
//! Templates are usually authored together in one container document. Inside
//! a container, the element whose `name` attribute is `<key>_template` is the
//! template for `key`, wherever it sits in the document:
//!
//! ```xml
//! <templates>
//!   <div name="plan_short_summary_template" class="tmfbox">
//!     <div name="name"/>
//!     <div name="validFor"/>
//!   </div>
//!   <span name="validFor_template"><span name="startDateTime"/></span>
//! </templates>
//! ```
//!
//! When a container defines the same name twice, the first one in document
//! order wins.
//!
//! # Resolution Order
//!
//! 1. Inline templates added via [`TemplateRegistry::add_inline`] (highest priority)
//! 2. Containers, in registration order (first container wins)
//! 3. Built-in templates (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use revlane_render::TemplateRegistry;
//!
//! let mut registry = TemplateRegistry::new();
//! registry
//!     .add_container(r#"<templates><b name="title_template"><i name="text"/></b></templates>"#)
//!     .unwrap();
//! registry.add_inline("title", "<h1><span name=\"text\"/></h1>").unwrap();
//!
//! assert_eq!(registry.lookup("title").unwrap().tag(), "h1");
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::builtin::BUILTIN_TEMPLATES;
use super::markup::{parse_fragment, MarkupError};
use crate::dom::{Element, Node};

/// Suffix that turns a schema key into a template element name.
pub const TEMPLATE_SUFFIX: &str = "_template";

/// Extensions recognized when scanning a template directory.
pub const TEMPLATE_EXTENSIONS: &[&str] = &["xhtml", "html", "xml"];

/// Error type for template registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Markup that could not be parsed.
    #[error("failed to parse template {source_name}: {error}")]
    Parse {
        source_name: String,
        #[source]
        error: MarkupError,
    },

    /// Failed to read a template file or directory.
    #[error("failed to read template \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Inline markup without any element.
    #[error("template \"{0}\" contains no element")]
    EmptyMarkup(String),
}

/// Returns the element name that marks the template for `key`.
pub fn template_name(key: &str) -> String {
    format!("{}{}", key, TEMPLATE_SUFFIX)
}

/// Registry resolving schema keys to template fragments.
///
/// # Thread Safety
///
/// The registry is immutable once built and can be shared by reference.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    /// Inline templates, keyed by schema key.
    inline: HashMap<String, Element>,

    /// Templates collected from containers; first definition wins.
    containers: HashMap<String, Element>,

    /// Sources registered so far, for diagnostics.
    sources: Vec<String>,

    /// Built-in templates (lowest priority fallback).
    builtin: HashMap<String, Element>,
}

impl TemplateRegistry {
    /// Creates an empty template registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in markup fails to parse.
    pub fn with_builtins() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.add_builtin_container(BUILTIN_TEMPLATES)?;
        Ok(registry)
    }

    /// Adds an inline template for `key`.
    ///
    /// Inline templates have the highest priority. The markup should have a
    /// single root element; several top-level elements are wrapped in a `div`.
    pub fn add_inline(&mut self, key: impl Into<String>, markup: &str) -> Result<(), RegistryError> {
        let key = key.into();
        let nodes = parse_fragment(markup).map_err(|error| RegistryError::Parse {
            source_name: format!("inline:{}", key),
            error,
        })?;
        let mut elements: Vec<Element> = nodes
            .into_iter()
            .filter_map(|node| match node {
                Node::Element(el) => Some(el),
                Node::Text(_) => None,
            })
            .collect();
        let root = match elements.len() {
            0 => return Err(RegistryError::EmptyMarkup(key)),
            1 => elements.remove(0),
            _ => {
                let mut wrapper = Element::new("div");
                for el in elements {
                    wrapper.append(el);
                }
                wrapper
            }
        };
        self.inline.insert(key, root);
        Ok(())
    }

    /// Adds every `*_template` element found in a container document.
    pub fn add_container(&mut self, markup: &str) -> Result<usize, RegistryError> {
        let source = format!("container#{}", self.sources.len());
        self.add_container_named(&source, markup)
    }

    /// Reads a container document from disk.
    pub fn add_container_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, RegistryError> {
        let path = path.as_ref();
        let markup = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_container_named(&path.display().to_string(), &markup)
    }

    /// Adds every container file in `dir` with a recognized extension,
    /// in file name order. Subdirectories are not scanned.
    pub fn add_template_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize, RegistryError> {
        let dir = dir.as_ref();
        let read_err = |source: std::io::Error| RegistryError::Read {
            path: dir.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            let recognized = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| TEMPLATE_EXTENSIONS.contains(&ext))
                .unwrap_or(false);
            if recognized && path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        let mut added = 0;
        for file in files {
            added += self.add_container_file(&file)?;
        }
        Ok(added)
    }

    /// Adds a path that is either a container file or a template directory.
    pub fn add_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, RegistryError> {
        let path = path.as_ref();
        if path.is_dir() {
            self.add_template_dir(path)
        } else {
            self.add_container_file(path)
        }
    }

    /// Adds a container to the built-in tier.
    pub fn add_builtin_container(&mut self, markup: &str) -> Result<usize, RegistryError> {
        let found = collect_templates("builtin", markup)?;
        let count = found.len();
        for (key, el) in found {
            self.builtin.entry(key).or_insert(el);
        }
        Ok(count)
    }

    /// Drops the built-in templates.
    pub fn clear_builtins(&mut self) {
        self.builtin.clear();
    }

    fn add_container_named(&mut self, source: &str, markup: &str) -> Result<usize, RegistryError> {
        let found = collect_templates(source, markup)?;
        let count = found.len();
        for (key, el) in found {
            self.containers.entry(key).or_insert(el);
        }
        self.sources.push(source.to_string());
        tracing::debug!(source, templates = count, "registered template container");
        Ok(count)
    }

    /// Looks up the template for a schema key.
    pub fn lookup(&self, key: &str) -> Option<&Element> {
        self.inline
            .get(key)
            .or_else(|| self.containers.get(key))
            .or_else(|| self.builtin.get(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// All resolvable keys, sorted and deduplicated.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .inline
            .keys()
            .chain(self.containers.keys())
            .chain(self.builtin.keys())
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Number of distinct resolvable keys.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.containers.is_empty() && self.builtin.is_empty()
    }

    /// Names of the registered container sources.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}

/// Collects `(key, template)` pairs from a container, first definition first.
fn collect_templates(source: &str, markup: &str) -> Result<Vec<(String, Element)>, RegistryError> {
    let nodes = parse_fragment(markup).map_err(|error| RegistryError::Parse {
        source_name: source.to_string(),
        error,
    })?;
    let mut found: Vec<(String, Element)> = Vec::new();
    for node in &nodes {
        if let Node::Element(root) = node {
            root.walk(&mut |el| {
                let key = el
                    .name()
                    .and_then(|name| name.strip_suffix(TEMPLATE_SUFFIX))
                    .filter(|key| !key.is_empty());
                if let Some(key) = key {
                    if !found.iter().any(|(k, _)| k == key) {
                        found.push((key.to_string(), el.clone()));
                    }
                }
            });
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CONTAINER: &str = r#"
        <templates>
          <div name="plan_template" class="first"><span name="name"/></div>
          <section>
            <div name="plan_template" class="second"/>
            <li name="plan_item_template"><span name="text"/></li>
          </section>
        </templates>"#;

    #[test]
    fn test_template_name() {
        assert_eq!(template_name("plan_summary"), "plan_summary_template");
    }

    #[test]
    fn test_container_first_definition_wins() {
        let mut registry = TemplateRegistry::new();
        let added = registry.add_container(CONTAINER).unwrap();
        assert_eq!(added, 2);
        assert_eq!(registry.lookup("plan").unwrap().attr("class"), Some("first"));
        assert_eq!(registry.lookup("plan_item").unwrap().tag(), "li");
        assert!(registry.lookup("missing").is_none());
    }

    #[test]
    fn test_earlier_container_wins() {
        let mut registry = TemplateRegistry::new();
        registry.add_container(CONTAINER).unwrap();
        registry
            .add_container(r#"<div name="plan_template" class="later"/>"#)
            .unwrap();
        assert_eq!(registry.lookup("plan").unwrap().attr("class"), Some("first"));
        assert_eq!(registry.sources().len(), 2);
    }

    #[test]
    fn test_inline_shadows_container() {
        let mut registry = TemplateRegistry::new();
        registry.add_container(CONTAINER).unwrap();
        registry.add_inline("plan", "<article/>").unwrap();
        assert_eq!(registry.lookup("plan").unwrap().tag(), "article");
    }

    #[test]
    fn test_inline_multiple_roots_wrapped() {
        let mut registry = TemplateRegistry::new();
        registry.add_inline("pair", "<a/><b/>").unwrap();
        let root = registry.lookup("pair").unwrap();
        assert_eq!(root.tag(), "div");
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn test_inline_without_element_is_error() {
        let mut registry = TemplateRegistry::new();
        let err = registry.add_inline("empty", "just text").unwrap_err();
        assert!(matches!(err, RegistryError::EmptyMarkup(key) if key == "empty"));
    }

    #[test]
    fn test_parse_error_names_source() {
        let mut registry = TemplateRegistry::new();
        let err = registry.add_container("<div>").unwrap_err();
        assert!(err.to_string().contains("container#0"));
    }

    #[test]
    fn test_builtins_are_lowest_priority() {
        let mut registry = TemplateRegistry::with_builtins().unwrap();
        assert!(registry.contains("plan_summary"));
        registry
            .add_container(r#"<p name="plan_summary_template"/>"#)
            .unwrap();
        assert_eq!(registry.lookup("plan_summary").unwrap().tag(), "p");

        registry.clear_builtins();
        assert!(!registry.contains("cb_summary"));
    }

    #[test]
    fn test_keys_are_deduplicated() {
        let mut registry = TemplateRegistry::new();
        registry.add_container(CONTAINER).unwrap();
        registry.add_inline("plan", "<p/>").unwrap();
        assert_eq!(registry.keys(), vec!["plan", "plan_item"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_add_template_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("b.xhtml"),
            r#"<div name="shared_template" class="from-b"/>"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("a.html"),
            r#"<div><div name="shared_template" class="from-a"/><i name="only_a_template"/></div>"#,
        )
        .unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "<ignored").unwrap();

        let mut registry = TemplateRegistry::new();
        let added = registry.add_path(temp_dir.path()).unwrap();
        assert_eq!(added, 3);
        assert_eq!(
            registry.lookup("shared").unwrap().attr("class"),
            Some("from-a")
        );
        assert!(registry.contains("only_a"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let mut registry = TemplateRegistry::new();
        let err = registry
            .add_container_file("/definitely/not/here.xhtml")
            .unwrap_err();
        assert!(matches!(err, RegistryError::Read { .. }));
    }
}
