//! XHTML markup parsing into [`Node`] trees.
//!
//! Templates are authored as well-formed XHTML fragments. Entities are
//! unescaped; comments, processing instructions and the doctype are dropped,
//! and so is text made only of ASCII whitespace (indentation between
//! elements); `&#160;` survives.
//!
//! Only the XML entities are known to the parser. Use numeric references
//! (`&#160;`) instead of HTML named entities such as `&nbsp;`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::dom::{Element, Node};

/// Error raised while parsing template markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("malformed markup at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("unexpected closing tag </{0}>")]
    UnexpectedClose(String),

    #[error("unclosed element <{0}>")]
    Unclosed(String),
}

/// Parses a markup fragment into its top-level nodes.
pub fn parse_fragment(markup: &str) -> Result<Vec<Node>, MarkupError> {
    let mut reader = Reader::from_str(markup);
    let mut stack: Vec<Element> = Vec::new();
    let mut roots: Vec<Node> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| syntax(&reader, e.to_string()))?;
        match event {
            Event::Start(start) => {
                stack.push(element_from(&reader, &start)?);
            }
            Event::Empty(start) => {
                let el = element_from(&reader, &start)?;
                push_node(&mut stack, &mut roots, el.into());
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                let el = stack.pop().ok_or_else(|| MarkupError::UnexpectedClose(name))?;
                push_node(&mut stack, &mut roots, el.into());
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| syntax(&reader, e.to_string()))?;
                if !text.chars().all(|c| c.is_ascii_whitespace()) {
                    push_node(&mut stack, &mut roots, Node::text(text.into_owned()));
                }
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                push_node(&mut stack, &mut roots, Node::text(text));
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    match stack.pop() {
        Some(open) => Err(MarkupError::Unclosed(open.tag().to_string())),
        None => Ok(roots),
    }
}

fn push_node(stack: &mut [Element], roots: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.append(node),
        None => roots.push(node),
    }
}

fn element_from(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Element, MarkupError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut el = Element::new(tag);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| syntax(reader, e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| syntax(reader, e.to_string()))?;
        el.set_attr(key, value.into_owned());
    }
    Ok(el)
}

fn syntax(reader: &Reader<&[u8]>, message: String) -> MarkupError {
    MarkupError::Syntax {
        position: reader.buffer_position() as u64,
        message,
    }
}
