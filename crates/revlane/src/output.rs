//! Page output.
//!
//! [`OutputMode`] picks how the lane page is written: as the HTML table a
//! browser would show, as plain text for a terminal, or as the JSON node
//! tree. [`OutputDestination`] picks where it goes.

use std::io::Write;
use std::path::PathBuf;

use revlane_render::Node;
use serde::{Deserialize, Serialize};

use crate::lanes::LaneStack;

/// Controls how the page is rendered (`--output`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// The `<table>` page, menu included
    #[default]
    Html,
    /// One header line per lane followed by the text of its cards
    Text,
    /// Lanes and their node trees as JSON
    Json,
}

/// Renders the page in `mode`.
pub fn render_page(lanes: &LaneStack, mode: OutputMode) -> Result<String, serde_json::Error> {
    match mode {
        OutputMode::Html => Ok(lanes.to_node().to_html()),
        OutputMode::Text => Ok(render_text(lanes)),
        OutputMode::Json => serde_json::to_string_pretty(&PageData::from(lanes)),
    }
}

#[derive(Serialize)]
struct PageData<'a> {
    lanes: Vec<LaneData<'a>>,
}

#[derive(Serialize)]
struct LaneData<'a> {
    index: usize,
    label: &'a str,
    fragments: Vec<&'a Node>,
}

impl<'a> From<&'a LaneStack> for PageData<'a> {
    fn from(lanes: &'a LaneStack) -> Self {
        Self {
            lanes: lanes
                .lanes()
                .iter()
                .map(|lane| LaneData {
                    index: lane.index(),
                    label: lane.label(),
                    fragments: lane.fragments().map(|(_, node)| node).collect(),
                })
                .collect(),
        }
    }
}

fn render_text(lanes: &LaneStack) -> String {
    let mut out = String::new();
    for lane in lanes.lanes() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!(
            "{}\n",
            console::style(format!("[{}] {}", lane.index(), lane.label())).bold()
        ));
        for (_, node) in lane.fragments() {
            for line in text_lines(node) {
                out.push_str("  ");
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }
    }
    out
}

/// Elements that start a new line in text output.
const BLOCK_TAGS: &[&str] = &[
    "article", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "p", "section", "table", "tr",
    "ul",
];

/// Text of `node`, broken into lines at block elements.
pub fn text_lines(node: &Node) -> Vec<String> {
    let mut lines = vec![String::new()];
    collect_lines(node, &mut lines);
    lines
        .into_iter()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}

fn collect_lines(node: &Node, lines: &mut Vec<String>) {
    match node {
        Node::Text(text) => {
            if let Some(line) = lines.last_mut() {
                line.push_str(text);
            }
        }
        Node::Element(el) => {
            let block = BLOCK_TAGS.contains(&el.tag());
            if block {
                lines.push(String::new());
            }
            for child in el.children() {
                collect_lines(child, lines);
            }
            if block {
                lines.push(String::new());
            }
        }
    }
}

/// Destination for rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputDestination {
    #[default]
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    pub fn write_text(&self, content: &str) -> std::io::Result<()> {
        match self {
            OutputDestination::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                writeln!(handle, "{}", content)
            }
            OutputDestination::File(path) => {
                validate_path(path)?;
                std::fs::write(path, content)
            }
        }
    }
}

/// Validates that a file path's parent directory exists.
fn validate_path(path: &std::path::Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }
    }
    Ok(())
}
