//! The lane stack: a menu column followed by drill-down columns.
//!
//! Every drill-down pushes a lane to the right. Clicking inside an earlier
//! lane first discards every lane to its right, so the page always reads as
//! one path from the menu to the most detailed view.
//!
//! Fragments added to a lane get a [`NodeId`]. The stack keeps a table from
//! id to lane index, which is how [`LaneStack::clean_after`] finds the lane
//! a click came from.
//!
//! ```rust
//! use revlane::lanes::{LaneStack, Origin};
//! use revlane_render::message_node;
//!
//! let mut lanes = LaneStack::new();
//! lanes.push_lane("plans");
//! let card = lanes.add_to_current_lane(message_node("Gold")).unwrap();
//! lanes.push_lane("subscriptions");
//! lanes.push_lane("bills");
//!
//! lanes.clean_after(Origin::Node(card));
//! assert_eq!(lanes.len(), 1);
//! assert_eq!(lanes.current_col(), 0);
//! ```

use std::collections::HashMap;
use std::fmt;

use revlane_render::{Element, Node};

use crate::action::Action;

/// Identifies a fragment placed in a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a user action was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A menu entry. Drill-downs from the menu replace every lane.
    Menu,
    /// A fragment inside a lane.
    Node(NodeId),
}

/// Returned by [`LaneStack::push_lane`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneHandle {
    pub index: usize,
}

/// One column of fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    index: usize,
    label: String,
    fragments: Vec<(NodeId, Node)>,
}

impl Lane {
    pub fn index(&self) -> usize {
        self.index
    }

    /// The label the lane was pushed with. Not part of the rendered page.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn fragments(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.fragments.iter().map(|(id, node)| (*id, node))
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn to_node(&self) -> Node {
        let mut td = Element::new("td")
            .with_attr("name", format!("lane_{}", self.index))
            .with_attr("class", "lane");
        for (_, node) in &self.fragments {
            td.append(node.clone());
        }
        td.into()
    }
}

/// An item of the menu column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Group(String),
    /// Entries without an action are disabled and hidden.
    Entry {
        label: String,
        action: Option<Action>,
    },
    Separator,
}

impl MenuItem {
    fn to_node(&self) -> Node {
        match self {
            MenuItem::Group(label) => Element::new("h4").with_child(Node::text(label.as_str())).into(),
            MenuItem::Entry { label, action } => {
                let mut button = Element::new("button")
                    .with_attr("class", "menuButton")
                    .with_child(Node::text(label.as_str()));
                match action {
                    Some(action) => button.set_attr("data-action", action.as_str()),
                    None => {
                        button.set_attr("disabled", "true");
                        button.set_attr("style", "display:none");
                    }
                }
                button.into()
            }
            MenuItem::Separator => Element::new("hr").into(),
        }
    }
}

/// The menu column plus an ordered stack of lanes.
///
/// The current lane is always the rightmost one; `current_col` is `-1` when
/// there are no lanes.
#[derive(Debug, Clone, Default)]
pub struct LaneStack {
    menu: Vec<MenuItem>,
    lanes: Vec<Lane>,
    node_lanes: HashMap<NodeId, usize>,
    next_id: u64,
}

impl LaneStack {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Menu
    // =========================================================================

    pub fn add_menu_group(&mut self, label: impl Into<String>) {
        self.menu.push(MenuItem::Group(label.into()));
    }

    pub fn add_menu_entry(&mut self, label: impl Into<String>, action: Option<Action>) {
        self.menu.push(MenuItem::Entry {
            label: label.into(),
            action,
        });
    }

    pub fn add_menu_separator(&mut self) {
        self.menu.push(MenuItem::Separator);
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    // =========================================================================
    // Lanes
    // =========================================================================

    /// Appends an empty lane at the right end; it becomes the current lane.
    pub fn push_lane(&mut self, label: impl Into<String>) -> LaneHandle {
        let index = self.lanes.len();
        let label = label.into();
        tracing::debug!(index, label = label.as_str(), "push lane");
        self.lanes.push(Lane {
            index,
            label,
            fragments: Vec::new(),
        });
        LaneHandle { index }
    }

    /// Removes the rightmost lane and forgets its fragments.
    pub fn pop_lane(&mut self) -> Option<Lane> {
        let lane = self.lanes.pop()?;
        for (id, _) in &lane.fragments {
            self.node_lanes.remove(id);
        }
        tracing::debug!(index = lane.index, "pop lane");
        Some(lane)
    }

    /// Appends a fragment to the current lane. Without a lane, the fragment
    /// is dropped and `None` returned.
    pub fn add_to_current_lane(&mut self, fragment: Node) -> Option<NodeId> {
        let lane = self.lanes.last_mut()?;
        self.next_id += 1;
        let id = NodeId(self.next_id);
        lane.fragments.push((id, fragment));
        self.node_lanes.insert(id, lane.index);
        Some(id)
    }

    /// Pops lanes until the lane holding `origin` is the rightmost one.
    ///
    /// A menu origin, or a node that is no longer in any lane, clears every
    /// lane. Returns the removed lanes, rightmost first.
    pub fn clean_after(&mut self, origin: Origin) -> Vec<Lane> {
        let keep = match origin {
            Origin::Menu => 0,
            Origin::Node(id) => self.lane_of(id).map(|index| index + 1).unwrap_or(0),
        };
        let mut removed = Vec::new();
        while self.lanes.len() > keep {
            match self.pop_lane() {
                Some(lane) => removed.push(lane),
                None => break,
            }
        }
        removed
    }

    /// Index of the lane holding `id`.
    pub fn lane_of(&self, id: NodeId) -> Option<usize> {
        self.node_lanes.get(&id).copied()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.lanes.len().checked_sub(1)
    }

    /// The current lane index, `-1` when empty.
    pub fn current_col(&self) -> isize {
        self.lanes.len() as isize - 1
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn lane(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn current_lane(&self) -> Option<&Lane> {
        self.lanes.last()
    }

    pub fn fragment(&self, id: NodeId) -> Option<&Node> {
        let lane = self.lanes.get(self.lane_of(id)?)?;
        lane.fragments
            .iter()
            .find(|(fid, _)| *fid == id)
            .map(|(_, node)| node)
    }

    /// The `objectId` stamped on a fragment's root element.
    pub fn object_id(&self, id: NodeId) -> Option<&str> {
        self.fragment(id)?.as_element()?.attr("objectId")
    }

    /// The whole page: a one-row table with the menu and one cell per lane.
    pub fn to_node(&self) -> Node {
        let mut menu = Element::new("td")
            .with_attr("name", "menu")
            .with_attr("class", "menu");
        for item in &self.menu {
            menu.append(item.to_node());
        }

        let mut row = Element::new("tr").with_child(menu);
        for lane in &self.lanes {
            row.append(lane.to_node());
        }
        Element::new("table").with_child(row).into()
    }
}
