// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the mind map: node handles, sides, placements, and node templates.

use alloc::string::String;

/// Identifier for a node in the map (generational).
///
/// A `NodeId` is a cheap handle into the map's arena. Once the node it refers to
/// is removed the handle becomes stale: accessors return `None` for it, and a
/// later node that reuses the slot gets a higher generation, so a stale handle
/// never aliases a new node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Which half of the map a branch grows into.
///
/// Every non-root node has a side. Only direct children of the root choose it;
/// deeper nodes always inherit the side of their parent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Side {
    /// Branch grows to the left of the root.
    Left,
    /// Branch grows to the right of the root.
    Right,
}

impl Side {
    /// The other side.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Where a moved node lands among its new siblings.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Placement {
    /// Become the first child.
    First,
    /// Become the last child.
    Last,
    /// Land directly before this sibling.
    Before(NodeId),
}

/// Template for a node created with [`MindMap::add_node`](crate::MindMap::add_node).
///
/// ```rust
/// use mindcheese_tree::{NewNode, Side};
///
/// let node = NewNode {
///     side: Some(Side::Left),
///     expanded: false,
///     ..NewNode::new("ideas", "Ideas")
/// };
/// assert_eq!(node.order, None);
/// ```
#[derive(Clone, Debug)]
pub struct NewNode {
    /// Caller-visible identifier, unique within the map.
    pub id: String,
    /// Display text.
    pub label: String,
    /// Ordering hint among the new siblings; `None` appends the node last.
    ///
    /// Fractional hints place the node between existing siblings, whose keys
    /// are consecutive integers starting at 1.
    pub order: Option<f64>,
    /// Requested side. Only honored when the parent is the root; `None` lets
    /// the map balance the two halves.
    pub side: Option<Side>,
    /// Whether descendants are shown.
    pub expanded: bool,
}

impl NewNode {
    /// An expanded node with no ordering hint and no side preference.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            order: None,
            side: None,
            expanded: true,
        }
    }
}
