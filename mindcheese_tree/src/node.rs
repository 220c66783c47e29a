// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node storage and read-only accessors.

use alloc::{string::String, vec::Vec};
use core::cmp::Ordering;

use crate::types::{NodeId, Side};

/// A topic in the map.
///
/// Nodes are owned by their [`MindMap`](crate::MindMap) and are only handed out
/// by shared reference; all mutation goes through the map so that its
/// invariants hold after every call.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) generation: u32,
    pub(crate) id: String,
    pub(crate) label: String,
    pub(crate) order: f64,
    pub(crate) side: Option<Side>,
    pub(crate) expanded: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(
        generation: u32,
        id: String,
        label: String,
        order: f64,
        side: Option<Side>,
        expanded: bool,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            generation,
            id,
            label,
            order,
            side,
            expanded,
            parent,
            children: Vec::new(),
        }
    }

    /// Caller-visible identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sibling ordering key.
    ///
    /// After any structural change the keys of a sibling group are `1..=n`
    /// in display order.
    pub fn order(&self) -> f64 {
        self.order
    }

    /// Side of the branch this node belongs to, `None` for the root.
    pub fn side(&self) -> Option<Side> {
        self.side
    }

    /// Whether descendants are shown.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether this is the root of the map.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Parent handle, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in display order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Total order on ordering keys. Unplaced nodes carry `f64::INFINITY` and sort last.
pub(crate) fn compare_order(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}
