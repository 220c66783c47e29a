// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where nodes are drawn, as reported by the host's layout.

use core::hash::BuildHasher;

use hashbrown::HashMap;
use kurbo::Rect;
use mindcheese_tree::NodeId;

/// Source of on-screen rectangles for nodes.
///
/// The resolver never computes layout; it asks the host for each node's
/// rectangle in one shared coordinate space (for example the scroll content
/// of the map view). A node without a rectangle yet (not laid out, hidden
/// under a collapsed parent) returns `None` and is skipped as a candidate.
///
/// Closures and `hashbrown` maps keyed by [`NodeId`] implement this trait.
pub trait NodeGeometry {
    /// Rectangle of `node`, if it has been laid out.
    fn bounds(&self, node: NodeId) -> Option<Rect>;
}

impl<F> NodeGeometry for F
where
    F: Fn(NodeId) -> Option<Rect>,
{
    fn bounds(&self, node: NodeId) -> Option<Rect> {
        self(node)
    }
}

impl<S: BuildHasher> NodeGeometry for HashMap<NodeId, Rect, S> {
    fn bounds(&self, node: NodeId) -> Option<Rect> {
        self.get(&node).copied()
    }
}
