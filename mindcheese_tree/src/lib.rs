// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MindCheese Tree: the editable model behind a two-sided mind map.
//!
//! A mind map is a single root topic with branches growing to its left and
//! right. This crate owns that structure and keeps it consistent under
//! arbitrary insert, move, and remove operations; rendering, layout, and
//! input handling live elsewhere and read the map through its accessors.
//!
//! - Nodes live in an arena and are addressed by generational [`NodeId`]
//!   handles, so stale handles are detected instead of aliasing new nodes.
//! - Every node also carries a caller-visible string id, unique in the map,
//!   which is what gets persisted. [`MindMap::find`] maps one to the other.
//! - Siblings are ordered by a numeric key. Fractional keys let a node be
//!   placed between two siblings; the group is then renumbered `1..=n`.
//! - Each branch commits to a [`Side`] at the root, and every descendant
//!   inherits it. Moving a branch re-flows the side through its subtree.
//!
//! ## Not a layout engine
//!
//! Nothing here knows where a node is drawn. Drag-and-drop targeting lives in
//! `mindcheese_drag`, which takes node rectangles from the caller; the
//! persisted document form lives in `mindcheese_node_tree`.
//!
//! ## API overview
//!
//! - [`MindMap`]: the map; structural operations and queries.
//! - [`Node`]: read-only view of one topic.
//! - [`NewNode`]: template for [`MindMap::add_node`].
//! - [`Placement`]: where [`MindMap::move_node`] puts a node among its siblings.
//! - [`TreeError`]: why an operation was rejected.
//!
//! Key operations:
//! - [`MindMap::set_root`], [`MindMap::add_node`], [`MindMap::insert_before`],
//!   [`MindMap::insert_after`] → [`NodeId`]
//! - [`MindMap::move_node`] and [`MindMap::remove_node`]
//! - [`MindMap::reindex`] to normalize sibling keys explicitly.
//! - [`MindMap::depth_first`], [`MindMap::next_depth_first`], and
//!   [`MindMap::prev_depth_first`] for pre-order traversal.
//!
//! ```rust
//! use mindcheese_tree::{MindMap, NewNode, Side};
//!
//! let mut map = MindMap::new();
//! let root = map.set_root("root", "Trip").unwrap();
//! let a = map
//!     .add_node(root, NewNode { side: Some(Side::Left), ..NewNode::new("a", "Packing") })
//!     .unwrap();
//! let b = map.add_node(root, NewNode::new("b", "Route")).unwrap();
//! let c = map.insert_after(a, "c", "Tickets").unwrap();
//!
//! assert_eq!(map.children_of(root), &[a, c, b]);
//! assert_eq!(map.node(c).unwrap().side(), Some(Side::Left));
//! assert_eq!(map.node(b).unwrap().side(), Some(Side::Right));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod node;
mod tree;
mod types;

pub use error::TreeError;
pub use node::Node;
pub use tree::MindMap;
pub use types::{NewNode, NodeId, Placement, Side};
