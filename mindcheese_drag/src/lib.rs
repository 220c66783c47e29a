// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MindCheese Drag: drag-and-drop reparenting for two-sided mind maps.
//!
//! While the user drags a topic, a translucent *shadow* of it follows the
//! pointer. This crate decides which node the shadow would attach to if it
//! were dropped now, where a guide line between the two should be drawn, and
//! where among the new parent's children the dragged node should land.
//!
//! It is split into:
//! - [`NodeGeometry`]: the host's answer to "where is this node drawn?".
//!   Layout is never computed here.
//! - [`Resolver`]: a pure, synchronous nearest-candidate search. It reads a
//!   [`MindMap`](mindcheese_tree::MindMap) and never mutates it.
//! - [`DragSession`]: per-gesture state (capture, delayed and periodic
//!   lookups, cancel, drop) driven by caller-supplied timestamps.
//!
//! ## How a target is chosen
//!
//! 1. The shadow's horizontal center against the root's picks a [`Side`].
//! 2. Candidates are the root and all nodes on that side, excluding the
//!    dragged node and its descendants, so a drop can never form a cycle.
//! 3. A candidate qualifies only if there is horizontal room between its
//!    inner edge and the shadow's facing edge.
//! 4. The smallest Manhattan distance between the two edge midpoints wins.
//!
//! On drop, the dragged node lands before the nearest sibling below the
//! shadow on that side, or last if there is none.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use mindcheese_drag::Resolver;
//! use mindcheese_tree::{MindMap, NewNode, Placement, Side};
//! use hashbrown::HashMap;
//!
//! let mut map = MindMap::new();
//! let root = map.set_root("r", "Root").unwrap();
//! let left = map
//!     .add_node(root, NewNode { side: Some(Side::Left), ..NewNode::new("l", "Left") })
//!     .unwrap();
//! let right = map
//!     .add_node(root, NewNode { side: Some(Side::Right), ..NewNode::new("rt", "Right") })
//!     .unwrap();
//!
//! let mut rects = HashMap::new();
//! rects.insert(root, Rect::new(0.0, 0.0, 80.0, 30.0));
//! rects.insert(left, Rect::new(-140.0, 0.0, -80.0, 20.0));
//! rects.insert(right, Rect::new(120.0, 0.0, 180.0, 20.0));
//!
//! // Drop `left` to the right of `right`.
//! let shadow = Rect::new(220.0, 0.0, 280.0, 20.0);
//! let mv = Resolver::default().plan_drop(&map, left, shadow, &rects).unwrap();
//! assert_eq!(mv.parent, right);
//! assert_eq!(mv.placement, Placement::Last);
//!
//! mv.apply(&mut map).unwrap();
//! assert_eq!(map.node(left).unwrap().side(), Some(Side::Right));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod geometry;
mod resolver;
mod session;

pub use geometry::NodeGeometry;
pub use resolver::{DragTarget, DropMove, Resolver};
pub use session::{DragConfig, DragSession};

pub use mindcheese_tree::Side;
