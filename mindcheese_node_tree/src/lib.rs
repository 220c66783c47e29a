// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MindCheese Node Tree: the persisted, nested form of a mind map.
//!
//! A [`MindMap`](mindcheese_tree::MindMap) is stored as one nested record per
//! node, children in display order:
//!
//! ```json
//! {
//!   "format": "node_tree",
//!   "data": {
//!     "id": "root", "label": "Plan", "expanded": true,
//!     "children": [
//!       { "id": "a", "label": "Why", "expanded": true, "side": "left" },
//!       { "id": "b", "label": "How", "expanded": true, "side": "right",
//!         "children": [ { "id": "b1", "label": "Steps", "expanded": true } ] }
//!     ]
//!   }
//! }
//! ```
//!
//! - `side` appears on direct children of the root only; deeper nodes share
//!   their parent's side, so it is never written for them.
//! - `children` is omitted for leaves.
//! - Unknown keys are ignored on read.
//! - [`to_json`] refuses maps deeper than [`MAX_JSON_DEPTH`], the most the
//!   JSON reader accepts. [`export`] and [`import`] have no depth limit.
//!
//! This form is also what a Markdown converter consumes and produces: each
//! record maps to a heading or list item, nesting maps to depth. That mapping
//! lives outside this crate.
//!
//! [`import`] of an [`export`] yields a map with the same ids, labels,
//! expansion flags, sides, and sibling order; the numeric ordering keys
//! themselves are renumbered.
//!
//! ```rust
//! use mindcheese_node_tree::{from_json, to_json};
//! use mindcheese_tree::{MindMap, NewNode, Side};
//!
//! let mut map = MindMap::new();
//! let root = map.set_root("root", "Plan").unwrap();
//! map.add_node(root, NewNode { side: Some(Side::Left), ..NewNode::new("a", "Why") }).unwrap();
//!
//! let text = to_json(&map).unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"format":"node_tree","data":{"id":"root","label":"Plan","expanded":true,"children":[{"id":"a","label":"Why","expanded":true,"side":"left"}]}}"#
//! );
//!
//! let back = from_json(&text).unwrap();
//! assert_eq!(back.len(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod error;

pub use document::{
    Document, FORMAT_NAME, MAX_JSON_DEPTH, NodeRecord, export, from_json, import, to_json,
    to_json_pretty,
};
pub use error::FormatError;
