// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a map, drag one topic onto another branch, and print the saved document.
//!
//! This example shows how to combine:
//! - `mindcheese_tree` as the single source of truth for structure,
//! - a toy layout standing in for the host's renderer,
//! - `mindcheese_drag` to turn a drag gesture into a move,
//! - `mindcheese_node_tree` to persist the result.
//!
//! Run:
//! - `cargo run -p mindcheese_demos --example drag_and_save`

use hashbrown::HashMap;
use kurbo::Rect;
use mindcheese_drag::{DragConfig, DragSession};
use mindcheese_node_tree::to_json_pretty;
use mindcheese_tree::{MindMap, NewNode, NodeId, Side};

const NODE_W: f64 = 90.0;
const NODE_H: f64 = 24.0;
const GAP_X: f64 = 40.0;
const GAP_Y: f64 = 12.0;

/// Lay branches out in columns by depth, one row per leaf, mirrored per side.
fn layout(map: &MindMap) -> HashMap<NodeId, Rect> {
    let mut rects = HashMap::new();
    let Some(root) = map.root() else {
        return rects;
    };
    rects.insert(root, Rect::new(0.0, 0.0, NODE_W, NODE_H));
    let mut rows = [0.0_f64; 2];
    for id in map.depth_first().skip(1) {
        let mut depth = 0.0;
        let mut cur = id;
        while let Some(p) = map.parent_of(cur) {
            depth += 1.0;
            cur = p;
        }
        let side = map.node(id).and_then(|n| n.side()).unwrap_or(Side::Right);
        let (row, x0) = match side {
            Side::Right => (&mut rows[1], depth * (NODE_W + GAP_X)),
            Side::Left => (&mut rows[0], -depth * (NODE_W + GAP_X)),
        };
        let y0 = *row;
        *row += NODE_H + GAP_Y;
        rects.insert(id, Rect::new(x0, y0, x0 + NODE_W, y0 + NODE_H));
    }
    rects
}

fn main() {
    let mut map = MindMap::new();
    let root = map.set_root("root", "Launch").unwrap();
    let design = map
        .add_node(root, NewNode { side: Some(Side::Left), ..NewNode::new("design", "Design") })
        .unwrap();
    let build = map
        .add_node(root, NewNode { side: Some(Side::Right), ..NewNode::new("build", "Build") })
        .unwrap();
    map.add_node(design, NewNode::new("sketches", "Sketches")).unwrap();
    let review = map.add_node(design, NewNode::new("review", "Review")).unwrap();
    map.add_node(build, NewNode::new("backend", "Backend")).unwrap();
    map.add_node(build, NewNode::new("frontend", "Frontend")).unwrap();

    let rects = layout(&map);
    let start = rects[&review];

    // Drag "Review" from the left branch to just right of "Build", between its children.
    let mut session = DragSession::new(DragConfig::default());
    session.begin(&map, review, start, 0);
    let build_rect = rects[&build];
    let shadow = Rect::new(
        build_rect.x1 + GAP_X,
        build_rect.y0 + NODE_H / 2.0,
        build_rect.x1 + GAP_X + NODE_W,
        build_rect.y0 + NODE_H * 1.5,
    );
    for (step, t) in (0..=800).step_by(80).enumerate() {
        session.move_shadow(shadow + kurbo::Vec2::new(0.0, -(step as f64)));
        if let Some(target) = session.tick(&map, &rects, t) {
            let label = map.node(target.node).map(|n| n.label()).unwrap_or("?");
            println!("t={t:>3}ms  target={label:<8} side={:?}", target.side);
        }
    }

    match session.end(&map, &rects) {
        Some(mv) => {
            mv.apply(&mut map).expect("drop targets are valid moves");
            println!("dropped with {:?}", mv.placement);
        }
        None => println!("no drop target"),
    }

    println!("{}", to_json_pretty(&map).expect("map has a root"));
}
