// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-parent search for a dragged node.

use alloc::vec;
use hashbrown::HashSet;
use kurbo::{Point, Rect};
use mindcheese_tree::{MindMap, NodeId, Placement, Side, TreeError};

use crate::geometry::NodeGeometry;

/// Best reparent target found for the current shadow position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragTarget {
    /// Node the dragged node would be attached to.
    pub node: NodeId,
    /// Side of the root the shadow is on.
    pub side: Side,
    /// Guide line end on the target's inner edge.
    pub target_anchor: Point,
    /// Guide line end on the shadow's inner edge.
    pub shadow_anchor: Point,
}

/// A move ready to be fed to [`MindMap::move_node`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DropMove {
    /// The dragged node.
    pub node: NodeId,
    /// Its new parent.
    pub parent: NodeId,
    /// Position among the new siblings.
    pub placement: Placement,
    /// Side to use if the new parent is the root.
    pub side: Side,
}

impl DropMove {
    /// Apply the move to `map`.
    pub fn apply(&self, map: &mut MindMap) -> Result<(), TreeError> {
        map.move_node(self.node, self.placement, self.parent, self.side)
    }
}

/// Geometric search for the node a dragged shadow should attach to.
///
/// The side is decided by which half of the root the shadow's center lies in.
/// Candidates are the root and every node on that side, minus the dragged
/// node and its descendants. A candidate qualifies only if its inner edge is
/// strictly outside the shadow's inner edge, leaving room for a guide line;
/// among those the smallest Manhattan distance between the two edge midpoints
/// wins, and the first candidate found keeps a tie.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolver {
    /// Inset of the guide line anchors from the facing edges.
    pub line_width: f64,
}

impl Default for Resolver {
    fn default() -> Self {
        Self { line_width: 5.0 }
    }
}

impl Resolver {
    /// Find the best target for `dragged` with its shadow at `shadow`.
    ///
    /// Returns `None` when the map has no root, the root has no geometry, or
    /// no candidate leaves room for a guide line.
    pub fn resolve<G>(
        &self,
        map: &MindMap,
        dragged: NodeId,
        shadow: Rect,
        geometry: &G,
    ) -> Option<DragTarget>
    where
        G: NodeGeometry + ?Sized,
    {
        let root = map.root()?;
        let root_rect = geometry.bounds(root)?;
        let side = if shadow.center().x >= root_rect.center().x {
            Side::Right
        } else {
            Side::Left
        };
        let excluded = subtree(map, dragged);
        let shadow_mid = shadow.center().y;

        let mut best: Option<DragTarget> = None;
        let mut best_distance = f64::INFINITY;

        for (id, node) in map.iter() {
            if excluded.contains(&id) || !(node.is_root() || node.side() == Some(side)) {
                continue;
            }
            let Some(rect) = geometry.bounds(id) else {
                continue;
            };
            let mid = rect.center().y;
            let (gap, target_anchor, shadow_anchor) = match side {
                Side::Right => (
                    shadow.x0 - rect.x1,
                    Point::new(rect.x1 - self.line_width, mid),
                    Point::new(shadow.x0 + self.line_width, shadow_mid),
                ),
                Side::Left => (
                    rect.x0 - shadow.x1,
                    Point::new(rect.x0 + self.line_width, mid),
                    Point::new(shadow.x1 - self.line_width, shadow_mid),
                ),
            };
            // No room for a guide line.
            if gap <= 0.0 {
                continue;
            }
            let distance = gap + (shadow_mid - mid).abs();
            if !distance.is_finite() {
                continue;
            }
            if distance < best_distance {
                best_distance = distance;
                best = Some(DragTarget {
                    node: id,
                    side,
                    target_anchor,
                    shadow_anchor,
                });
            }
        }

        tracing::trace!(target_node = ?best.map(|t| t.node), ?side, "drag lookup");
        best
    }

    /// Choose where `dragged` lands among the children of `target.node`.
    ///
    /// Picks the sibling on the target side whose top edge is the smallest
    /// positive distance below the shadow's top edge and lands before it, or
    /// appends when there is none. Siblings are scanned last to first, so on
    /// equal distances the later sibling wins.
    pub fn placement<G>(
        &self,
        map: &MindMap,
        target: &DragTarget,
        dragged: NodeId,
        shadow: Rect,
        geometry: &G,
    ) -> Placement
    where
        G: NodeGeometry + ?Sized,
    {
        let mut best_dy = f64::INFINITY;
        let mut before = None;
        for &child in map.children_of(target.node).iter().rev() {
            if child == dragged {
                continue;
            }
            let Some(node) = map.node(child) else {
                continue;
            };
            if node.side() != Some(target.side) {
                continue;
            }
            let Some(rect) = geometry.bounds(child) else {
                continue;
            };
            let dy = rect.y0 - shadow.y0;
            if dy > 0.0 && dy < best_dy {
                best_dy = dy;
                before = Some(child);
            }
        }
        before.map_or(Placement::Last, Placement::Before)
    }

    /// Resolve a target and a placement in one go, for a drop at `shadow`.
    ///
    /// Returns `None` when there is no target; never proposes a move of a
    /// node under itself or its descendants.
    pub fn plan_drop<G>(
        &self,
        map: &MindMap,
        dragged: NodeId,
        shadow: Rect,
        geometry: &G,
    ) -> Option<DropMove>
    where
        G: NodeGeometry + ?Sized,
    {
        let target = self.resolve(map, dragged, shadow, geometry)?;
        self.drop_onto(map, &target, dragged, shadow, geometry)
    }

    /// Turn a previously resolved target into a move, re-checking it against
    /// the current map.
    pub(crate) fn drop_onto<G>(
        &self,
        map: &MindMap,
        target: &DragTarget,
        dragged: NodeId,
        shadow: Rect,
        geometry: &G,
    ) -> Option<DropMove>
    where
        G: NodeGeometry + ?Sized,
    {
        if !map.is_alive(target.node)
            || !map.is_alive(dragged)
            || target.node == dragged
            || map.is_ancestor(dragged, target.node)
        {
            return None;
        }
        Some(DropMove {
            node: dragged,
            parent: target.node,
            placement: self.placement(map, target, dragged, shadow, geometry),
            side: target.side,
        })
    }
}

/// `node` and all of its descendants.
fn subtree(map: &MindMap, node: NodeId) -> HashSet<NodeId> {
    let mut out = HashSet::new();
    let mut stack = vec![node];
    while let Some(id) = stack.pop() {
        out.insert(id);
        stack.extend_from_slice(map.children_of(id));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;
    use mindcheese_tree::NewNode;

    struct Fixture {
        map: MindMap,
        rects: HashMap<NodeId, Rect>,
        root: NodeId,
        a: NodeId,
        b: NodeId,
        c: NodeId,
        x: NodeId,
    }

    /// ```text
    ///            A   R   B - X
    ///                    C
    /// ```
    fn fixture() -> Fixture {
        let mut map = MindMap::new();
        let root = map.set_root("r", "R").unwrap();
        let side = |s| NewNode {
            side: Some(s),
            ..NewNode::new("", "")
        };
        let a = map
            .add_node(root, NewNode { id: "a".into(), ..side(Side::Left) })
            .unwrap();
        let b = map
            .add_node(root, NewNode { id: "b".into(), ..side(Side::Right) })
            .unwrap();
        let c = map
            .add_node(root, NewNode { id: "c".into(), ..side(Side::Right) })
            .unwrap();
        let x = map.add_node(b, NewNode::new("x", "X")).unwrap();

        let mut rects = HashMap::new();
        rects.insert(root, Rect::new(400.0, 300.0, 480.0, 330.0));
        rects.insert(a, Rect::new(280.0, 300.0, 340.0, 320.0));
        rects.insert(b, Rect::new(540.0, 250.0, 600.0, 270.0));
        rects.insert(c, Rect::new(540.0, 350.0, 600.0, 370.0));
        rects.insert(x, Rect::new(660.0, 240.0, 720.0, 260.0));
        Fixture {
            map,
            rects,
            root,
            a,
            b,
            c,
            x,
        }
    }

    fn dragged_leaf(f: &mut Fixture) -> NodeId {
        let n = f.map.add_node(f.a, NewNode::new("n", "N")).unwrap();
        f.rects.insert(n, Rect::new(200.0, 400.0, 260.0, 420.0));
        n
    }

    #[test]
    fn picks_nearest_on_the_right() {
        let mut f = fixture();
        let n = dragged_leaf(&mut f);
        let shadow = Rect::new(620.0, 345.0, 680.0, 365.0);
        let t = Resolver::default()
            .resolve(&f.map, n, shadow, &f.rects)
            .unwrap();
        assert_eq!(t.node, f.c);
        assert_eq!(t.side, Side::Right);
        assert_eq!(t.target_anchor, Point::new(595.0, 360.0));
        assert_eq!(t.shadow_anchor, Point::new(625.0, 355.0));
    }

    #[test]
    fn picks_nearest_on_the_left() {
        let mut f = fixture();
        let n = f.map.add_node(f.c, NewNode::new("n", "N")).unwrap();
        let shadow = Rect::new(150.0, 300.0, 210.0, 320.0);
        let t = Resolver::default()
            .resolve(&f.map, n, shadow, &f.rects)
            .unwrap();
        assert_eq!(t.node, f.a);
        assert_eq!(t.side, Side::Left);
        assert_eq!(t.target_anchor, Point::new(285.0, 310.0));
        assert_eq!(t.shadow_anchor, Point::new(205.0, 310.0));
    }

    #[test]
    fn skips_dragged_subtree() {
        let f = fixture();
        let shadow = Rect::new(740.0, 245.0, 800.0, 265.0);
        let t = Resolver::default()
            .resolve(&f.map, f.b, shadow, &f.rects)
            .unwrap();
        assert_ne!(t.node, f.b);
        assert_ne!(t.node, f.x, "children of the dragged node are not targets");
        assert_eq!(t.node, f.c);
    }

    #[test]
    fn nodes_without_geometry_are_skipped() {
        let mut f = fixture();
        let n = dragged_leaf(&mut f);
        let rects = f.rects.clone();
        let c = f.c;
        let geometry = move |id: NodeId| if id == c { None } else { rects.get(&id).copied() };
        let shadow = Rect::new(620.0, 345.0, 680.0, 365.0);
        let t = Resolver::default()
            .resolve(&f.map, n, shadow, &geometry)
            .unwrap();
        assert_eq!(t.node, f.b);
    }

    #[test]
    fn missing_root_geometry_means_no_target() {
        let mut f = fixture();
        let n = dragged_leaf(&mut f);
        f.rects.remove(&f.root);
        let shadow = Rect::new(620.0, 345.0, 680.0, 365.0);
        assert!(Resolver::default().resolve(&f.map, n, shadow, &f.rects).is_none());
    }

    #[test]
    fn shadow_over_own_child_has_no_target() {
        // R - A
        //   X      (child of A, tucked under R)
        let mut map = MindMap::new();
        let root = map.set_root("r", "R").unwrap();
        let a = map
            .add_node(root, NewNode { side: Some(Side::Right), ..NewNode::new("a", "A") })
            .unwrap();
        let x = map.add_node(a, NewNode::new("x", "X")).unwrap();
        let mut rects = HashMap::new();
        rects.insert(root, Rect::new(400.0, 300.0, 480.0, 330.0));
        rects.insert(a, Rect::new(540.0, 300.0, 600.0, 320.0));
        rects.insert(x, Rect::new(470.0, 350.0, 530.0, 370.0));

        // Only `x` has room to its right, and it belongs to the dragged node.
        let shadow = rects[&x];
        let r = Resolver::default();
        assert!(r.resolve(&map, a, shadow, &rects).is_none());
        assert!(r.plan_drop(&map, a, shadow, &rects).is_none());
    }

    #[test]
    fn overlapping_shadow_has_no_target() {
        let mut f = fixture();
        let n = dragged_leaf(&mut f);
        // Straddles the root's right edge, so nothing on the right is fully behind it.
        let shadow = Rect::new(470.0, 300.0, 530.0, 320.0);
        assert!(Resolver::default().resolve(&f.map, n, shadow, &f.rects).is_none());
    }

    #[test]
    fn placement_lands_before_next_sibling_below() {
        let mut f = fixture();
        let n = dragged_leaf(&mut f);
        let target = DragTarget {
            node: f.root,
            side: Side::Right,
            target_anchor: Point::ZERO,
            shadow_anchor: Point::ZERO,
        };
        let r = Resolver::default();
        let at = |y: f64| Rect::new(620.0, y, 680.0, y + 20.0);
        assert_eq!(
            r.placement(&f.map, &target, n, at(300.0), &f.rects),
            Placement::Before(f.c)
        );
        assert_eq!(
            r.placement(&f.map, &target, n, at(100.0), &f.rects),
            Placement::Before(f.b)
        );
        assert_eq!(
            r.placement(&f.map, &target, n, at(400.0), &f.rects),
            Placement::Last
        );
    }

    #[test]
    fn placement_tie_prefers_later_sibling() {
        let mut f = fixture();
        let n = dragged_leaf(&mut f);
        f.rects.insert(f.c, Rect::new(540.0, 250.0, 600.0, 270.0));
        let target = DragTarget {
            node: f.root,
            side: Side::Right,
            target_anchor: Point::ZERO,
            shadow_anchor: Point::ZERO,
        };
        let shadow = Rect::new(620.0, 200.0, 680.0, 220.0);
        assert_eq!(
            Resolver::default().placement(&f.map, &target, n, shadow, &f.rects),
            Placement::Before(f.c)
        );
    }

    #[test]
    fn plan_drop_then_apply() {
        let mut f = fixture();
        let n = dragged_leaf(&mut f);
        let shadow = Rect::new(620.0, 330.0, 680.0, 350.0);
        let mv = Resolver::default()
            .plan_drop(&f.map, n, shadow, &f.rects)
            .unwrap();
        assert_eq!(mv.parent, f.c);
        assert_eq!(mv.placement, Placement::Last);
        mv.apply(&mut f.map).unwrap();
        assert_eq!(f.map.parent_of(n), Some(f.c));
        assert_eq!(f.map.node(n).unwrap().side(), Some(Side::Right));
    }
}
