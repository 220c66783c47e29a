// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gesture state: capture, periodic target lookup, drop.
//!
//! The session owns no timers. The host calls [`DragSession::tick`] from
//! whatever clock it has (an animation frame, an interval, a test loop) and
//! passes the current time in milliseconds; the session decides whether a
//! lookup is due. This bounds the cost of the nearest-target search to one
//! pass per `lookup_interval` no matter how often the pointer moves.

use kurbo::{Point, Rect};
use mindcheese_tree::{MindMap, NodeId};

use crate::geometry::NodeGeometry;
use crate::resolver::{DragTarget, DropMove, Resolver};

/// Timing and drawing parameters for a drag gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragConfig {
    /// Milliseconds between capture and the first target lookup.
    pub lookup_delay: u64,
    /// Milliseconds between subsequent lookups.
    pub lookup_interval: u64,
    /// Inset of the guide line anchors from the facing edges.
    pub line_width: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            lookup_delay: 500,
            lookup_interval: 80,
            line_width: 5.0,
        }
    }
}

/// State of the captured node during a gesture.
#[derive(Clone, Debug)]
struct Capture {
    node: NodeId,
    shadow: Rect,
    moved: bool,
    next_lookup: u64,
    target: Option<DragTarget>,
}

/// One drag-and-drop gesture at a time over a [`MindMap`].
///
/// The session never mutates the map; [`DragSession::end`] hands back a
/// [`DropMove`] for the caller to apply.
///
/// ```
/// use kurbo::Rect;
/// use mindcheese_drag::{DragConfig, DragSession};
/// use mindcheese_tree::{MindMap, NewNode, NodeId};
///
/// let mut map = MindMap::new();
/// let root = map.set_root("r", "Root").unwrap();
/// let a = map.add_node(root, NewNode::new("a", "A")).unwrap();
/// let b = map.add_node(root, NewNode::new("b", "B")).unwrap();
///
/// let geometry = |id: NodeId| {
///     Some(match id {
///         id if id == root => Rect::new(0.0, 0.0, 80.0, 30.0),
///         id if id == a => Rect::new(120.0, -40.0, 180.0, -20.0),
///         _ => Rect::new(120.0, 40.0, 180.0, 60.0),
///     })
/// };
///
/// let mut session = DragSession::new(DragConfig::default());
/// assert!(session.begin(&map, b, Rect::new(120.0, 40.0, 180.0, 60.0), 0));
/// session.move_shadow(Rect::new(220.0, -45.0, 280.0, -25.0));
///
/// // Nothing is looked up before the delay has passed.
/// assert!(session.tick(&map, &geometry, 100).is_none());
/// assert_eq!(session.tick(&map, &geometry, 500).map(|t| t.node), Some(a));
///
/// let drop = session.end(&map, &geometry).unwrap();
/// assert_eq!((drop.node, drop.parent), (b, a));
/// ```
#[derive(Clone, Debug)]
pub struct DragSession {
    /// Timing and drawing parameters.
    pub config: DragConfig,
    capture: Option<Capture>,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragSession {
    /// Create an idle session.
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            capture: None,
        }
    }

    fn resolver(&self) -> Resolver {
        Resolver {
            line_width: self.config.line_width,
        }
    }

    /// Start dragging `node`, whose shadow initially covers `shadow`.
    ///
    /// Returns `false` and changes nothing if a gesture is already in
    /// progress, or if `node` is the root or not part of the map.
    pub fn begin(&mut self, map: &MindMap, node: NodeId, shadow: Rect, now: u64) -> bool {
        if self.capture.is_some() {
            return false;
        }
        match map.node(node) {
            Some(n) if !n.is_root() => {}
            _ => return false,
        }
        self.capture = Some(Capture {
            node,
            shadow,
            moved: false,
            next_lookup: now.saturating_add(self.config.lookup_delay),
            target: None,
        });
        tracing::debug!(?node, delay = self.config.lookup_delay, "drag armed");
        true
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.capture.is_some()
    }

    /// The node being dragged.
    pub fn dragged(&self) -> Option<NodeId> {
        self.capture.as_ref().map(|c| c.node)
    }

    /// Current shadow rectangle.
    pub fn shadow(&self) -> Option<Rect> {
        self.capture.as_ref().map(|c| c.shadow)
    }

    /// Move the shadow; the gesture now counts as a drag rather than a click.
    pub fn move_shadow(&mut self, shadow: Rect) {
        if let Some(c) = self.capture.as_mut() {
            c.shadow = shadow;
            c.moved = true;
        }
    }

    /// Run a target lookup if one is due and return the current target.
    ///
    /// A lookup that finds nothing clears the previous target, so the guide
    /// line disappears when the shadow leaves every candidate's reach.
    pub fn tick<G>(&mut self, map: &MindMap, geometry: &G, now: u64) -> Option<&DragTarget>
    where
        G: NodeGeometry + ?Sized,
    {
        let resolver = self.resolver();
        let interval = self.config.lookup_interval;
        let c = self.capture.as_mut()?;
        if now >= c.next_lookup {
            c.target = resolver.resolve(map, c.node, c.shadow, geometry);
            c.next_lookup = now.saturating_add(interval);
        }
        c.target.as_ref()
    }

    /// The target found by the latest lookup.
    pub fn target(&self) -> Option<&DragTarget> {
        self.capture.as_ref().and_then(|c| c.target.as_ref())
    }

    /// Guide line from the shadow to the current target, for the renderer.
    pub fn guide(&self) -> Option<(Point, Point)> {
        self.target().map(|t| (t.shadow_anchor, t.target_anchor))
    }

    /// Abort the gesture without moving anything.
    pub fn cancel(&mut self) {
        if let Some(c) = self.capture.take() {
            tracing::debug!(node = ?c.node, "drag cancelled");
        }
    }

    /// Finish the gesture and return the move it asks for, if any.
    ///
    /// Returns `None` when the shadow never moved, when no lookup found a
    /// target, or when the target has become the dragged node or one of its
    /// descendants. The session is idle afterwards either way.
    pub fn end<G>(&mut self, map: &MindMap, geometry: &G) -> Option<DropMove>
    where
        G: NodeGeometry + ?Sized,
    {
        let resolver = self.resolver();
        let c = self.capture.take()?;
        if !c.moved {
            return None;
        }
        let Some(target) = c.target else {
            tracing::warn!(node = ?c.node, "drop without a target");
            return None;
        };
        resolver.drop_onto(map, &target, c.node, c.shadow, geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;
    use mindcheese_tree::{NewNode, Placement, Side};

    fn setup() -> (MindMap, HashMap<NodeId, Rect>, [NodeId; 4]) {
        let mut map = MindMap::new();
        let root = map.set_root("r", "R").unwrap();
        let a = map
            .add_node(root, NewNode { side: Some(Side::Right), ..NewNode::new("a", "A") })
            .unwrap();
        let b = map
            .add_node(root, NewNode { side: Some(Side::Right), ..NewNode::new("b", "B") })
            .unwrap();
        let x = map.add_node(a, NewNode::new("x", "X")).unwrap();
        let mut rects = HashMap::new();
        rects.insert(root, Rect::new(0.0, 0.0, 80.0, 30.0));
        rects.insert(a, Rect::new(120.0, -40.0, 180.0, -20.0));
        rects.insert(b, Rect::new(120.0, 40.0, 180.0, 60.0));
        rects.insert(x, Rect::new(220.0, -40.0, 280.0, -20.0));
        (map, rects, [root, a, b, x])
    }

    #[test]
    fn root_and_second_capture_are_refused() {
        let (map, _, [root, a, b, _]) = setup();
        let mut s = DragSession::default();
        assert!(!s.begin(&map, root, Rect::ZERO, 0));
        assert!(s.begin(&map, a, Rect::ZERO, 0));
        assert!(!s.begin(&map, b, Rect::ZERO, 0));
        assert_eq!(s.dragged(), Some(a));
    }

    #[test]
    fn lookups_wait_for_delay_then_interval() {
        let (map, rects, [_, a, b, _]) = setup();
        let mut s = DragSession::default();
        s.begin(&map, b, Rect::new(120.0, 40.0, 180.0, 60.0), 1_000);
        s.move_shadow(Rect::new(200.0, -35.0, 260.0, -15.0));

        assert!(s.tick(&map, &rects, 1_499).is_none());
        assert_eq!(s.tick(&map, &rects, 1_500).map(|t| t.node), Some(a));

        // Out of reach, but the next lookup is not due yet.
        s.move_shadow(Rect::new(10.0, 100.0, 70.0, 120.0));
        assert!(s.tick(&map, &rects, 1_579).is_some());
        assert!(s.tick(&map, &rects, 1_580).is_none(), "stale target is cleared");
        assert!(s.guide().is_none());
    }

    #[test]
    fn guide_connects_shadow_to_target() {
        let (map, rects, [_, _, b, _]) = setup();
        let mut s = DragSession::default();
        s.begin(&map, b, Rect::ZERO, 0);
        s.move_shadow(Rect::new(200.0, -35.0, 260.0, -15.0));
        s.tick(&map, &rects, 500);
        let (from, to) = s.guide().unwrap();
        assert_eq!(from, Point::new(205.0, -25.0));
        assert_eq!(to, Point::new(175.0, -30.0));
    }

    #[test]
    fn cancel_issues_no_move() {
        let (map, rects, [_, _, b, _]) = setup();
        let mut s = DragSession::default();
        s.begin(&map, b, Rect::ZERO, 0);
        s.move_shadow(Rect::new(200.0, -35.0, 260.0, -15.0));
        s.tick(&map, &rects, 500);
        s.cancel();
        assert!(!s.is_active());
        assert!(s.end(&map, &rects).is_none());
    }

    #[test]
    fn click_without_movement_issues_no_move() {
        let (map, rects, [_, _, b, _]) = setup();
        let mut s = DragSession::default();
        s.begin(&map, b, Rect::new(200.0, -35.0, 260.0, -15.0), 0);
        s.tick(&map, &rects, 500);
        assert!(s.target().is_some());
        assert!(s.end(&map, &rects).is_none());
        assert!(!s.is_active());
    }

    #[test]
    fn drop_reports_move_with_placement() {
        let (mut map, rects, [_, a, b, x]) = setup();
        let mut s = DragSession::default();
        s.begin(&map, b, Rect::ZERO, 0);
        s.move_shadow(Rect::new(200.0, -60.0, 260.0, -40.0));
        s.tick(&map, &rects, 500);
        let mv = s.end(&map, &rects).unwrap();
        assert_eq!(mv.parent, a);
        assert_eq!(mv.placement, Placement::Before(x));
        mv.apply(&mut map).unwrap();
        assert_eq!(map.children_of(a), &[b, x]);
    }

    #[test]
    fn release_over_own_child_issues_no_move() {
        let (map, mut rects, [_, a, _, x]) = setup();
        // Tuck `x` under the root so nothing else has room beside it.
        rects.insert(x, Rect::new(70.0, 70.0, 130.0, 90.0));
        let mut s = DragSession::default();
        s.begin(&map, a, rects[&a], 0);
        s.move_shadow(rects[&x]);
        assert!(s.tick(&map, &rects, 500).is_none());
        assert!(s.guide().is_none());
        assert!(s.end(&map, &rects).is_none());
        assert!(!s.is_active());
    }

    #[test]
    fn drop_onto_own_child_is_ignored() {
        let (map, rects, [_, a, _, x]) = setup();
        let mut s = DragSession::default();
        s.begin(&map, a, Rect::ZERO, 0);
        // Right of `x`, which belongs to the dragged node.
        s.move_shadow(Rect::new(300.0, -40.0, 360.0, -20.0));
        let found = s.tick(&map, &rects, 500).map(|t| t.node);
        assert_ne!(found, Some(x));
        assert_ne!(found, Some(a));
    }
}
