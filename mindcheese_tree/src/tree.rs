// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core map implementation: structure, ordering, side inheritance, queries.

use alloc::{format, string::String, vec, vec::Vec};
use hashbrown::HashMap;

use crate::error::TreeError;
use crate::node::{Node, compare_order};
use crate::types::{NewNode, NodeId, Placement, Side};

/// Ordering key given to nodes that should land after all of their siblings.
const UNPLACED: f64 = f64::INFINITY;

/// An editable mind map: one root, ordered children, and two sides.
///
/// Nodes live in a slot arena and refer to each other by [`NodeId`]; the map
/// also keeps an index from each node's string id to its handle. Structural
/// operations keep these invariants after every call:
///
/// - the nodes form a single tree under the root, and every live node is
///   both reachable from the root and registered under its string id;
/// - sibling ordering keys are `1..=n` in display order;
/// - every node below a direct child of the root has the same [`Side`] as
///   its parent.
///
/// ## Example
///
/// ```rust
/// use mindcheese_tree::{MindMap, NewNode, Placement, Side};
///
/// let mut map = MindMap::new();
/// let root = map.set_root("root", "Project").unwrap();
/// let a = map
///     .add_node(root, NewNode { side: Some(Side::Left), ..NewNode::new("a", "Research") })
///     .unwrap();
/// let b = map
///     .add_node(root, NewNode { side: Some(Side::Right), ..NewNode::new("b", "Build") })
///     .unwrap();
/// let x = map.add_node(a, NewNode::new("x", "Papers")).unwrap();
/// assert_eq!(map.node(x).unwrap().side(), Some(Side::Left));
///
/// // Re-home `x` under `b`; it picks up the right-hand side.
/// map.move_node(x, Placement::Last, b, Side::Right).unwrap();
/// assert_eq!(map.node(x).unwrap().side(), Some(Side::Right));
/// assert!(map.children_of(a).is_empty());
/// ```
#[derive(Clone)]
pub struct MindMap {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    by_id: HashMap<String, NodeId>,
    root: Option<NodeId>,
    selected: Option<NodeId>,
    generated: u64,
}

impl core::fmt::Debug for MindMap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.by_id.len();
        let free = self.free_list.len();
        f.debug_struct("MindMap")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("root", &self.root)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl Default for MindMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MindMap {
    /// Create an empty map without a root.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            by_id: HashMap::new(),
            root: None,
            selected: None,
            generated: 0,
        }
    }

    /// Create the root node.
    ///
    /// Fails with [`TreeError::RootAlreadySet`] if the map already has one.
    pub fn set_root(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        if self.root.is_some() {
            return Err(TreeError::RootAlreadySet);
        }
        let id = id.into();
        if self.by_id.contains_key(&id) {
            return Err(TreeError::AlreadyExists(id));
        }
        let label = label.into();
        let root =
            self.alloc(|generation| Node::new(generation, id, label, 0.0, None, true, None));
        self.root = Some(root);
        tracing::debug!(id = %self.slot(root).id, "set_root");
        Ok(root)
    }

    /// Attach a new node as the last child of `parent`, then reorder the
    /// siblings by their ordering keys.
    ///
    /// Under the root the node takes `new.side`, or the side with fewer
    /// branches when that is `None`. Under any other node the requested side
    /// is ignored and the parent's side is used.
    pub fn add_node(&mut self, parent: NodeId, new: NewNode) -> Result<NodeId, TreeError> {
        let parent_node = self.node(parent).ok_or(TreeError::NotFound)?;
        if self.by_id.contains_key(&new.id) {
            return Err(TreeError::AlreadyExists(new.id));
        }
        let side = if parent_node.is_root() {
            new.side.unwrap_or_else(|| self.balanced_side(parent))
        } else {
            parent_node.side.unwrap_or(Side::Right)
        };
        let order = new.order.unwrap_or(UNPLACED);
        let NewNode {
            id, label, expanded, ..
        } = new;
        let node = self.alloc(|generation| {
            Node::new(generation, id, label, order, Some(side), expanded, Some(parent))
        });
        self.slot_mut(parent).children.push(node);
        self.reindex_children(parent);
        tracing::debug!(id = %self.slot(node).id, ?side, "add_node");
        Ok(node)
    }

    /// Add a sibling directly before `reference`.
    ///
    /// When the reference is a direct child of the root, the new node's side
    /// follows the balancing rule of [`MindMap::add_node`].
    pub fn insert_before(
        &mut self,
        reference: NodeId,
        id: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        let node = self.node(reference).ok_or(TreeError::NotFound)?;
        let parent = node.parent.ok_or(TreeError::RootMoveForbidden)?;
        let new = NewNode {
            order: Some(node.order - 0.5),
            ..NewNode::new(id, label)
        };
        self.add_node(parent, new)
    }

    /// Add a sibling directly after `reference`, on the same side.
    pub fn insert_after(
        &mut self,
        reference: NodeId,
        id: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        let node = self.node(reference).ok_or(TreeError::NotFound)?;
        let parent = node.parent.ok_or(TreeError::RootMoveForbidden)?;
        let new = NewNode {
            order: Some(node.order + 0.5),
            side: node.side,
            ..NewNode::new(id, label)
        };
        self.add_node(parent, new)
    }

    /// Move `node` under `parent`, place it among its new siblings, and give
    /// its whole subtree the resulting side.
    ///
    /// `side` is only honored when `parent` is the root; otherwise the
    /// parent's side wins. A [`Placement::Before`] sibling that does not share
    /// the new parent leaves the order untouched (a moved-in node is appended).
    ///
    /// Fails with [`TreeError::CyclicMove`] when `parent` is `node` or one of
    /// its descendants, and with [`TreeError::RootMoveForbidden`] for the root.
    /// The map is unchanged on error.
    pub fn move_node(
        &mut self,
        node: NodeId,
        placement: Placement,
        parent: NodeId,
        side: Side,
    ) -> Result<(), TreeError> {
        let old_parent = self
            .node(node)
            .ok_or(TreeError::NotFound)?
            .parent
            .ok_or(TreeError::RootMoveForbidden)?;
        let parent_node = self.node(parent).ok_or(TreeError::NotFound)?;
        if node == parent || self.is_ancestor(node, parent) {
            return Err(TreeError::CyclicMove);
        }
        if let Placement::Before(sibling) = placement
            && !self.is_alive(sibling)
        {
            return Err(TreeError::NotFound);
        }
        let side = if parent_node.is_root() {
            side
        } else {
            parent_node.side.unwrap_or(side)
        };

        if old_parent != parent {
            self.slot_mut(old_parent).children.retain(|c| *c != node);
            self.reindex_children(old_parent);
            self.slot_mut(parent).children.push(node);
            let moved = self.slot_mut(node);
            moved.parent = Some(parent);
            moved.order = UNPLACED;
        }

        match placement {
            Placement::First => self.slot_mut(node).order = 0.0,
            Placement::Last => self.slot_mut(node).order = UNPLACED,
            Placement::Before(sibling) => {
                let sibling = self.slot(sibling);
                if sibling.parent == Some(parent) {
                    let order = sibling.order - 0.5;
                    self.slot_mut(node).order = order;
                } else {
                    tracing::warn!(
                        node = %self.slot(node).id,
                        before = %sibling.id,
                        "move_node: sibling has a different parent, order unchanged"
                    );
                }
            }
        }
        self.reindex_children(parent);
        self.flow_side(node, side);
        tracing::debug!(
            node = %self.slot(node).id,
            parent = %self.slot(parent).id,
            ?side,
            "move_node"
        );
        Ok(())
    }

    /// Remove `node` and its whole subtree.
    ///
    /// Descendants are destroyed before their ancestors, the selection is
    /// cleared if it pointed into the subtree, and the remaining siblings are
    /// renumbered. Fails with [`TreeError::RootRemovalForbidden`] for the root.
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), TreeError> {
        let parent = self
            .node(node)
            .ok_or(TreeError::NotFound)?
            .parent
            .ok_or(TreeError::RootRemovalForbidden)?;
        self.slot_mut(parent).children.retain(|c| *c != node);
        self.reindex_children(parent);

        let mut post_order = Vec::new();
        let mut stack = vec![(node, false)];
        while let Some((id, visited)) = stack.pop() {
            if visited {
                post_order.push(id);
                continue;
            }
            stack.push((id, true));
            for &child in self.slot(id).children.iter().rev() {
                stack.push((child, false));
            }
        }
        tracing::debug!(id = %self.slot(node).id, removed = post_order.len(), "remove_node");
        for id in post_order {
            self.free(id);
        }
        Ok(())
    }

    /// Sort the children of `parent` by ordering key and renumber them `1..=n`.
    ///
    /// Idempotent. Structural operations already call this; it is exposed for
    /// callers that want to normalize keys explicitly.
    pub fn reindex(&mut self, parent: NodeId) -> Result<(), TreeError> {
        if !self.is_alive(parent) {
            return Err(TreeError::NotFound);
        }
        self.reindex_children(parent);
        Ok(())
    }

    /// Replace the display text of a node.
    pub fn set_label(&mut self, node: NodeId, label: impl Into<String>) -> Result<(), TreeError> {
        let n = self.node_opt_mut(node).ok_or(TreeError::NotFound)?;
        n.label = label.into();
        Ok(())
    }

    /// Show or hide the descendants of a node.
    pub fn set_expanded(&mut self, node: NodeId, expanded: bool) -> Result<(), TreeError> {
        let n = self.node_opt_mut(node).ok_or(TreeError::NotFound)?;
        n.expanded = expanded;
        Ok(())
    }

    /// Flip the expansion flag of a node and return the new value.
    pub fn toggle_expanded(&mut self, node: NodeId) -> Result<bool, TreeError> {
        let n = self.node_opt_mut(node).ok_or(TreeError::NotFound)?;
        n.expanded = !n.expanded;
        Ok(n.expanded)
    }

    /// Make `node` the selected node.
    pub fn select(&mut self, node: NodeId) -> Result<(), TreeError> {
        if !self.is_alive(node) {
            return Err(TreeError::NotFound);
        }
        self.selected = Some(node);
        Ok(())
    }

    /// The selected node, if it is still part of the map.
    pub fn selected(&self) -> Option<NodeId> {
        self.selected.filter(|id| self.is_alive(*id))
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Return a string id of the form `node-<n>` that no live node uses.
    pub fn generate_id(&mut self) -> String {
        loop {
            self.generated += 1;
            let id = format!("node-{}", self.generated);
            if !self.by_id.contains_key(&id) {
                return id;
            }
        }
    }
}

impl MindMap {
    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// The root handle, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look up a node by its string id.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// Access a live node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the map has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterate all live nodes in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| {
            let n = n.as_ref()?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            Some((NodeId::new(i as u32, n.generation), n))
        })
    }

    /// Returns the parent of a node if live, or `None` for the root or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Get the children of a node in display order, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns true if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent_of(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    /// The sibling displayed directly before `node`.
    pub fn node_before(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = self.children_of(parent);
        let pos = siblings.iter().position(|&id| id == node)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }

    /// The sibling displayed directly after `node`.
    pub fn node_after(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = self.children_of(parent);
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    /// Get the next node in depth-first pre-order.
    ///
    /// Returns `None` if no next node exists or if the current node is stale.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(&first_child) = self.slot(current).children.first() {
            return Some(first_child);
        }
        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next_sibling) = self.node_after(node) {
                return Some(next_sibling);
            }
            node = parent;
        }
        None
    }

    /// Get the previous node in depth-first pre-order.
    ///
    /// Returns `None` if no previous node exists or if the current node is stale.
    pub fn prev_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        let Some(mut node) = self.node_before(current) else {
            return self.parent_of(current);
        };
        while let Some(&last_child) = self.slot(node).children.last() {
            node = last_child;
        }
        Some(node)
    }

    /// Iterate the whole map in depth-first pre-order, starting at the root.
    pub fn depth_first(&self) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(self.root, move |&id| self.next_depth_first(id))
    }
}

impl MindMap {
    // --- internals ---

    fn alloc(&mut self, make: impl FnOnce(u32) -> Node) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(make(generation));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(make(generation)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(idx as u32, generation);
        let key = self.slot(id).id.clone();
        self.by_id.insert(key, id);
        id
    }

    fn free(&mut self, id: NodeId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
        if let Some(node) = self.nodes[id.idx()].take() {
            self.by_id.remove(&node.id);
        }
        self.free_list.push(id.idx());
    }

    /// Access a node known to be live; panics if `id` is stale.
    fn slot(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node known to be live mutably; panics if `id` is stale.
    fn slot_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Side for a new root child: the half with fewer branches, right on a tie.
    fn balanced_side(&self, root: NodeId) -> Side {
        let children = &self.slot(root).children;
        let balance: i32 = children
            .iter()
            .map(|c| match self.slot(*c).side {
                Some(Side::Left) => -1,
                _ => 1,
            })
            .sum();
        if children.len() > 1 && balance > 0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn reindex_children(&mut self, parent: NodeId) {
        let mut children = core::mem::take(&mut self.slot_mut(parent).children);
        // Stable, so equal keys keep their insertion order.
        children.sort_by(|a, b| compare_order(self.slot(*a).order, self.slot(*b).order));
        for (i, child) in children.iter().enumerate() {
            self.slot_mut(*child).order = (i + 1) as f64;
        }
        self.slot_mut(parent).children = children;
    }

    /// Set `side` on `node` and every descendant.
    fn flow_side(&mut self, node: NodeId, side: Side) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let n = self.slot_mut(id);
            n.side = Some(side);
            stack.extend_from_slice(&n.children);
        }
    }
}
