// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The nested record form of a map and its `node_tree` envelope.

use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};
use mindcheese_tree::{MindMap, NewNode, NodeId, Side};
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Format name written into, and required from, the [`Document`] envelope.
pub const FORMAT_NAME: &str = "node_tree";

/// Deepest node level, counting the root as 0, that [`to_json`] will write.
///
/// `serde_json` stops reading at 128 nested containers and every level below
/// the root adds two (a `children` array and a record), so anything deeper
/// could be written but not read back.
pub const MAX_JSON_DEPTH: usize = 60;

fn default_expanded() -> bool {
    true
}

/// One node and, recursively, its subtree.
///
/// `side` is only present on direct children of the root; deeper nodes
/// always share their parent's side. `children` is omitted when empty.
/// Unknown keys are ignored when reading, and the older `topic` /
/// `direction` key names are accepted for `label` / `side`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Caller-visible node id.
    pub id: String,
    /// Display text.
    #[serde(alias = "topic")]
    pub label: String,
    /// Whether descendants are shown.
    #[serde(default = "default_expanded")]
    pub expanded: bool,
    /// Side of the branch, for direct children of the root only.
    #[serde(default, alias = "direction", skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    /// Children in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeRecord>,
}

impl Drop for NodeRecord {
    fn drop(&mut self) {
        // Flatten so a long chain does not recurse once per level.
        let mut pending = core::mem::take(&mut self.children);
        while let Some(mut rec) = pending.pop() {
            pending.append(&mut rec.children);
        }
    }
}

impl NodeRecord {
    /// A leaf record without a side.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            expanded: true,
            side: None,
            children: Vec::new(),
        }
    }
}

/// Persisted envelope: `{"format": "node_tree", "data": { ...root record... }}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Always [`FORMAT_NAME`] for documents this crate writes.
    pub format: String,
    /// The root record.
    pub data: NodeRecord,
}

impl Document {
    /// Wrap the export of `map`.
    ///
    /// No depth limit applies here; [`to_json`] adds one for the JSON form.
    pub fn from_mind(map: &MindMap) -> Result<Self, FormatError> {
        Ok(Self::wrap(export(map)?))
    }

    /// Rebuild a map, rejecting envelopes of another format.
    pub fn to_mind(&self) -> Result<MindMap, FormatError> {
        if self.format != FORMAT_NAME {
            return Err(FormatError::UnknownFormat(self.format.clone()));
        }
        import(&self.data)
    }

    fn wrap(data: NodeRecord) -> Self {
        Self {
            format: FORMAT_NAME.to_string(),
            data,
        }
    }

    /// Wrap the export of `map` if its JSON form can be read back.
    fn for_json(map: &MindMap) -> Result<Self, FormatError> {
        let (data, depth) = build(map)?;
        if depth > MAX_JSON_DEPTH {
            return Err(FormatError::TooDeep {
                depth,
                max: MAX_JSON_DEPTH,
            });
        }
        Ok(Self::wrap(data))
    }
}

/// Walk `map` from the root into nested records, siblings in display order.
///
/// Fails with [`FormatError::MissingRoot`] if the map has no root.
pub fn export(map: &MindMap) -> Result<NodeRecord, FormatError> {
    build(map).map(|(data, _)| data)
}

/// Export with an explicit stack, also reporting the deepest level reached.
///
/// Each frame holds a record whose children are still being collected; a
/// finished record is pushed onto its parent's `children`.
fn build(map: &MindMap) -> Result<(NodeRecord, usize), FormatError> {
    let root = map.root().ok_or(FormatError::MissingRoot)?;
    let mut depth = 0;
    let mut stack = vec![(shallow(map, root, false), map.children_of(root).iter())];
    loop {
        let next = stack
            .last_mut()
            .and_then(|(_, pending)| pending.next().copied());
        if let Some(child) = next {
            let under_root = stack.len() == 1;
            stack.push((shallow(map, child, under_root), map.children_of(child).iter()));
            depth = depth.max(stack.len() - 1);
            continue;
        }
        let Some((done, _)) = stack.pop() else {
            unreachable!("the root frame returns before the stack empties");
        };
        match stack.last_mut() {
            Some((parent, _)) => parent.children.push(done),
            None => return Ok((done, depth)),
        }
    }
}

/// The record for `id` without its children.
fn shallow(map: &MindMap, id: NodeId, under_root: bool) -> NodeRecord {
    let Some(node) = map.node(id) else {
        unreachable!("children of a live node are live");
    };
    NodeRecord {
        id: node.id().to_string(),
        label: node.label().to_string(),
        expanded: node.is_expanded(),
        side: if under_root { node.side() } else { None },
        children: Vec::new(),
    }
}

/// Build a new map from `root`.
///
/// Children are added in record order, so the rebuilt sibling order matches
/// the document. A root child without a `side` is placed by the map's
/// balancing rule; `side` on deeper records is ignored.
pub fn import(root: &NodeRecord) -> Result<MindMap, FormatError> {
    let mut map = MindMap::new();
    let root_id = map.set_root(root.id.as_str(), root.label.as_str())?;
    map.set_expanded(root_id, root.expanded)?;

    let mut stack: Vec<(NodeId, &NodeRecord)> = vec![];
    stack.extend(root.children.iter().rev().map(|c| (root_id, c)));
    while let Some((parent, rec)) = stack.pop() {
        let node = map.add_node(
            parent,
            NewNode {
                side: rec.side,
                expanded: rec.expanded,
                ..NewNode::new(rec.id.as_str(), rec.label.as_str())
            },
        )?;
        stack.extend(rec.children.iter().rev().map(|c| (node, c)));
    }
    tracing::debug!(nodes = map.len(), "imported node_tree");
    Ok(map)
}

/// Serialize `map` as a `node_tree` JSON document.
///
/// Fails with [`FormatError::TooDeep`] for maps nested deeper than
/// [`MAX_JSON_DEPTH`], which [`from_json`] could not read back.
pub fn to_json(map: &MindMap) -> Result<String, FormatError> {
    Ok(serde_json::to_string(&Document::for_json(map)?)?)
}

/// Serialize `map` as an indented `node_tree` JSON document.
///
/// Same depth limit as [`to_json`].
pub fn to_json_pretty(map: &MindMap) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&Document::for_json(map)?)?)
}

/// Parse a `node_tree` JSON document into a map.
pub fn from_json(text: &str) -> Result<MindMap, FormatError> {
    serde_json::from_str::<Document>(text)?.to_mind()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindcheese_tree::{Placement, TreeError};
    use serde_json::json;

    fn sample() -> MindMap {
        let mut map = MindMap::new();
        let root = map.set_root("root", "Plan").unwrap();
        let a = map
            .add_node(root, NewNode { side: Some(Side::Left), ..NewNode::new("a", "Why") })
            .unwrap();
        let b = map
            .add_node(root, NewNode { side: Some(Side::Right), ..NewNode::new("b", "How") })
            .unwrap();
        map.add_node(a, NewNode::new("a1", "Goals")).unwrap();
        let b1 = map.add_node(b, NewNode::new("b1", "Steps")).unwrap();
        map.add_node(b, NewNode::new("b2", "Risks")).unwrap();
        map.move_node(b1, Placement::Last, b, Side::Right).unwrap();
        map.set_expanded(a, false).unwrap();
        map
    }

    #[test]
    fn export_shape() {
        let value = serde_json::to_value(export(&sample()).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "root", "label": "Plan", "expanded": true,
                "children": [
                    { "id": "a", "label": "Why", "expanded": false, "side": "left",
                      "children": [{ "id": "a1", "label": "Goals", "expanded": true }] },
                    { "id": "b", "label": "How", "expanded": true, "side": "right",
                      "children": [
                          { "id": "b2", "label": "Risks", "expanded": true },
                          { "id": "b1", "label": "Steps", "expanded": true }
                      ] }
                ]
            })
        );
    }

    #[test]
    fn export_without_root_fails() {
        assert!(matches!(export(&MindMap::new()), Err(FormatError::MissingRoot)));
    }

    #[test]
    fn import_reverses_export() {
        let map = sample();
        let rec = export(&map).unwrap();
        let back = import(&rec).unwrap();
        assert_eq!(export(&back).unwrap(), rec);
        assert_eq!(back.len(), map.len());
        let b2 = back.find("b2").unwrap();
        assert_eq!(back.node(b2).unwrap().side(), Some(Side::Right));
    }

    #[test]
    fn legacy_keys_and_unknown_fields() {
        let doc = json!({
            "format": "node_tree",
            "meta": { "name": "old" },
            "data": {
                "id": "root", "topic": "Root",
                "children": [
                    { "id": "l", "topic": "Left", "direction": "left", "color": "red" }
                ]
            }
        });
        let map = from_json(&doc.to_string()).unwrap();
        let l = map.find("l").unwrap();
        assert_eq!(map.node(l).unwrap().label(), "Left");
        assert_eq!(map.node(l).unwrap().side(), Some(Side::Left));
        assert!(map.node(l).unwrap().is_expanded(), "expanded defaults to true");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut root = NodeRecord::new("r", "R");
        root.children = vec![NodeRecord::new("x", "X"), NodeRecord::new("x", "X again")];
        assert!(matches!(
            import(&root),
            Err(FormatError::Tree(TreeError::AlreadyExists(id))) if id == "x"
        ));
    }

    #[test]
    fn other_formats_are_rejected() {
        let text = r#"{"format":"freemind","data":{"id":"r","label":"R"}}"#;
        assert!(matches!(
            from_json(text),
            Err(FormatError::UnknownFormat(name)) if name == "freemind"
        ));
        assert!(matches!(from_json("{"), Err(FormatError::Json(_))));
    }
}
