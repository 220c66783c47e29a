// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for structural map operations.

use alloc::string::String;

/// Errors reported by [`MindMap`](crate::MindMap) operations.
///
/// Every failing operation is rejected before it touches the map, so an error
/// never leaves the tree partially updated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// A node with this id is already part of the map.
    #[error("node id `{0}` already exists")]
    AlreadyExists(String),
    /// The map already has a root.
    #[error("root node is already set")]
    RootAlreadySet,
    /// A handle or id does not refer to a live node.
    #[error("node not found")]
    NotFound,
    /// The root cannot be removed.
    #[error("the root node cannot be removed")]
    RootRemovalForbidden,
    /// The root cannot be moved and has no siblings.
    #[error("the root node cannot be moved or given siblings")]
    RootMoveForbidden,
    /// The requested parent is the moved node or one of its descendants.
    #[error("a node cannot be moved under itself or its descendants")]
    CyclicMove,
}
