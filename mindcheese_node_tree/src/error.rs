// Copyright 2025 the MindCheese Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for document conversion.

use alloc::string::String;
use mindcheese_tree::TreeError;

/// Errors from converting between a map and its document form.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// Exporting a map that has no root.
    #[error("cannot export a map without a root")]
    MissingRoot,
    /// The map is nested too deeply for its JSON form to be read back.
    #[error("map depth {depth} exceeds the json limit of {max}")]
    TooDeep {
        /// Deepest level in the map, counting the root as 0.
        depth: usize,
        /// Deepest level the JSON form supports.
        max: usize,
    },
    /// The document envelope names a format other than `node_tree`.
    #[error("unknown document format `{0}`")]
    UnknownFormat(String),
    /// The document describes a map the model rejects, such as duplicate ids.
    #[error("invalid document: {0}")]
    Tree(#[from] TreeError),
    /// The text is not a well-formed document.
    #[error("malformed json: {0}")]
    Json(serde_json::Error),
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
