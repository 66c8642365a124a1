// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for scene construction, traversal and picking.

use crate::graph::ObjectId;
use arbor_core::picking::PickingError;

/// A specialized `Result` for scene graph operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// An error raised by the scene graph.
///
/// Every variant is a misuse of the graph (a bad index, a wrong entry kind,
/// an unknown handle). "No object found" is never an error; lookups that can
/// legitimately come back empty return an `Option`.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The handle does not name an object of this graph.
    #[error("object {0:?} does not exist in this scene graph")]
    UnknownObject(ObjectId),

    /// A node operation was called on a leaf.
    #[error("object {0:?} is a leaf, not a node")]
    NotANode(ObjectId),

    /// An entry index past the end of the node's entry list.
    #[error("entry index {index} is out of range for node {node:?} ({len} entries)")]
    EntryOutOfRange {
        /// The node that was indexed.
        node: ObjectId,
        /// The offending index.
        index: usize,
        /// The number of entries the node holds.
        len: usize,
    },

    /// The entry exists but does not hold a transform.
    #[error("entry {index} of node {node:?} is not a transform")]
    NotATransform {
        /// The node that was indexed.
        node: ObjectId,
        /// The offending index.
        index: usize,
    },

    /// The object has no colour of its own.
    #[error("object {0:?} has no colour")]
    NoColor(ObjectId),

    /// Identifiers must be `-1`, `0`, or fit in 24 bits; `locate` only accepts
    /// positive ones.
    #[error("invalid selection identifier {0}")]
    InvalidIdentifier(i32),

    /// Adding the child would make the graph cyclic.
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// The node that was to receive the entry.
        parent: ObjectId,
        /// The object that was to be referenced.
        child: ObjectId,
    },

    /// The object cannot be removed while a node still references it.
    #[error("object {object:?} is still referenced by node {by:?}")]
    StillReferenced {
        /// The object whose removal was refused.
        object: ObjectId,
        /// A node holding an entry that points to it.
        by: ObjectId,
    },

    /// A node entry points to an object that is no longer in the arena.
    #[error("node {parent:?} references missing object {child:?}")]
    DanglingObject {
        /// The node holding the stale entry.
        parent: ObjectId,
        /// The handle that no longer resolves.
        child: ObjectId,
    },

    /// An animation parameter index past the driver's parameter count.
    #[error("animation parameter {index} is out of range ({count} parameters)")]
    ParameterOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of parameters the driver exposes.
        count: usize,
    },

    /// A selection identifier could not be encoded as a colour.
    #[error(transparent)]
    Picking(#[from] PickingError),
}
