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

//! Handles to individual transform entries.

use crate::graph::ObjectId;

/// A retained reference to one transform entry of a scene node.
///
/// Handles are plain copyable values and borrow nothing, so animation code can
/// keep them for the lifetime of the scene and mutate the matrix every frame
/// through [`SceneGraph::transform_mut`](crate::SceneGraph::transform_mut) or
/// [`SceneGraph::set_transform`](crate::SceneGraph::set_transform). Each access
/// re-checks that the entry still exists and is still a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformHandle {
    node: ObjectId,
    index: usize,
}

impl TransformHandle {
    pub(crate) fn new(node: ObjectId, index: usize) -> Self {
        Self { node, index }
    }

    /// The node holding the transform entry.
    pub fn node(&self) -> ObjectId {
        self.node
    }

    /// The entry index inside the node.
    pub fn index(&self) -> usize {
        self.index
    }
}
