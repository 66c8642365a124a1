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

//! The ordered entry list of a scene node.

use crate::graph::ObjectId;
use arbor_core::{Mat4, MaterialId};

/// One slot of a [`SceneNode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry {
    /// A non-owning reference to another object of the same graph.
    Object(ObjectId),
    /// A transform composed into the model matrix for the entries that follow.
    Transform(Mat4),
    /// A material activated for the entries that follow.
    Material(MaterialId),
}

/// An ordered sequence of entries.
///
/// Order is significant: a transform or material entry only affects the
/// entries after it, and only until the end of the node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneNode {
    entries: Vec<Entry>,
}

impl SceneNode {
    /// Creates a node with no entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns its index.
    pub(crate) fn push(&mut self, entry: Entry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// The entries, in traversal order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The entry at `index`.
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.entries.get_mut(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the node has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the handles of the objects this node references.
    pub fn children(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Object(id) => Some(*id),
            _ => None,
        })
    }
}
