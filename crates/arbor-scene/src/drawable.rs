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

//! The leaf contract of the scene graph.

use arbor_core::{RenderPipeline, Vec3};
use std::ops::BitOr;

/// Optional passes an object can take part in.
///
/// The frame renderer asks for these before drawing edge or normal overlays,
/// instead of inspecting concrete leaf types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// The object has triangles whose edges can be drawn.
    pub edges: bool,
    /// The object carries normals that can be drawn.
    pub normals: bool,
}

impl Capabilities {
    /// Supports no optional pass.
    pub const NONE: Self = Self {
        edges: false,
        normals: false,
    };
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            edges: self.edges || rhs.edges,
            normals: self.normals || rhs.normals,
        }
    }
}

/// A leaf object drawn through a [`RenderPipeline`].
///
/// Leaves draw in object space; the graph has already composed the model
/// matrix and set the colour (and material, in the full pass) by the time any
/// of these methods is called. The selection pass reuses
/// [`draw_geometry`](Drawable::draw_geometry) under a flat identifier colour.
pub trait Drawable {
    /// Draws the object with the current colour and material.
    fn draw(&self, pipeline: &mut dyn RenderPipeline);

    /// Draws only the object's geometry, with no state changes of its own.
    fn draw_geometry(&self, pipeline: &mut dyn RenderPipeline);

    /// Draws the object's normals as segments of the given length.
    fn draw_normals(&self, pipeline: &mut dyn RenderPipeline, length: f32);

    /// A representative point of the object, in object space.
    fn center(&self) -> Vec3;

    /// The optional passes this object supports.
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }
}
