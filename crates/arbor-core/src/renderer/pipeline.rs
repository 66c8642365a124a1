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

//! The pipeline-state abstraction driven during traversal.

use crate::material::MaterialId;
use crate::math::{LinearRgba, Mat4, Vec3};

/// How filled primitives are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonMode {
    /// Triangles are filled.
    #[default]
    Fill,
    /// Only triangle edges are drawn.
    Line,
}

/// The device/stack collaborator a scene traversal talks to.
///
/// Implementations own three pieces of hidden state, each with a LIFO save
/// stack: the current model matrix, the current colour and the active
/// material. Traversal code brackets every change with a push and the
/// matching pop, so the depth of each stack is the same before and after any
/// traversal call.
///
/// The pipeline is passed explicitly through the traversal call chain; there is
/// no global "current device".
pub trait RenderPipeline {
    /// Saves a copy of the current model matrix.
    fn push_model_matrix(&mut self);

    /// Restores the most recently saved model matrix.
    fn pop_model_matrix(&mut self);

    /// Composes the current model matrix with `matrix` on the right:
    /// `current = current * matrix`.
    fn compose_model_matrix(&mut self, matrix: &Mat4);

    /// Returns the current model matrix.
    fn model_matrix(&self) -> Mat4;

    /// Saves a copy of the current colour.
    fn push_color(&mut self);

    /// Restores the most recently saved colour.
    fn pop_color(&mut self);

    /// Replaces the current colour.
    fn set_color(&mut self, color: LinearRgba);

    /// Returns the current colour.
    fn color(&self) -> LinearRgba;

    /// `true` when material evaluation (lighting) is enabled.
    fn lighting_enabled(&self) -> bool;

    /// Enables or disables material evaluation.
    fn set_lighting(&mut self, enabled: bool);

    /// Saves the active material (which may be none).
    fn push_material(&mut self);

    /// Makes `material` the active material.
    fn activate_material(&mut self, material: MaterialId);

    /// Re-activates the most recently saved material.
    fn pop_material(&mut self);

    /// Selects how subsequent triangles are rasterized.
    fn set_polygon_mode(&mut self, mode: PolygonMode);

    /// Clears the colour and depth targets, the colour target to `color`.
    fn clear(&mut self, color: LinearRgba);

    /// Draws an indexed triangle list with the current state.
    fn draw_triangles(&mut self, positions: &[Vec3], triangles: &[[u32; 3]]);

    /// Draws independent line segments (pairs of points) with the current state.
    fn draw_lines(&mut self, segments: &[Vec3]);

    /// Labels the commands that follow, for debuggers and recordings.
    fn insert_debug_marker(&mut self, _label: &str) {}
}

/// Reads back a single pixel of the render target last drawn to.
pub trait PixelReadback {
    /// Returns the 8-bit RGB value stored at window coordinates `(x, y)`.
    fn read_pixel(&mut self, x: u32, y: u32) -> [u8; 3];
}
