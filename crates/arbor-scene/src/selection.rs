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

//! Select-by-click through colour picking.

use crate::error::SceneResult;
use crate::frame::FrameRenderer;
use crate::graph::{ObjectId, SceneGraph};
use arbor_core::picking::{rgb8_to_id, NO_SELECTION};
use arbor_core::{Mat4, PixelReadback, RenderPipeline, Vec3};

/// Passed to an object's click handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    /// The object that owns the clicked identifier.
    pub object: ObjectId,
    /// The identifier read under the cursor.
    pub identifier: i32,
    /// The object's centre in world space.
    pub world_center: Vec3,
    /// The window coordinates of the click.
    pub pixel: (u32, u32),
}

/// The result of a successful pick.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The object that owns the clicked identifier.
    pub object: ObjectId,
    /// The identifier read under the cursor.
    pub identifier: i32,
    /// The object's centre in world space.
    pub world_center: Vec3,
    /// What the click handler returned.
    pub handled: bool,
}

/// Picks objects by rendering the selection pass and reading back one pixel.
#[derive(Debug, Clone, Copy)]
pub struct Selector<'a> {
    renderer: &'a FrameRenderer,
}

impl<'a> Selector<'a> {
    /// Creates a selector drawing selection frames with `renderer`.
    pub fn new(renderer: &'a FrameRenderer) -> Self {
        Self { renderer }
    }

    /// Selects the object under window coordinates `(x, y)`.
    ///
    /// Returns `Ok(None)` when the pixel holds no identifier or when no object
    /// of the scene carries the identifier read. Otherwise runs the object's
    /// click handler and reports the selection.
    pub fn select<P>(
        &self,
        graph: &mut SceneGraph,
        root: ObjectId,
        pipeline: &mut P,
        x: u32,
        y: u32,
    ) -> SceneResult<Option<Selection>>
    where
        P: RenderPipeline + PixelReadback,
    {
        self.renderer.render_selection(graph, root, pipeline)?;

        let id = rgb8_to_id(pipeline.read_pixel(x, y));
        if id == NO_SELECTION {
            log::info!("Nothing selectable at pixel ({}, {})", x, y);
            return Ok(None);
        }
        // Decoded identifiers have at most 24 bits.
        let identifier = id as i32;

        let Some(found) = graph.locate(root, identifier, &Mat4::IDENTITY)? else {
            log::info!("Identifier {} is not present in the scene", identifier);
            return Ok(None);
        };

        let event = ClickEvent {
            object: found.object,
            identifier,
            world_center: found.world_center,
            pixel: (x, y),
        };
        log::info!(
            "Selected '{}' (identifier {})",
            graph.name(found.object)?,
            identifier
        );
        let handled = graph.click(found.object, &event)?;

        Ok(Some(Selection {
            object: found.object,
            identifier,
            world_center: found.world_center,
            handled,
        }))
    }
}
