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

//! Sequencing of the render passes that make up a frame.

use crate::error::SceneResult;
use crate::graph::{ObjectId, SceneGraph};
use arbor_core::picking::{id_to_color, NO_SELECTION};
use arbor_core::{LinearRgba, MaterialId, PolygonMode, RenderPipeline, RenderSettings};

/// Draws whole frames of a scene according to [`RenderSettings`].
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    settings: RenderSettings,
    initial_material: Option<MaterialId>,
}

impl FrameRenderer {
    /// Creates a renderer with the given settings.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            initial_material: None,
        }
    }

    /// Sets the material active at the start of every lit frame.
    pub fn with_initial_material(mut self, material: MaterialId) -> Self {
        self.initial_material = Some(material);
        self
    }

    /// The active settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Mutable access to the settings, e.g. to toggle overlays between frames.
    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    /// Draws the visible frame.
    ///
    /// The full pass runs first. Edge and normal overlays follow when enabled
    /// in the settings and supported by something in the scene; overlays are
    /// drawn unlit, in their configured flat colour.
    pub fn render_frame(
        &self,
        graph: &SceneGraph,
        root: ObjectId,
        pipeline: &mut dyn RenderPipeline,
    ) -> SceneResult<()> {
        let lighting = self.settings.lighting_enabled;

        pipeline.set_polygon_mode(PolygonMode::Fill);
        pipeline.set_lighting(lighting);
        if lighting {
            if let Some(material) = self.initial_material {
                pipeline.activate_material(material);
            }
        }
        graph.draw(root, pipeline)?;

        if !(self.settings.draw_edges || self.settings.draw_normals) {
            return Ok(());
        }
        let capabilities = graph.capabilities(root)?;

        if self.settings.draw_edges && capabilities.edges {
            pipeline.insert_debug_marker("edges");
            self.overlay(pipeline, self.settings.edge_color, |pipeline| {
                pipeline.set_polygon_mode(PolygonMode::Line);
                let result = graph.draw_geometry(root, pipeline);
                pipeline.set_polygon_mode(PolygonMode::Fill);
                result
            })?;
        }

        if self.settings.draw_normals && capabilities.normals {
            pipeline.insert_debug_marker("normals");
            let length = self.settings.normal_length;
            self.overlay(pipeline, self.settings.normals_color, |pipeline| {
                graph.draw_normals(root, pipeline, length)
            })?;
        }
        Ok(())
    }

    /// Draws the selection frame: every selectable region in the flat colour
    /// encoding its identifier, over a background that decodes to
    /// [`NO_SELECTION`].
    pub fn render_selection(
        &self,
        graph: &SceneGraph,
        root: ObjectId,
        pipeline: &mut dyn RenderPipeline,
    ) -> SceneResult<()> {
        pipeline.insert_debug_marker("selection");
        pipeline.set_polygon_mode(PolygonMode::Fill);
        pipeline.clear(id_to_color(NO_SELECTION)?);
        self.overlay(pipeline, LinearRgba::BLACK, |pipeline| {
            graph.draw_selection(root, pipeline)
        })
    }

    /// Runs `pass` unlit under a pushed flat colour, then restores both.
    fn overlay(
        &self,
        pipeline: &mut dyn RenderPipeline,
        color: LinearRgba,
        pass: impl FnOnce(&mut dyn RenderPipeline) -> SceneResult<()>,
    ) -> SceneResult<()> {
        pipeline.set_lighting(false);
        pipeline.push_color();
        pipeline.set_color(color);
        let result = pass(pipeline);
        pipeline.pop_color();
        pipeline.set_lighting(self.settings.lighting_enabled);
        result
    }
}
