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

//! A CPU implementation of [`RenderPipeline`] that records every command.
//!
//! Used by tests to check what a traversal does, and by headless tools. With a
//! target attached it also rasterizes filled triangles into a small colour and
//! depth buffer, so the selection pass can be read back pixel by pixel.

use arbor_core::renderer::{MaterialStack, StateStack};
use arbor_core::{
    LinearRgba, Mat4, MaterialId, PixelReadback, PolygonMode, RenderPipeline, Vec3, Vec4,
};

/// A command issued to a [`RecordingPipeline`], with the state it ran under.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A debug label.
    Marker(String),
    /// The targets were cleared.
    Clear(LinearRgba),
    /// The backend switched to a different material.
    ActivateMaterial(MaterialId),
    /// A triangle list was drawn.
    Triangles {
        /// Model matrix at draw time.
        model: Mat4,
        /// Current colour at draw time.
        color: LinearRgba,
        /// Active material at draw time.
        material: Option<MaterialId>,
        /// Whether lighting was enabled.
        lighting: bool,
        /// Rasterization mode.
        mode: PolygonMode,
        /// Number of triangles.
        count: usize,
    },
    /// Line segments were drawn.
    Lines {
        /// Model matrix at draw time.
        model: Mat4,
        /// Current colour at draw time.
        color: LinearRgba,
        /// Number of segments.
        count: usize,
    },
}

/// Push/pop counters of one pipeline stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackCounts {
    /// Number of pushes.
    pub pushes: usize,
    /// Number of pops, including failed ones.
    pub pops: usize,
    /// Number of pops issued on an empty stack.
    pub underflows: usize,
}

impl StackCounts {
    /// `true` if every push was matched by exactly one pop.
    pub fn is_balanced(&self) -> bool {
        self.pushes == self.pops && self.underflows == 0
    }
}

#[derive(Debug, Clone)]
struct Target {
    width: u32,
    height: u32,
    view_projection: Mat4,
    color: Vec<[u8; 3]>,
    depth: Vec<f32>,
}

impl Target {
    fn clear(&mut self, color: [u8; 3]) {
        self.color.fill(color);
        self.depth.fill(f32::INFINITY);
    }

    /// Projects a point to window coordinates (origin top-left) plus depth.
    fn project(&self, clip_from_object: &Mat4, p: Vec3) -> Option<Vec3> {
        let clip = *clip_from_object * Vec4::from_vec3(p, 1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec3::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
            ndc.z,
        ))
    }

    fn fill_triangle(&mut self, [a, b, c]: [Vec3; 3], color: [u8; 3]) {
        let edge = |p: Vec3, q: Vec3, x: f32, y: f32| (q.x - p.x) * (y - p.y) - (q.y - p.y) * (x - p.x);
        let area = edge(a, b, c.x, c.y);
        if area.abs() <= f32::EPSILON {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
        let max_x = (a.x.max(b.x).max(c.x).ceil() as u32).min(self.width);
        let max_y = (a.y.max(b.y).max(c.y).ceil() as u32).min(self.height);

        for y in min_y..max_y {
            for x in min_x..max_x {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, px, py) / area;
                let w1 = edge(c, a, px, py) / area;
                let w2 = edge(a, b, px, py) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let z = w0 * a.z + w1 * b.z + w2 * c.z;
                let index = (y * self.width + x) as usize;
                if z < self.depth[index] {
                    self.depth[index] = z;
                    self.color[index] = color;
                }
            }
        }
    }
}

/// A [`RenderPipeline`] backed by plain CPU state.
///
/// Underflowing pops are logged and counted instead of panicking, so tests can
/// assert on [`StackCounts`] after the fact.
///
/// # Examples
///
/// ```
/// use arbor_core::RenderPipeline;
/// use arbor_scene::RecordingPipeline;
///
/// let mut pipeline = RecordingPipeline::new();
/// pipeline.push_color();
/// pipeline.pop_color();
/// assert!(pipeline.is_balanced());
/// ```
#[derive(Debug, Clone)]
pub struct RecordingPipeline {
    model: StateStack<Mat4>,
    color: StateStack<LinearRgba>,
    materials: MaterialStack,
    lighting: bool,
    polygon_mode: PolygonMode,
    commands: Vec<Command>,
    model_counts: StackCounts,
    color_counts: StackCounts,
    material_counts: StackCounts,
    clear_color: [u8; 3],
    target: Option<Target>,
}

impl Default for RecordingPipeline {
    fn default() -> Self {
        Self {
            model: StateStack::new("model matrix", Mat4::IDENTITY),
            color: StateStack::new("color", LinearRgba::WHITE),
            materials: MaterialStack::new(),
            lighting: false,
            polygon_mode: PolygonMode::Fill,
            commands: Vec::new(),
            model_counts: StackCounts::default(),
            color_counts: StackCounts::default(),
            material_counts: StackCounts::default(),
            clear_color: [0, 0, 0],
            target: None,
        }
    }
}

impl RecordingPipeline {
    /// Creates a pipeline that only records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline that also rasterizes filled triangles into a
    /// `width` x `height` target, projecting with `view_projection`.
    pub fn with_target(width: u32, height: u32, view_projection: Mat4) -> Self {
        let pixels = (width * height) as usize;
        Self {
            target: Some(Target {
                width,
                height,
                view_projection,
                color: vec![[0, 0, 0]; pixels],
                depth: vec![f32::INFINITY; pixels],
            }),
            ..Self::default()
        }
    }

    /// The recorded commands, oldest first.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the log empty.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// The recorded draw commands only.
    pub fn draws(&self) -> impl Iterator<Item = &Command> {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Triangles { .. } | Command::Lines { .. }))
    }

    /// Counters of the model-matrix stack.
    pub fn model_counts(&self) -> StackCounts {
        self.model_counts
    }

    /// Counters of the colour stack.
    pub fn color_counts(&self) -> StackCounts {
        self.color_counts
    }

    /// Counters of the material stack.
    pub fn material_counts(&self) -> StackCounts {
        self.material_counts
    }

    /// `true` if all three stacks are balanced.
    pub fn is_balanced(&self) -> bool {
        self.model_counts.is_balanced()
            && self.color_counts.is_balanced()
            && self.material_counts.is_balanced()
    }

    /// The active material.
    pub fn active_material(&self) -> Option<MaterialId> {
        self.materials.active()
    }

    /// The current polygon mode.
    pub fn polygon_mode(&self) -> PolygonMode {
        self.polygon_mode
    }

    fn record_material_switch(&mut self) {
        if let Some(material) = self.materials.active() {
            self.commands.push(Command::ActivateMaterial(material));
        }
    }
}

fn pop_counted<T: Clone>(stack: &mut StateStack<T>, counts: &mut StackCounts) {
    counts.pops += 1;
    if let Err(err) = stack.pop() {
        counts.underflows += 1;
        log::error!("{}", err);
    }
}

impl RenderPipeline for RecordingPipeline {
    fn push_model_matrix(&mut self) {
        self.model_counts.pushes += 1;
        self.model.push();
    }

    fn pop_model_matrix(&mut self) {
        pop_counted(&mut self.model, &mut self.model_counts);
    }

    fn compose_model_matrix(&mut self, matrix: &Mat4) {
        let composed = *self.model.current() * *matrix;
        self.model.set(composed);
    }

    fn model_matrix(&self) -> Mat4 {
        *self.model.current()
    }

    fn push_color(&mut self) {
        self.color_counts.pushes += 1;
        self.color.push();
    }

    fn pop_color(&mut self) {
        pop_counted(&mut self.color, &mut self.color_counts);
    }

    fn set_color(&mut self, color: LinearRgba) {
        self.color.set(color);
    }

    fn color(&self) -> LinearRgba {
        *self.color.current()
    }

    fn lighting_enabled(&self) -> bool {
        self.lighting
    }

    fn set_lighting(&mut self, enabled: bool) {
        self.lighting = enabled;
    }

    fn push_material(&mut self) {
        self.material_counts.pushes += 1;
        self.materials.push();
    }

    fn activate_material(&mut self, material: MaterialId) {
        if self.materials.activate(material) {
            self.record_material_switch();
        }
    }

    fn pop_material(&mut self) {
        self.material_counts.pops += 1;
        match self.materials.pop() {
            Ok(true) => self.record_material_switch(),
            Ok(false) => {}
            Err(err) => {
                self.material_counts.underflows += 1;
                log::error!("{}", err);
            }
        }
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) {
        self.polygon_mode = mode;
    }

    fn clear(&mut self, color: LinearRgba) {
        self.clear_color = color.to_rgb8();
        if let Some(target) = &mut self.target {
            target.clear(self.clear_color);
        }
        self.commands.push(Command::Clear(color));
    }

    fn draw_triangles(&mut self, positions: &[Vec3], triangles: &[[u32; 3]]) {
        let model = *self.model.current();
        let color = *self.color.current();
        self.commands.push(Command::Triangles {
            model,
            color,
            material: self.materials.active(),
            lighting: self.lighting,
            mode: self.polygon_mode,
            count: triangles.len(),
        });

        if self.polygon_mode != PolygonMode::Fill {
            return;
        }
        let Some(target) = &mut self.target else {
            return;
        };
        let clip_from_object = target.view_projection * model;
        let rgb = color.to_rgb8();
        for triangle in triangles {
            let corners = triangle.map(|i| {
                positions
                    .get(i as usize)
                    .and_then(|&p| target.project(&clip_from_object, p))
            });
            if let [Some(a), Some(b), Some(c)] = corners {
                target.fill_triangle([a, b, c], rgb);
            }
        }
    }

    fn draw_lines(&mut self, segments: &[Vec3]) {
        self.commands.push(Command::Lines {
            model: *self.model.current(),
            color: *self.color.current(),
            count: segments.len() / 2,
        });
    }

    fn insert_debug_marker(&mut self, label: &str) {
        self.commands.push(Command::Marker(label.to_string()));
    }
}

impl PixelReadback for RecordingPipeline {
    fn read_pixel(&mut self, x: u32, y: u32) -> [u8; 3] {
        match &self.target {
            Some(target) if x < target.width && y < target.height => {
                target.color[(y * target.width + x) as usize]
            }
            _ => self.clear_color,
        }
    }
}
