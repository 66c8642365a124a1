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

//! The four recursive render passes over a [`SceneGraph`].
//!
//! All passes share one walk. For every object reached they:
//!
//! 1. push and set a colour when the pass uses one (the object's own colour in
//!    the full pass, the identifier colour in the selection pass);
//! 2. for a node, push the model matrix and, in the full pass with lighting
//!    enabled, the active material;
//! 3. visit the entries in order, recursing into `Object` entries, composing
//!    `Transform` entries on the right and activating `Material` entries when
//!    the material was pushed;
//! 4. pop in reverse order.
//!
//! Leaves are drawn in place of step 2 and 3.
//!
//! A failing entry stops the walk, but every push already made is popped
//! before the error is returned, so pipeline stack depths are unchanged by any
//! call, successful or not.

use crate::error::SceneResult;
use crate::graph::{ObjectId, ObjectKind, SceneGraph, SceneObject, INHERIT_IDENTIFIER};
use crate::node::{Entry, SceneNode};
use arbor_core::picking::id_to_color;
use arbor_core::RenderPipeline;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pass {
    Full,
    Geometry,
    Normals { length: f32 },
    Selection,
}

impl SceneGraph {
    /// Draws the sub-graph rooted at `root` with colours, materials and
    /// transforms.
    pub fn draw(&self, root: ObjectId, pipeline: &mut dyn RenderPipeline) -> SceneResult<()> {
        self.visit_root(root, pipeline, Pass::Full)
    }

    /// Draws only geometry: no colour or material changes.
    pub fn draw_geometry(
        &self,
        root: ObjectId,
        pipeline: &mut dyn RenderPipeline,
    ) -> SceneResult<()> {
        self.visit_root(root, pipeline, Pass::Geometry)
    }

    /// Draws normal segments of the given length, in the colour already set on
    /// the pipeline.
    pub fn draw_normals(
        &self,
        root: ObjectId,
        pipeline: &mut dyn RenderPipeline,
        length: f32,
    ) -> SceneResult<()> {
        self.visit_root(root, pipeline, Pass::Normals { length })
    }

    /// Draws geometry in flat colours encoding selection identifiers.
    ///
    /// Objects with identifier `-1` set no colour and so keep the one pushed by
    /// their nearest ancestor.
    pub fn draw_selection(
        &self,
        root: ObjectId,
        pipeline: &mut dyn RenderPipeline,
    ) -> SceneResult<()> {
        self.visit_root(root, pipeline, Pass::Selection)
    }

    fn visit_root(
        &self,
        root: ObjectId,
        pipeline: &mut dyn RenderPipeline,
        pass: Pass,
    ) -> SceneResult<()> {
        let object = self.object(root)?;
        self.visit(root, object, pipeline, pass)
    }

    fn visit(
        &self,
        id: ObjectId,
        object: &SceneObject,
        pipeline: &mut dyn RenderPipeline,
        pass: Pass,
    ) -> SceneResult<()> {
        let color = match pass {
            Pass::Full => object.color(),
            Pass::Selection if object.identifier() != INHERIT_IDENTIFIER => {
                Some(id_to_color(object.identifier() as u32)?)
            }
            _ => None,
        };

        pipeline.insert_debug_marker(object.name());
        if let Some(color) = color {
            pipeline.push_color();
            pipeline.set_color(color);
        }

        let result = match &object.kind {
            ObjectKind::Leaf(drawable) => {
                match pass {
                    Pass::Full => drawable.draw(pipeline),
                    Pass::Geometry | Pass::Selection => drawable.draw_geometry(pipeline),
                    Pass::Normals { length } => drawable.draw_normals(pipeline, length),
                }
                Ok(())
            }
            ObjectKind::Node(node) => self.visit_node(id, node, pipeline, pass),
        };

        if color.is_some() {
            pipeline.pop_color();
        }
        result
    }

    fn visit_node(
        &self,
        id: ObjectId,
        node: &SceneNode,
        pipeline: &mut dyn RenderPipeline,
        pass: Pass,
    ) -> SceneResult<()> {
        let use_materials = pass == Pass::Full && pipeline.lighting_enabled();

        pipeline.push_model_matrix();
        if use_materials {
            pipeline.push_material();
        }

        let result = self.visit_entries(id, node, pipeline, pass, use_materials);

        if use_materials {
            pipeline.pop_material();
        }
        pipeline.pop_model_matrix();
        result
    }

    fn visit_entries(
        &self,
        id: ObjectId,
        node: &SceneNode,
        pipeline: &mut dyn RenderPipeline,
        pass: Pass,
        use_materials: bool,
    ) -> SceneResult<()> {
        for entry in node.entries() {
            match entry {
                Entry::Object(child) => {
                    let object = self.child(id, *child)?;
                    self.visit(*child, object, pipeline, pass)?;
                }
                Entry::Transform(matrix) => pipeline.compose_model_matrix(matrix),
                Entry::Material(material) if use_materials => {
                    pipeline.activate_material(*material);
                }
                Entry::Material(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;
    use crate::mesh::IndexedMesh;
    use crate::recording::{Command, RecordingPipeline};
    use arbor_core::{LinearRgba, Mat4, Vec3};

    fn triangle() -> IndexedMesh {
        IndexedMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]]).unwrap()
    }

    #[test]
    fn test_unknown_root_pushes_nothing() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node("root");
        graph.remove_object(root).unwrap();

        let mut pipeline = RecordingPipeline::new();
        assert!(matches!(
            graph.draw(root, &mut pipeline),
            Err(SceneError::UnknownObject(_))
        ));
        assert!(pipeline.commands().is_empty());
    }

    #[test]
    fn test_dangling_entry_unwinds_every_push() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node("root");
        let inner = graph.add_node("inner");
        let lost = graph.add_leaf("lost", triangle());
        graph.set_color(root, LinearRgba::RED).unwrap();
        graph.set_identifier(inner, 4).unwrap();
        graph.add_child(root, inner).unwrap();
        graph.add_child(inner, lost).unwrap();
        graph.remove_unchecked(lost);

        let mut pipeline = RecordingPipeline::new();
        pipeline.set_lighting(true);
        let full = graph.draw(root, &mut pipeline);
        let selection = graph.draw_selection(root, &mut pipeline);

        for result in [full, selection] {
            assert!(matches!(
                result,
                Err(SceneError::DanglingObject { parent, child }) if parent == inner && child == lost
            ));
        }
        assert!(pipeline.is_balanced());
        assert_eq!(pipeline.model_counts().pushes, 4);
        assert_eq!(pipeline.color_counts().pushes, 2);
    }

    #[test]
    fn test_leaf_color_wraps_its_own_draw() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node("root");
        let leaf = graph.add_leaf("leaf", triangle());
        graph.set_color(leaf, LinearRgba::GREEN).unwrap();
        graph.add_child(root, leaf).unwrap();

        let mut pipeline = RecordingPipeline::new();
        graph.draw(root, &mut pipeline).unwrap();

        let colors: Vec<_> = pipeline
            .draws()
            .filter_map(|c| match c {
                Command::Triangles { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![LinearRgba::GREEN]);
        assert_eq!(pipeline.color(), LinearRgba::WHITE);
        assert_eq!(pipeline.model_matrix(), Mat4::IDENTITY);
        assert!(pipeline.is_balanced());
    }
}
