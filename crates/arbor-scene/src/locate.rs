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

//! Finding objects by selection identifier.

use crate::error::{SceneError, SceneResult};
use crate::graph::{ObjectId, ObjectKind, SceneGraph};
use crate::node::Entry;
use arbor_core::{Aabb, Mat4, Vec3};

/// The outcome of a successful [`SceneGraph::locate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located {
    /// The first object found with the requested identifier.
    pub object: ObjectId,
    /// Its centre, transformed into the caller's frame.
    pub world_center: Vec3,
}

impl SceneGraph {
    /// The object-space centre of an object, computed once and memoised.
    ///
    /// A leaf's centre comes from its drawable. A node's centre is the midpoint
    /// of the bounding box of its children's centres, each transformed by the
    /// transforms preceding it in the node. A node without children is
    /// centred on the origin.
    ///
    /// The memoised value is not refreshed when transforms change later.
    pub fn center(&self, id: ObjectId) -> SceneResult<Vec3> {
        let object = self.object(id)?;
        if let Some(center) = object.center.get() {
            return Ok(*center);
        }

        let center = match &object.kind {
            ObjectKind::Leaf(drawable) => drawable.center(),
            ObjectKind::Node(node) => {
                let mut local = Mat4::IDENTITY;
                let mut bounds = Aabb::INVALID;
                for entry in node.entries() {
                    match entry {
                        Entry::Transform(matrix) => local = local * *matrix,
                        Entry::Object(child) => {
                            self.child(id, *child)?;
                            bounds = bounds.extended(local.transform_point3(self.center(*child)?));
                        }
                        Entry::Material(_) => {}
                    }
                }
                if bounds.is_valid() {
                    bounds.center()
                } else {
                    Vec3::ZERO
                }
            }
        };

        let _ = object.center.set(center);
        Ok(center)
    }

    /// Searches the sub-graph rooted at `root`, depth first in entry order, for
    /// the first object whose identifier is `target`.
    ///
    /// `accumulated` is the transform from `root`'s frame to the frame the
    /// result should be reported in (identity for world space when `root` is
    /// the scene root). Returns `Ok(None)` when nothing matches.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidIdentifier`] if `target` is not positive.
    pub fn locate(
        &self,
        root: ObjectId,
        target: i32,
        accumulated: &Mat4,
    ) -> SceneResult<Option<Located>> {
        if target <= 0 {
            return Err(SceneError::InvalidIdentifier(target));
        }
        self.locate_in(root, target, *accumulated)
    }

    fn locate_in(
        &self,
        id: ObjectId,
        target: i32,
        accumulated: Mat4,
    ) -> SceneResult<Option<Located>> {
        let center = self.center(id)?;
        let object = self.object(id)?;

        if object.identifier() == target {
            return Ok(Some(Located {
                object: id,
                world_center: accumulated.transform_point3(center),
            }));
        }

        let ObjectKind::Node(node) = &object.kind else {
            return Ok(None);
        };

        let mut local = accumulated;
        for entry in node.entries() {
            match entry {
                Entry::Transform(matrix) => local = local * *matrix,
                Entry::Object(child) => {
                    self.child(id, *child)?;
                    if let Some(found) = self.locate_in(*child, target, local)? {
                        return Ok(Some(found));
                    }
                }
                Entry::Material(_) => {}
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::IndexedMesh;
    use approx::assert_relative_eq;

    fn unit_square() -> IndexedMesh {
        IndexedMesh::new(
            vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn test_empty_node_is_centred_on_origin() {
        let mut graph = SceneGraph::new();
        let node = graph.add_node("empty");
        graph.add_transform(node, Mat4::from_translation(Vec3::X)).unwrap();
        assert_eq!(graph.center(node).unwrap(), Vec3::ZERO);
    }

    #[test]
    fn test_node_center_uses_preceding_transforms_only() {
        let mut graph = SceneGraph::new();
        let node = graph.add_node("pair");
        let leaf = graph.add_leaf("square", unit_square());

        graph.add_child(node, leaf).unwrap();
        graph
            .add_transform(node, Mat4::from_translation(Vec3::new(4.0, 0.0, 0.0)))
            .unwrap();
        graph.add_child(node, leaf).unwrap();

        let center = graph.center(node).unwrap();
        assert_relative_eq!(center.x, 2.0);
        assert_relative_eq!(center.y, 0.0);
    }

    #[test]
    fn test_center_is_memoised() {
        let mut graph = SceneGraph::new();
        let node = graph.add_node("node");
        let leaf = graph.add_leaf("square", unit_square());
        let t = graph.add_transform(node, Mat4::IDENTITY).unwrap();
        graph.add_child(node, leaf).unwrap();

        assert_eq!(graph.center(node).unwrap(), Vec3::ZERO);
        let handle = graph.transform_handle(node, t).unwrap();
        graph
            .set_transform(handle, Mat4::from_translation(Vec3::Y))
            .unwrap();
        assert_eq!(graph.center(node).unwrap(), Vec3::ZERO);
    }

    #[test]
    fn test_explicit_center_wins() {
        let mut graph = SceneGraph::new();
        let node = graph.add_node("node");
        graph.set_center(node, Vec3::new(0.0, 3.0, 0.0)).unwrap();
        assert_eq!(graph.center(node).unwrap(), Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_locate_rejects_non_positive_targets() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node("root");
        assert!(matches!(
            graph.locate(root, 0, &Mat4::IDENTITY),
            Err(SceneError::InvalidIdentifier(0))
        ));
        assert!(graph.locate(root, -1, &Mat4::IDENTITY).is_err());
    }

    #[test]
    fn test_locate_reports_center_in_caller_frame() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node("root");
        let leaf = graph.add_leaf("square", unit_square());
        graph
            .add_transform(root, Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)))
            .unwrap();
        graph.add_child(root, leaf).unwrap();
        graph.set_identifier(leaf, 9).unwrap();

        let caller = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let found = graph.locate(root, 9, &caller).unwrap().unwrap();
        assert_eq!(found.object, leaf);
        assert_relative_eq!(found.world_center.x, 1.0);
        assert_relative_eq!(found.world_center.z, -5.0);
    }
}
