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

//! A minimal indexed triangle mesh leaf.

use crate::drawable::{Capabilities, Drawable};
use arbor_core::{Aabb, RenderPipeline, Vec3};

/// An error raised while building an [`IndexedMesh`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// A triangle refers to a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// The offending triangle.
        triangle: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// The number of vertices.
        vertex_count: usize,
    },
    /// The normal table and the vertex table differ in length.
    #[error("mesh has {vertex_count} vertices but {normal_count} normals")]
    NormalCountMismatch {
        /// The number of vertices.
        vertex_count: usize,
        /// The number of normals supplied.
        normal_count: usize,
    },
}

/// Vertex positions, triangles as vertex index triples, and optional per-vertex
/// normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    normals: Option<Vec<Vec3>>,
}

impl IndexedMesh {
    /// Builds a mesh, checking every triangle index against the vertex table.
    pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self, MeshError> {
        for (triangle, indices) in triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count: positions.len(),
                });
            }
        }
        Ok(Self {
            positions,
            triangles,
            normals: None,
        })
    }

    /// Attaches a per-vertex normal table.
    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Result<Self, MeshError> {
        if normals.len() != self.positions.len() {
            return Err(MeshError::NormalCountMismatch {
                vertex_count: self.positions.len(),
                normal_count: normals.len(),
            });
        }
        self.normals = Some(normals);
        Ok(self)
    }

    /// Computes per-vertex normals by averaging the unit normals of the
    /// triangles sharing each vertex.
    ///
    /// Degenerate triangles contribute nothing; a vertex with no usable
    /// contribution gets `+Y`.
    pub fn compute_normals(&mut self) {
        let mut accumulated = vec![Vec3::ZERO; self.positions.len()];
        for tri in &self.triangles {
            let [a, b, c] = tri.map(|i| self.positions[i as usize]);
            let n = (b - a).cross(c - a);
            if n.length() <= 1e-8 {
                continue;
            }
            let n = n / n.length();
            for &i in tri {
                accumulated[i as usize] = accumulated[i as usize] + n;
            }
        }
        let normals = accumulated
            .into_iter()
            .map(|n| if n.length() > 1e-5 { n.normalize() } else { Vec3::Y })
            .collect();
        self.normals = Some(normals);
    }

    /// The vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// The triangles.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// The per-vertex normals, if any.
    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    /// `true` if the mesh has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.triangles.is_empty()
    }
}

impl Drawable for IndexedMesh {
    fn draw(&self, pipeline: &mut dyn RenderPipeline) {
        if self.is_empty() {
            log::warn!("Attempted to draw an empty mesh");
            return;
        }
        pipeline.draw_triangles(&self.positions, &self.triangles);
    }

    fn draw_geometry(&self, pipeline: &mut dyn RenderPipeline) {
        if !self.is_empty() {
            pipeline.draw_triangles(&self.positions, &self.triangles);
        }
    }

    fn draw_normals(&self, pipeline: &mut dyn RenderPipeline, length: f32) {
        let Some(normals) = &self.normals else {
            log::warn!("Attempted to draw normals of a mesh without a normal table");
            return;
        };
        let segments: Vec<Vec3> = self
            .positions
            .iter()
            .zip(normals)
            .flat_map(|(&p, &n)| [p, p + n * length])
            .collect();
        pipeline.draw_lines(&segments);
    }

    fn center(&self) -> Vec3 {
        Aabb::from_points(&self.positions)
            .map(|aabb| aabb.center())
            .unwrap_or(Vec3::ZERO)
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            edges: !self.is_empty(),
            normals: self.normals.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad() -> IndexedMesh {
        IndexedMesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(2.0, 2.0, 0.0),
                Vec3::new(0.0, 2.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let err = IndexedMesh::new(vec![Vec3::ZERO; 3], vec![[0, 1, 3]]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                triangle: 0,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_normal_table_must_match_vertices() {
        let err = quad().with_normals(vec![Vec3::Z; 3]).unwrap_err();
        assert!(matches!(err, MeshError::NormalCountMismatch { .. }));
    }

    #[test]
    fn test_compute_normals_of_flat_quad() {
        let mut mesh = quad();
        mesh.compute_normals();
        for n in mesh.normals().unwrap() {
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_unreferenced_vertex_gets_up_normal() {
        let mut mesh = IndexedMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(5.0, 5.0, 5.0)],
            vec![[0, 1, 2]],
        )
        .unwrap();
        mesh.compute_normals();
        assert_eq!(mesh.normals().unwrap()[3], Vec3::Y);
    }

    #[test]
    fn test_center_and_capabilities() {
        let mesh = quad();
        assert_eq!(mesh.center(), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(
            mesh.capabilities(),
            Capabilities {
                edges: true,
                normals: false
            }
        );

        let empty = IndexedMesh::default();
        assert_eq!(empty.center(), Vec3::ZERO);
        assert_eq!(empty.capabilities(), Capabilities::NONE);
    }
}
