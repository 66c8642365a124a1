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

// Primitive meshes used by the demo scene.

use arbor_core::Vec3;
use arbor_scene::{IndexedMesh, MeshError};

/// A unit cube centred on the origin, with averaged vertex normals.
pub fn cube() -> Result<IndexedMesh, MeshError> {
    let positions = (0..8)
        .map(|i| {
            Vec3::new(
                if i & 1 == 0 { -0.5 } else { 0.5 },
                if i & 2 == 0 { -0.5 } else { 0.5 },
                if i & 4 == 0 { -0.5 } else { 0.5 },
            )
        })
        .collect();
    let triangles = vec![
        [0, 2, 1], [1, 2, 3], // -z
        [4, 5, 6], [5, 7, 6], // +z
        [0, 1, 4], [1, 5, 4], // -y
        [2, 6, 3], [3, 6, 7], // +y
        [0, 4, 2], [2, 4, 6], // -x
        [1, 3, 5], [3, 7, 5], // +x
    ];
    let mut mesh = IndexedMesh::new(positions, triangles)?;
    mesh.compute_normals();
    Ok(mesh)
}

/// A square-based pyramid, base on `y = 0`, apex at `y = 1`.
pub fn pyramid() -> Result<IndexedMesh, MeshError> {
    let positions = vec![
        Vec3::new(-0.5, 0.0, -0.5),
        Vec3::new(0.5, 0.0, -0.5),
        Vec3::new(0.5, 0.0, 0.5),
        Vec3::new(-0.5, 0.0, 0.5),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let triangles = vec![
        [0, 1, 2], [0, 2, 3],
        [0, 4, 1], [1, 4, 2], [2, 4, 3], [3, 4, 0],
    ];
    let mut mesh = IndexedMesh::new(positions, triangles)?;
    mesh.compute_normals();
    Ok(mesh)
}
