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

//! Surface materials and the table that owns them.
//!
//! Scene nodes never own materials: a material entry holds a [`MaterialId`]
//! into a [`MaterialLibrary`] owned by the application, and the pipeline
//! resolves the id when the material is activated.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// A non-owning reference to a material stored in a [`MaterialLibrary`].
    pub struct MaterialId;
}

/// A Phong-style material described by its reflection coefficients.
///
/// The colour reflected in the ambient and diffuse terms is the pipeline's
/// current colour, so the same material can be shared by differently coloured
/// nodes.
///
/// # Examples
///
/// ```
/// use arbor_core::material::PhongMaterial;
///
/// let shiny = PhongMaterial::new("black gloss", 0.1, 0.3, 0.9, 40.0);
/// assert_eq!(shiny.specular, 0.9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhongMaterial {
    /// A human readable name, used in logs.
    pub name: String,
    /// Ambient reflection coefficient.
    pub ambient: f32,
    /// Diffuse reflection coefficient.
    pub diffuse: f32,
    /// Pseudo-specular reflection coefficient.
    pub specular: f32,
    /// Exponent of the pseudo-specular highlight.
    pub shininess: f32,
}

impl PhongMaterial {
    /// Creates a named material from its four coefficients.
    pub fn new(
        name: impl Into<String>,
        ambient: f32,
        diffuse: f32,
        specular: f32,
        shininess: f32,
    ) -> Self {
        Self {
            name: name.into(),
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self::new("anonymous material", 0.2, 0.8, 0.0, 0.0)
    }
}

/// The single owner of every material a scene refers to.
#[derive(Debug, Default)]
pub struct MaterialLibrary {
    materials: SlotMap<MaterialId, PhongMaterial>,
}

impl MaterialLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a material and returns its id.
    pub fn insert(&mut self, material: PhongMaterial) -> MaterialId {
        log::debug!("Registering material '{}'", material.name);
        self.materials.insert(material)
    }

    /// Looks a material up by id.
    pub fn get(&self, id: MaterialId) -> Option<&PhongMaterial> {
        self.materials.get(id)
    }

    /// Removes a material, returning it if it was present.
    pub fn remove(&mut self, id: MaterialId) -> Option<PhongMaterial> {
        self.materials.remove(id)
    }

    /// Number of stored materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// `true` if the library holds no material.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material_coefficients() {
        let m = PhongMaterial::default();
        assert_eq!(m.ambient, 0.2);
        assert_eq!(m.diffuse, 0.8);
        assert_eq!(m.specular, 0.0);
        assert_eq!(m.shininess, 0.0);
    }

    #[test]
    fn test_library_insert_get_remove() {
        let mut lib = MaterialLibrary::new();
        let id = lib.insert(PhongMaterial::new("matte green", 0.3, 0.7, 0.0, 0.0));
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.get(id).map(|m| m.name.as_str()), Some("matte green"));

        assert!(lib.remove(id).is_some());
        assert!(lib.get(id).is_none());
        assert!(lib.is_empty());
    }
}
