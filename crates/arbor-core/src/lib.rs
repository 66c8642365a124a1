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

//! # Arbor Core
//!
//! Foundational crate containing the math primitives, colour and material
//! types, and the interface contracts (pipeline state, pixel readback) that the
//! scene graph drives during traversal.

#![warn(missing_docs)]

pub mod material;
pub mod math;
pub mod picking;
pub mod renderer;

pub use material::{MaterialId, MaterialLibrary, PhongMaterial};
pub use math::{Aabb, LinearRgba, Mat4, Vec3, Vec4};
pub use renderer::{PixelReadback, PolygonMode, RenderPipeline, RenderSettings};
