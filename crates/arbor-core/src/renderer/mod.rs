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

//! Rendering contracts consumed by the scene graph.
//!
//! The scene graph never talks to a graphics API. It drives a
//! [`RenderPipeline`], which owns the model-matrix, colour and material stacks,
//! and, for picking, reads pixels back through a [`PixelReadback`].

pub mod pipeline;
pub mod settings;
pub mod stack;

pub use self::pipeline::{PixelReadback, PolygonMode, RenderPipeline};
pub use self::settings::{RenderSettings, SettingsError};
pub use self::stack::{MaterialStack, StackUnderflow, StateStack};
