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

//! # Arbor Scene
//!
//! The hierarchical scene graph of the Arbor engine.
//!
//! A [`SceneGraph`] is an arena owning every scene object. Objects are either
//! nodes, holding an ordered list of [`Entry`] values (child references,
//! transforms and materials), or leaves wrapping a [`Drawable`]. The graph can
//! be walked in four passes against any [`RenderPipeline`]:
//!
//! - [`SceneGraph::draw`]: colours, materials and transforms.
//! - [`SceneGraph::draw_geometry`]: transforms only, for edge overlays.
//! - [`SceneGraph::draw_normals`]: transforms only, drawing normal segments.
//! - [`SceneGraph::draw_selection`]: flat colours encoding selection identifiers.
//!
//! Select-by-click ties the selection pass to [`SceneGraph::locate`] through a
//! [`Selector`].
//!
//! [`RenderPipeline`]: arbor_core::RenderPipeline

#![warn(missing_docs)]

pub mod animation;
pub mod drawable;
pub mod error;
pub mod frame;
pub mod graph;
pub mod handle;
pub mod locate;
pub mod mesh;
pub mod node;
pub mod recording;
pub mod selection;
pub mod traversal;

pub use animation::{Animator, ParameterDriver, TrackSet, TransformTrack};
pub use drawable::{Capabilities, Drawable};
pub use error::{SceneError, SceneResult};
pub use frame::FrameRenderer;
pub use graph::{ObjectId, SceneGraph, SceneObject, INHERIT_IDENTIFIER, NOT_SELECTABLE};
pub use handle::TransformHandle;
pub use locate::Located;
pub use mesh::{IndexedMesh, MeshError};
pub use node::{Entry, SceneNode};
pub use recording::{Command, RecordingPipeline, StackCounts};
pub use selection::{ClickEvent, Selection, Selector};
