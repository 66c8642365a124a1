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

//! Global settings for frame and selection rendering.

use crate::math::LinearRgba;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An error raised while loading [`RenderSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read render settings from '{path}': {source}")]
    Io {
        /// The path that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The settings text is not valid RON for [`RenderSettings`].
    #[error("invalid render settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// A collection of settings that shape what a frame draws.
///
/// Missing fields take their default value, so a settings file only needs to
/// list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// If `true`, material entries are honoured and materials are evaluated.
    pub lighting_enabled: bool,
    /// If `true`, triangle edges are drawn over the shaded frame.
    pub draw_edges: bool,
    /// If `true`, vertex normals are drawn as line segments.
    pub draw_normals: bool,
    /// Colour of the edge overlay.
    pub edge_color: LinearRgba,
    /// Colour of the normal segments.
    pub normals_color: LinearRgba,
    /// Length of the normal segments, in object-space units.
    pub normal_length: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            lighting_enabled: true,
            draw_edges: false,
            draw_normals: false,
            edge_color: LinearRgba::BLACK,
            normals_color: LinearRgba::rgb(1.0, 0.7, 0.4),
            normal_length: 0.35,
        }
    }
}

impl RenderSettings {
    /// Parses settings from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        Ok(ron::from_str(text)?)
    }

    /// Loads settings from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_ron_str(&text)?;
        log::info!("Loaded render settings from '{}'", path.display());
        Ok(settings)
    }
}
