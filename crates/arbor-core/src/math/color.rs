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

//! Defines the `LinearRgba` color type and associated operations.

use serde::{Deserialize, Serialize};

/// Represents a color in a **linear RGBA** color space using `f32` components.
///
/// Scene objects carry an optional RGB display colour; alpha is kept at `1.0`
/// for everything the scene graph produces. The selection pass relies on the
/// 8-bit quantization round trip ([`LinearRgba::to_rgb8`] /
/// [`LinearRgba::from_rgb8`]) being exact.
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct LinearRgba {
    /// The red component in linear space.
    pub r: f32,
    /// The green component in linear space.
    pub g: f32,
    /// The blue component in linear space.
    pub b: f32,
    /// The alpha (opacity) component.
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl LinearRgba {
    /// Opaque red (`[1.0, 0.0, 0.0, 1.0]`).
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green (`[0.0, 1.0, 0.0, 1.0]`).
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque blue (`[0.0, 0.0, 1.0, 1.0]`).
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// Opaque white (`[1.0, 1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black (`[0.0, 0.0, 0.0, 1.0]`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Creates a new `LinearRgba` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `LinearRgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates an opaque colour from 8-bit channels, normalizing each by 255.
    #[inline]
    pub fn from_rgb8(bytes: [u8; 3]) -> Self {
        Self::rgb(
            f32::from(bytes[0]) / 255.0,
            f32::from(bytes[1]) / 255.0,
            f32::from(bytes[2]) / 255.0,
        )
    }

    /// Quantizes the RGB channels to 8 bits, clamping to `[0, 1]` and rounding
    /// to the nearest step, as an 8-bit framebuffer would store them.
    #[inline]
    pub fn to_rgb8(&self) -> [u8; 3] {
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

#[inline]
fn quantize(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Default for LinearRgba {
    /// Returns opaque white.
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb8_round_trip_is_exact() {
        for v in 0..=255u8 {
            let c = LinearRgba::from_rgb8([v, 255 - v, v / 2]);
            assert_eq!(c.to_rgb8(), [v, 255 - v, v / 2]);
        }
    }

    #[test]
    fn test_quantize_clamps_out_of_range() {
        let hdr = LinearRgba::rgb(2.5, -1.0, 0.5);
        assert_eq!(hdr.to_rgb8(), [255, 0, 128]);
    }

    #[test]
    fn test_deserialize_without_alpha_is_opaque() {
        let c: LinearRgba = ron::from_str("(r: 1.0, g: 0.7, b: 0.4)").unwrap();
        assert_eq!(c, LinearRgba::rgb(1.0, 0.7, 0.4));
    }
}
