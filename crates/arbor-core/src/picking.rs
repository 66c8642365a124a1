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

//! Identifier <-> colour encoding used by colour-based picking.
//!
//! A selectable object is painted, in the selection pass, with a flat colour
//! that encodes its integer identifier little-endian across the RGB channels:
//!
//! - `R = id & 0xFF`
//! - `G = (id >> 8) & 0xFF`
//! - `B = (id >> 16) & 0xFF`
//!
//! Each byte is normalized to `[0, 1]` by dividing by 255. Reading the pixel
//! under the cursor back as 8-bit RGB and reversing the decomposition recovers
//! the identifier exactly. Identifier `0` (black) is reserved for "nothing
//! selectable here".

use crate::math::LinearRgba;

/// The identifier decoded from pixels where nothing selectable was drawn.
pub const NO_SELECTION: u32 = 0;

/// The largest identifier that fits in three 8-bit channels.
pub const MAX_SELECTION_ID: u32 = (1 << 24) - 1;

/// An error produced while encoding a selection identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PickingError {
    /// The identifier needs more than 24 bits.
    #[error("selection identifier {0} does not fit in 24 bits (max {MAX_SELECTION_ID})")]
    IdOutOfRange(u32),
}

/// Splits an identifier into its `[R, G, B]` bytes.
///
/// # Examples
///
/// ```
/// use arbor_core::picking::id_to_rgb8;
/// assert_eq!(id_to_rgb8(0x030201).unwrap(), [0x01, 0x02, 0x03]);
/// assert!(id_to_rgb8(1 << 24).is_err());
/// ```
pub fn id_to_rgb8(id: u32) -> Result<[u8; 3], PickingError> {
    if id > MAX_SELECTION_ID {
        return Err(PickingError::IdOutOfRange(id));
    }
    let [r, g, b, _] = id.to_le_bytes();
    Ok([r, g, b])
}

/// Reassembles an identifier from `[R, G, B]` bytes read back from a framebuffer.
#[inline]
pub fn rgb8_to_id(bytes: [u8; 3]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0])
}

/// Returns the flat colour the selection pass paints for `id`.
pub fn id_to_color(id: u32) -> Result<LinearRgba, PickingError> {
    id_to_rgb8(id).map(LinearRgba::from_rgb8)
}

/// Decodes the identifier carried by a selection colour.
#[inline]
pub fn color_to_id(color: LinearRgba) -> u32 {
    rgb8_to_id(color.to_rgb8())
}
