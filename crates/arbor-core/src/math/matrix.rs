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

//! Defines the `Mat4` type and associated operations.

use super::{Vec3, Vec4};
use std::ops::Mul;

/// A 4x4 column-major matrix.
///
/// This is the model matrix type of the scene graph: transform entries own one,
/// the pipeline composes them into its current model matrix, and the object
/// locator accumulates them to bring object-space centres into world space.
///
/// Composition is right-multiplication: `parent * child` applies `child` first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    /// A 4x4 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        cols: [Vec4::ZERO; 4],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Returns a row of the matrix as a `Vec4`.
    #[inline]
    pub fn get_row(&self, index: usize) -> Vec4 {
        Vec4 {
            x: self.cols[0].get(index),
            y: self.cols[1].get(index),
            z: self.cols[2].get(index),
            w: self.cols[3].get(index),
        }
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self {
            cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::new(v.x, v.y, v.z, 1.0)],
        }
    }

    /// Creates a non-uniform scaling matrix.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self {
            cols: [
                Vec4::new(scale.x, 0.0, 0.0, 0.0),
                Vec4::new(0.0, scale.y, 0.0, 0.0),
                Vec4::new(0.0, 0.0, scale.z, 0.0),
                Vec4::W,
            ],
        }
    }

    /// Creates a matrix for a rotation around the X-axis.
    ///
    /// # Arguments
    ///
    /// * `angle`: The angle of rotation in radians.
    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            cols: [
                Vec4::X,
                Vec4::new(0.0, c, s, 0.0),
                Vec4::new(0.0, -s, c, 0.0),
                Vec4::W,
            ],
        }
    }

    /// Creates a matrix for a right-handed rotation around the Y-axis.
    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            cols: [
                Vec4::new(c, 0.0, -s, 0.0),
                Vec4::Y,
                Vec4::new(s, 0.0, c, 0.0),
                Vec4::W,
            ],
        }
    }

    /// Creates a matrix for a rotation around the Z-axis.
    #[inline]
    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            cols: [
                Vec4::new(c, s, 0.0, 0.0),
                Vec4::new(-s, c, 0.0, 0.0),
                Vec4::Z,
                Vec4::W,
            ],
        }
    }

    /// Creates a rotation of `angle` radians around an arbitrary `axis`.
    ///
    /// The axis is normalized first; a zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalize();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        Self {
            cols: [
                Vec4::new(t * x * x + c, t * x * y + s * z, t * x * z - s * y, 0.0),
                Vec4::new(t * x * y - s * z, t * y * y + c, t * y * z + s * x, 0.0),
                Vec4::new(t * x * z + s * y, t * y * z - s * x, t * z * z + c, 0.0),
                Vec4::W,
            ],
        }
    }

    /// Creates a right-handed orthographic projection mapping depth to `[0, 1]`.
    pub fn orthographic_rh_zo(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let width = right - left;
        let height = top - bottom;
        let depth = z_far - z_near;
        Self::from_cols(
            Vec4::new(2.0 / width, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 / height, 0.0, 0.0),
            Vec4::new(0.0, 0.0, -1.0 / depth, 0.0),
            Vec4::new(
                -(right + left) / width,
                -(top + bottom) / height,
                -z_near / depth,
                1.0,
            ),
        )
    }

    /// Returns the transpose of the matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self {
            cols: [
                self.get_row(0),
                self.get_row(1),
                self.get_row(2),
                self.get_row(3),
            ],
        }
    }

    /// Transforms a point (`w = 1`), dropping the resulting `w`.
    #[inline]
    pub fn transform_point3(&self, point: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(point, 1.0)).truncate()
    }

    /// Transforms a direction (`w = 0`); translation does not apply.
    #[inline]
    pub fn transform_vector3(&self, vector: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(vector, 0.0)).truncate()
    }
}

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    /// Multiplies this matrix by another `Mat4`. Matrix multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        let rows = [
            self.get_row(0),
            self.get_row(1),
            self.get_row(2),
            self.get_row(3),
        ];
        let mut cols = [Vec4::ZERO; 4];
        for (target, rhs_col) in cols.iter_mut().zip(rhs.cols.iter()) {
            *target = Vec4::new(
                rows[0].dot(*rhs_col),
                rows[1].dot(*rhs_col),
                rows[2].dot(*rhs_col),
                rows[3].dot(*rhs_col),
            );
        }
        Mat4 { cols }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    /// Transforms a `Vec4` by this matrix.
    #[inline]
    fn mul(self, rhs: Vec4) -> Self::Output {
        self.cols[0] * rhs.x + self.cols[1] * rhs.y + self.cols[2] * rhs.z + self.cols[3] * rhs.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, FRAC_PI_2};

    fn vec3_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn mat4_approx_eq(a: Mat4, b: Mat4) -> bool {
        (0..4).all(|c| (0..4).all(|r| approx_eq(a.cols[c].get(r), b.cols[c].get(r))))
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::from_rotation_y(0.3);
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::IDENTITY, m);
    }

    #[test]
    fn test_translation_moves_points_not_vectors() {
        let m = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(m.transform_vector3(Vec3::X), Vec3::X);
    }

    #[test]
    fn test_right_multiplication_applies_child_first() {
        // Parent translates, child scales: the point is scaled then translated.
        let parent = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
        let child = Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0));
        let p = (parent * child).transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!(vec3_approx_eq(p, Vec3::new(12.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let m = Mat4::from_rotation_z(FRAC_PI_2);
        assert!(vec3_approx_eq(m.transform_point3(Vec3::X), Vec3::Y));
    }

    #[test]
    fn test_axis_angle_matches_principal_rotations() {
        let angle = 0.7;
        assert!(mat4_approx_eq(
            Mat4::from_axis_angle(Vec3::X, angle),
            Mat4::from_rotation_x(angle)
        ));
        assert!(mat4_approx_eq(
            Mat4::from_axis_angle(Vec3::Y, angle),
            Mat4::from_rotation_y(angle)
        ));
        assert!(mat4_approx_eq(
            Mat4::from_axis_angle(Vec3::Z * 3.0, angle),
            Mat4::from_rotation_z(angle)
        ));
        assert_eq!(Mat4::from_axis_angle(Vec3::ZERO, angle), Mat4::IDENTITY);
    }

    #[test]
    fn test_multiplication_is_associative() {
        let a = Mat4::from_rotation_x(0.4);
        let b = Mat4::from_translation(Vec3::new(1.0, -2.0, 0.5));
        let c = Mat4::from_scale(Vec3::new(1.0, 3.0, 0.5));
        assert!(mat4_approx_eq((a * b) * c, a * (b * c)));
    }

    #[test]
    fn test_transpose_twice_is_identity_op() {
        let m = Mat4::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 1.1);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_orthographic_maps_box_to_ndc() {
        let m = Mat4::orthographic_rh_zo(-2.0, 2.0, -1.0, 1.0, 0.0, 10.0);
        assert!(vec3_approx_eq(
            m.transform_point3(Vec3::new(2.0, 1.0, 0.0)),
            Vec3::new(1.0, 1.0, 0.0)
        ));
        assert!(vec3_approx_eq(
            m.transform_point3(Vec3::new(-2.0, -1.0, -10.0)),
            Vec3::new(-1.0, -1.0, 1.0)
        ));
    }
}
