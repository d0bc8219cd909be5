//! Lower-dimensional transforms that can be embedded in a [`Matrix4`].
//!
//! [`Matrix4`]: crate::matrix::Matrix4

use bytemuck::{Pod, Zeroable};

/// A 2D affine transform
///
/// ```text
/// | m00 m01 m02 |
/// | m10 m11 m12 |
/// |  0   0   1  |
/// ```
///
/// where the third column holds the translation.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct Affine2 {
    pub m00: f32,
    pub m01: f32,
    pub m02: f32,
    pub m10: f32,
    pub m11: f32,
    pub m12: f32,
}

/// A 3x3 matrix stored as 9 column-major values, typically a 2D homogeneous
/// transform.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct Matrix3 {
    values: [f32; 9],
}

impl Affine2 {
    #[inline]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }

    /// Creates a transform from its two non-trivial rows.
    #[inline]
    pub const fn new(m00: f32, m01: f32, m02: f32, m10: f32, m11: f32, m12: f32) -> Self {
        Self {
            m00,
            m01,
            m02,
            m10,
            m11,
            m12,
        }
    }

    #[inline]
    pub const fn from_translation(x: f32, y: f32) -> Self {
        Self::new(1.0, 0.0, x, 0.0, 1.0, y)
    }

    /// Applies the transform to the given 2D point.
    #[inline]
    pub fn transform_point(&self, [x, y]: [f32; 2]) -> [f32; 2] {
        [
            self.m00 * x + self.m01 * y + self.m02,
            self.m10 * x + self.m11 * y + self.m12,
        ]
    }
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix3 {
    #[inline]
    pub const fn identity() -> Self {
        Self::from_values([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    /// Creates a matrix from 9 column-major values.
    #[inline]
    pub const fn from_values(values: [f32; 9]) -> Self {
        Self { values }
    }

    #[inline]
    pub const fn from_affine(affine: &Affine2) -> Self {
        Self::from_values([
            affine.m00, affine.m10, 0.0, affine.m01, affine.m11, 0.0, affine.m02, affine.m12, 1.0,
        ])
    }

    /// The 9 column-major values.
    #[inline]
    pub const fn values(&self) -> &[f32; 9] {
        &self.values
    }

    #[inline]
    pub fn element(&self, row: usize, col: usize) -> f32 {
        self.values[col * 3 + row]
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}
