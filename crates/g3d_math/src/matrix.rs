//! Column-major 4x4 homogeneous transform matrices.
//!
//! A [`Matrix4`] is 16 `f32` values where the element at row `r` and column
//! `c` lives at offset `c * 4 + r` (see [`index`]). Operations are grouped by
//! concern:
//!
//! - [`compose`]: products, point/vector transforms and builders for
//!   translation, rotation and scaling.
//! - [`inverse`]: determinants, cofactor inversion and decomposition into
//!   translation, rotation and scale.
//! - [`projection`]: perspective, orthographic, look-at and world matrices.
//! - [`blend`]: interpolation and weighted averaging of transforms.
//!
//! Mutating operations overwrite or compose onto the receiver and return it,
//! so calls can be chained. All temporaries live on the stack.

pub mod blend;
pub mod compose;
pub mod index;
pub mod inverse;
pub mod projection;

use crate::{
    affine::{Affine2, Matrix3},
    error::{MatrixError, Result},
    vector::Vector3,
};
use bytemuck::{Pod, Zeroable};
use index::*;
use std::fmt;

/// A 4x4 homogeneous transform stored as 16 column-major values.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct Matrix4 {
    values: [f32; 16],
}

impl Matrix4 {
    /// The number of values in a matrix.
    pub const LEN: usize = 16;

    /// Creates the identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::from_values([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Creates a matrix with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::from_values([0.0; 16])
    }

    /// Creates a matrix from 16 column-major values.
    #[inline]
    pub const fn from_values(values: [f32; 16]) -> Self {
        Self { values }
    }

    /// Creates a matrix from the first 16 column-major values of the given
    /// slice.
    ///
    /// # Errors
    /// Returns [`MatrixError::BufferTooShort`] if the slice holds fewer than
    /// 16 values.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        let mut matrix = Self::zeros();
        matrix.set_from_slice(values)?;
        Ok(matrix)
    }

    /// Overwrites this matrix with the first 16 column-major values of the
    /// given slice.
    ///
    /// # Errors
    /// Returns [`MatrixError::BufferTooShort`] if the slice holds fewer than
    /// 16 values. The matrix is then left unchanged.
    pub fn set_from_slice(&mut self, values: &[f32]) -> Result<&mut Self> {
        let values = values
            .get(..Self::LEN)
            .ok_or(MatrixError::BufferTooShort {
                len: values.len(),
                required: Self::LEN,
            })?;
        self.values.copy_from_slice(values);
        Ok(self)
    }

    /// Overwrites this matrix with the values of another.
    #[inline]
    pub fn set(&mut self, other: &Self) -> &mut Self {
        self.values = other.values;
        self
    }

    /// The 16 column-major values.
    #[inline]
    pub const fn values(&self) -> &[f32; 16] {
        &self.values
    }

    #[inline]
    pub fn values_mut(&mut self) -> &mut [f32; 16] {
        &mut self.values
    }

    /// Copies the 16 column-major values into the start of the given slice.
    ///
    /// # Errors
    /// Returns [`MatrixError::BufferTooShort`] if the slice has room for
    /// fewer than 16 values.
    pub fn copy_to_slice(&self, destination: &mut [f32]) -> Result<()> {
        let len = destination.len();
        let destination = destination
            .get_mut(..Self::LEN)
            .ok_or(MatrixError::BufferTooShort {
                len,
                required: Self::LEN,
            })?;
        destination.copy_from_slice(&self.values);
        Ok(())
    }

    /// The element at the given row and column.
    ///
    /// # Panics
    /// If `row` or `col` is larger than 3.
    #[inline]
    pub fn element(&self, row: usize, col: usize) -> f32 {
        assert!(row < 4 && col < 4, "element ({row}, {col}) is outside a 4x4 matrix");
        self.values[offset(row, col)]
    }

    /// # Panics
    /// If `row` or `col` is larger than 3.
    #[inline]
    pub fn set_element(&mut self, row: usize, col: usize, value: f32) -> &mut Self {
        assert!(row < 4 && col < 4, "element ({row}, {col}) is outside a 4x4 matrix");
        self.values[offset(row, col)] = value;
        self
    }

    /// The upper 4x3 part of the matrix (the linear block and the
    /// translation) as 12 column-major values.
    pub fn extract_4x3(&self) -> [f32; 12] {
        let m = &self.values;
        [
            m[M00], m[M10], m[M20], //
            m[M01], m[M11], m[M21], //
            m[M02], m[M12], m[M22], //
            m[M03], m[M13], m[M23],
        ]
    }

    /// Embeds the given 3x3 matrix, taken as a 2D homogeneous transform, in
    /// this matrix. Its first two rows and columns land in the x and y rows
    /// and columns, its third row and column in the w row and column, and
    /// the z axis is left untouched by the transform.
    pub fn set_from_matrix3(&mut self, matrix: &Matrix3) -> &mut Self {
        let m = matrix.values();
        self.values = [
            m[0], m[1], 0.0, m[2], //
            m[3], m[4], 0.0, m[5], //
            0.0, 0.0, 1.0, 0.0, //
            m[6], m[7], 0.0, m[8],
        ];
        self
    }

    /// Embeds the given 2D affine transform in this matrix, acting in the
    /// xy-plane.
    pub fn set_from_affine(&mut self, affine: &Affine2) -> &mut Self {
        self.values = [
            affine.m00, affine.m10, 0.0, 0.0, //
            affine.m01, affine.m11, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            affine.m02, affine.m12, 0.0, 1.0,
        ];
        self
    }

    /// Overwrites only the 2D linear and translation elements (`M00`, `M01`,
    /// `M10`, `M11`, `M03` and `M13`) with those of the given affine
    /// transform. Intended for matrices that already act in the xy-plane.
    pub fn set_as_affine(&mut self, affine: &Affine2) -> &mut Self {
        let m = &mut self.values;
        m[M00] = affine.m00;
        m[M10] = affine.m10;
        m[M01] = affine.m01;
        m[M11] = affine.m11;
        m[M03] = affine.m02;
        m[M13] = affine.m12;
        self
    }

    /// Copies only the 2D linear and translation elements (`M00`, `M01`,
    /// `M10`, `M11`, `M03` and `M13`) from another matrix.
    pub fn set_as_affine_from(&mut self, other: &Self) -> &mut Self {
        for idx in [M00, M10, M01, M11, M03, M13] {
            self.values[idx] = other.values[idx];
        }
        self
    }

    /// Extracts the xy-plane part of this matrix as a 2D affine transform.
    pub fn to_affine(&self) -> Affine2 {
        let m = &self.values;
        Affine2::new(m[M00], m[M01], m[M03], m[M10], m[M11], m[M13])
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f32; 16]> for Matrix4 {
    fn from(values: [f32; 16]) -> Self {
        Self::from_values(values)
    }
}

impl From<Matrix4> for [f32; 16] {
    fn from(matrix: Matrix4) -> Self {
        matrix.values
    }
}

impl From<&Affine2> for Matrix4 {
    fn from(affine: &Affine2) -> Self {
        let mut matrix = Self::identity();
        matrix.set_from_affine(affine);
        matrix
    }
}

impl_binop!(Mul, mul, Matrix4, Matrix4, Matrix4, |a, b| {
    Matrix4::from_values(compose::multiply_values(&a.values, &b.values))
});

impl_binop!(Mul, mul, Matrix4, Vector3, Vector3, |a, b| {
    a.transform_point(b)
});

impl_binop_assign!(MulAssign, mul_assign, Matrix4, Matrix4, |a, b| {
    a.multiply(b);
});

impl_approx_eq_by_components!(Matrix4, |m| m.values);

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            writeln!(
                f,
                "[{}|{}|{}|{}]",
                self.element(row, 0),
                self.element(row, 1),
                self.element(row, 2),
                self.element(row, 3)
            )?;
        }
        Ok(())
    }
}
