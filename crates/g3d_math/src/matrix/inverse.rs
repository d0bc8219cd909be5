//! Determinants, cofactor inversion and decomposition of transforms.

use super::{Matrix4, index::*};
use crate::{
    consts,
    error::{MatrixError, Result},
    quaternion::UnitQuaternion,
    vector::Vector3,
};

/// The determinant of the 3x3 minor of `m` that excludes `row` and `col`.
fn minor(m: &[f32; 16], row: usize, col: usize) -> f32 {
    let rows = remaining_indices(row);
    let cols = remaining_indices(col);
    let at = |r: usize, c: usize| m[offset(rows[r], cols[c])];

    at(0, 0) * (at(1, 1) * at(2, 2) - at(1, 2) * at(2, 1))
        - at(0, 1) * (at(1, 0) * at(2, 2) - at(1, 2) * at(2, 0))
        + at(0, 2) * (at(1, 0) * at(2, 1) - at(1, 1) * at(2, 0))
}

fn remaining_indices(excluded: usize) -> [usize; 3] {
    let mut indices = [0; 3];
    let mut next = 0;
    for idx in (0..4).filter(|&idx| idx != excluded) {
        indices[next] = idx;
        next += 1;
    }
    indices
}

/// The signed minor for the element at the given row and column.
fn cofactor(m: &[f32; 16], row: usize, col: usize) -> f32 {
    let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
    sign * minor(m, row, col)
}

/// Computes the determinant of a column-major 4x4 matrix by cofactor
/// expansion along the first row. No affine structure is assumed.
pub fn determinant_of(m: &[f32; 16]) -> f32 {
    (0..4).map(|col| m[offset(0, col)] * cofactor(m, 0, col)).sum()
}

/// Computes the inverse of a column-major 4x4 matrix as its adjugate divided
/// by its determinant, or returns [`None`] if the determinant is exactly
/// zero. Matrices with a non-trivial bottom row (projections) are inverted
/// correctly.
pub fn invert_values(m: &[f32; 16]) -> Option<[f32; 16]> {
    let cofactors_of_first_row = [0, 1, 2, 3].map(|col| cofactor(m, 0, col));
    let determinant: f32 = (0..4)
        .map(|col| m[offset(0, col)] * cofactors_of_first_row[col])
        .sum();

    if determinant == 0.0 {
        return None;
    }
    let inv_determinant = 1.0 / determinant;

    let mut inverse = [0.0; 16];
    for row in 0..4 {
        for col in 0..4 {
            // The adjugate is the transposed cofactor matrix
            let adjugate_element = if col == 0 {
                cofactors_of_first_row[row]
            } else {
                cofactor(m, col, row)
            };
            inverse[offset(row, col)] = adjugate_element * inv_determinant;
        }
    }
    Some(inverse)
}

impl Matrix4 {
    /// Computes the determinant of the full 4x4 matrix.
    #[inline]
    pub fn determinant(&self) -> f32 {
        determinant_of(&self.values)
    }

    /// Computes the determinant of the upper-left 3x3 block.
    pub fn determinant_3x3(&self) -> f32 {
        let m = &self.values;
        m[M00] * m[M11] * m[M22] + m[M01] * m[M12] * m[M20] + m[M02] * m[M10] * m[M21]
            - m[M00] * m[M12] * m[M21]
            - m[M01] * m[M10] * m[M22]
            - m[M02] * m[M11] * m[M20]
    }

    /// Inverts this matrix in place.
    ///
    /// # Errors
    /// Returns [`MatrixError::NonInvertible`] if the determinant is exactly
    /// zero. The matrix is then left unchanged.
    pub fn invert(&mut self) -> Result<&mut Self> {
        match invert_values(&self.values) {
            Some(inverse) => {
                self.values = inverse;
                Ok(self)
            }
            None => {
                log::debug!("Refusing to invert singular matrix:\n{self}");
                Err(MatrixError::NonInvertible)
            }
        }
    }

    /// Computes the inverse of this matrix.
    ///
    /// # Errors
    /// Returns [`MatrixError::NonInvertible`] if the determinant is exactly
    /// zero.
    pub fn inverted(&self) -> Result<Self> {
        let mut inverse = *self;
        inverse.invert()?;
        Ok(inverse)
    }

    /// The translation column.
    #[inline]
    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.values[M03], self.values[M13], self.values[M23])
    }

    /// The squared length of the first column of the 3x3 block.
    #[inline]
    pub fn scale_x_squared(&self) -> f32 {
        self.column_norm_squared(0)
    }

    #[inline]
    pub fn scale_y_squared(&self) -> f32 {
        self.column_norm_squared(1)
    }

    #[inline]
    pub fn scale_z_squared(&self) -> f32 {
        self.column_norm_squared(2)
    }

    /// The scale factor along the local x-axis. When the axis is not rotated
    /// this is the absolute diagonal element, otherwise the length of the
    /// first column.
    #[inline]
    pub fn scale_x(&self) -> f32 {
        self.axis_scale(0)
    }

    #[inline]
    pub fn scale_y(&self) -> f32 {
        self.axis_scale(1)
    }

    #[inline]
    pub fn scale_z(&self) -> f32 {
        self.axis_scale(2)
    }

    /// The per-axis scale factors.
    #[inline]
    pub fn scale(&self) -> Vector3 {
        Vector3::new(self.scale_x(), self.scale_y(), self.scale_z())
    }

    /// Extracts the rotation, assuming the upper-left 3x3 block is
    /// orthonormal.
    #[inline]
    pub fn rotation(&self) -> UnitQuaternion {
        UnitQuaternion::from_matrix(self, false)
    }

    /// Extracts the rotation after normalizing each axis of the upper-left
    /// 3x3 block, so that the matrix may carry positive scaling.
    #[inline]
    pub fn rotation_with_normalized_axes(&self) -> UnitQuaternion {
        UnitQuaternion::from_matrix(self, true)
    }

    /// Whether the upper-left 3x3 block differs from the identity by more
    /// than [`consts::ZERO_TOLERANCE`] in any element.
    pub fn has_rotation_or_scaling(&self) -> bool {
        (0..3).any(|row| {
            (0..3).any(|col| {
                let expected = if row == col { 1.0 } else { 0.0 };
                !consts::is_equal(self.element(row, col), expected)
            })
        })
    }

    /// Computes the matrix for transforming surface normals: the inverse
    /// transpose of this matrix with the translation removed.
    ///
    /// # Errors
    /// Returns [`MatrixError::NonInvertible`] if the matrix without
    /// translation is singular.
    pub fn to_normal_matrix(&self) -> Result<Self> {
        let mut normal_matrix = *self;
        normal_matrix.set_translation(&Vector3::zeros());
        normal_matrix.invert()?;
        Ok(normal_matrix.transposed())
    }

    fn column_norm_squared(&self, col: usize) -> f32 {
        (0..3).map(|row| self.element(row, col).powi(2)).sum()
    }

    fn axis_scale(&self, col: usize) -> f32 {
        let off_diagonal_is_zero = (0..3)
            .filter(|&row| row != col)
            .all(|row| consts::is_zero(self.element(row, col)));

        if off_diagonal_is_zero {
            self.element(col, col).abs()
        } else {
            self.column_norm_squared(col).sqrt()
        }
    }
}
