//! Matrix products, point and vector transforms and the builders for
//! translation, rotation and scaling.

use super::{Matrix4, index::*};
use crate::{angle::Angle, quaternion::UnitQuaternion, vector::Vector3};

/// Computes the product `a * b` of two column-major matrices.
pub fn multiply_values(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    let mut product = [0.0; 16];
    for col in 0..4 {
        for row in 0..4 {
            product[offset(row, col)] = (0..4)
                .map(|k| a[offset(row, k)] * b[offset(k, col)])
                .sum();
        }
    }
    product
}

/// Transforms the given point by a column-major matrix, taking the point's
/// homogeneous coordinate as 1 and ignoring the bottom row.
#[inline]
pub fn transform_values(m: &[f32; 16], [x, y, z]: [f32; 3]) -> [f32; 3] {
    [
        x * m[M00] + y * m[M01] + z * m[M02] + m[M03],
        x * m[M10] + y * m[M11] + z * m[M12] + m[M13],
        x * m[M20] + y * m[M21] + z * m[M22] + m[M23],
    ]
}

/// Transforms the given point by a column-major matrix and divides the
/// result by the resulting homogeneous coordinate.
///
/// A homogeneous coordinate of zero yields infinite or NaN components.
#[inline]
pub fn project_values(m: &[f32; 16], [x, y, z]: [f32; 3]) -> [f32; 3] {
    let inv_w = 1.0 / (x * m[M30] + y * m[M31] + z * m[M32] + m[M33]);
    let [tx, ty, tz] = transform_values(m, [x, y, z]);
    [tx * inv_w, ty * inv_w, tz * inv_w]
}

/// Applies only the upper-left 3x3 block of a column-major matrix to the
/// given vector.
#[inline]
pub fn rotate_values(m: &[f32; 16], [x, y, z]: [f32; 3]) -> [f32; 3] {
    [
        x * m[M00] + y * m[M01] + z * m[M02],
        x * m[M10] + y * m[M11] + z * m[M12],
        x * m[M20] + y * m[M21] + z * m[M22],
    ]
}

impl Matrix4 {
    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(translation: &Vector3) -> Self {
        let mut matrix = Self::identity();
        matrix.set_to_translation(translation);
        matrix
    }

    /// Creates a rotation matrix from the given unit quaternion.
    #[inline]
    pub fn from_rotation(rotation: &UnitQuaternion) -> Self {
        let mut matrix = Self::identity();
        matrix.set_from_rotation(rotation);
        matrix
    }

    /// Creates a matrix that rotates and then translates.
    #[inline]
    pub fn from_translation_rotation(translation: &Vector3, rotation: &UnitQuaternion) -> Self {
        let mut matrix = Self::identity();
        matrix.set_from_translation_rotation(translation, rotation);
        matrix
    }

    /// Creates a matrix that scales, rotates and then translates.
    #[inline]
    pub fn from_translation_rotation_scale(
        translation: &Vector3,
        rotation: &UnitQuaternion,
        scale: &Vector3,
    ) -> Self {
        let mut matrix = Self::identity();
        matrix.set_from_translation_rotation_scale(translation, rotation, scale);
        matrix
    }

    /// Creates a scaling matrix.
    #[inline]
    pub fn from_scaling(scaling: &Vector3) -> Self {
        let mut matrix = Self::identity();
        matrix.set_to_scaling(scaling);
        matrix
    }

    pub fn set_identity(&mut self) -> &mut Self {
        self.values = Self::identity().values;
        self
    }

    /// Sets this matrix to the rotation represented by the given unit
    /// quaternion.
    pub fn set_from_rotation(&mut self, rotation: &UnitQuaternion) -> &mut Self {
        self.set_from_translation_rotation(&Vector3::zeros(), rotation)
    }

    /// Sets this matrix to the rotation represented by the given unit
    /// quaternion followed by the given translation.
    pub fn set_from_translation_rotation(
        &mut self,
        translation: &Vector3,
        rotation: &UnitQuaternion,
    ) -> &mut Self {
        self.set_from_translation_rotation_scale(translation, rotation, &Vector3::same(1.0))
    }

    /// Sets this matrix to scale by `scale`, then rotate by `rotation` and
    /// then translate by `translation`.
    ///
    /// The quaternion must be normalized. Otherwise the result shears.
    pub fn set_from_translation_rotation_scale(
        &mut self,
        translation: &Vector3,
        rotation: &UnitQuaternion,
        scale: &Vector3,
    ) -> &mut Self {
        let (x, y, z, w) = (rotation.x(), rotation.y(), rotation.z(), rotation.w());
        let (xs, ys, zs) = (x * 2.0, y * 2.0, z * 2.0);
        let (wx, wy, wz) = (w * xs, w * ys, w * zs);
        let (xx, xy, xz) = (x * xs, x * ys, x * zs);
        let (yy, yz, zz) = (y * ys, y * zs, z * zs);
        let (sx, sy, sz) = (scale.x(), scale.y(), scale.z());

        self.values = [
            sx * (1.0 - (yy + zz)),
            sx * (xy + wz),
            sx * (xz - wy),
            0.0,
            sy * (xy - wz),
            sy * (1.0 - (xx + zz)),
            sy * (yz + wx),
            0.0,
            sz * (xz + wy),
            sz * (yz - wx),
            sz * (1.0 - (xx + yy)),
            0.0,
            translation.x(),
            translation.y(),
            translation.z(),
            1.0,
        ];
        self
    }

    /// Sets this matrix to the transform whose local x-, y- and z-axes are
    /// the given vectors (the first three columns) and whose origin is
    /// `position` (the fourth column).
    pub fn set_from_axes(
        &mut self,
        x_axis: &Vector3,
        y_axis: &Vector3,
        z_axis: &Vector3,
        position: &Vector3,
    ) -> &mut Self {
        self.values = [
            x_axis.x(),
            x_axis.y(),
            x_axis.z(),
            0.0,
            y_axis.x(),
            y_axis.y(),
            y_axis.z(),
            0.0,
            z_axis.x(),
            z_axis.y(),
            z_axis.z(),
            0.0,
            position.x(),
            position.y(),
            position.z(),
            1.0,
        ];
        self
    }

    pub fn set_to_translation(&mut self, translation: &Vector3) -> &mut Self {
        self.set_identity().set_translation(translation)
    }

    pub fn set_to_translation_and_scaling(
        &mut self,
        translation: &Vector3,
        scaling: &Vector3,
    ) -> &mut Self {
        self.set_to_scaling(scaling).set_translation(translation)
    }

    pub fn set_to_scaling(&mut self, scaling: &Vector3) -> &mut Self {
        self.set_identity();
        self.values[M00] = scaling.x();
        self.values[M11] = scaling.y();
        self.values[M22] = scaling.z();
        self
    }

    /// Sets this matrix to the rotation of `angle` about `axis`. A zero angle
    /// gives the identity.
    pub fn set_to_rotation<A: Angle>(&mut self, axis: &Vector3, angle: A) -> &mut Self {
        if angle.is_zero() {
            return self.set_identity();
        }
        self.set_from_rotation(&UnitQuaternion::from_axis_angle(axis, angle))
    }

    /// Sets this matrix to the shortest rotation taking the direction of
    /// `from` to the direction of `to`.
    pub fn set_to_rotation_between(&mut self, from: &Vector3, to: &Vector3) -> &mut Self {
        self.set_from_rotation(&UnitQuaternion::rotation_between(from, to))
    }

    /// Sets this matrix to the rotation given by yaw about the y-axis, pitch
    /// about the x-axis and roll about the z-axis.
    pub fn set_from_euler_angles<A: Angle>(&mut self, yaw: A, pitch: A, roll: A) -> &mut Self {
        self.set_from_rotation(&UnitQuaternion::from_euler_angles(yaw, pitch, roll))
    }

    /// Adds the given vector to the translation column.
    pub fn add_translation(&mut self, translation: &Vector3) -> &mut Self {
        self.values[M03] += translation.x();
        self.values[M13] += translation.y();
        self.values[M23] += translation.z();
        self
    }

    /// Overwrites the translation column, keeping everything else.
    pub fn set_translation(&mut self, translation: &Vector3) -> &mut Self {
        self.values[M03] = translation.x();
        self.values[M13] = translation.y();
        self.values[M23] = translation.z();
        self
    }

    /// Multiplies the first three diagonal elements by the given factors.
    /// Only meaningful for matrices without rotation.
    pub fn scale_diagonal(&mut self, scaling: &Vector3) -> &mut Self {
        self.values[M00] *= scaling.x();
        self.values[M11] *= scaling.y();
        self.values[M22] *= scaling.z();
        self
    }

    pub fn scale_diagonal_uniform(&mut self, scaling: f32) -> &mut Self {
        self.scale_diagonal(&Vector3::same(scaling))
    }

    /// Sets this matrix to `self * other`.
    pub fn multiply(&mut self, other: &Self) -> &mut Self {
        self.values = multiply_values(&self.values, &other.values);
        self
    }

    /// Sets this matrix to `other * self`.
    pub fn premultiply(&mut self, other: &Self) -> &mut Self {
        self.values = multiply_values(&other.values, &self.values);
        self
    }

    pub fn transpose(&mut self) -> &mut Self {
        *self = self.transposed();
        self
    }

    #[inline]
    pub fn transposed(&self) -> Self {
        let mut transposed = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                transposed[offset(col, row)] = self.values[offset(row, col)];
            }
        }
        Self::from_values(transposed)
    }

    /// Postmultiplies this matrix with a translation matrix.
    pub fn translate(&mut self, translation: &Vector3) -> &mut Self {
        let m = &mut self.values;
        let (x, y, z) = (translation.x(), translation.y(), translation.z());
        m[M03] += m[M00] * x + m[M01] * y + m[M02] * z;
        m[M13] += m[M10] * x + m[M11] * y + m[M12] * z;
        m[M23] += m[M20] * x + m[M21] * y + m[M22] * z;
        m[M33] += m[M30] * x + m[M31] * y + m[M32] * z;
        self
    }

    /// Postmultiplies this matrix with the rotation of `angle` about `axis`.
    /// A zero angle leaves the matrix unchanged.
    pub fn rotate<A: Angle>(&mut self, axis: &Vector3, angle: A) -> &mut Self {
        if angle.is_zero() {
            return self;
        }
        self.rotate_by(&UnitQuaternion::from_axis_angle(axis, angle))
    }

    /// Postmultiplies this matrix with the rotation matrix of the given unit
    /// quaternion.
    pub fn rotate_by(&mut self, rotation: &UnitQuaternion) -> &mut Self {
        self.multiply(&Self::from_rotation(rotation))
    }

    /// Postmultiplies this matrix with the shortest rotation taking the
    /// direction of `from` to the direction of `to`.
    pub fn rotate_between(&mut self, from: &Vector3, to: &Vector3) -> &mut Self {
        self.rotate_by(&UnitQuaternion::rotation_between(from, to))
    }

    /// Postmultiplies this matrix with a scaling matrix.
    pub fn scale_by(&mut self, scaling: &Vector3) -> &mut Self {
        let factors = [scaling.x(), scaling.y(), scaling.z()];
        for (col, factor) in factors.into_iter().enumerate() {
            for row in 0..4 {
                self.values[offset(row, col)] *= factor;
            }
        }
        self
    }

    /// Transforms the given point, ignoring the bottom row.
    #[inline]
    pub fn transform_point(&self, point: &Vector3) -> Vector3 {
        transform_values(&self.values, (*point).into()).into()
    }

    /// Transforms the given point and performs the perspective division.
    ///
    /// If the resulting homogeneous coordinate is zero the components are
    /// infinite or NaN.
    #[inline]
    pub fn project_point(&self, point: &Vector3) -> Vector3 {
        project_values(&self.values, (*point).into()).into()
    }

    /// Applies only the upper-left 3x3 block to the given vector.
    #[inline]
    pub fn rotate_vector(&self, vector: &Vector3) -> Vector3 {
        rotate_values(&self.values, (*vector).into()).into()
    }

    /// Applies the transpose of the upper-left 3x3 block to the given vector,
    /// which undoes [`Self::rotate_vector`] for a pure rotation.
    #[inline]
    pub fn unrotate_vector(&self, vector: &Vector3) -> Vector3 {
        let m = &self.values;
        let (x, y, z) = (vector.x(), vector.y(), vector.z());
        Vector3::new(
            x * m[M00] + y * m[M10] + z * m[M20],
            x * m[M01] + y * m[M11] + z * m[M21],
            x * m[M02] + y * m[M12] + z * m[M22],
        )
    }

    /// Undoes [`Self::transform_point`] for a rigid transform by subtracting
    /// the translation and then unrotating.
    #[inline]
    pub fn untransform_point(&self, point: &Vector3) -> Vector3 {
        let m = &self.values;
        let local = Vector3::new(
            point.x() - m[M03],
            point.y() - m[M13],
            point.z() - m[M23],
        );
        self.unrotate_vector(&local)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use crate::angle::{Degrees, Radians};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-5;

    prop_compose! {
        fn translation_strategy()(
            x in -1e2_f32..1e2,
            y in -1e2_f32..1e2,
            z in -1e2_f32..1e2,
        ) -> Vector3 {
            Vector3::new(x, y, z)
        }
    }

    prop_compose! {
        fn rotation_strategy()(
            axis_x in -1.0_f32..1.0,
            axis_y in -1.0_f32..1.0,
            axis_z in -1.0_f32..1.0,
            angle in 0.0_f32..(2.0 * PI),
        ) -> UnitQuaternion {
            UnitQuaternion::from_axis_angle(
                &Vector3::new(axis_x, axis_y, axis_z + 1.5),
                Radians(angle),
            )
        }
    }

    prop_compose! {
        fn matrix_strategy()(values in prop::array::uniform16(-1e2_f32..1e2)) -> Matrix4 {
            Matrix4::from_values(values)
        }
    }

    #[test]
    fn multiplying_follows_row_times_column() {
        let mut a = [0.0; 16];
        let mut b = [0.0; 16];
        for idx in 0..16 {
            a[idx] = idx as f32;
            b[idx] = (16 - idx) as f32;
        }
        let product = multiply_values(&a, &b);
        for row in 0..4 {
            for col in 0..4 {
                let expected: f32 = (0..4)
                    .map(|k| a[offset(row, k)] * b[offset(k, col)])
                    .sum();
                assert_eq!(product[offset(row, col)], expected);
            }
        }
        // Row 0 of `a` is (0, 4, 8, 12) and column 0 of `b` is (16, 15, 14, 13)
        assert_eq!(product[M00], 4.0 * 15.0 + 8.0 * 14.0 + 12.0 * 13.0);
    }

    #[test]
    fn premultiplying_reverses_operand_order() {
        let a = Matrix4::from_translation(&Vector3::new(1.0, 0.0, 0.0));
        let b = Matrix4::from_scaling(&Vector3::new(2.0, 2.0, 2.0));

        let mut premultiplied = a;
        premultiplied.premultiply(&b);
        assert_eq!(premultiplied, &b * &a);

        let point = premultiplied.transform_point(&Vector3::zeros());
        assert_abs_diff_eq!(point, Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn transposing_swaps_rows_and_columns() {
        let mut matrix = Matrix4::identity();
        matrix.set_element(0, 3, 5.0).set_element(2, 1, -2.0);
        matrix.transpose();
        assert_eq!(matrix.element(3, 0), 5.0);
        assert_eq!(matrix.element(1, 2), -2.0);
        assert_eq!(matrix.element(0, 3), 0.0);
    }

    #[test]
    fn translation_matrix_moves_points_but_not_vectors() {
        let matrix = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
        let v = Vector3::new(-1.0, 0.5, 4.0);
        assert_abs_diff_eq!(matrix.transform_point(&v), Vector3::new(0.0, 2.5, 7.0));
        assert_abs_diff_eq!(matrix.rotate_vector(&v), v);
        assert_abs_diff_eq!(&matrix * &v, Vector3::new(0.0, 2.5, 7.0));
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let mut matrix = Matrix4::identity();
        matrix.set_to_rotation(&Vector3::unit_z(), Degrees(90.0));
        assert_abs_diff_eq!(
            matrix.transform_point(&Vector3::unit_x()),
            Vector3::unit_y(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn zero_angle_rotation_is_identity_or_no_op() {
        let mut matrix = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
        matrix.set_to_rotation(&Vector3::zeros(), Radians(0.0));
        assert_eq!(matrix, Matrix4::identity());

        let original = Matrix4::from_scaling(&Vector3::new(2.0, 3.0, 4.0));
        let mut rotated = original;
        rotated.rotate(&Vector3::unit_y(), Degrees(0.0));
        assert_eq!(rotated, original);
    }

    #[test]
    fn rotation_matrix_from_quaternion_scales_columns() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::unit_z(), Degrees(90.0));
        let matrix = Matrix4::from_translation_rotation_scale(
            &Vector3::new(4.0, 5.0, 6.0),
            &rotation,
            &Vector3::new(2.0, 3.0, 1.0),
        );
        // x maps to 2y, y maps to -3x
        assert_abs_diff_eq!(matrix.element(1, 0), 2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(matrix.element(0, 1), -3.0, epsilon = EPSILON);
        assert_abs_diff_eq!(matrix.element(2, 2), 1.0, epsilon = EPSILON);
        assert_eq!(matrix.element(0, 3), 4.0);
        assert_eq!(matrix.element(3, 3), 1.0);
        assert_eq!(matrix.element(3, 0), 0.0);
    }

    #[test]
    fn rotation_matrix_agrees_with_quaternion_rotation() {
        let rotation =
            UnitQuaternion::from_euler_angles(Degrees(30.0), Degrees(-45.0), Degrees(10.0));
        let v = Vector3::new(0.3, -1.2, 2.0);
        assert_abs_diff_eq!(
            Matrix4::from_rotation(&rotation).rotate_vector(&v),
            rotation.transform_vector(&v),
            epsilon = EPSILON
        );

        let mut from_euler = Matrix4::identity();
        from_euler.set_from_euler_angles(Degrees(30.0), Degrees(-45.0), Degrees(10.0));
        assert_abs_diff_eq!(from_euler, Matrix4::from_rotation(&rotation), epsilon = EPSILON);
    }

    #[test]
    fn rotation_between_vectors_aligns_them() {
        let from = Vector3::new(1.0, 0.0, 0.0);
        let to = Vector3::new(0.0, 0.0, 2.0);

        let mut matrix = Matrix4::identity();
        matrix.set_to_rotation_between(&from, &to);
        assert_abs_diff_eq!(matrix.rotate_vector(&from), Vector3::unit_z(), epsilon = EPSILON);

        let mut postmultiplied = Matrix4::from_translation(&Vector3::same(1.0));
        postmultiplied.rotate_between(&from, &to);
        assert_abs_diff_eq!(
            postmultiplied.transform_point(&from),
            Vector3::new(1.0, 1.0, 2.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn setting_from_axes_places_them_in_columns() {
        let mut matrix = Matrix4::identity();
        matrix.set_from_axes(
            &Vector3::unit_y(),
            &Vector3::unit_z(),
            &Vector3::unit_x(),
            &Vector3::new(1.0, 2.0, 3.0),
        );
        assert_abs_diff_eq!(
            matrix.transform_point(&Vector3::unit_x()),
            Vector3::new(1.0, 3.0, 3.0)
        );
        assert_abs_diff_eq!(
            matrix.rotate_vector(&Vector3::unit_z()),
            Vector3::unit_x()
        );
    }

    #[test]
    fn translation_and_diagonal_helpers_work() {
        let mut matrix = Matrix4::identity();
        matrix
            .set_to_translation_and_scaling(&Vector3::new(1.0, 2.0, 3.0), &Vector3::same(2.0))
            .add_translation(&Vector3::new(1.0, 1.0, 1.0))
            .scale_diagonal(&Vector3::new(1.0, 0.5, 2.0))
            .scale_diagonal_uniform(3.0);

        assert_eq!(matrix.element(0, 0), 6.0);
        assert_eq!(matrix.element(1, 1), 3.0);
        assert_eq!(matrix.element(2, 2), 12.0);
        assert_eq!(matrix.element(0, 3), 2.0);
        assert_eq!(matrix.element(2, 3), 4.0);

        matrix.set_translation(&Vector3::zeros());
        assert_eq!(matrix.element(1, 3), 0.0);
    }

    #[test]
    fn postmultiplied_scale_applies_before_existing_transform() {
        let mut matrix = Matrix4::from_translation(&Vector3::new(1.0, 0.0, 0.0));
        matrix.scale_by(&Vector3::new(2.0, 3.0, 4.0));
        assert_abs_diff_eq!(
            matrix.transform_point(&Vector3::same(1.0)),
            Vector3::new(3.0, 3.0, 4.0)
        );
    }

    #[test]
    fn projecting_divides_by_w() {
        let mut matrix = Matrix4::identity();
        matrix.set_element(3, 3, 2.0);
        assert_abs_diff_eq!(
            matrix.project_point(&Vector3::new(2.0, 4.0, 6.0)),
            Vector3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn untransform_subtracts_translation_per_axis() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::new(1.0, 1.0, 0.0), Degrees(60.0));
        let matrix =
            Matrix4::from_translation_rotation(&Vector3::new(1.0, -2.0, 3.0), &rotation);
        let point = Vector3::new(0.5, 0.25, -4.0);

        let transformed = matrix.transform_point(&point);
        assert_abs_diff_eq!(matrix.untransform_point(&transformed), point, epsilon = EPSILON);
        assert_abs_diff_eq!(
            matrix.unrotate_vector(&matrix.rotate_vector(&point)),
            point,
            epsilon = EPSILON
        );
    }

    proptest! {
        #[test]
        fn multiplying_with_identity_changes_nothing(matrix in matrix_strategy()) {
            let mut right = matrix;
            right.multiply(&Matrix4::identity());
            prop_assert_eq!(right, matrix);

            let mut left = Matrix4::identity();
            left.multiply(&matrix);
            prop_assert_eq!(left, matrix);
        }
    }

    proptest! {
        #[test]
        fn transposing_twice_gives_back_matrix(matrix in matrix_strategy()) {
            let mut twice = matrix;
            twice.transpose().transpose();
            prop_assert_eq!(twice, matrix);
        }
    }

    proptest! {
        #[test]
        fn translation_rotation_builder_equals_translate_then_rotate(
            translation in translation_strategy(),
            rotation in rotation_strategy(),
        ) {
            let built = Matrix4::from_translation_rotation(&translation, &rotation);

            let mut composed = Matrix4::identity();
            composed.translate(&translation).rotate_by(&rotation);

            prop_assert!(approx::abs_diff_eq!(built, composed, epsilon = 1e-4));
        }
    }
}
