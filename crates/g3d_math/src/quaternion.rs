//! Quaternions.

use crate::{
    angle::Angle,
    matrix::{Matrix4, index::*},
    vector::Vector3,
};
use bytemuck::{Pod, Zeroable};

/// A general quaternion, used for the logarithms of rotations and their
/// weighted sums.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct Quaternion {
    inner: nalgebra::Quaternion<f32>,
}

/// A quaternion of unit length representing a rotation.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct UnitQuaternion {
    inner: nalgebra::UnitQuaternion<f32>,
}

impl Quaternion {
    #[inline]
    pub fn from_parts(real: f32, imag: Vector3) -> Self {
        Self {
            inner: nalgebra::Quaternion::from_parts(real, *imag._inner()),
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_parts(0.0, Vector3::zeros())
    }

    #[inline]
    pub fn real(&self) -> f32 {
        self.inner.w
    }

    #[inline]
    pub fn imag(&self) -> Vector3 {
        Vector3::_wrap(self.inner.imag())
    }

    /// The natural logarithm of the quaternion. A quaternion with zero
    /// imaginary part has a zero imaginary logarithm.
    pub fn ln(&self) -> Self {
        let imag = self.inner.imag();
        let imag_norm = imag.norm();
        let imag = if imag_norm == 0.0 {
            imag
        } else {
            imag * (imag_norm.atan2(self.inner.w) / imag_norm)
        };
        Self {
            inner: nalgebra::Quaternion::from_parts(self.inner.norm().ln(), imag),
        }
    }

    /// The exponential of the quaternion.
    #[inline]
    pub fn exp(&self) -> Self {
        Self {
            inner: self.inner.exp(),
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::zero()
    }
}

impl_binop!(Add, add, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion {
        inner: a.inner + b.inner,
    }
});

impl_binop!(Mul, mul, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion {
        inner: a.inner * b.inner,
    }
});

impl_binop!(Mul, mul, Quaternion, f32, Quaternion, |a, b| {
    Quaternion {
        inner: a.inner * *b,
    }
});

impl_binop_assign!(AddAssign, add_assign, Quaternion, Quaternion, |a, b| {
    a.inner += b.inner;
});

impl_approx_eq_by_components!(Quaternion, |q| [
    q.inner.i, q.inner.j, q.inner.k, q.inner.w
]);

impl UnitQuaternion {
    #[inline]
    pub fn identity() -> Self {
        Self {
            inner: nalgebra::UnitQuaternion::identity(),
        }
    }

    #[inline]
    pub fn normalized_from(quaternion: Quaternion) -> Self {
        Self {
            inner: nalgebra::UnitQuaternion::new_normalize(quaternion.inner),
        }
    }

    /// Creates the rotation of `angle` counter-clockwise about `axis`. The
    /// axis does not have to be normalized. A zero-length axis gives the
    /// identity rotation.
    #[inline]
    pub fn from_axis_angle<A: Angle>(axis: &Vector3, angle: A) -> Self {
        match nalgebra::Unit::try_new(*axis._inner(), 0.0) {
            Some(axis) => Self {
                inner: nalgebra::UnitQuaternion::from_axis_angle(&axis, angle.radians()),
            },
            None => Self::identity(),
        }
    }

    /// Creates a rotation from yaw about the y-axis, pitch about the x-axis
    /// and roll about the z-axis. Roll is applied first and yaw last.
    #[inline]
    pub fn from_euler_angles<A: Angle>(yaw: A, pitch: A, roll: A) -> Self {
        let about = |axis: nalgebra::Unit<nalgebra::Vector3<f32>>, angle: A| {
            nalgebra::UnitQuaternion::from_axis_angle(&axis, angle.radians())
        };
        Self {
            inner: about(nalgebra::Vector3::y_axis(), yaw)
                * about(nalgebra::Vector3::x_axis(), pitch)
                * about(nalgebra::Vector3::z_axis(), roll),
        }
    }

    /// Creates the shortest-arc rotation taking the direction of `from` to
    /// the direction of `to`. Opposite directions give a half turn about an
    /// axis perpendicular to `from`. If either vector has zero length the
    /// identity is returned.
    pub fn rotation_between(from: &Vector3, to: &Vector3) -> Self {
        let (from, to) = (from._inner(), to._inner());
        if from.norm_squared() == 0.0 || to.norm_squared() == 0.0 {
            return Self::identity();
        }
        match nalgebra::UnitQuaternion::rotation_between(from, to) {
            Some(inner) => Self { inner },
            None => {
                // Antiparallel: pick the coordinate axis least aligned with
                // `from` to build a perpendicular rotation axis
                let helper = if from.x.abs() <= from.y.abs() && from.x.abs() <= from.z.abs() {
                    nalgebra::Vector3::x()
                } else if from.y.abs() <= from.z.abs() {
                    nalgebra::Vector3::y()
                } else {
                    nalgebra::Vector3::z()
                };
                let axis = nalgebra::Unit::new_normalize(from.cross(&helper));
                Self {
                    inner: nalgebra::UnitQuaternion::from_axis_angle(&axis, std::f32::consts::PI),
                }
            }
        }
    }

    /// Extracts the rotation from the upper-left 3x3 block of the given
    /// matrix.
    ///
    /// The block must be orthonormal unless `normalize_axes` is `true`, in
    /// which case each column is normalized first. That removes any
    /// (positive) per-axis scaling composed after the rotation.
    pub fn from_matrix(matrix: &Matrix4, normalize_axes: bool) -> Self {
        let m = matrix.values();
        let mut columns = [
            nalgebra::Vector3::new(m[M00], m[M10], m[M20]),
            nalgebra::Vector3::new(m[M01], m[M11], m[M21]),
            nalgebra::Vector3::new(m[M02], m[M12], m[M22]),
        ];
        if normalize_axes {
            for column in &mut columns {
                let norm = column.norm();
                if norm != 0.0 {
                    *column /= norm;
                }
            }
        }
        let rotation = nalgebra::Rotation3::from_matrix_unchecked(
            nalgebra::Matrix3::from_columns(&columns),
        );
        // The trace-based extraction only yields a unit quaternion for an
        // exactly orthonormal block
        let quaternion = nalgebra::UnitQuaternion::from_rotation_matrix(&rotation);
        Self {
            inner: nalgebra::UnitQuaternion::new_normalize(quaternion.into_inner()),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.inner.i
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.inner.j
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.inner.k
    }

    #[inline]
    pub fn w(&self) -> f32 {
        self.inner.w
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.inner.coords.dot(&other.inner.coords)
    }

    #[inline]
    pub fn inverse(&self) -> Self {
        Self {
            inner: self.inner.inverse(),
        }
    }

    /// The same rotation with all four components negated.
    #[inline]
    pub fn negated(&self) -> Self {
        Self {
            inner: nalgebra::UnitQuaternion::new_unchecked(-self.inner.into_inner()),
        }
    }

    /// The one of `q` and `-q` with non-negative w. When w is zero, the
    /// first nonzero imaginary component is made positive.
    pub fn canonical(&self) -> Self {
        let leading = [self.w(), self.x(), self.y(), self.z()]
            .into_iter()
            .find(|component| *component != 0.0)
            .unwrap_or(0.0);
        if leading < 0.0 { self.negated() } else { *self }
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.inner.angle()
    }

    /// Spherically interpolates along the shortest arc towards `other`.
    /// Falls back to normalized linear interpolation when the rotations are
    /// too close for the arc to be resolved.
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        if let Some(inner) = self.inner.try_slerp(&other.inner, t, f32::EPSILON) {
            return Self { inner };
        }
        let other = if self.dot(other) < 0.0 {
            other.negated()
        } else {
            *other
        };
        Self {
            inner: nalgebra::UnitQuaternion::new_normalize(
                self.inner.into_inner() * (1.0 - t) + other.inner.into_inner() * t,
            ),
        }
    }

    /// Raises the rotation to the given real power, scaling its angle.
    #[inline]
    pub fn powf(&self, exponent: f32) -> Self {
        Self {
            inner: self.inner.powf(exponent),
        }
    }

    /// The natural logarithm, a pure quaternion holding half the rotation
    /// angle times the rotation axis.
    #[inline]
    pub fn ln(&self) -> Quaternion {
        let log = self.to_quaternion().ln();
        Quaternion::from_parts(0.0, log.imag())
    }

    #[inline]
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion {
            inner: self.inner.into_inner(),
        }
    }

    /// The homogeneous rotation matrix for this rotation.
    #[inline]
    pub fn to_matrix(&self) -> Matrix4 {
        let mut matrix = Matrix4::identity();
        matrix.set_from_rotation(self);
        matrix
    }

    /// Applies the rotation to the given vector.
    #[inline]
    pub fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        Vector3::_wrap(self.inner.transform_vector(vector._inner()))
    }

    #[inline]
    pub fn _inner(&self) -> &nalgebra::UnitQuaternion<f32> {
        &self.inner
    }
}

impl Default for UnitQuaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl_binop!(
    Mul,
    mul,
    UnitQuaternion,
    UnitQuaternion,
    UnitQuaternion,
    |a, b| {
        UnitQuaternion {
            inner: a.inner * b.inner,
        }
    }
);

impl_approx_eq_by_components!(UnitQuaternion, |q| [q.x(), q.y(), q.z(), q.w()]);

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use crate::angle::{Degrees, Radians};
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-6;

    fn assert_same_rotation(a: &UnitQuaternion, b: &UnitQuaternion) {
        let b = if a.dot(b) < 0.0 { b.negated() } else { *b };
        assert_abs_diff_eq!(a, &b, epsilon = 1e-5);
    }

    #[test]
    fn axis_angle_with_unnormalized_axis_works() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::new(0.0, 0.0, 5.0), Degrees(90.0));

        let rotated = q.transform_vector(&Vector3::unit_x());
        assert_abs_diff_eq!(rotated, Vector3::unit_y(), epsilon = EPSILON);
    }

    #[test]
    fn axis_angle_with_zero_axis_gives_identity() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::zeros(), Radians(1.0));
        assert_eq!(q, UnitQuaternion::identity());
    }

    #[test]
    fn degree_and_radian_axis_angles_agree() {
        let axis = Vector3::new(1.0, 2.0, 3.0);
        let from_degrees = UnitQuaternion::from_axis_angle(&axis, Degrees(30.0));
        let from_radians = UnitQuaternion::from_axis_angle(&axis, Radians(PI / 6.0));
        assert_abs_diff_eq!(from_degrees, from_radians, epsilon = EPSILON);
    }

    #[test]
    fn euler_yaw_rotates_about_y() {
        let q = UnitQuaternion::from_euler_angles(Degrees(90.0), Degrees(0.0), Degrees(0.0));

        let rotated = q.transform_vector(&Vector3::unit_z());
        assert_abs_diff_eq!(rotated, Vector3::unit_x(), epsilon = EPSILON);
    }

    #[test]
    fn euler_angles_compose_as_yaw_pitch_roll() {
        let q = UnitQuaternion::from_euler_angles(Radians(0.3), Radians(0.2), Radians(0.1));
        let expected = UnitQuaternion::from_axis_angle(&Vector3::unit_y(), Radians(0.3))
            * UnitQuaternion::from_axis_angle(&Vector3::unit_x(), Radians(0.2))
            * UnitQuaternion::from_axis_angle(&Vector3::unit_z(), Radians(0.1));
        assert_abs_diff_eq!(q, expected, epsilon = EPSILON);
    }

    #[test]
    fn rotation_between_maps_first_direction_onto_second() {
        let from = Vector3::new(1.0, 1.0, 0.0);
        let to = Vector3::new(0.0, 0.0, -3.0);
        let q = UnitQuaternion::rotation_between(&from, &to);

        let rotated = q.transform_vector(&from.normalized());
        assert_abs_diff_eq!(rotated, to.normalized(), epsilon = 1e-5);
    }

    #[test]
    fn rotation_between_opposite_directions_is_half_turn() {
        let from = Vector3::new(0.0, 2.0, 0.0);
        let to = Vector3::new(0.0, -1.0, 0.0);
        let q = UnitQuaternion::rotation_between(&from, &to);

        assert_abs_diff_eq!(q.angle(), PI, epsilon = 1e-5);
        let rotated = q.transform_vector(&Vector3::unit_y());
        assert_abs_diff_eq!(rotated, -Vector3::unit_y(), epsilon = 1e-5);
    }

    #[test]
    fn rotation_between_zero_vector_is_identity() {
        let q = UnitQuaternion::rotation_between(&Vector3::zeros(), &Vector3::unit_x());
        assert_eq!(q, UnitQuaternion::identity());
    }

    #[test]
    fn extracting_rotation_from_rotation_matrix_works() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::new(1.0, -2.0, 0.5), Degrees(70.0));
        let extracted = UnitQuaternion::from_matrix(&q.to_matrix(), false);
        assert_same_rotation(&q, &extracted);
    }

    #[test]
    fn extracting_rotation_with_normalized_axes_removes_scaling() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::new(0.0, 1.0, 1.0), Degrees(-40.0));
        let matrix = Matrix4::from_translation_rotation_scale(
            &Vector3::new(1.0, 2.0, 3.0),
            &q,
            &Vector3::new(2.0, 0.5, 3.0),
        );
        let extracted = UnitQuaternion::from_matrix(&matrix, true);
        assert_same_rotation(&q, &extracted);
    }

    #[test]
    fn slerp_halfway_halves_the_angle() {
        let a = UnitQuaternion::identity();
        let b = UnitQuaternion::from_axis_angle(&Vector3::unit_z(), Radians(PI / 2.0));
        let half = a.slerp(&b, 0.5);
        assert_abs_diff_eq!(half.angle(), PI / 4.0, epsilon = EPSILON);
    }

    #[test]
    fn powf_scales_the_angle() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::unit_x(), Radians(0.8));
        assert_abs_diff_eq!(q.powf(0.25).angle(), 0.2, epsilon = EPSILON);
    }

    #[test]
    fn exponential_of_logarithm_gives_back_rotation() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::new(3.0, 1.0, -1.0), Degrees(123.0));
        let restored = UnitQuaternion::normalized_from(q.ln().exp());
        assert_abs_diff_eq!(restored, q, epsilon = 1e-5);
    }

    #[test]
    fn logarithm_of_rotation_is_pure_with_half_angle_length() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::unit_y(), Radians(1.2));
        let log = q.ln();
        assert_abs_diff_eq!(log.real(), 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(log.imag(), Vector3::new(0.0, 0.6, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn negated_rotation_rotates_identically() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::unit_x(), Radians(PI / 4.0));
        let v = Vector3::new(0.0, 1.0, 0.0);
        assert_abs_diff_eq!(
            q.transform_vector(&v),
            q.negated().transform_vector(&v),
            epsilon = EPSILON
        );
    }

    #[test]
    fn canonical_form_is_shared_by_both_signs() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::unit_y(), Degrees(250.0));
        assert!(q.canonical().w() >= 0.0);
        assert_eq!(q.canonical(), q.negated().canonical());

        let down = Vector3::new(0.0, -1.0, 0.0);
        let half_turn = UnitQuaternion::normalized_from(Quaternion::from_parts(0.0, down));
        assert!(half_turn.canonical().y() > 0.0);
        assert_eq!(half_turn.canonical(), half_turn.negated().canonical());
    }

    #[test]
    fn inverse_undoes_rotation() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::new(2.0, 0.0, 1.0), Degrees(33.0));
        assert_abs_diff_eq!(q * q.inverse(), UnitQuaternion::identity(), epsilon = EPSILON);
    }

    #[test]
    fn multiplication_composes_rotations() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::unit_z(), Radians(PI / 4.0));
        let composed = &q * &q;
        let expected = UnitQuaternion::from_axis_angle(&Vector3::unit_z(), Radians(PI / 2.0));
        assert_abs_diff_eq!(composed, expected, epsilon = EPSILON);
    }
}
