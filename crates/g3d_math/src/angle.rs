//! Degree and radian angle units.
//!
//! Every angle-taking matrix operation is generic over [`Angle`], so callers
//! pick the unit by wrapping the value in [`Degrees`] or [`Radians`].

use crate::consts::{FRAC_1_PI, PI};
use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use std::{
    cmp::Ordering,
    ops::{Add, Div, Mul, Neg, Sub},
};

/// Represents an angle.
pub trait Angle: Copy {
    /// Creates a zero angle.
    fn zero() -> Self;

    /// Returns the angle as degrees.
    fn as_degrees(self) -> Degrees;

    /// Returns the angle as radians.
    fn as_radians(self) -> Radians;

    /// Returns the value of the angle in degrees.
    fn degrees(self) -> f32;

    /// Returns the value of the angle in radians.
    fn radians(self) -> f32;

    /// Whether the angle is exactly zero.
    fn is_zero(self) -> bool {
        self.radians() == 0.0
    }
}

/// An angle in degrees.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Zeroable, Pod)]
pub struct Degrees(pub f32);

/// An angle in radians.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Zeroable, Pod)]
pub struct Radians(pub f32);

impl Angle for Degrees {
    fn zero() -> Self {
        Self(0.0)
    }

    fn as_degrees(self) -> Degrees {
        self
    }

    fn as_radians(self) -> Radians {
        Radians(degrees_to_radians(self.0))
    }

    fn degrees(self) -> f32 {
        self.0
    }

    fn radians(self) -> f32 {
        degrees_to_radians(self.0)
    }

    fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl Angle for Radians {
    fn zero() -> Self {
        Self(0.0)
    }

    fn as_degrees(self) -> Degrees {
        Degrees(radians_to_degrees(self.0))
    }

    fn as_radians(self) -> Radians {
        self
    }

    fn degrees(self) -> f32 {
        radians_to_degrees(self.0)
    }

    fn radians(self) -> f32 {
        self.0
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        rad.as_degrees()
    }
}

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        deg.as_radians()
    }
}

/// Arithmetic on angles of one unit. The right operand may be in either unit
/// and is converted to the unit of the left operand.
macro_rules! impl_angle_arithmetic {
    ($t:ident, $other:ident, $value:ident) => {
        impl Add for $t {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Add<$other> for $t {
            type Output = Self;
            fn add(self, rhs: $other) -> Self {
                Self(self.0 + rhs.$value())
            }
        }

        impl Sub for $t {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Sub<$other> for $t {
            type Output = Self;
            fn sub(self, rhs: $other) -> Self {
                Self(self.0 - rhs.$value())
            }
        }

        impl Mul<f32> for $t {
            type Output = Self;
            fn mul(self, rhs: f32) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f32> for $t {
            type Output = Self;
            fn div(self, rhs: f32) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl Neg for $t {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl PartialEq<$other> for $t {
            fn eq(&self, rhs: &$other) -> bool {
                self.0 == rhs.$value()
            }
        }

        impl PartialOrd<$other> for $t {
            fn partial_cmp(&self, rhs: &$other) -> Option<Ordering> {
                self.0.partial_cmp(&rhs.$value())
            }
        }

        impl AbsDiffEq for $t {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                f32::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                self.0.abs_diff_eq(&other.0, epsilon)
            }
        }

        impl RelativeEq for $t {
            fn default_max_relative() -> f32 {
                f32::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                self.0.relative_eq(&other.0, epsilon, max_relative)
            }
        }
    };
}

impl_angle_arithmetic!(Degrees, Radians, degrees);
impl_angle_arithmetic!(Radians, Degrees, radians);

pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * (180.0 * FRAC_1_PI)
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn converting_degrees_to_radians_works_for_quarter_turns() {
        assert_abs_diff_eq!(Degrees(0.0).radians(), 0.0);
        assert_abs_diff_eq!(Degrees(90.0).radians(), PI / 2.0);
        assert_abs_diff_eq!(Degrees(180.0).radians(), PI);
        assert_abs_diff_eq!(Degrees(-270.0).radians(), -3.0 * PI / 2.0);
        assert_abs_diff_eq!(Degrees(360.0).radians(), 2.0 * PI);
    }

    #[test]
    fn converting_radians_to_degrees_works_for_quarter_turns() {
        assert_abs_diff_eq!(Radians(0.0).degrees(), 0.0);
        assert_abs_diff_eq!(Radians(PI / 2.0).degrees(), 90.0);
        assert_abs_diff_eq!(Radians(-PI).degrees(), -180.0);
        assert_abs_diff_eq!(Radians(2.0 * PI).degrees(), 360.0, epsilon = 1e-4);
    }

    #[test]
    fn angle_arithmetic_within_one_unit_works() {
        assert_abs_diff_eq!(Degrees(42.0) + Degrees(30.0), Degrees(72.0));
        assert_abs_diff_eq!(Degrees(42.0) - Degrees(30.0), Degrees(12.0));
        assert_abs_diff_eq!(Radians(42.0) * 2.5, Radians(105.0));
        assert_abs_diff_eq!(Radians(42.0) / 4.0, Radians(10.5));
        assert_abs_diff_eq!(-Degrees(15.0), Degrees(-15.0));
    }

    #[test]
    fn mixed_unit_arithmetic_converts_right_operand() {
        assert_abs_diff_eq!(Degrees(45.0) + Radians(PI / 2.0), Degrees(135.0), epsilon = 1e-4);
        assert_abs_diff_eq!(Radians(PI / 2.0) - Degrees(45.0), Radians(PI / 4.0));

        assert_eq!(Degrees(0.0), Radians(0.0));
        assert!(Degrees(42.0) > Radians(0.0));
        assert!(Radians(PI) < Degrees(360.0));
    }

    #[test]
    fn zero_check_is_exact() {
        assert!(Degrees(0.0).is_zero());
        assert!(Radians(-0.0).is_zero());
        assert!(!Degrees(1e-30).is_zero());
    }
}
