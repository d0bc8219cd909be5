//! Numeric constants.

pub use std::f32::consts::*;

/// Magnitude below which a matrix element is treated as zero when deciding
/// whether an axis is free of rotation.
pub const ZERO_TOLERANCE: f32 = 1e-6;

/// Returns `true` if `value` is within [`ZERO_TOLERANCE`] of zero.
#[inline]
pub fn is_zero(value: f32) -> bool {
    value.abs() <= ZERO_TOLERANCE
}

/// Returns `true` if `a` and `b` differ by at most [`ZERO_TOLERANCE`].
#[inline]
pub fn is_equal(a: f32, b: f32) -> bool {
    is_zero(a - b)
}
