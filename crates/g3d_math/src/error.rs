//! Errors raised by matrix operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatrixError>;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MatrixError {
    /// The determinant is exactly zero, so no inverse exists.
    #[error("non-invertible matrix")]
    NonInvertible,

    #[error("expected at least {required} values, got {len}")]
    BufferTooShort { len: usize, required: usize },

    #[error("cannot average an empty set of transforms")]
    NoTransforms,

    #[error("got {weights} weights for {transforms} transforms")]
    WeightCountMismatch { transforms: usize, weights: usize },
}
