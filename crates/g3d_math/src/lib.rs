//! Column-major 4x4 transform matrices for positioning, rotating and scaling
//! objects in 3D space and for building camera and projection matrices.

#[macro_use]
mod macros;

pub mod affine;
pub mod angle;
pub mod consts;
pub mod error;
pub mod matrix;
pub mod quaternion;
pub mod vector;

pub use error::{MatrixError, Result};
pub use matrix::Matrix4;
