//! Projection, view and placement matrices.
//!
//! Projections follow the OpenGL conventions: the camera looks down the
//! negative z-axis and the view volume maps to the cube `[-1, 1]^3`.

use super::{Matrix4, index::*};
use crate::{angle::Angle, vector::Vector3};

impl Matrix4 {
    /// Sets this matrix to a perspective projection.
    ///
    /// # Note
    /// `vertical_field_of_view` is the full opening angle along y, and
    /// `aspect_ratio` is the ratio of width to height of the view plane.
    pub fn set_to_perspective<A: Angle>(
        &mut self,
        near: f32,
        far: f32,
        vertical_field_of_view: A,
        aspect_ratio: f32,
    ) -> &mut Self {
        let focal_length = 1.0 / (0.5 * vertical_field_of_view.radians()).tan();
        self.set_perspective_elements(
            focal_length / aspect_ratio,
            focal_length,
            0.0,
            0.0,
            near,
            far,
        )
    }

    /// Sets this matrix to a perspective projection of the view frustum with
    /// the given clipping planes. `left`, `right`, `bottom` and `top` bound
    /// the near plane.
    pub fn set_to_frustum(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        let width = right - left;
        let height = top - bottom;
        self.set_perspective_elements(
            2.0 * near / width,
            2.0 * near / height,
            (right + left) / width,
            (top + bottom) / height,
            near,
            far,
        )
    }

    fn set_perspective_elements(
        &mut self,
        x_scale: f32,
        y_scale: f32,
        x_offset: f32,
        y_offset: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        let depth = near - far;

        self.values = [0.0; 16];
        self.values[M00] = x_scale;
        self.values[M11] = y_scale;
        self.values[M02] = x_offset;
        self.values[M12] = y_offset;
        self.values[M22] = (far + near) / depth;
        self.values[M23] = 2.0 * far * near / depth;
        self.values[M32] = -1.0;
        self
    }

    /// Sets this matrix to an orthographic projection of the box with the
    /// given clipping planes.
    ///
    /// The x and y ranges map to `[-1, 1]`, and depths along z map linearly
    /// so that `near` goes to -1 and `far` to 1.
    pub fn set_to_orthographic(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;

        self.set_identity();
        self.values[M00] = 2.0 / width;
        self.values[M11] = 2.0 / height;
        self.values[M22] = 2.0 / depth;
        self.values[M03] = -(right + left) / width;
        self.values[M13] = -(top + bottom) / height;
        self.values[M23] = -(far + near) / depth;
        self
    }

    /// Sets this matrix to an orthographic projection of the rectangle with
    /// its lower-left corner at (`x`, `y`) and depths from 0 to 1.
    pub fn set_to_orthographic_2d(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.set_to_orthographic_2d_with_depth(x, y, width, height, 0.0, 1.0)
    }

    pub fn set_to_orthographic_2d_with_depth(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        self.set_to_orthographic(x, x + width, y, y + height, near, far)
    }

    /// Sets this matrix to the rotation taking world space to the space of a
    /// camera looking along `direction`, with `up` giving the rough upward
    /// direction. The result has no translation.
    pub fn set_to_look_at(&mut self, direction: &Vector3, up: &Vector3) -> &mut Self {
        let forward = direction.normalized();
        let right = direction.cross(up).normalized();
        let true_up = right.cross(&forward).normalized();

        // The camera axes become the rows, so this is the inverse of the
        // camera's orientation
        self.set_identity();
        for (row, axis) in [right, true_up, -forward].iter().enumerate() {
            self.values[offset(row, 0)] = axis.x();
            self.values[offset(row, 1)] = axis.y();
            self.values[offset(row, 2)] = axis.z();
        }
        self
    }

    /// Sets this matrix to the view transform of a camera at `position`
    /// looking at `target`.
    pub fn set_to_look_at_from(
        &mut self,
        position: &Vector3,
        target: &Vector3,
        up: &Vector3,
    ) -> &mut Self {
        self.set_to_look_at(&(target - position), up)
            .translate(&(-position))
    }

    /// Sets this matrix to the placement of an object at `position` facing
    /// `forward`. The object's local negative z-axis points forward and its
    /// local y-axis points as close to `up` as possible.
    pub fn set_to_world(
        &mut self,
        position: &Vector3,
        forward: &Vector3,
        up: &Vector3,
    ) -> &mut Self {
        let forward = forward.normalized();
        let right = forward.cross(up).normalized();
        let true_up = right.cross(&forward).normalized();
        self.set_from_axes(&right, &true_up, &(-forward), position)
    }
}
