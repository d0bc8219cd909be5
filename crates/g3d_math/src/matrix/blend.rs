//! Interpolation and weighted averaging of transforms.

use super::Matrix4;
use crate::{
    error::{MatrixError, Result},
    quaternion::{Quaternion, UnitQuaternion},
    vector::Vector3,
};

/// A transform pulled apart into its components.
#[derive(Clone, Copy, Debug)]
struct Decomposed {
    translation: Vector3,
    rotation: UnitQuaternion,
    scale: Vector3,
}

impl Decomposed {
    fn of(matrix: &Matrix4) -> Self {
        Self {
            translation: matrix.translation(),
            rotation: matrix.rotation_with_normalized_axes(),
            scale: matrix.scale(),
        }
    }
}

impl Matrix4 {
    /// Linearly interpolates each of the 16 elements towards those of
    /// `other`, with `alpha` 0 giving this matrix and 1 giving `other`.
    ///
    /// No structure is preserved, so interpolating between rotations only
    /// approximates a rotation when they are close.
    pub fn lerp(&mut self, other: &Self, alpha: f32) -> &mut Self {
        for (value, other_value) in self.values.iter_mut().zip(other.values) {
            *value = *value * (1.0 - alpha) + other_value * alpha;
        }
        self
    }

    /// Blends this transform with `other`, giving this one the weight
    /// `weight` and `other` the weight `1 - weight`. Translation and scale
    /// are interpolated linearly and rotation spherically.
    pub fn average_with(&mut self, other: &Self, weight: f32) -> &mut Self {
        let this = Decomposed::of(self);
        let other = Decomposed::of(other);

        let translation = this.translation * weight + other.translation * (1.0 - weight);
        let scale = this.scale * weight + other.scale * (1.0 - weight);
        let rotation = this.rotation.slerp(&other.rotation, 1.0 - weight);

        self.set_from_translation_rotation_scale(&translation, &rotation, &scale)
    }

    /// Sets this matrix to the equally weighted average of the given
    /// transforms. See [`Self::set_to_weighted_average`].
    ///
    /// # Errors
    /// Returns [`MatrixError::NoTransforms`] if `transforms` is empty.
    pub fn set_to_average(&mut self, transforms: &[Self]) -> Result<&mut Self> {
        if transforms.is_empty() {
            return Err(MatrixError::NoTransforms);
        }
        let weight = 1.0 / transforms.len() as f32;
        let weighted = transforms.iter().map(|transform| (transform, weight));
        Ok(self.set_to_average_of_weighted(weighted))
    }

    /// Sets this matrix to the weighted average of the given transforms.
    ///
    /// Translations and scales are summed with the weights. Rotations are
    /// blended by summing their weighted quaternion logarithms and taking
    /// the exponential, which does not depend on the order of the
    /// transforms. The weights should sum to one; this is not checked.
    ///
    /// # Errors
    /// Returns [`MatrixError::NoTransforms`] if `transforms` is empty and
    /// [`MatrixError::WeightCountMismatch`] if there is not one weight per
    /// transform. The matrix is then left unchanged.
    pub fn set_to_weighted_average(
        &mut self,
        transforms: &[Self],
        weights: &[f32],
    ) -> Result<&mut Self> {
        if transforms.is_empty() {
            return Err(MatrixError::NoTransforms);
        }
        if transforms.len() != weights.len() {
            return Err(MatrixError::WeightCountMismatch {
                transforms: transforms.len(),
                weights: weights.len(),
            });
        }
        let weighted = transforms.iter().zip(weights.iter().copied());
        Ok(self.set_to_average_of_weighted(weighted))
    }

    fn set_to_average_of_weighted<'a>(
        &mut self,
        weighted: impl Iterator<Item = (&'a Self, f32)> + Clone,
    ) -> &mut Self {
        // q and -q are the same rotation but have different logarithms, so
        // all rotations are taken in the hemisphere of a reference picked
        // independently of the input order: the most heavily weighted
        // rotation, ties broken by its canonical components
        let reference_rotation = weighted
            .clone()
            .map(|(transform, weight)| {
                (transform.rotation_with_normalized_axes().canonical(), weight)
            })
            .max_by(|(a, a_weight), (b, b_weight)| {
                a_weight
                    .total_cmp(b_weight)
                    .then_with(|| a.w().total_cmp(&b.w()))
                    .then_with(|| a.x().total_cmp(&b.x()))
                    .then_with(|| a.y().total_cmp(&b.y()))
                    .then_with(|| a.z().total_cmp(&b.z()))
            })
            .map_or_else(UnitQuaternion::identity, |(rotation, _)| rotation);

        let mut translation = Vector3::zeros();
        let mut scale = Vector3::zeros();
        let mut log_rotation = Quaternion::zero();
        let mut count = 0;

        for (transform, weight) in weighted {
            let decomposed = Decomposed::of(transform);
            translation += decomposed.translation * weight;
            scale += decomposed.scale * weight;

            let rotation = if reference_rotation.dot(&decomposed.rotation) < 0.0 {
                decomposed.rotation.negated()
            } else {
                decomposed.rotation
            };
            log_rotation += rotation.ln() * weight;
            count += 1;
        }

        let rotation = UnitQuaternion::normalized_from(log_rotation.exp());

        log::trace!("Averaged {count} transforms into rotation {rotation:?}");

        self.set_from_translation_rotation_scale(&translation, &rotation, &scale)
    }
}
