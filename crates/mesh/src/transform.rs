//! Recorded sequences of affine transforms.

use meshing_kernel::geometry::Transform;
use tracing::debug;

use crate::error::{check_finite, MeshError};
use crate::vectors::VectorArray;

/// Transforms accumulated in call order.
///
/// `apply_to` multiplies the array by each matrix in turn, which gives the
/// same result as calling the matching [`Mesh`](crate::Mesh) methods in the
/// same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformStack {
    steps: Vec<Transform>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, tx: f64, ty: f64, tz: f64) -> Result<&mut Self, MeshError> {
        check_finite("tx", tx)?;
        check_finite("ty", ty)?;
        check_finite("tz", tz)?;
        Ok(self.push(Transform::translation(tx, ty, tz)))
    }

    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) -> Result<&mut Self, MeshError> {
        check_finite("sx", sx)?;
        check_finite("sy", sy)?;
        check_finite("sz", sz)?;
        Ok(self.push(Transform::scaling(sx, sy, sz)))
    }

    /// Rotation about X by `degrees`.
    pub fn rotate_x(&mut self, degrees: f64) -> Result<&mut Self, MeshError> {
        check_finite("angle", degrees)?;
        Ok(self.push(Transform::rotation_x(degrees.to_radians())))
    }

    pub fn rotate_y(&mut self, degrees: f64) -> Result<&mut Self, MeshError> {
        check_finite("angle", degrees)?;
        Ok(self.push(Transform::rotation_y(degrees.to_radians())))
    }

    pub fn rotate_z(&mut self, degrees: f64) -> Result<&mut Self, MeshError> {
        check_finite("angle", degrees)?;
        Ok(self.push(Transform::rotation_z(degrees.to_radians())))
    }

    pub fn push(&mut self, transform: Transform) -> &mut Self {
        self.steps.push(transform);
        self
    }

    pub fn steps(&self) -> &[Transform] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Single matrix equivalent to the whole stack.
    pub fn combined(&self) -> Transform {
        self.steps
            .iter()
            .fold(Transform::identity(), |acc, t| acc.then(t))
    }

    pub fn apply_to(&self, vectors: &mut VectorArray) {
        for step in &self.steps {
            vectors.apply(step);
        }
        debug!(steps = self.steps.len(), faces = vectors.len(), "transform stack applied");
    }
}
