//! Affine transform implementation.
//!
//! This module provides the 3D affine transform attached to an image layer.

use serde::{Deserialize, Serialize};

use super::trait_::Transform;
use crate::spatial::{is_proper_rotation, Matrix3, Point3, Vector3};

/// Affine Transform (Linear transformation + Offset).
///
/// T(x) = A x + b
///
/// where:
/// * A is the 3×3 linear part (rotation, possibly with scale or shear)
/// * b is the offset, in physical units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform3 {
    matrix: Matrix3,
    offset: Vector3,
}

impl AffineTransform3 {
    /// Create a new affine transform from its linear part and offset.
    pub fn new(matrix: Matrix3, offset: Vector3) -> Self {
        Self { matrix, offset }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vector3::zeros())
    }

    /// A pure translation.
    pub fn from_translation(offset: Vector3) -> Self {
        Self::new(Matrix3::identity(), offset)
    }

    /// Get the linear part.
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// Get the offset.
    pub fn offset(&self) -> &Vector3 {
        &self.offset
    }

    /// Whether the linear part is a proper rotation within `tolerance`.
    pub fn is_rigid(&self, tolerance: f64) -> bool {
        is_proper_rotation(&self.matrix, tolerance)
    }

    /// Largest absolute element-wise difference to another transform.
    pub fn max_abs_difference(&self, other: &Self) -> f64 {
        let m = (self.matrix - other.matrix).amax();
        let o = (self.offset - other.offset).amax();
        m.max(o)
    }
}

impl Default for AffineTransform3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform<3> for AffineTransform3 {
    fn transform_point(&self, point: &Point3) -> Point3 {
        Point3::from(self.matrix * point.coords + self.offset)
    }
}
