//! Rigid transform implementation.
//!
//! This module provides a rigid transform (Euler rotation + translation) about
//! a fixed center, and its conversion to and from the affine form.

use serde::{Deserialize, Serialize};

use super::affine::AffineTransform3;
use super::euler::EulerAngles;
use super::trait_::Transform;
use crate::spatial::{nearest_rotation, Matrix3, Point3, Vector3};

/// Tolerance for treating an affine linear part as a rotation.
pub const RIGIDITY_TOLERANCE: f64 = 1e-6;

/// Rigid Transform (Rotation + Translation) about a center of rotation.
///
/// T(x) = R(x - c) + c + t
///
/// with R built from [`EulerAngles`]. The equivalent affine transform has
/// linear part `R` and offset `t + c - R c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenteredRigidTransform {
    angles: EulerAngles,
    translation: Vector3,
    center: Point3,
}

impl CenteredRigidTransform {
    /// Create a new rigid transform.
    ///
    /// # Arguments
    /// * `angles` - Rotation about X, Y and Z in radians
    /// * `translation` - Translation applied after rotating about `center`
    /// * `center` - Fixed center of rotation in physical space
    pub fn new(angles: EulerAngles, translation: Vector3, center: Point3) -> Self {
        Self { angles, translation, center }
    }

    /// Decompose an affine transform about a given center.
    ///
    /// A linear part that is not a proper rotation is first projected onto
    /// the nearest rotation; any scale or shear is lost.
    pub fn from_affine(affine: &AffineTransform3, center: Point3, gimbal_tolerance: f64) -> Self {
        let rotation = if affine.is_rigid(RIGIDITY_TOLERANCE) {
            *affine.matrix()
        } else {
            nearest_rotation(affine.matrix())
        };
        let angles = EulerAngles::from_rotation_matrix_with_tolerance(&rotation, gimbal_tolerance);
        // offset = t + c - R c
        let translation = affine.offset() - center.coords + rotation * center.coords;
        Self::new(angles, translation, center)
    }

    /// Equivalent affine transform `x -> R x + (t + c - R c)`.
    pub fn to_affine(&self) -> AffineTransform3 {
        let rotation = self.rotation_matrix();
        let offset = self.translation + self.center.coords - rotation * self.center.coords;
        AffineTransform3::new(rotation, offset)
    }

    /// Build the rotation matrix from the Euler angles.
    pub fn rotation_matrix(&self) -> Matrix3 {
        self.angles.to_rotation_matrix()
    }

    /// Get the rotation angles.
    pub fn angles(&self) -> EulerAngles {
        self.angles
    }

    /// Get the translation vector.
    pub fn translation(&self) -> Vector3 {
        self.translation
    }

    /// Get the center of rotation.
    pub fn center(&self) -> Point3 {
        self.center
    }
}

impl Transform<3> for CenteredRigidTransform {
    fn transform_point(&self, point: &Point3) -> Point3 {
        let rotated = self.rotation_matrix() * (point - self.center);
        self.center + rotated + self.translation
    }
}
