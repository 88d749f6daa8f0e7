//! Euler angle rotation parameterization.
//!
//! Angles `(x, y, z)` are radians about the fixed X, Y and Z axes, applied in
//! that order (extrinsic XYZ), giving
//!
//! R = Rz(z) * Ry(y) * Rx(x)
//!
//! Decomposition returns `x, z ∈ [-π, π]` and `y ∈ [-π/2, π/2]`.
//!
//! # Gimbal lock
//! When `|y| = π/2` the X and Z axes coincide and only `z - x` (for `y = π/2`)
//! or `z + x` (for `y = -π/2`) is determined. Decomposition then pins `x = 0`
//! and puts the whole remaining rotation into `z`.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::spatial::{Matrix3, Vector3};

/// `cos(y)` at or below this value is treated as gimbal lock.
///
/// Inside the tolerance `y` snaps to exactly `±π/2`, so the angles rebuild a
/// matrix that may differ from the decomposed one by up to about the
/// tolerance per element. A matrix at `y = π/2 - 1e-10` comes back about
/// `1e-10` off.
pub const DEFAULT_GIMBAL_LOCK_TOLERANCE: f64 = 1e-9;

/// Rotation angles about X, Y and Z in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EulerAngles {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zeros() -> Self {
        Self::default()
    }

    pub fn from_vector(v: &Vector3) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    pub fn to_vector(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Build the rotation matrix `Rz * Ry * Rx`.
    pub fn to_rotation_matrix(&self) -> Matrix3 {
        let (sx, cx) = self.x.sin_cos();
        let (sy, cy) = self.y.sin_cos();
        let (sz, cz) = self.z.sin_cos();

        #[rustfmt::skip]
        let rx = Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, cx, -sx,
            0.0, sx, cx,
        );
        #[rustfmt::skip]
        let ry = Matrix3::new(
            cy, 0.0, sy,
            0.0, 1.0, 0.0,
            -sy, 0.0, cy,
        );
        #[rustfmt::skip]
        let rz = Matrix3::new(
            cz, -sz, 0.0,
            sz, cz, 0.0,
            0.0, 0.0, 1.0,
        );

        rz * ry * rx
    }

    /// Decompose a rotation matrix using the default gimbal lock tolerance.
    pub fn from_rotation_matrix(m: &Matrix3) -> Self {
        Self::from_rotation_matrix_with_tolerance(m, DEFAULT_GIMBAL_LOCK_TOLERANCE)
    }

    /// Decompose a rotation matrix into angles such that
    /// `angles.to_rotation_matrix() == m` for any proper rotation `m`.
    pub fn from_rotation_matrix_with_tolerance(m: &Matrix3, tolerance: f64) -> Self {
        // m[(2, 0)] = -sin(y), and cos(y) >= 0 on the canonical branch
        let cos_y = m[(0, 0)].hypot(m[(1, 0)]);

        if cos_y > tolerance {
            Self::new(
                m[(2, 1)].atan2(m[(2, 2)]),
                (-m[(2, 0)]).atan2(cos_y),
                m[(1, 0)].atan2(m[(0, 0)]),
            )
        } else {
            let sign = if -m[(2, 0)] >= 0.0 { 1.0 } else { -1.0 };
            // x = 0 leaves m[(1, 1)] = cos(z), m[(1, 2)] = sign * sin(z)
            Self::new(0.0, sign * FRAC_PI_2, (sign * m[(1, 2)]).atan2(m[(1, 1)]))
        }
    }

    /// Whether `m` sits at the gimbal lock singularity of this convention.
    pub fn is_gimbal_locked(m: &Matrix3, tolerance: f64) -> bool {
        m[(0, 0)].hypot(m[(1, 0)]) <= tolerance
    }
}

impl From<Vector3> for EulerAngles {
    fn from(v: Vector3) -> Self {
        Self::from_vector(&v)
    }
}

impl From<EulerAngles> for Vector3 {
    fn from(angles: EulerAngles) -> Self {
        angles.to_vector()
    }
}
