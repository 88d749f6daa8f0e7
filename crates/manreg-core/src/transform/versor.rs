//! Rotation about an arbitrary axis.
//!
//! Built through a versor (unit quaternion), which is well defined for every
//! axis direction, unlike composing Euler angles.

use nalgebra::{Unit, UnitQuaternion};

use crate::spatial::{Matrix3, Vector3};

/// Rotation matrix for a right-handed rotation of `angle` radians about `axis`.
///
/// The axis is normalized internally. Returns `None` for a zero-length or
/// non-finite axis, or a non-finite angle.
pub fn axis_angle_rotation(axis: &Vector3, angle: f64) -> Option<Matrix3> {
    if !angle.is_finite() || !axis.iter().all(|c| c.is_finite()) {
        return None;
    }
    let axis = Unit::try_new(*axis, f64::EPSILON)?;
    let versor = UnitQuaternion::from_axis_angle(&axis, angle);
    Some(versor.to_rotation_matrix().into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_quarter_turn_about_z() {
        let r = axis_angle_rotation(&Vector3::new(0.0, 0.0, 2.0), FRAC_PI_2).unwrap();
        let v = r * Vector3::new(1.0, 0.0, 0.0);
        assert!((v - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_axis_is_fixed_by_rotation() {
        let axis = Vector3::new(1.0, -2.0, 0.5);
        let r = axis_angle_rotation(&axis, 1.3).unwrap();
        assert!((r * axis - axis).norm() < 1e-12);
    }

    #[test]
    fn test_opposite_angles_cancel() {
        let axis = Vector3::new(0.3, 0.4, -1.0);
        let forward = axis_angle_rotation(&axis, 0.9).unwrap();
        let back = axis_angle_rotation(&axis, -0.9).unwrap();
        assert!((back * forward - Matrix3::identity()).amax() < 1e-12);
    }

    #[test]
    fn test_zero_axis_is_rejected() {
        assert!(axis_angle_rotation(&Vector3::zeros(), 1.0).is_none());
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        assert!(axis_angle_rotation(&Vector3::new(f64::NAN, 0.0, 1.0), 1.0).is_none());
        assert!(axis_angle_rotation(&Vector3::z(), f64::INFINITY).is_none());
    }
}
