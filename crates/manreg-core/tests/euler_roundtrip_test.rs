use manreg_core::spatial::{is_proper_rotation, Matrix3, Vector3};
use manreg_core::transform::{axis_angle_rotation, EulerAngles};
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};

// Keep clear of the y = ±90° singularity so angles are recoverable.
const Y_MARGIN: f64 = 1e-3;

fn max_diff(a: &Matrix3, b: &Matrix3) -> f64 {
    (a - b).amax()
}

proptest! {
    #[test]
    fn test_angles_matrix_angles_roundtrip(
        x in -PI + 1e-6..PI,
        y in -FRAC_PI_2 + Y_MARGIN..FRAC_PI_2 - Y_MARGIN,
        z in -PI + 1e-6..PI,
    ) {
        let angles = EulerAngles::new(x, y, z);
        let back = EulerAngles::from_rotation_matrix(&angles.to_rotation_matrix());
        prop_assert!((back.x - x).abs() < 1e-9, "x: {} vs {}", back.x, x);
        prop_assert!((back.y - y).abs() < 1e-9, "y: {} vs {}", back.y, y);
        prop_assert!((back.z - z).abs() < 1e-9, "z: {} vs {}", back.z, z);
    }

    #[test]
    fn test_matrix_angles_matrix_roundtrip(
        ax in -1.0f64..1.0, ay in -1.0f64..1.0, az in -1.0f64..1.0,
        angle in -PI..PI,
    ) {
        let axis = Vector3::new(ax, ay, az);
        prop_assume!(axis.norm() > 1e-3);
        let r = axis_angle_rotation(&axis, angle).unwrap();
        prop_assume!(!EulerAngles::is_gimbal_locked(&r, 1e-6));

        let rebuilt = EulerAngles::from_rotation_matrix(&r).to_rotation_matrix();
        prop_assert!(max_diff(&rebuilt, &r) < 1e-9);
    }

    #[test]
    fn test_rebuilt_matrix_is_proper_rotation(
        x in -10.0f64..10.0, y in -10.0f64..10.0, z in -10.0f64..10.0,
    ) {
        let r = EulerAngles::new(x, y, z).to_rotation_matrix();
        prop_assert!(is_proper_rotation(&r, 1e-9));
    }

    #[test]
    fn test_gimbal_locked_matrices_rebuild_exactly(
        x in -PI..PI, z in -PI..PI, positive in any::<bool>(),
    ) {
        let y = if positive { FRAC_PI_2 } else { -FRAC_PI_2 };
        let r = EulerAngles::new(x, y, z).to_rotation_matrix();
        let angles = EulerAngles::from_rotation_matrix(&r);
        prop_assert_eq!(angles.x, 0.0);
        prop_assert_eq!(angles.y, y);
        prop_assert!(max_diff(&angles.to_rotation_matrix(), &r) < 1e-9);
    }
}
