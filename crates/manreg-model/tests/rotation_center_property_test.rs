//! Property tests: the rotation center only changes how a transform is
//! presented, and edits round-trip through the layer.

mod common;

use common::Fixture;
use manreg_core::spatial::{Point3, Vector3};
use manreg_core::transform::{AffineTransform3, EulerAngles, Transform};
use proptest::prelude::*;

fn angles() -> impl Strategy<Value = (f64, f64, f64)> {
    // Keep y away from +-pi/2 so the decomposition is unique.
    (-3.0f64..3.0, -1.4f64..1.4, -3.0f64..3.0)
}

fn translation() -> impl Strategy<Value = (f64, f64, f64)> {
    (-50.0f64..50.0, -50.0f64..50.0, -50.0f64..50.0)
}

fn voxel() -> impl Strategy<Value = [u32; 3]> {
    (0u32..100, 0u32..80, 0u32..60).prop_map(|(i, j, k)| [i, j, k])
}

fn layer_transform((x, y, z): (f64, f64, f64), (tx, ty, tz): (f64, f64, f64)) -> AffineTransform3 {
    AffineTransform3::new(
        EulerAngles::new(x, y, z).to_rotation_matrix(),
        Vector3::new(tx, ty, tz),
    )
}

proptest! {
    #[test]
    fn prop_center_change_preserves_layer_transform(
        a in angles(),
        t in translation(),
        cursor in voxel(),
    ) {
        let mut fx = Fixture::new();
        let original = layer_transform(a, t);
        let layer = fx.add_layer("moving", original);
        fx.model.set_moving_layer(Some(layer)).unwrap();
        let angles_before = fx.model.euler_angles_value_and_range().unwrap().value;

        fx.set_cursor(cursor);
        fx.model.set_center_of_rotation_to_cursor().unwrap();

        prop_assert_eq!(fx.layer_transform(layer), original);
        let angles_after = fx.model.euler_angles_value_and_range().unwrap().value;
        prop_assert!((angles_after - angles_before).amax() < 1e-9);

        // The reported translation is the displacement of the new center.
        let c = Point3::new(cursor[0] as f64, cursor[1] as f64, 2.0 * cursor[2] as f64);
        let expected = original.transform_point(&c) - c;
        let reported = fx.model.translation_value_and_range().unwrap().value;
        prop_assert!((reported - expected).amax() < 1e-8);
    }

    #[test]
    fn prop_edits_read_back(
        a in angles(),
        t in translation(),
        cursor in voxel(),
    ) {
        let mut fx = Fixture::new();
        let layer = fx.add_layer("moving", AffineTransform3::identity());
        fx.model.set_moving_layer(Some(layer)).unwrap();
        fx.set_cursor(cursor);
        fx.model.set_center_of_rotation_to_cursor().unwrap();

        let angles = Vector3::new(a.0, a.1, a.2);
        let translation = Vector3::new(t.0, t.1, t.2);
        fx.model.set_euler_angles(angles).unwrap();
        fx.model.set_translation(translation).unwrap();

        let read_angles = fx.model.euler_angles_value_and_range().unwrap().value;
        let read_translation = fx.model.translation_value_and_range().unwrap().value;
        prop_assert!((read_angles - angles).amax() < 1e-9);
        prop_assert!((read_translation - translation).amax() < 1e-8);
    }

    #[test]
    fn prop_apply_rotation_is_reversible(
        a in angles(),
        t in translation(),
        axis in (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0),
        theta in -3.0f64..3.0,
    ) {
        let axis = Vector3::new(axis.0, axis.1, axis.2);
        prop_assume!(axis.norm() > 1e-3);

        let mut fx = Fixture::new();
        let original = layer_transform(a, t);
        let layer = fx.add_layer("moving", original);
        fx.model.set_moving_layer(Some(layer)).unwrap();

        fx.model.apply_rotation(&axis, theta).unwrap();
        fx.model.apply_rotation(&axis, -theta).unwrap();

        prop_assert!(fx.layer_transform(layer).max_abs_difference(&original) < 1e-8);
    }

    #[test]
    fn prop_apply_rotation_fixes_rotation_center(
        a in angles(),
        axis in (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0),
        theta in -3.0f64..3.0,
    ) {
        let axis = Vector3::new(axis.0, axis.1, axis.2);
        prop_assume!(axis.norm() > 1e-3);

        let mut fx = Fixture::new();
        let layer = fx.add_layer("moving", layer_transform(a, (0.0, 0.0, 0.0)));
        fx.model.set_moving_layer(Some(layer)).unwrap();
        let center = Point3::new(50.0, 40.0, 60.0);
        let before = fx.layer_transform(layer).transform_point(&center);

        fx.model.apply_rotation(&axis, theta).unwrap();

        let after = fx.layer_transform(layer).transform_point(&center);
        prop_assert!((after - before).amax() < 1e-8);
    }
}
