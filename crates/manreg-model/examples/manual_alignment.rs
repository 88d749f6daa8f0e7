//! Manual Alignment Example
//!
//! Walks through a manual rigid registration session against an in-memory
//! layer stack:
//!
//! 1. Load a reference geometry and a moving layer
//! 2. Select the moving layer and read its parameters
//! 3. Edit Euler angles and translation
//! 4. Move the rotation center to the cursor
//! 5. Rotate interactively and reset
//!
//! Usage:
//!   RUST_LOG=debug cargo run --example manual_alignment

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use manreg_core::image::ImageGeometry;
use manreg_core::spatial::{Direction3, Point3, Spacing3, Vector3, VoxelIndex};
use manreg_core::transform::AffineTransform3;
use manreg_model::{LayerStack, LoggingListener, ModelConfig, TransformParameterModel};

fn main() -> anyhow::Result<()> {
    println!("Manual Alignment Example");
    println!("========================\n");

    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    // =======================================================================
    // Step 1: Layers
    // =======================================================================
    println!("Step 1: Loading layers...");

    let reference = ImageGeometry::new(
        [256, 256, 120],
        Point3::new(-128.0, -128.0, -90.0),
        Spacing3::new(1.0, 1.0, 1.5),
        Direction3::identity(),
    )?;
    let mut stack = LayerStack::new();
    stack.set_reference("T1 reference", reference);
    let moving = stack.add_layer(
        "T2 moving",
        AffineTransform3::from_translation(Vector3::new(4.0, -2.5, 1.0)),
    );
    let stack = Rc::new(RefCell::new(stack));
    let cursor = Rc::new(Cell::new(VoxelIndex::new([128, 128, 60])));

    let config = ModelConfig::new().with_translation_range_scale(0.5);
    let mut model = TransformParameterModel::with_config(Rc::clone(&stack), Rc::clone(&cursor), config)?;
    model.subscribe(Rc::new(LoggingListener));

    println!("  Reference extent: {:?}", reference.extent().as_slice());
    println!("  Rotation center:  {:?}\n", model.rotation_center().0);

    // =======================================================================
    // Step 2: Selection
    // =======================================================================
    println!("Step 2: Selecting the moving layer...");

    model.set_moving_layer(Some(moving))?;
    if let Some(selection) = model.moving_layer_value_and_range() {
        for info in selection.range.iter() {
            println!("  candidate {} '{}'", info.id, info.label);
        }
    }
    print_parameters(&mut model);

    // =======================================================================
    // Step 3: Edits
    // =======================================================================
    println!("\nStep 3: Editing parameters...");

    model.set_euler_angles(Vector3::new(0.0, 0.0, 10f64.to_radians()))?;
    model.set_translation(Vector3::new(2.0, 0.0, 0.0))?;
    print_parameters(&mut model);

    // =======================================================================
    // Step 4: Rotation center
    // =======================================================================
    println!("\nStep 4: Moving the rotation center to the cursor...");

    cursor.set(VoxelIndex::new([100, 140, 50]));
    model.set_center_of_rotation_to_cursor()?;
    print_parameters(&mut model);

    // =======================================================================
    // Step 5: Interactive rotation and reset
    // =======================================================================
    println!("\nStep 5: Rotating about the view normal, then resetting...");

    model.set_interactive_tool(true);
    model.apply_rotation(&Vector3::z(), 5f64.to_radians())?;
    print_parameters(&mut model);

    model.reset_transform_to_identity()?;
    model.set_interactive_tool(false);
    print_parameters(&mut model);

    if let Some(layer) = stack.borrow().layer(moving) {
        println!("\nFinal layer transform (stamp {}):", layer.timestamp());
        println!("  matrix: {}", layer.transform().matrix());
        println!("  offset: {:?}", layer.transform().offset().as_slice());
    }

    Ok(())
}

fn print_parameters(model: &mut TransformParameterModel<LayerStack, Cell<VoxelIndex<3>>>) {
    let (Some(angles), Some(translation)) = (
        model.euler_angles_value_and_range(),
        model.translation_value_and_range(),
    ) else {
        println!("  (no moving layer)");
        return;
    };
    let degrees = angles.value.map(f64::to_degrees);
    println!(
        "  angles (deg): [{:.2}, {:.2}, {:.2}]",
        degrees.x, degrees.y, degrees.z
    );
    println!(
        "  translation:  [{:.2}, {:.2}, {:.2}] within +-{:?}",
        translation.value.x,
        translation.value.y,
        translation.value.z,
        translation.range.maximum.as_slice()
    );
}
