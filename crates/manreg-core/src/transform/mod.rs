//! Transform types and operations.
//!
//! This module provides the transforms involved in manual rigid registration:
//! the general affine form a layer stores, and the Euler-angle rigid form the
//! user edits.

pub mod trait_;
pub mod affine;
pub mod euler;
pub mod rigid;
pub mod versor;

pub use trait_::Transform;
pub use affine::AffineTransform3;
pub use euler::{EulerAngles, DEFAULT_GIMBAL_LOCK_TOLERANCE};
pub use rigid::{CenteredRigidTransform, RIGIDITY_TOLERANCE};
pub use versor::axis_angle_rotation;
