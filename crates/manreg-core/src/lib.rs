//! Spatial types, image geometry and rigid transform math used by the
//! manual registration parameter model.

pub mod error;
pub mod image;
pub mod spatial;
pub mod transform;

pub use error::{GeometryError, Result};
pub use image::ImageGeometry;
pub use spatial::{Direction3, Matrix3, Point3, Spacing3, Vector3, VoxelIndex};
pub use transform::{AffineTransform3, CenteredRigidTransform, EulerAngles, Transform};
