//! Spatial types for points, vectors, spacing, orientation and voxel indices.
//!
//! Continuous quantities are plain nalgebra types; only the voxel index gets a
//! dedicated newtype since nalgebra has no unsigned integer point.

pub mod direction;
pub mod index;

use nalgebra::{Point as NaPoint, SMatrix, SVector};

pub use direction::{is_orthogonal, is_proper_rotation, nearest_rotation};
pub use index::VoxelIndex;

pub type Point<const D: usize> = NaPoint<f64, D>;
pub type Vector<const D: usize> = SVector<f64, D>;
pub type Spacing<const D: usize> = SVector<f64, D>;
pub type Direction<const D: usize> = SMatrix<f64, D, D>;

// Common aliases
pub type Point3 = Point<3>;
pub type Vector3 = Vector<3>;
pub type Spacing3 = Spacing<3>;
pub type Direction3 = Direction<3>;
pub type Matrix3 = SMatrix<f64, 3, 3>;
