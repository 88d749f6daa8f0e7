//! Image grid geometry.
//!
//! The parameter model never touches pixel data; it only needs to know how the
//! reference image's voxel grid sits in physical space.

pub mod geometry;

pub use geometry::ImageGeometry;

pub type ImageGeometry3 = ImageGeometry<3>;
