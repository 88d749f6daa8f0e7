//! Physical placement of an image grid: size, origin, spacing and direction.

use crate::error::{GeometryError, Result};
use crate::spatial::{Direction, Point, Spacing, Vector, VoxelIndex};

/// Geometry of an image grid in physical space.
///
/// # Coordinate Systems
/// * **Index Space**: voxel indices, continuous or integer
/// * **Physical Space**: world coordinates (usually mm)
///
/// The mapping is `point = origin + Direction * (index ⊙ spacing)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGeometry<const D: usize> {
    size: [usize; D],
    origin: Point<D>,
    spacing: Spacing<D>,
    direction: Direction<D>,
}

impl<const D: usize> ImageGeometry<D> {
    /// Create a geometry, validating spacing, size and direction.
    ///
    /// # Errors
    /// Returns an error if any axis is empty, any spacing component is zero or
    /// not finite, or the direction matrix is singular.
    pub fn new(
        size: [usize; D],
        origin: Point<D>,
        spacing: Spacing<D>,
        direction: Direction<D>,
    ) -> Result<Self> {
        if let Some(axis) = size.iter().position(|&n| n == 0) {
            return Err(GeometryError::EmptyAxis(axis));
        }
        for axis in 0..D {
            let value = spacing[axis];
            if !value.is_finite() || value == 0.0 {
                return Err(GeometryError::InvalidSpacing { axis, value });
            }
        }
        if direction.try_inverse().is_none() {
            return Err(GeometryError::singular_direction(
                "direction matrix is not invertible",
            ));
        }

        Ok(Self {
            size,
            origin,
            spacing,
            direction,
        })
    }

    /// Geometry with zero origin, unit spacing and identity direction.
    pub fn with_size(size: [usize; D]) -> Result<Self> {
        Self::new(size, Point::origin(), Spacing::repeat(1.0), Direction::identity())
    }

    /// Number of voxels along each axis.
    pub fn size(&self) -> [usize; D] {
        self.size
    }

    /// Physical coordinate of voxel (0, 0, ...).
    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    /// Physical distance between voxels along each axis.
    pub fn spacing(&self) -> &Spacing<D> {
        &self.spacing
    }

    /// Orientation of the image axes.
    pub fn direction(&self) -> &Direction<D> {
        &self.direction
    }

    /// Map a continuous index to a physical point.
    pub fn index_to_physical(&self, index: &Point<D>) -> Point<D> {
        let scaled = index.coords.component_mul(&self.spacing);
        self.origin + self.direction * scaled
    }

    /// Map an integer voxel index to a physical point.
    pub fn voxel_to_physical(&self, index: &VoxelIndex<D>) -> Point<D> {
        self.index_to_physical(&index.to_continuous())
    }

    /// Voxel at the geometric center of the grid (`size / 2` per axis).
    pub fn center_index(&self) -> VoxelIndex<D> {
        VoxelIndex(self.size.map(|n| u32::try_from(n / 2).unwrap_or(u32::MAX)))
    }

    /// Physical length covered by the grid along each axis (`size * |spacing|`).
    pub fn extent(&self) -> Vector<D> {
        Vector::from_fn(|i, _| self.size[i] as f64 * self.spacing[i].abs())
    }
}
