//! Integer voxel index type.

use super::Point;

/// Unsigned integer voxel coordinates in an image grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoxelIndex<const D: usize>(pub [u32; D]);

impl<const D: usize> VoxelIndex<D> {
    /// Create a new index from components.
    pub fn new(components: [u32; D]) -> Self {
        Self(components)
    }

    /// Index with every component zero.
    pub fn zeros() -> Self {
        Self([0; D])
    }

    /// Index as a continuous point, for mapping into physical space.
    pub fn to_continuous(&self) -> Point<D> {
        Point::from(self.0.map(f64::from))
    }
}

impl<const D: usize> Default for VoxelIndex<D> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const D: usize> From<[u32; D]> for VoxelIndex<D> {
    fn from(components: [u32; D]) -> Self {
        Self(components)
    }
}

impl<const D: usize> std::ops::Index<usize> for VoxelIndex<D> {
    type Output = u32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voxel_index_components() {
        let idx = VoxelIndex::new([1, 2, 3]);
        assert_eq!(idx[0], 1);
        assert_eq!(idx[2], 3);
        assert_eq!(VoxelIndex::<3>::default(), VoxelIndex::new([0, 0, 0]));
    }

    #[test]
    fn test_voxel_index_to_continuous() {
        let p = VoxelIndex::new([4, 5, 6]).to_continuous();
        assert_eq!(p, Point::<3>::new(4.0, 5.0, 6.0));
    }
}
