//! Interfaces to the layers and cursor owned by the host application.
//!
//! The parameter model never owns image layers. It reads and rewrites a moving
//! layer's transform through [`LayerRegistry`] and asks [`CursorProvider`]
//! where the crosshair is.

use std::fmt;

use manreg_core::image::ImageGeometry;
use manreg_core::spatial::VoxelIndex;
use manreg_core::transform::AffineTransform3;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Unique handle of an image layer.
///
/// "No layer" is expressed as `Option<LayerId>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// A layer that can be picked as the moving layer, with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInfo {
    pub id: LayerId,
    pub label: String,
}

impl LayerInfo {
    pub fn new(id: LayerId, label: impl Into<String>) -> Self {
        Self { id, label: label.into() }
    }
}

/// A layer transform together with the time it was last modified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampedTransform {
    pub transform: AffineTransform3,
    /// Monotonic modification stamp; changes on every write.
    pub timestamp: u64,
}

/// Registry of image layers: the reference image plus selectable moving layers.
pub trait LayerRegistry {
    /// Layers that can be registered against the reference image, in display
    /// order. The reference layer itself is never listed.
    fn moving_candidates(&self) -> Vec<LayerInfo>;

    /// Whether `id` still names a selectable moving layer.
    fn contains_layer(&self, id: LayerId) -> bool {
        self.moving_candidates().iter().any(|info| info.id == id)
    }

    /// Current transform of a moving layer, or `None` if it does not exist.
    fn layer_transform(&self, id: LayerId) -> Option<StampedTransform>;

    /// Replace a moving layer's transform, returning the new timestamp.
    ///
    /// # Errors
    /// Fails if the layer does not exist or refuses the write.
    fn set_layer_transform(&mut self, id: LayerId, transform: AffineTransform3) -> Result<u64>;

    /// Geometry of the reference image, if one is loaded.
    fn reference_geometry(&self) -> Option<ImageGeometry<3>>;

    /// Stamp that changes whenever the reference image is loaded or replaced.
    fn reference_timestamp(&self) -> Option<u64>;
}

/// Source of the current crosshair position.
pub trait CursorProvider {
    /// Cursor position in voxel coordinates of the reference image.
    fn cursor_voxel(&self) -> VoxelIndex<3>;
}

impl CursorProvider for std::cell::Cell<VoxelIndex<3>> {
    fn cursor_voxel(&self) -> VoxelIndex<3> {
        self.get()
    }
}
