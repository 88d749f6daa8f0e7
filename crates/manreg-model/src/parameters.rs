//! Cached Euler/translation decomposition of the moving layer's transform.

use manreg_core::spatial::Vector3;

use crate::layer::LayerId;
use crate::property::ValueRange;

/// The transform components presented to the user.
///
/// Derived from the layer transform and never authoritative: the cache is
/// only usable while `layer_id` and `update_timestamp` match the selected
/// layer and its current transform stamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformManualParameters {
    /// Rotation about X, Y and Z in radians.
    pub euler_angles: Vector3,
    /// Translation in physical units.
    pub translation: Vector3,
    /// Slider bounds for the translation.
    pub translation_range: ValueRange<Vector3>,
    /// Layer these values were derived from.
    pub layer_id: Option<LayerId>,
    /// Transform stamp these values were derived from.
    pub update_timestamp: Option<u64>,
}

impl Default for TransformManualParameters {
    fn default() -> Self {
        Self {
            euler_angles: Vector3::zeros(),
            translation: Vector3::zeros(),
            translation_range: ValueRange::unbounded(),
            layer_id: None,
            update_timestamp: None,
        }
    }
}

impl TransformManualParameters {
    /// Whether the cache reflects `layer` at transform stamp `timestamp`.
    pub fn is_valid_for(&self, layer: LayerId, timestamp: u64) -> bool {
        self.layer_id == Some(layer) && self.update_timestamp == Some(timestamp)
    }

    /// Drop the cache key so the next read re-derives.
    pub fn invalidate(&mut self) {
        self.layer_id = None;
        self.update_timestamp = None;
    }
}
