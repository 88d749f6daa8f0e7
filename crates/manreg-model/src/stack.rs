//! In-memory layer registry.
//!
//! `LayerStack` keeps one reference image and any number of moving layers,
//! stamping every change from a single monotonic clock so that transform and
//! reference stamps never repeat.

use manreg_core::image::ImageGeometry;
use manreg_core::transform::AffineTransform3;

use crate::error::{ModelError, Result};
use crate::layer::{LayerId, LayerInfo, LayerRegistry, StampedTransform};

/// A moving layer held by [`LayerStack`].
#[derive(Debug, Clone, PartialEq)]
pub struct MovingLayer {
    id: LayerId,
    label: String,
    transform: AffineTransform3,
    timestamp: u64,
    locked: bool,
}

impl MovingLayer {
    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn transform(&self) -> &AffineTransform3 {
        &self.transform
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ReferenceImage {
    label: String,
    geometry: ImageGeometry<3>,
    timestamp: u64,
}

/// Reference image plus moving layers, stored in memory.
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    reference: Option<ReferenceImage>,
    layers: Vec<MovingLayer>,
    next_id: u64,
    clock: u64,
}

impl LayerStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Load or replace the reference image.
    pub fn set_reference(&mut self, label: impl Into<String>, geometry: ImageGeometry<3>) {
        let timestamp = self.tick();
        let label = label.into();
        tracing::debug!("Reference image set to '{}' ({:?})", label, geometry.size());
        self.reference = Some(ReferenceImage { label, geometry, timestamp });
    }

    /// Unload the reference image.
    pub fn clear_reference(&mut self) {
        if let Some(reference) = self.reference.take() {
            tracing::debug!("Reference image '{}' unloaded", reference.label);
        }
    }

    /// Add a moving layer and return its id.
    pub fn add_layer(&mut self, label: impl Into<String>, transform: AffineTransform3) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        let timestamp = self.tick();
        self.layers.push(MovingLayer {
            id,
            label: label.into(),
            transform,
            timestamp,
            locked: false,
        });
        id
    }

    /// Remove a moving layer. Returns whether it existed.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        before != self.layers.len()
    }

    /// Refuse or allow transform writes to a layer.
    pub fn set_locked(&mut self, id: LayerId, locked: bool) -> Result<()> {
        let layer = self.layer_mut(id)?;
        layer.locked = locked;
        Ok(())
    }

    /// Look up a moving layer.
    pub fn layer(&self, id: LayerId) -> Option<&MovingLayer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    fn layer_mut(&mut self, id: LayerId) -> Result<&mut MovingLayer> {
        self.layers
            .iter_mut()
            .find(|layer| layer.id == id)
            .ok_or(ModelError::UnknownLayer(id))
    }

    /// Number of moving layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl LayerRegistry for LayerStack {
    fn moving_candidates(&self) -> Vec<LayerInfo> {
        self.layers
            .iter()
            .map(|layer| LayerInfo::new(layer.id, layer.label.clone()))
            .collect()
    }

    fn contains_layer(&self, id: LayerId) -> bool {
        self.layer(id).is_some()
    }

    fn layer_transform(&self, id: LayerId) -> Option<StampedTransform> {
        self.layer(id).map(|layer| StampedTransform {
            transform: layer.transform,
            timestamp: layer.timestamp,
        })
    }

    fn set_layer_transform(&mut self, id: LayerId, transform: AffineTransform3) -> Result<u64> {
        if self.layer_mut(id)?.locked {
            return Err(ModelError::registry(format!("{id} is locked")));
        }
        let timestamp = self.tick();
        let layer = self.layer_mut(id)?;
        layer.transform = transform;
        layer.timestamp = timestamp;
        Ok(timestamp)
    }

    fn reference_geometry(&self) -> Option<ImageGeometry<3>> {
        self.reference.as_ref().map(|r| r.geometry)
    }

    fn reference_timestamp(&self) -> Option<u64> {
        self.reference.as_ref().map(|r| r.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manreg_core::spatial::Vector3;

    fn geometry() -> ImageGeometry<3> {
        ImageGeometry::with_size([10, 10, 10]).unwrap()
    }

    #[test]
    fn test_add_and_list_layers() {
        let mut stack = LayerStack::new();
        stack.set_reference("T1", geometry());
        let a = stack.add_layer("T2", AffineTransform3::identity());
        let b = stack.add_layer("FLAIR", AffineTransform3::identity());

        let candidates = stack.moving_candidates();
        assert_eq!(candidates, vec![LayerInfo::new(a, "T2"), LayerInfo::new(b, "FLAIR")]);
    }

    #[test]
    fn test_write_bumps_timestamp() {
        let mut stack = LayerStack::new();
        let id = stack.add_layer("moving", AffineTransform3::identity());
        let before = stack.layer_transform(id).unwrap().timestamp;

        let shifted = AffineTransform3::from_translation(Vector3::new(1.0, 0.0, 0.0));
        let stamp = stack.set_layer_transform(id, shifted).unwrap();

        let after = stack.layer_transform(id).unwrap();
        assert!(stamp > before);
        assert_eq!(after.timestamp, stamp);
        assert_eq!(after.transform, shifted);
    }

    #[test]
    fn test_reference_replacement_changes_stamp() {
        let mut stack = LayerStack::new();
        assert_eq!(stack.reference_timestamp(), None);
        stack.set_reference("first", geometry());
        let first = stack.reference_timestamp().unwrap();
        stack.set_reference("second", geometry());
        assert!(stack.reference_timestamp().unwrap() > first);
        stack.clear_reference();
        assert!(stack.reference_geometry().is_none());
    }

    #[test]
    fn test_removed_layer_is_gone() {
        let mut stack = LayerStack::new();
        let id = stack.add_layer("moving", AffineTransform3::identity());
        assert!(stack.remove_layer(id));
        assert!(!stack.remove_layer(id));
        assert!(!stack.contains_layer(id));
        assert!(matches!(
            stack.set_layer_transform(id, AffineTransform3::identity()),
            Err(ModelError::UnknownLayer(_))
        ));
    }

    #[test]
    fn test_locked_layer_refuses_writes() {
        let mut stack = LayerStack::new();
        let id = stack.add_layer("moving", AffineTransform3::identity());
        stack.set_locked(id, true).unwrap();
        let result = stack.set_layer_transform(id, AffineTransform3::identity());
        assert!(matches!(result, Err(ModelError::Registry(_))));
        assert!(stack.layer(id).unwrap().is_locked());
    }
}
