//! Euler angle / translation parameter model for the moving layer.
//!
//! The model presents the transform of the selected moving layer as three
//! Euler angles and a translation about a rotation center, and writes user
//! edits back to the layer. The decomposition is cached per layer and
//! transform stamp, so repeated reads are free until something rewrites the
//! layer transform.
//!
//! # Conventions
//! * Rotation `R = Rz * Ry * Rx` (see [`EulerAngles`]).
//! * The layer transform is `x -> R(x - c) + c + t`, where `c` is the physical
//!   position of the rotation center voxel in the reference image.
//! * Moving the rotation center never rewrites the layer transform; only the
//!   reported translation changes.
//!
//! # Failure handling
//! Reads without a selected layer return `None`. Writes and actions without a
//! selected layer, with a degenerate rotation axis, or with non-finite values
//! are no-ops returning `Ok(())`. A selected layer that disappeared from the
//! registry is dropped on the next access.

use std::cell::RefCell;
use std::rc::Rc;

use manreg_core::image::ImageGeometry;
use manreg_core::spatial::{Point3, Vector3, VoxelIndex};
use manreg_core::transform::{
    axis_angle_rotation, CenteredRigidTransform, EulerAngles, RIGIDITY_TOLERANCE,
};

use crate::config::ModelConfig;
use crate::error::{ModelError, Result};
use crate::events::{ModelEvent, ModelListener, Notifier, SubscriptionId};
use crate::layer::{CursorProvider, LayerId, LayerRegistry};
use crate::parameters::TransformManualParameters;
use crate::property::{LayerDomain, RangedValue, ValueRange};

/// Angle or translation value together with its range.
pub type RangedVector = RangedValue<Vector3, ValueRange<Vector3>>;

/// Current moving layer selection together with the selectable layers.
pub type LayerSelection = RangedValue<Option<LayerId>, LayerDomain>;

/// Rigid transform parameter model of a manual registration tool.
pub struct TransformParameterModel<R: LayerRegistry, C: CursorProvider> {
    registry: Rc<RefCell<R>>,
    cursor: Rc<C>,
    config: ModelConfig,
    moving_layer: Option<LayerId>,
    manual: TransformManualParameters,
    rotation_center: VoxelIndex<3>,
    reference_stamp: Option<u64>,
    interactive_tool: bool,
    notifier: Notifier,
}

impl<R: LayerRegistry, C: CursorProvider> TransformParameterModel<R, C> {
    /// Create a model with the default configuration.
    ///
    /// The rotation center starts at the center voxel of the reference image.
    pub fn new(registry: Rc<RefCell<R>>, cursor: Rc<C>) -> Self {
        let (reference_stamp, rotation_center) = {
            let registry = registry.borrow();
            (
                registry.reference_timestamp(),
                Self::center_of(registry.reference_geometry().as_ref()),
            )
        };
        Self {
            registry,
            cursor,
            config: ModelConfig::default(),
            moving_layer: None,
            manual: TransformManualParameters::default(),
            rotation_center,
            reference_stamp,
            interactive_tool: false,
            notifier: Notifier::new(),
        }
    }

    /// Create a model with a custom configuration.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidConfiguration`] if `config` fails
    /// validation.
    pub fn with_config(registry: Rc<RefCell<R>>, cursor: Rc<C>, config: ModelConfig) -> Result<Self> {
        config.validate()?;
        let mut model = Self::new(registry, cursor);
        model.config = config;
        Ok(model)
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Register a listener for model events.
    pub fn subscribe(&mut self, listener: Rc<dyn ModelListener>) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Rotation center in voxel coordinates of the reference image.
    pub fn rotation_center(&self) -> VoxelIndex<3> {
        self.rotation_center
    }

    /// The cached parameters as they are, without refreshing them.
    pub fn manual_parameters(&self) -> &TransformManualParameters {
        &self.manual
    }

    /// Reconcile with changes made to the registry since the last call.
    ///
    /// A replaced reference image resets the rotation center; a moving layer
    /// that no longer exists is deselected. Every public operation calls this
    /// first.
    pub fn on_update(&mut self) {
        let reference_stamp = self.registry.borrow().reference_timestamp();
        if reference_stamp != self.reference_stamp {
            self.reference_stamp = reference_stamp;
            self.reset_on_reference_change();
        }

        if let Some(id) = self.moving_layer {
            if !self.registry.borrow().contains_layer(id) {
                tracing::warn!("Moving layer {} was removed; clearing selection", id);
                self.drop_selection();
            }
        }
    }

    /// Currently selected moving layer, if it still exists.
    pub fn moving_layer_handle(&mut self) -> Option<LayerId> {
        self.on_update();
        self.moving_layer
    }

    /// Selected layer and the selectable layers, or `None` if there are no
    /// layers to register.
    pub fn moving_layer_value_and_range(&mut self) -> Option<LayerSelection> {
        self.on_update();
        let candidates = self.registry.borrow().moving_candidates();
        if candidates.is_empty() {
            return None;
        }
        Some(RangedValue::new(self.moving_layer, LayerDomain::new(candidates)))
    }

    /// Select the moving layer, or clear the selection with `None`.
    ///
    /// The cached parameters are not recomputed until the next read.
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownLayer`] if `layer` is not a selectable
    /// moving layer; the selection is left unchanged.
    pub fn set_moving_layer(&mut self, layer: Option<LayerId>) -> Result<()> {
        self.on_update();
        if let Some(id) = layer {
            if !self.registry.borrow().contains_layer(id) {
                return Err(ModelError::UnknownLayer(id));
            }
        }

        if layer == self.moving_layer {
            if self.config.notify_on_reselect {
                self.notifier.notify(ModelEvent::MovingLayerChanged { layer });
            }
            return Ok(());
        }

        tracing::debug!("Moving layer {:?} -> {:?}", self.moving_layer, layer);
        self.moving_layer = layer;
        self.manual.invalidate();
        if layer.is_none() {
            self.disable_interactive_tool();
        }
        if self.config.reset_center_on_selection {
            let center = Self::center_of(self.reference_geometry().as_ref());
            if self.set_rotation_center(center) {
                self.notifier.notify(ModelEvent::RotationCenterChanged { center });
            }
        }
        self.notifier.notify(ModelEvent::MovingLayerChanged { layer });
        Ok(())
    }

    /// Euler angles (radians) of the moving layer; the range is unbounded.
    pub fn euler_angles_value_and_range(&mut self) -> Option<RangedVector> {
        let layer = self.moving_layer_handle()?;
        self.refresh(layer, false);
        if self.manual.layer_id != Some(layer) {
            return None;
        }
        Some(RangedValue::new(self.manual.euler_angles, ValueRange::unbounded()))
    }

    /// Rotate the moving layer to the given Euler angles about the rotation
    /// center, keeping the translation.
    pub fn set_euler_angles(&mut self, angles: Vector3) -> Result<()> {
        let Some(layer) = self.moving_layer_handle() else {
            return Ok(());
        };
        if !angles.iter().all(|a| a.is_finite()) {
            tracing::warn!("Ignoring non-finite Euler angles {:?}", angles);
            return Ok(());
        }
        if !self.prepare_write(layer) {
            return Ok(());
        }
        self.manual.euler_angles = angles;
        self.update_layer_from_manual_parameters(layer)
    }

    /// Translation of the moving layer, bounded by the reference image extent.
    pub fn translation_value_and_range(&mut self) -> Option<RangedVector> {
        let layer = self.moving_layer_handle()?;
        self.refresh(layer, false);
        if self.manual.layer_id != Some(layer) {
            return None;
        }
        Some(RangedValue::new(self.manual.translation, self.manual.translation_range))
    }

    /// Set the translation of the moving layer, keeping the rotation.
    pub fn set_translation(&mut self, translation: Vector3) -> Result<()> {
        let Some(layer) = self.moving_layer_handle() else {
            return Ok(());
        };
        if !translation.iter().all(|t| t.is_finite()) {
            tracing::warn!("Ignoring non-finite translation {:?}", translation);
            return Ok(());
        }
        if !self.prepare_write(layer) {
            return Ok(());
        }
        self.manual.translation = translation;
        self.update_layer_from_manual_parameters(layer)
    }

    /// Whether mouse drags are routed to rotating the moving layer.
    pub fn interactive_tool(&mut self) -> Option<bool> {
        self.moving_layer_handle()?;
        Some(self.interactive_tool)
    }

    pub fn set_interactive_tool(&mut self, enabled: bool) {
        if self.moving_layer_handle().is_none() || self.interactive_tool == enabled {
            return;
        }
        self.interactive_tool = enabled;
        self.notifier.notify(ModelEvent::InteractiveToolChanged { enabled });
    }

    /// Move the rotation center to the cursor.
    ///
    /// The layer transform is left untouched; the reported translation is
    /// re-derived against the new center.
    pub fn set_center_of_rotation_to_cursor(&mut self) -> Result<()> {
        let Some(layer) = self.moving_layer_handle() else {
            return Ok(());
        };
        let center = self.cursor.cursor_voxel();
        let changed = self.set_rotation_center(center);
        self.refresh(layer, true);
        if changed {
            self.notifier.notify(ModelEvent::RotationCenterChanged { center });
        }
        Ok(())
    }

    /// Replace the moving layer transform with the identity.
    pub fn reset_transform_to_identity(&mut self) -> Result<()> {
        let Some(layer) = self.moving_layer_handle() else {
            return Ok(());
        };
        self.manual.euler_angles = Vector3::zeros();
        self.manual.translation = Vector3::zeros();
        self.update_layer_from_manual_parameters(layer)
    }

    /// Rotate the moving layer by `angle` radians about `axis`, through the
    /// rotation center, on top of its current rotation.
    ///
    /// A zero or non-finite axis is ignored.
    pub fn apply_rotation(&mut self, axis: &Vector3, angle: f64) -> Result<()> {
        let Some(layer) = self.moving_layer_handle() else {
            return Ok(());
        };
        let Some(delta) = axis_angle_rotation(axis, angle) else {
            tracing::debug!("Ignoring rotation about degenerate axis {:?}", axis);
            return Ok(());
        };

        if !self.prepare_write(layer) {
            return Ok(());
        }
        let current = EulerAngles::from_vector(&self.manual.euler_angles).to_rotation_matrix();
        let rotated = EulerAngles::from_rotation_matrix_with_tolerance(
            &(delta * current),
            self.config.gimbal_lock_tolerance,
        );
        self.manual.euler_angles = rotated.to_vector();
        self.update_layer_from_manual_parameters(layer)
    }

    /// Re-derive the cached parameters from the moving layer transform.
    ///
    /// Does nothing if the cache is already current, unless `force_update`
    /// is set. Returns whether the cache was recomputed.
    pub fn update_manual_parameters_from_layer(&mut self, force_update: bool) -> bool {
        match self.moving_layer_handle() {
            Some(layer) => self.refresh(layer, force_update),
            None => false,
        }
    }

    fn refresh(&mut self, layer: LayerId, force_update: bool) -> bool {
        let stamped = self.registry.borrow().layer_transform(layer);
        let Some(stamped) = stamped else {
            tracing::warn!("Moving layer {} has no transform; clearing selection", layer);
            self.drop_selection();
            return false;
        };

        if !force_update && self.manual.is_valid_for(layer, stamped.timestamp) {
            return false;
        }

        if !stamped.transform.is_rigid(RIGIDITY_TOLERANCE) {
            tracing::warn!(
                "Transform of {} is not rigid; presenting its nearest rotation",
                layer
            );
        }

        let rigid = CenteredRigidTransform::from_affine(
            &stamped.transform,
            self.rotation_center_physical(),
            self.config.gimbal_lock_tolerance,
        );
        self.manual = TransformManualParameters {
            euler_angles: rigid.angles().to_vector(),
            translation: rigid.translation(),
            translation_range: self.translation_range(),
            layer_id: Some(layer),
            update_timestamp: Some(stamped.timestamp),
        };
        tracing::debug!(
            "Derived parameters for {} at stamp {}: angles {:?}, translation {:?}",
            layer,
            stamped.timestamp,
            self.manual.euler_angles.as_slice(),
            self.manual.translation.as_slice()
        );

        self.notifier.notify(ModelEvent::ParametersChanged { layer });
        true
    }

    /// Bring the cache up to date before an edit. Returns `false` if the
    /// refresh dropped the selection.
    fn prepare_write(&mut self, layer: LayerId) -> bool {
        self.refresh(layer, false);
        self.moving_layer == Some(layer)
    }

    fn update_layer_from_manual_parameters(&mut self, layer: LayerId) -> Result<()> {
        let rigid = CenteredRigidTransform::new(
            EulerAngles::from_vector(&self.manual.euler_angles),
            self.manual.translation,
            self.rotation_center_physical(),
        );

        let written = self
            .registry
            .borrow_mut()
            .set_layer_transform(layer, rigid.to_affine());
        match written {
            Ok(stamp) => {
                tracing::debug!("Wrote transform of {} at stamp {}", layer, stamp);
                self.refresh(layer, true);
                Ok(())
            }
            Err(err) => {
                // The cache holds the rejected edit; make the next read re-derive.
                self.manual.invalidate();
                Err(err)
            }
        }
    }

    fn reset_on_reference_change(&mut self) {
        let center = Self::center_of(self.reference_geometry().as_ref());
        tracing::debug!("Reference image changed; rotation center reset to {:?}", center.0);
        self.manual.invalidate();
        if self.set_rotation_center(center) {
            self.notifier.notify(ModelEvent::RotationCenterChanged { center });
        }
    }

    /// Store a new center; the cached decomposition depends on it.
    fn set_rotation_center(&mut self, center: VoxelIndex<3>) -> bool {
        self.manual.invalidate();
        if center == self.rotation_center {
            return false;
        }
        self.rotation_center = center;
        true
    }

    fn drop_selection(&mut self) {
        self.moving_layer = None;
        self.manual.invalidate();
        self.disable_interactive_tool();
        self.notifier.notify(ModelEvent::MovingLayerChanged { layer: None });
    }

    fn disable_interactive_tool(&mut self) {
        if self.interactive_tool {
            self.interactive_tool = false;
            self.notifier
                .notify(ModelEvent::InteractiveToolChanged { enabled: false });
        }
    }

    fn reference_geometry(&self) -> Option<ImageGeometry<3>> {
        self.registry.borrow().reference_geometry()
    }

    fn center_of(geometry: Option<&ImageGeometry<3>>) -> VoxelIndex<3> {
        geometry.map(ImageGeometry::center_index).unwrap_or_default()
    }

    /// Rotation center in physical space; a unit grid at the origin stands in
    /// for a missing reference image.
    fn rotation_center_physical(&self) -> Point3 {
        match self.reference_geometry() {
            Some(geometry) => geometry.voxel_to_physical(&self.rotation_center),
            None => self.rotation_center.to_continuous(),
        }
    }

    fn translation_range(&self) -> ValueRange<Vector3> {
        match self.reference_geometry() {
            Some(geometry) => ValueRange::symmetric(
                geometry.extent() * self.config.translation_range_scale,
                geometry.spacing().abs() * self.config.translation_step_scale,
            ),
            None => ValueRange::unbounded(),
        }
    }
}
