//! Configuration for the parameter model.

use manreg_core::transform::DEFAULT_GIMBAL_LOCK_TOLERANCE;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Parameter model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Emit `MovingLayerChanged` when the current layer is selected again.
    pub notify_on_reselect: bool,
    /// Move the rotation center back to the reference center on every
    /// selection change.
    pub reset_center_on_selection: bool,
    /// Translation range per axis is `±scale * extent` of the reference image.
    pub translation_range_scale: f64,
    /// Translation step per axis is `scale * |spacing|` of the reference image.
    pub translation_step_scale: f64,
    /// `cos(y)` at or below this is decomposed on the gimbal lock branch.
    pub gimbal_lock_tolerance: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            notify_on_reselect: false,
            reset_center_on_selection: false,
            translation_range_scale: 1.0,
            translation_step_scale: 1.0,
            gimbal_lock_tolerance: DEFAULT_GIMBAL_LOCK_TOLERANCE,
        }
    }
}

impl ModelConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify listeners even when reselecting the current layer.
    pub fn with_reselect_notification(mut self) -> Self {
        self.notify_on_reselect = true;
        self
    }

    /// Reset the rotation center whenever the moving layer changes.
    pub fn with_center_reset_on_selection(mut self) -> Self {
        self.reset_center_on_selection = true;
        self
    }

    /// Set the translation range scale.
    pub fn with_translation_range_scale(mut self, scale: f64) -> Self {
        self.translation_range_scale = scale;
        self
    }

    /// Set the translation step scale.
    pub fn with_translation_step_scale(mut self, scale: f64) -> Self {
        self.translation_step_scale = scale;
        self
    }

    /// Set the gimbal lock tolerance.
    pub fn with_gimbal_lock_tolerance(mut self, tolerance: f64) -> Self {
        self.gimbal_lock_tolerance = tolerance;
        self
    }

    /// Check that numeric settings are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.translation_range_scale.is_finite() && self.translation_range_scale > 0.0) {
            return Err(ModelError::invalid_configuration(format!(
                "translation_range_scale must be positive, got {}",
                self.translation_range_scale
            )));
        }
        if !(self.translation_step_scale.is_finite() && self.translation_step_scale > 0.0) {
            return Err(ModelError::invalid_configuration(format!(
                "translation_step_scale must be positive, got {}",
                self.translation_step_scale
            )));
        }
        if !(self.gimbal_lock_tolerance.is_finite() && self.gimbal_lock_tolerance >= 0.0) {
            return Err(ModelError::invalid_configuration(format!(
                "gimbal_lock_tolerance must be non-negative, got {}",
                self.gimbal_lock_tolerance
            )));
        }
        Ok(())
    }
}
