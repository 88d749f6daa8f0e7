//! Value/range pairs handed to bound UI widgets.

use manreg_core::spatial::Vector3;

use crate::layer::{LayerId, LayerInfo};

/// Numeric range with a preferred step, per component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange<T> {
    pub minimum: T,
    pub maximum: T,
    pub step: T,
}

impl<T> ValueRange<T> {
    pub fn new(minimum: T, maximum: T, step: T) -> Self {
        Self { minimum, maximum, step }
    }
}

impl ValueRange<Vector3> {
    /// The whole real line on every axis, with no preferred step.
    pub fn unbounded() -> Self {
        Self::new(
            Vector3::repeat(f64::NEG_INFINITY),
            Vector3::repeat(f64::INFINITY),
            Vector3::zeros(),
        )
    }

    /// `[-half_width, +half_width]` on every axis.
    pub fn symmetric(half_width: Vector3, step: Vector3) -> Self {
        Self::new(-half_width, half_width, step)
    }

    pub fn is_bounded(&self) -> bool {
        self.minimum.iter().chain(self.maximum.iter()).all(|v| v.is_finite())
    }
}

impl Default for ValueRange<Vector3> {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// The selectable moving layers, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerDomain {
    items: Vec<LayerInfo>,
}

impl LayerDomain {
    pub fn new(items: Vec<LayerInfo>) -> Self {
        Self { items }
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Display label of a layer in the domain.
    pub fn label(&self, id: LayerId) -> Option<&str> {
        self.items.iter().find(|item| item.id == id).map(|item| item.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerInfo> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A property value together with its domain.
#[derive(Debug, Clone, PartialEq)]
pub struct RangedValue<T, R> {
    pub value: T,
    pub range: R,
}

impl<T, R> RangedValue<T, R> {
    pub fn new(value: T, range: R) -> Self {
        Self { value, range }
    }
}
