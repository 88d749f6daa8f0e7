//! Observable rigid-transform parameter model for manual image registration.
//!
//! [`TransformParameterModel`] presents the transform of a moving image layer
//! as Euler angles and a translation about a rotation center, keeps that view
//! in sync with the layer, and notifies listeners when it changes.

pub mod config;
pub mod error;
pub mod events;
pub mod layer;
pub mod model;
pub mod parameters;
pub mod property;
pub mod stack;

pub use config::ModelConfig;
pub use error::{ModelError, Result};
pub use events::{EventHistory, LoggingListener, ModelEvent, ModelListener, Notifier, SubscriptionId};
pub use layer::{CursorProvider, LayerId, LayerInfo, LayerRegistry, StampedTransform};
pub use model::{LayerSelection, RangedVector, TransformParameterModel};
pub use parameters::TransformManualParameters;
pub use property::{LayerDomain, RangedValue, ValueRange};
pub use stack::{LayerStack, MovingLayer};
