//! Error types for the parameter model.
//!
//! Missing selections, zero rotation axes and removed layers are not errors:
//! the model treats them as silent no-ops. These variants cover callers naming
//! things that do not exist and failures reported by the layer registry.

use thiserror::Error;

use crate::layer::LayerId;

/// Main error type for parameter model operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Layer id is not a selectable moving layer.
    #[error("Unknown layer: {0}")]
    UnknownLayer(LayerId),

    /// Layer registry rejected an operation.
    #[error("Registry error: {0}")]
    Registry(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for parameter model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

impl ModelError {
    /// Create a registry error.
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ModelError::registry("layer is locked");
        assert!(matches!(err, ModelError::Registry(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ModelError::UnknownLayer(LayerId(7));
        assert_eq!(err.to_string(), "Unknown layer: layer#7");

        let err = ModelError::invalid_configuration("negative scale");
        assert_eq!(err.to_string(), "Invalid configuration: negative scale");
    }
}
