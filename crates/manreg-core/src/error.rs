//! Error types for geometry construction.

use thiserror::Error;

/// Error raised when image geometry or transform inputs are unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Spacing component is zero, negative zero or not finite.
    #[error("Invalid spacing on axis {axis}: {value}")]
    InvalidSpacing { axis: usize, value: f64 },

    /// Direction matrix cannot be inverted.
    #[error("Singular direction matrix: {0}")]
    SingularDirection(String),

    /// Image size has a zero-length axis.
    #[error("Empty image axis {0}")]
    EmptyAxis(usize),
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

impl GeometryError {
    /// Create a singular direction error.
    pub fn singular_direction(msg: impl Into<String>) -> Self {
        Self::SingularDirection(msg.into())
    }
}
