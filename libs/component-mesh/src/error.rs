//! # Component Errors
//!
//! Error types for component generation.

use thiserror::Error;

/// Errors that can occur while building a component mesh.
///
/// Every variant is non-fatal: the generator keeps its previous mesh and the
/// caller may retry with corrected parameters.
#[derive(Debug, PartialEq, Error)]
pub enum ComponentError {
    /// Start and end points coincide, so no axis can be derived.
    #[error("Degenerate axis: start and end are {length} apart")]
    DegenerateAxis { length: f64 },

    /// Body radius is zero, negative, or not a number.
    #[error("Invalid radius: {radius}")]
    InvalidRadius { radius: f64 },

    /// A resolved segment height is not usable, or the requested
    /// tessellation exceeds the part size limits.
    #[error("Invalid dimensions: {message}")]
    InvalidDimensions { message: String },
}

impl ComponentError {
    /// Creates a degenerate axis error.
    pub fn degenerate_axis(length: f64) -> Self {
        Self::DegenerateAxis { length }
    }

    /// Creates an invalid radius error.
    pub fn invalid_radius(radius: f64) -> Self {
        Self::InvalidRadius { radius }
    }

    /// Creates an invalid dimensions error.
    pub fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            message: message.into(),
        }
    }
}
