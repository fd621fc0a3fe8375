//! Error types for the fallible edges of the engine (loading and saving).
//!
//! Editing operations themselves never fail; see [`crate::plan`].

use thiserror::Error;

/// Floor plan errors.
#[derive(Debug, Error)]
pub enum FloorPlanError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Duplicate element id: {0}")]
    DuplicateElementId(String),
    #[error("Invalid grid size: {0}")]
    InvalidGridSize(f64),
}

impl From<serde_json::Error> for FloorPlanError {
    fn from(err: serde_json::Error) -> Self {
        FloorPlanError::Serialization(err.to_string())
    }
}

/// Result type for floor plan loading and saving.
pub type FloorPlanResult<T> = Result<T, FloorPlanError>;
