//! Errors surfaced by the replay host.

use floorplan_core::FloorPlanError;
use std::path::PathBuf;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    FloorPlan(#[from] FloorPlanError),
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
}

/// Result type for the replay host.
pub type AppResult<T> = Result<T, AppError>;
