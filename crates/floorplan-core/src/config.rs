//! Editor configuration.

use crate::coords::PIXELS_PER_CM;
use crate::error::FloorPlanResult;
use crate::snap::ANGLE_SNAP_INCREMENT;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Space the host reserves around the canvas when fitting the room, in px.
pub const DEFAULT_MARGINS: Size = Size::new(80.0, 80.0);

/// Handle hit radius in screen pixels.
pub const HANDLE_HIT_TOLERANCE_PX: f64 = 12.0;

/// Tunables of an editor instance. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Unscaled display pixels per centimeter.
    pub pixels_per_cm: f64,
    /// Total horizontal/vertical margin subtracted from the container.
    pub margins: Size,
    /// Rotation snap increment in degrees.
    pub rotation_snap_deg: f64,
    /// Snap dragged elements to the fine grid.
    pub snap_to_grid: bool,
    /// Handle hit radius in screen pixels.
    pub handle_hit_tolerance_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pixels_per_cm: PIXELS_PER_CM,
            margins: DEFAULT_MARGINS,
            rotation_snap_deg: ANGLE_SNAP_INCREMENT,
            snap_to_grid: true,
            handle_hit_tolerance_px: HANDLE_HIT_TOLERANCE_PX,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON and replace unusable values with defaults.
    pub fn from_json(json: &str) -> FloorPlanResult<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    /// Replace non-positive or non-finite values with their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(self.pixels_per_cm.is_finite() && self.pixels_per_cm > 0.0) {
            log::warn!("Invalid pixels_per_cm {}, using {}", self.pixels_per_cm, defaults.pixels_per_cm);
            self.pixels_per_cm = defaults.pixels_per_cm;
        }
        if !(self.rotation_snap_deg.is_finite() && self.rotation_snap_deg > 0.0) {
            log::warn!("Invalid rotation_snap_deg {}, using {}", self.rotation_snap_deg, defaults.rotation_snap_deg);
            self.rotation_snap_deg = defaults.rotation_snap_deg;
        }
        if !(self.handle_hit_tolerance_px.is_finite() && self.handle_hit_tolerance_px >= 0.0) {
            self.handle_hit_tolerance_px = defaults.handle_hit_tolerance_px;
        }
        if !(self.margins.width.is_finite() && self.margins.height.is_finite()) {
            self.margins = defaults.margins;
        }
        self
    }
}
