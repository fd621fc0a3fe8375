//! Snap functionality for aligning positions to the fine grid and
//! rotations to angle increments.

use kurbo::Point;

/// Default nominal grid size in centimeters (matches the visual grid).
pub const DEFAULT_GRID_SIZE: f64 = 100.0;

/// Number of fine-grid steps per nominal grid cell.
pub const FINE_GRID_DIVISIONS: f64 = 4.0;

/// Angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 15.0;

/// The quantization step used for interactive snapping.
pub fn fine_grid(grid_size: f64) -> f64 {
    grid_size / FINE_GRID_DIVISIONS
}

/// Snap a centimeter position to the nearest fine-grid intersection.
///
/// Non-positive or non-finite grid sizes leave the position untouched.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    if !grid_size.is_finite() || grid_size <= 0.0 {
        return point;
    }
    let step = fine_grid(grid_size);
    Point::new(
        (point.x / step).round() * step,
        (point.y / step).round() * step,
    )
}

/// Normalize an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Snap an angle to the nearest increment.
/// Returns the snapped angle in degrees (0-360).
pub fn snap_angle(angle_degrees: f64, increment: f64) -> f64 {
    if !increment.is_finite() || increment <= 0.0 {
        return normalize_degrees(angle_degrees);
    }
    let snapped = (angle_degrees / increment).round() * increment;
    normalize_degrees(snapped)
}
