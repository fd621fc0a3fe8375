//! Coordinate conversion between screen pixels and canvas centimeters.
//!
//! Three spaces meet here: screen pixels as reported by the host, the
//! responsive display `scale`, and the fixed pixels-per-centimeter design
//! constant. Canvas centimeters are the canonical unit for every element.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Unscaled display pixels per canvas centimeter.
pub const PIXELS_PER_CM: f64 = 0.5;

/// Lower bound of the responsive scale.
pub const MIN_SCALE: f64 = 0.3;
/// Upper bound of the responsive scale.
pub const MAX_SCALE: f64 = 2.0;

/// Clamp a scale factor into `[MIN_SCALE, MAX_SCALE]`.
///
/// NaN resolves to `MIN_SCALE` so the result is always usable as a divisor.
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return MIN_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Combined screen pixels per centimeter for a scale and PPC pair.
fn pixels_per_cm_scaled(scale: f64, pixels_per_cm: f64) -> f64 {
    let ppc = if pixels_per_cm.is_finite() && pixels_per_cm > 0.0 {
        pixels_per_cm
    } else {
        PIXELS_PER_CM
    };
    clamp_scale(scale) * ppc
}

/// Convert a screen point to room-relative centimeters.
pub fn screen_to_canvas_cm(screen: Point, canvas_origin: Point, scale: f64, pixels_per_cm: f64) -> Point {
    let factor = pixels_per_cm_scaled(scale, pixels_per_cm);
    Point::new(
        (screen.x - canvas_origin.x) / factor,
        (screen.y - canvas_origin.y) / factor,
    )
}

/// Convert room-relative centimeters to a screen point.
pub fn canvas_cm_to_screen(canvas: Point, canvas_origin: Point, scale: f64, pixels_per_cm: f64) -> Point {
    let factor = pixels_per_cm_scaled(scale, pixels_per_cm);
    Point::new(
        canvas_origin.x + canvas.x * factor,
        canvas_origin.y + canvas.y * factor,
    )
}

/// Convert a screen-space delta to a centimeter delta.
pub fn screen_delta_to_cm(delta: Vec2, scale: f64, pixels_per_cm: f64) -> Vec2 {
    delta / pixels_per_cm_scaled(scale, pixels_per_cm)
}

/// Rotate a vector by `degrees` (positive is clockwise on a y-down screen).
pub fn rotate_vec(v: Vec2, degrees: f64) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Compute the scale that fits a room into a container.
///
/// `margins` is the total horizontal and vertical space (in pixels) the
/// host reserves around the canvas. The result is always clamped.
pub fn compute_auto_scale(container: Size, room_cm: Size, pixels_per_cm: f64, margins: Size) -> f64 {
    let required_width = room_cm.width * pixels_per_cm;
    let required_height = room_cm.height * pixels_per_cm;

    let scale_x = (container.width - margins.width) / required_width;
    let scale_y = (container.height - margins.height) / required_height;

    clamp_scale(scale_x.min(scale_y))
}

/// The mapping from canvas centimeters to screen pixels at one instant.
///
/// This is the engine's counterpart of a camera: a translation to the
/// canvas origin followed by a uniform `scale * pixels_per_cm` zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Screen position of the room's top-left corner.
    pub origin: Point,
    /// Responsive scale, kept within `[MIN_SCALE, MAX_SCALE]`.
    pub scale: f64,
    /// Pixels per centimeter before scaling.
    pub pixels_per_cm: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            scale: 1.0,
            pixels_per_cm: PIXELS_PER_CM,
        }
    }
}

impl Viewport {
    pub fn new(origin: Point, scale: f64, pixels_per_cm: f64) -> Self {
        Self {
            origin,
            scale: clamp_scale(scale),
            pixels_per_cm,
        }
    }

    /// Replace the scale, clamping it.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_scale(scale);
    }

    /// Screen pixels covered by one centimeter.
    pub fn pixels_per_cm_scaled(&self) -> f64 {
        pixels_per_cm_scaled(self.scale, self.pixels_per_cm)
    }

    /// Affine transform from canvas centimeters to screen pixels.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin.to_vec2()) * Affine::scale(self.pixels_per_cm_scaled())
    }

    /// Affine transform from screen pixels to canvas centimeters.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.pixels_per_cm_scaled()) * Affine::translate(-self.origin.to_vec2())
    }

    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        screen_to_canvas_cm(screen, self.origin, self.scale, self.pixels_per_cm)
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        canvas_cm_to_screen(canvas, self.origin, self.scale, self.pixels_per_cm)
    }

    /// Convert a length in centimeters to screen pixels.
    pub fn cm_to_px(&self, cm: f64) -> f64 {
        cm * self.pixels_per_cm_scaled()
    }

    /// Convert a length in screen pixels to centimeters.
    pub fn px_to_cm(&self, px: f64) -> f64 {
        px / self.pixels_per_cm_scaled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_canvas_identity_scale() {
        let p = screen_to_canvas_cm(Point::new(150.0, 90.0), Point::new(50.0, 40.0), 1.0, 0.5);
        assert!((p.x - 200.0).abs() < f64::EPSILON);
        assert!((p.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_with_scale() {
        let p = screen_to_canvas_cm(Point::new(100.0, 100.0), Point::ZERO, 2.0, 0.5);
        assert!((p.x - 100.0).abs() < f64::EPSILON);
        assert!((p.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scale_clamped_before_division() {
        // A zero scale would divide by zero; it is treated as MIN_SCALE.
        let p = screen_to_canvas_cm(Point::new(30.0, 0.0), Point::ZERO, 0.0, 1.0);
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!(p.x.is_finite());
    }

    #[test]
    fn test_roundtrip_conversion() {
        let origin = Point::new(12.0, -7.0);
        let original = Point::new(345.0, 678.0);
        let screen = canvas_cm_to_screen(original, origin, 0.75, 0.5);
        let back = screen_to_canvas_cm(screen, origin, 0.75, 0.5);
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_screen_delta_to_cm() {
        let d = screen_delta_to_cm(Vec2::new(50.0, -25.0), 1.0, 0.5);
        assert!((d.x - 100.0).abs() < f64::EPSILON);
        assert!((d.y + 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rotate_vec_quarter_turn() {
        let v = rotate_vec(Vec2::new(100.0, 0.0), 90.0);
        assert!(v.x.abs() < 1e-9);
        assert!((v.y - 100.0).abs() < 1e-9);

        let back = rotate_vec(v, -90.0);
        assert!((back.x - 100.0).abs() < 1e-9);
        assert!(back.y.abs() < 1e-9);
    }

    #[test]
    fn test_auto_scale_fits_smaller_axis() {
        // Room 1000x800 cm at 0.5 px/cm needs 500x400 px.
        let scale = compute_auto_scale(
            Size::new(1080.0, 480.0),
            Size::new(1000.0, 800.0),
            0.5,
            Size::new(80.0, 80.0),
        );
        // x: 1000 / 500 = 2.0, y: 400 / 400 = 1.0
        assert!((scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_auto_scale_clamps() {
        let huge = compute_auto_scale(Size::new(10_000.0, 10_000.0), Size::new(100.0, 100.0), 0.5, Size::ZERO);
        assert!((huge - MAX_SCALE).abs() < f64::EPSILON);

        let tiny = compute_auto_scale(Size::new(10.0, 10.0), Size::new(5000.0, 5000.0), 0.5, Size::ZERO);
        assert!((tiny - MIN_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_auto_scale_degenerate_inputs() {
        let zero_container = compute_auto_scale(Size::ZERO, Size::new(1000.0, 800.0), 0.5, Size::new(80.0, 80.0));
        assert!((zero_container - MIN_SCALE).abs() < f64::EPSILON);

        let zero_room = compute_auto_scale(Size::new(800.0, 600.0), Size::ZERO, 0.5, Size::ZERO);
        assert!((zero_room - MAX_SCALE).abs() < f64::EPSILON);

        let nan = compute_auto_scale(Size::new(80.0, 80.0), Size::ZERO, 0.5, Size::new(80.0, 80.0));
        assert!((nan - MIN_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_viewport_transform_matches_functions() {
        let viewport = Viewport::new(Point::new(40.0, 60.0), 1.5, 0.5);
        let cm = Point::new(100.0, 200.0);
        let via_affine = viewport.transform() * cm;
        let via_fn = viewport.canvas_to_screen(cm);
        assert!((via_affine.x - via_fn.x).abs() < 1e-10);
        assert!((via_affine.y - via_fn.y).abs() < 1e-10);

        let back = viewport.inverse_transform() * via_affine;
        assert!((back.x - cm.x).abs() < 1e-10);
        assert!((back.y - cm.y).abs() < 1e-10);
    }

    #[test]
    fn test_viewport_scale_is_clamped() {
        let mut viewport = Viewport::new(Point::ZERO, 5.0, 0.5);
        assert!((viewport.scale - MAX_SCALE).abs() < f64::EPSILON);
        viewport.set_scale(0.01);
        assert!((viewport.scale - MIN_SCALE).abs() < f64::EPSILON);
    }
}
