//! Drag / resize / rotate interaction state machine.
//!
//! A [`TransformSession`] is started by a pointer-down on an element body,
//! a resize handle or the rotation handle, turns every pointer-move into a
//! committed [`FloorPlan`] update, and ends unconditionally on pointer-up.
//! Only one session exists per editor, so at most one transform is ever
//! in progress.
//!
//! Resizing works in the element's local frame: the pointer delta is
//! measured in screen pixels from the grab point, converted to centimeters
//! with the scale captured at grab time, and rotated by the inverse of the
//! element's rotation before being applied to the handle's own edges.

use crate::config::EditorConfig;
use crate::coords::{Viewport, rotate_vec, screen_delta_to_cm};
use crate::direction::ResizeDirection;
use crate::element::{Element, ElementId, MIN_SIZE};
use crate::plan::{ElementUpdate, FloorPlan};
use crate::snap::{snap_angle, snap_to_grid};
use kurbo::{Point, Size, Vec2};

/// State of the current pointer interaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TransformSession {
    /// No interaction in progress.
    #[default]
    Idle,
    /// Moving an element with its body.
    Dragging {
        element_id: ElementId,
        /// Pointer position relative to the element's top-left, in cm.
        grab_offset: Vec2,
    },
    /// Resizing an element by one of its handles.
    Resizing {
        element_id: ElementId,
        /// Handle in the element's own (unrotated) frame.
        direction: ResizeDirection,
        initial_position: Point,
        initial_size: Size,
        initial_rotation: f64,
        /// Pointer position at grab time, in screen pixels.
        initial_pointer_screen: Point,
        /// Scale at grab time; held for the whole drag.
        scale: f64,
        pixels_per_cm: f64,
    },
    /// Rotating an element about its center.
    Rotating {
        element_id: ElementId,
        initial_rotation: f64,
        /// Angle from the center to the pointer at grab time, in degrees.
        initial_pointer_angle: f64,
    },
}

/// Project a room-space delta into an element's local (unrotated) frame.
pub fn project_to_local(delta: Vec2, rotation_degrees: f64) -> Vec2 {
    rotate_vec(delta, -rotation_degrees)
}

/// Angle in degrees from `center` to `pointer`.
pub fn pointer_angle(center: Point, pointer: Point) -> f64 {
    (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees()
}

/// New position and size for a resize by `local_delta` on `direction`.
///
/// The handle's edges follow the delta; the opposite edges stay where they
/// were in room coordinates, including when a dimension is clamped to
/// `MIN_SIZE`. For a rotated element the position is recovered from the
/// fixed anchor, since the rotation pivot (the center) moves with the size.
pub fn resize_geometry(
    initial_position: Point,
    initial_size: Size,
    rotation_degrees: f64,
    direction: ResizeDirection,
    local_delta: Vec2,
) -> (Point, Size) {
    let delta = if local_delta.is_finite() { local_delta } else { Vec2::ZERO };
    let Size { width, height } = initial_size;

    // Edges of the new box in the initial local frame.
    let (mut x0, mut x1) = (0.0, width);
    let (mut y0, mut y1) = (0.0, height);

    if direction.moves_right() {
        x1 = (width + delta.x).max(x0 + MIN_SIZE);
    }
    if direction.moves_left() {
        x0 = delta.x.min(x1 - MIN_SIZE);
    }
    if direction.moves_bottom() {
        y1 = (height + delta.y).max(y0 + MIN_SIZE);
    }
    if direction.moves_top() {
        y0 = delta.y.min(y1 - MIN_SIZE);
    }

    let size = Size::new(x1 - x0, y1 - y0);

    if rotation_degrees == 0.0 {
        return (initial_position + Vec2::new(x0, y0), size);
    }

    let initial_center = initial_position + initial_size.to_vec2() / 2.0;
    let center_shift = Vec2::new((x0 + x1 - width) / 2.0, (y0 + y1 - height) / 2.0);
    let center = initial_center + rotate_vec(center_shift, rotation_degrees);
    (center - size.to_vec2() / 2.0, size)
}

impl TransformSession {
    /// Start moving `element`, grabbed at `pointer_cm`.
    pub fn begin_drag(element: &Element, pointer_cm: Point) -> Self {
        log::debug!("Drag start: {}", element.id);
        TransformSession::Dragging {
            element_id: element.id.clone(),
            grab_offset: pointer_cm - element.position,
        }
    }

    /// Start resizing `element` by its `direction` handle.
    pub fn begin_resize(
        element: &Element,
        direction: ResizeDirection,
        pointer_screen: Point,
        viewport: &Viewport,
    ) -> Self {
        log::debug!("Resize start: {} ({}) at scale {}", element.id, direction, viewport.scale);
        TransformSession::Resizing {
            element_id: element.id.clone(),
            direction,
            initial_position: element.position,
            initial_size: element.size,
            initial_rotation: element.rotation,
            initial_pointer_screen: pointer_screen,
            scale: viewport.scale,
            pixels_per_cm: viewport.pixels_per_cm,
        }
    }

    /// Start rotating `element`, grabbed at `pointer_cm`.
    pub fn begin_rotate(element: &Element, pointer_cm: Point) -> Self {
        log::debug!("Rotate start: {}", element.id);
        TransformSession::Rotating {
            element_id: element.id.clone(),
            initial_rotation: element.rotation,
            initial_pointer_angle: pointer_angle(element.center(), pointer_cm),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, TransformSession::Idle)
    }

    /// The element being transformed, if any.
    pub fn element_id(&self) -> Option<&str> {
        match self {
            TransformSession::Idle => None,
            TransformSession::Dragging { element_id, .. }
            | TransformSession::Resizing { element_id, .. }
            | TransformSession::Rotating { element_id, .. } => Some(element_id),
        }
    }

    /// Apply a pointer-move at `pointer_screen` and return the updated plan.
    ///
    /// `viewport` is the live mapping; resizing ignores its scale in favor
    /// of the one captured at grab time. If the element no longer exists
    /// the plan is returned unchanged.
    #[must_use]
    pub fn pointer_move(
        &self,
        plan: FloorPlan,
        pointer_screen: Point,
        viewport: &Viewport,
        config: &EditorConfig,
    ) -> FloorPlan {
        match self {
            TransformSession::Idle => plan,
            TransformSession::Dragging { element_id, grab_offset } => {
                let pointer_cm = viewport.screen_to_canvas(pointer_screen);
                let target = pointer_cm - *grab_offset;
                if !target.is_finite() {
                    log::debug!("Drag {}: ignoring non-finite pointer", element_id);
                    return plan;
                }
                let position = if config.snap_to_grid {
                    snap_to_grid(target, plan.grid_size)
                } else {
                    target
                };
                log::trace!("Drag {} to ({}, {})", element_id, position.x, position.y);
                plan.move_element(element_id, position)
            }
            TransformSession::Resizing {
                element_id,
                direction,
                initial_position,
                initial_size,
                initial_rotation,
                initial_pointer_screen,
                scale,
                pixels_per_cm,
            } => {
                let delta_screen = pointer_screen - *initial_pointer_screen;
                let delta_cm = screen_delta_to_cm(delta_screen, *scale, *pixels_per_cm);
                let local_delta = project_to_local(delta_cm, *initial_rotation);
                let (position, size) = resize_geometry(
                    *initial_position,
                    *initial_size,
                    *initial_rotation,
                    *direction,
                    local_delta,
                );
                log::trace!("Resize {} to {}x{}", element_id, size.width, size.height);
                plan.update_element(element_id, &ElementUpdate::geometry(position, size))
            }
            TransformSession::Rotating {
                element_id,
                initial_rotation,
                initial_pointer_angle,
            } => {
                let Some(element) = plan.element(element_id) else {
                    return plan;
                };
                let pointer_cm = viewport.screen_to_canvas(pointer_screen);
                let current_angle = pointer_angle(element.center(), pointer_cm);
                if !current_angle.is_finite() {
                    log::debug!("Rotate {}: ignoring non-finite pointer", element_id);
                    return plan;
                }
                let rotation = snap_angle(
                    *initial_rotation + (current_angle - *initial_pointer_angle),
                    config.rotation_snap_deg,
                );
                log::trace!("Rotate {} to {}", element_id, rotation);
                plan.update_element(element_id, &ElementUpdate::rotation(rotation))
            }
        }
    }

    /// End the session (pointer-up) and return to idle.
    pub fn end(&mut self) {
        if let Some(id) = self.element_id() {
            log::debug!("Transform end: {}", id);
        }
        *self = TransformSession::Idle;
    }
}
