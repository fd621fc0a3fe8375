//! Selection handles: where they sit on a (possibly rotated) element and
//! which one a pointer hits.

use crate::direction::{COMPASS, ResizeDirection, remap};
use crate::element::Element;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Distance from the element's top edge to the rotation handle, in cm.
pub const ROTATE_HANDLE_OFFSET_CM: f64 = 30.0;

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    /// Resize handle attached to a side or corner of the unrotated box.
    Resize(ResizeDirection),
    /// Rotation handle, above the top edge.
    Rotate,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in room centimeters.
    pub position: Point,
    pub kind: HandleKind,
    /// Side of the screen the handle appears on, for cursor choice.
    /// `None` for the rotation handle.
    pub screen_direction: Option<ResizeDirection>,
}

impl Handle {
    /// Check if a point (in room centimeters) hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }

    /// CSS cursor for hovering this handle.
    pub fn cursor(&self) -> &'static str {
        match self.screen_direction {
            Some(direction) => direction.cursor(),
            None => "grab",
        }
    }
}

/// Position of a resize handle in the element's local frame.
fn local_handle_point(element: &Element, direction: ResizeDirection) -> Point {
    let unit = direction.unit();
    let half = element.size.to_vec2() / 2.0;
    Point::new(half.x + unit.x * half.x, half.y + unit.y * half.y)
}

/// The eight resize handles, in compass order starting at north.
pub fn resize_handles(element: &Element) -> [Handle; 8] {
    COMPASS.map(|direction| Handle {
        position: element.local_to_global(local_handle_point(element, direction)),
        kind: HandleKind::Resize(direction),
        screen_direction: Some(remap(direction, element.rotation)),
    })
}

/// The rotation handle, rotated with the element.
pub fn rotation_handle(element: &Element) -> Handle {
    let local = Point::new(element.size.width / 2.0, -ROTATE_HANDLE_OFFSET_CM);
    Handle {
        position: element.local_to_global(local),
        kind: HandleKind::Rotate,
        screen_direction: None,
    }
}

/// All handles of a selected element.
pub fn handles(element: &Element) -> Vec<Handle> {
    let mut all = Vec::with_capacity(9);
    all.extend(resize_handles(element));
    all.push(rotation_handle(element));
    all
}

/// Find which handle (if any) is hit at the given point.
/// The rotation handle wins over resize handles when both are in reach.
pub fn hit_test(element: &Element, point: Point, tolerance: f64) -> Option<HandleKind> {
    if rotation_handle(element).hit_test(point, tolerance) {
        return Some(HandleKind::Rotate);
    }
    resize_handles(element)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}
