//! Compass directions for resize handles and their mapping through
//! quarter-turn rotations.
//!
//! A handle is identified by the side of the element's own (unrotated)
//! box it belongs to. Once the element is rotated, that handle appears on
//! a different side of the screen; [`remap`] answers which one, so the
//! host can pick a matching cursor. The resize math never uses the
//! remapped direction.

use self::ResizeDirection::*;
use crate::snap::normalize_degrees;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight resize handle positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

/// Handle directions in clockwise order starting at north.
pub const COMPASS: [ResizeDirection; 8] = [N, NE, E, SE, S, SW, W, NW];

// Each table maps an unrotated handle to the side it is shown on after the
// given clockwise quarter turn. Indexed in COMPASS order.
const TABLE_0: [ResizeDirection; 8] = [N, NE, E, SE, S, SW, W, NW];
const TABLE_90: [ResizeDirection; 8] = [E, SE, S, SW, W, NW, N, NE];
const TABLE_180: [ResizeDirection; 8] = [S, SW, W, NW, N, NE, E, SE];
const TABLE_270: [ResizeDirection; 8] = [W, NW, N, NE, E, SE, S, SW];

const TABLES: [[ResizeDirection; 8]; 4] = [TABLE_0, TABLE_90, TABLE_180, TABLE_270];

/// Nearest quarter-turn class (0..4) of a rotation in degrees.
pub fn quarter_turns(rotation_degrees: f64) -> usize {
    let turns = (normalize_degrees(rotation_degrees) / 90.0).round() as usize;
    turns % 4
}

/// Side of the screen on which the `direction` handle of an element
/// rotated by `rotation_degrees` is shown.
pub fn remap(direction: ResizeDirection, rotation_degrees: f64) -> ResizeDirection {
    TABLES[quarter_turns(rotation_degrees)][direction.index()]
}

/// Which of the element's own handles is shown on the `screen_direction`
/// side after rotating by `rotation_degrees`. Inverse of [`remap`].
pub fn unmap(screen_direction: ResizeDirection, rotation_degrees: f64) -> ResizeDirection {
    let table = &TABLES[quarter_turns(rotation_degrees)];
    table
        .iter()
        .position(|&d| d == screen_direction)
        .map(|i| COMPASS[i])
        .unwrap_or(screen_direction)
}

impl ResizeDirection {
    fn index(self) -> usize {
        match self {
            N => 0,
            NE => 1,
            E => 2,
            SE => 3,
            S => 4,
            SW => 5,
            W => 6,
            NW => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            N => "n",
            NE => "ne",
            E => "e",
            SE => "se",
            S => "s",
            SW => "sw",
            W => "w",
            NW => "nw",
        }
    }

    /// The handle across the element (the anchor while resizing).
    pub fn opposite(self) -> Self {
        COMPASS[(self.index() + 4) % 8]
    }

    /// Whether the handle moves the element's top edge.
    pub fn moves_top(self) -> bool {
        matches!(self, N | NE | NW)
    }

    /// Whether the handle moves the element's bottom edge.
    pub fn moves_bottom(self) -> bool {
        matches!(self, S | SE | SW)
    }

    /// Whether the handle moves the element's left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, W | NW | SW)
    }

    /// Whether the handle moves the element's right edge.
    pub fn moves_right(self) -> bool {
        matches!(self, E | NE | SE)
    }

    /// Unit offset from the element's center toward the handle, in the
    /// local frame (x toward `e`, y toward `s`).
    pub fn unit(self) -> Vec2 {
        let x = if self.moves_right() {
            1.0
        } else if self.moves_left() {
            -1.0
        } else {
            0.0
        };
        let y = if self.moves_bottom() {
            1.0
        } else if self.moves_top() {
            -1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }

    /// CSS cursor name for a handle shown on this side.
    pub fn cursor(self) -> &'static str {
        match self {
            N | S => "ns-resize",
            E | W => "ew-resize",
            NE | SW => "nesw-resize",
            NW | SE => "nwse-resize",
        }
    }
}

impl fmt::Display for ResizeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
