//! Room furniture elements.
//!
//! Every element shares an id, a position (top-left of its unrotated box),
//! a size and a rotation about its center. What kind of furniture it is
//! lives in [`ElementKind`], a closed set matched exhaustively wherever
//! behavior depends on the type.

use crate::coords::rotate_vec;
use crate::snap::normalize_degrees;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for elements (`{type}_{suffix}`).
pub type ElementId = String;

/// Smallest width or height any element may have, in centimeters.
pub const MIN_SIZE: f64 = 20.0;

/// Clamp both dimensions of a size to at least `MIN_SIZE`.
pub fn clamp_size(size: Size) -> Size {
    Size::new(clamp_dimension(size.width), clamp_dimension(size.height))
}

fn clamp_dimension(value: f64) -> f64 {
    if value.is_nan() { MIN_SIZE } else { value.max(MIN_SIZE) }
}

/// The element type discriminant, used when creating elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Table,
    Bar,
    Pillar,
    Stage,
    Wall,
    DanceFloor,
}

impl ElementType {
    pub const ALL: [ElementType; 6] = [
        ElementType::Table,
        ElementType::Bar,
        ElementType::Pillar,
        ElementType::Stage,
        ElementType::Wall,
        ElementType::DanceFloor,
    ];

    /// Tag used in ids and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Table => "table",
            ElementType::Bar => "bar",
            ElementType::Pillar => "pillar",
            ElementType::Stage => "stage",
            ElementType::Wall => "wall",
            ElementType::DanceFloor => "dancefloor",
        }
    }

    /// Size of a freshly placed element of this type.
    pub fn default_size(self) -> Size {
        match self {
            ElementType::Table => Size::new(200.0, 80.0),
            ElementType::Bar => Size::new(300.0, 60.0),
            ElementType::Pillar => Size::new(40.0, 40.0),
            ElementType::Stage => Size::new(200.0, 150.0),
            ElementType::Wall => Size::new(200.0, 20.0),
            ElementType::DanceFloor => Size::new(300.0, 300.0),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    #[default]
    Rectangle,
    Round,
    Square,
}

/// Pillar cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarShape {
    #[default]
    Round,
    Square,
}

/// Per-type payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Table {
        number: u32,
        seats: u32,
        #[serde(default)]
        shape: TableShape,
    },
    Bar {
        name: String,
    },
    Pillar {
        name: String,
        #[serde(default)]
        shape: PillarShape,
    },
    Stage {
        name: String,
    },
    Wall {
        name: String,
        thickness: f64,
    },
    DanceFloor {
        name: String,
    },
}

impl ElementKind {
    /// Default seat count for a new table.
    pub const DEFAULT_SEATS: u32 = 4;

    /// Default payload for a new element; `table_number` is only used by tables.
    pub fn with_defaults(element_type: ElementType, table_number: u32) -> Self {
        match element_type {
            ElementType::Table => ElementKind::Table {
                number: table_number,
                seats: Self::DEFAULT_SEATS,
                shape: TableShape::default(),
            },
            ElementType::Bar => ElementKind::Bar { name: "Bar".to_string() },
            ElementType::Pillar => ElementKind::Pillar {
                name: "Pillar".to_string(),
                shape: PillarShape::default(),
            },
            ElementType::Stage => ElementKind::Stage { name: "Stage".to_string() },
            ElementType::Wall => ElementKind::Wall {
                name: "Wall".to_string(),
                thickness: ElementType::Wall.default_size().height,
            },
            ElementType::DanceFloor => ElementKind::DanceFloor {
                name: "Dance floor".to_string(),
            },
        }
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Table { .. } => ElementType::Table,
            ElementKind::Bar { .. } => ElementType::Bar,
            ElementKind::Pillar { .. } => ElementType::Pillar,
            ElementKind::Stage { .. } => ElementType::Stage,
            ElementKind::Wall { .. } => ElementType::Wall,
            ElementKind::DanceFloor { .. } => ElementType::DanceFloor,
        }
    }

    /// Text shown on the element by the host.
    pub fn label(&self) -> String {
        match self {
            ElementKind::Table { number, .. } => format!("T{number}"),
            ElementKind::Bar { name }
            | ElementKind::Pillar { name, .. }
            | ElementKind::Stage { name }
            | ElementKind::Wall { name, .. }
            | ElementKind::DanceFloor { name } => name.clone(),
        }
    }

    /// Whether the host should draw the element with a circular outline.
    pub fn is_round(&self) -> bool {
        matches!(
            self,
            ElementKind::Table { shape: TableShape::Round, .. }
                | ElementKind::Pillar { shape: PillarShape::Round, .. }
        )
    }
}

/// A piece of furniture placed in the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    /// Top-left corner of the unrotated box, in centimeters.
    pub position: Point,
    /// Width and height in centimeters (never below `MIN_SIZE`).
    pub size: Size,
    /// Rotation in degrees about the center, in `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create an element, enforcing the size and rotation invariants.
    pub fn new(id: impl Into<ElementId>, position: Point, size: Size, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            position,
            size: clamp_size(size),
            rotation: 0.0,
            kind,
        }
    }

    /// Set the rotation (normalized to `[0, 360)`).
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = normalize_degrees(degrees);
        self
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn label(&self) -> String {
        self.kind.label()
    }

    /// Center of the element; the pivot for rotation.
    pub fn center(&self) -> Point {
        self.position + self.size.to_vec2() / 2.0
    }

    /// The unrotated box.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Map a point in the element's local frame (origin at the unrotated
    /// top-left, axes along width/height) to room coordinates.
    pub fn local_to_global(&self, local: Point) -> Point {
        let half = self.size.to_vec2() / 2.0;
        self.center() + rotate_vec(local.to_vec2() - half, self.rotation)
    }

    /// Map a room point into the element's local frame.
    pub fn global_to_local(&self, global: Point) -> Point {
        let half = self.size.to_vec2() / 2.0;
        let v: Vec2 = rotate_vec(global - self.center(), -self.rotation) + half;
        v.to_point()
    }

    /// Rotated corners in room coordinates: top-left, top-right,
    /// bottom-right, bottom-left of the local frame.
    pub fn corners(&self) -> [Point; 4] {
        let Size { width, height } = self.size;
        [
            self.local_to_global(Point::new(0.0, 0.0)),
            self.local_to_global(Point::new(width, 0.0)),
            self.local_to_global(Point::new(width, height)),
            self.local_to_global(Point::new(0.0, height)),
        ]
    }

    /// Axis-aligned bounding box of the rotated element.
    pub fn bounds(&self) -> Rect {
        if self.rotation.abs() < 0.001 {
            return self.rect();
        }
        let corners = self.corners();
        let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Check if a room point lies on the (rotated) element body.
    pub fn contains(&self, point: Point) -> bool {
        let local = self.global_to_local(point);
        Rect::from_origin_size(Point::ZERO, self.size).contains(local)
    }
}
