//! The floor plan document and its element store.
//!
//! All editing operations take the plan by value and hand back the
//! replacement, so the owner swaps whole values and observers can compare
//! plans structurally to detect changes. Operations naming an unknown
//! element id return the plan unchanged.

use crate::element::{
    Element, ElementId, ElementKind, ElementType, PillarShape, TableShape, clamp_size,
};
use crate::error::{FloorPlanError, FloorPlanResult};
use crate::snap::{DEFAULT_GRID_SIZE, normalize_degrees, snap_to_grid};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Room size used for new plans, in centimeters.
pub const DEFAULT_ROOM_SIZE: Size = Size::new(1000.0, 800.0);

fn default_grid_size() -> f64 {
    DEFAULT_GRID_SIZE
}

/// Partial update for a single element.
///
/// Fields left as `None` are untouched. Fields that do not apply to the
/// element's type (e.g. `seats` on a wall) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementUpdate {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub rotation: Option<f64>,
    pub name: Option<String>,
    pub number: Option<u32>,
    pub seats: Option<u32>,
    pub table_shape: Option<TableShape>,
    pub pillar_shape: Option<PillarShape>,
    pub thickness: Option<f64>,
}

impl ElementUpdate {
    pub fn position(position: Point) -> Self {
        Self { position: Some(position), ..Default::default() }
    }

    pub fn geometry(position: Point, size: Size) -> Self {
        Self {
            position: Some(position),
            size: Some(size),
            ..Default::default()
        }
    }

    pub fn rotation(degrees: f64) -> Self {
        Self { rotation: Some(degrees), ..Default::default() }
    }

    /// Merge this update into an element, keeping its invariants.
    pub fn apply_to(&self, element: &mut Element) {
        if let Some(position) = self.position {
            element.position = position;
        }
        if let Some(size) = self.size {
            element.size = clamp_size(size);
        }
        if let Some(rotation) = self.rotation {
            element.rotation = normalize_degrees(rotation);
        }

        match &mut element.kind {
            ElementKind::Table { number, seats, shape } => {
                if let Some(n) = self.number {
                    *number = n;
                }
                if let Some(s) = self.seats {
                    *seats = s;
                }
                if let Some(s) = self.table_shape {
                    *shape = s;
                }
            }
            ElementKind::Pillar { name, shape } => {
                if let Some(n) = &self.name {
                    name.clone_from(n);
                }
                if let Some(s) = self.pillar_shape {
                    *shape = s;
                }
            }
            ElementKind::Wall { name, thickness } => {
                if let Some(n) = &self.name {
                    name.clone_from(n);
                }
                if let Some(t) = self.thickness {
                    *thickness = t;
                }
            }
            ElementKind::Bar { name } | ElementKind::Stage { name } | ElementKind::DanceFloor { name } => {
                if let Some(n) = &self.name {
                    name.clone_from(n);
                }
            }
        }
    }
}

/// Partial update for room-level attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FloorPlanUpdate {
    pub name: Option<String>,
    pub room_size: Option<Size>,
    pub grid_size: Option<f64>,
}

/// A room layout: its furniture plus room dimensions and grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub id: String,
    pub name: String,
    /// Elements back to front; the order is the z-order.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Room dimensions in centimeters.
    pub room_size: Size,
    /// Nominal grid size in centimeters.
    #[serde(default = "default_grid_size")]
    pub grid_size: f64,
}

impl Default for FloorPlan {
    fn default() -> Self {
        Self::new("Untitled", DEFAULT_ROOM_SIZE)
    }
}

impl FloorPlan {
    /// Create an empty plan.
    pub fn new(name: impl Into<String>, room_size: Size) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            elements: Vec::new(),
            room_size: clamp_size(room_size),
            grid_size: DEFAULT_GRID_SIZE,
        }
    }

    /// Get an element by id.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of table elements.
    pub fn table_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| e.element_type() == ElementType::Table)
            .count()
    }

    /// Topmost element whose body contains a room point.
    pub fn element_at(&self, point: Point) -> Option<&Element> {
        self.elements.iter().rev().find(|e| e.contains(point))
    }

    fn generate_id(&self, element_type: ElementType) -> ElementId {
        loop {
            let id = format!("{}_{}", element_type.as_str(), Uuid::new_v4().simple());
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Place a new element of `element_type` at a snapped position.
    ///
    /// Returns the new plan and the id of the created element, which is on
    /// top of the z-order.
    #[must_use]
    pub fn add_element(mut self, element_type: ElementType, position: Point) -> (Self, ElementId) {
        let position = snap_to_grid(position, self.grid_size);
        let id = self.generate_id(element_type);
        let table_number = u32::try_from(self.table_count()).unwrap_or(u32::MAX).saturating_add(1);
        let kind = ElementKind::with_defaults(element_type, table_number);
        let element = Element::new(id.clone(), position, element_type.default_size(), kind);
        log::debug!("Adding {} at ({}, {})", id, position.x, position.y);
        self.elements.push(element);
        (self, id)
    }

    /// Merge `update` into the element with `id`.
    #[must_use]
    pub fn update_element(mut self, id: &str, update: &ElementUpdate) -> Self {
        match self.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => update.apply_to(element),
            None => log::debug!("update_element: unknown id {}", id),
        }
        self
    }

    /// Remove the element with `id`.
    #[must_use]
    pub fn delete_element(mut self, id: &str) -> Self {
        match self.index_of(id) {
            Some(index) => {
                self.elements.remove(index);
                log::debug!("Deleted {}", id);
            }
            None => log::debug!("delete_element: unknown id {}", id),
        }
        self
    }

    /// Set an element's position. The caller is responsible for snapping.
    #[must_use]
    pub fn move_element(self, id: &str, position: Point) -> Self {
        self.update_element(id, &ElementUpdate::position(position))
    }

    /// Merge room-level attributes.
    ///
    /// Room dimensions are clamped to `MIN_SIZE`; a grid size that is not a
    /// positive finite number is ignored.
    #[must_use]
    pub fn update_floor_plan(mut self, update: &FloorPlanUpdate) -> Self {
        if let Some(name) = &update.name {
            self.name.clone_from(name);
        }
        if let Some(room_size) = update.room_size {
            self.room_size = clamp_size(room_size);
        }
        if let Some(grid_size) = update.grid_size {
            if grid_size.is_finite() && grid_size > 0.0 {
                self.grid_size = grid_size;
            } else {
                log::warn!("Ignoring invalid grid size {}", grid_size);
            }
        }
        self
    }

    /// Move an element to the top of the z-order.
    #[must_use]
    pub fn bring_to_front(mut self, id: &str) -> Self {
        if let Some(index) = self.index_of(id) {
            let element = self.elements.remove(index);
            self.elements.push(element);
        }
        self
    }

    /// Move an element to the bottom of the z-order.
    #[must_use]
    pub fn send_to_back(mut self, id: &str) -> Self {
        if let Some(index) = self.index_of(id) {
            let element = self.elements.remove(index);
            self.elements.insert(0, element);
        }
        self
    }

    /// Serialize the plan to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a plan from JSON, rejecting duplicate ids and bad grid sizes
    /// and restoring the size and rotation invariants.
    pub fn from_json(json: &str) -> FloorPlanResult<Self> {
        let mut plan: FloorPlan = serde_json::from_str(json)?;

        if !plan.grid_size.is_finite() || plan.grid_size <= 0.0 {
            return Err(FloorPlanError::InvalidGridSize(plan.grid_size));
        }

        let mut seen = HashSet::new();
        for element in &mut plan.elements {
            if !seen.insert(element.id.clone()) {
                return Err(FloorPlanError::DuplicateElementId(element.id.clone()));
            }
            let size = clamp_size(element.size);
            if size != element.size {
                log::warn!("Element {} had size below minimum, clamped", element.id);
                element.size = size;
            }
            element.rotation = normalize_degrees(element.rotation);
        }
        plan.room_size = clamp_size(plan.room_size);

        Ok(plan)
    }
}
