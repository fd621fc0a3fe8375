//! Recorded host sessions: the events a UI would send the editor.

use crate::error::AppResult;
use floorplan_core::{EditorConfig, ElementType, FloorPlanUpdate, PointerTarget, PropertyField};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// One host event. Coordinates are screen pixels unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// Pointer pressed. Without a target the editor hit-tests.
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        target: Option<PointerTarget>,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    ContainerResize { width: f64, height: f64 },
    /// Place an element; `x`/`y` are room centimeters.
    AddElement {
        #[serde(rename = "type")]
        element_type: ElementType,
        x: f64,
        y: f64,
    },
    DeleteElement { id: String },
    /// A raw properties-panel edit.
    SetProperty {
        id: String,
        field: PropertyField,
        value: String,
    },
    UpdateFloorPlan(FloorPlanUpdate),
    Save,
}

/// A replay script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Initial container size, in pixels.
    pub container: Option<Size>,
    /// Screen position of the room's top-left corner.
    pub origin: Option<Point>,
    pub config: Option<EditorConfig>,
    pub events: Vec<HostEvent>,
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
