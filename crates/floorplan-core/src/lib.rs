//! Floor plan core library
//!
//! Platform-agnostic data model and geometric editing logic for restaurant
//! floor plans: placing, dragging, resizing and rotating furniture in a
//! room measured in centimeters.

pub mod config;
pub mod coords;
pub mod direction;
pub mod editor;
pub mod element;
pub mod error;
pub mod handles;
pub mod plan;
pub mod properties;
pub mod session;
pub mod sink;
pub mod snap;

pub use config::EditorConfig;
pub use coords::{
    MAX_SCALE, MIN_SCALE, PIXELS_PER_CM, Viewport, compute_auto_scale, screen_to_canvas_cm,
};
pub use direction::{ResizeDirection, remap, unmap};
pub use editor::{Editor, PointerTarget};
pub use element::{Element, ElementId, ElementKind, ElementType, MIN_SIZE, PillarShape, TableShape};
pub use error::{FloorPlanError, FloorPlanResult};
pub use handles::{Handle, HandleKind};
pub use plan::{ElementUpdate, FloorPlan, FloorPlanUpdate};
pub use properties::PropertyField;
pub use session::TransformSession;
pub use sink::{MemorySink, PlanSink};
pub use snap::{DEFAULT_GRID_SIZE, snap_angle, snap_to_grid};
