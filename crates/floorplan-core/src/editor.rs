//! The editor: one floor plan, its selection and the pointer interaction
//! in progress.
//!
//! Hosts forward pointer events in screen pixels together with what was
//! under the pointer (or let [`Editor::hit_test`] decide), report container
//! resizes, and read the plan back after every event.

use crate::config::EditorConfig;
use crate::coords::{Viewport, compute_auto_scale};
use crate::direction::ResizeDirection;
use crate::element::{Element, ElementId, ElementType};
use crate::error::FloorPlanResult;
use crate::handles::{self, Handle, HandleKind};
use crate::plan::{ElementUpdate, FloorPlan, FloorPlanUpdate};
use crate::properties::{PropertyField, apply_property};
use crate::session::TransformSession;
use crate::sink::PlanSink;
use crate::snap::DEFAULT_GRID_SIZE;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerTarget {
    /// An element body.
    Element { id: ElementId },
    /// A resize handle, named by its local direction.
    ResizeHandle { id: ElementId, direction: ResizeDirection },
    /// The rotation handle.
    RotationHandle { id: ElementId },
    /// Empty canvas.
    Canvas,
}

/// Stand-in plan held for the instant the real one is being rebuilt.
fn blank_plan() -> FloorPlan {
    FloorPlan {
        id: String::new(),
        name: String::new(),
        elements: Vec::new(),
        room_size: Size::ZERO,
        grid_size: DEFAULT_GRID_SIZE,
    }
}

/// Single-owner editing state.
#[derive(Debug, Clone)]
pub struct Editor {
    plan: FloorPlan,
    selected: Option<ElementId>,
    session: TransformSession,
    viewport: Viewport,
    container: Option<Size>,
    config: EditorConfig,
}

impl Editor {
    pub fn new(plan: FloorPlan, config: EditorConfig) -> Self {
        let config = config.validated();
        let viewport = Viewport::new(Point::ZERO, 1.0, config.pixels_per_cm);
        Self {
            plan,
            selected: None,
            session: TransformSession::Idle,
            viewport,
            container: None,
            config,
        }
    }

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    /// Consume the editor, returning the plan.
    pub fn into_plan(self) -> FloorPlan {
        self.plan
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_deref().and_then(|id| self.plan.element(id))
    }

    pub fn session(&self) -> &TransformSession {
        &self.session
    }

    /// Current (live) display scale.
    pub fn scale(&self) -> f64 {
        self.viewport.scale
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn container_size(&self) -> Option<Size> {
        self.container
    }

    fn edit_plan(&mut self, f: impl FnOnce(FloorPlan) -> FloorPlan) {
        let plan = std::mem::replace(&mut self.plan, blank_plan());
        self.plan = f(plan);
    }

    fn recompute_scale(&mut self) {
        if let Some(container) = self.container {
            let scale = compute_auto_scale(
                container,
                self.plan.room_size,
                self.config.pixels_per_cm,
                self.config.margins,
            );
            log::debug!("Auto scale {} for container {}x{}", scale, container.width, container.height);
            self.viewport.set_scale(scale);
        }
    }

    /// The host's canvas container changed size.
    ///
    /// A resize in progress keeps the scale it started with.
    pub fn set_container_size(&mut self, size: Size) {
        self.container = Some(size);
        self.recompute_scale();
    }

    /// Screen position of the room's top-left corner.
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.viewport.origin = origin;
    }

    pub fn screen_to_canvas_cm(&self, screen: Point) -> Point {
        self.viewport.screen_to_canvas(screen)
    }

    pub fn canvas_cm_to_screen(&self, canvas: Point) -> Point {
        self.viewport.canvas_to_screen(canvas)
    }

    // --- Element store ---

    /// Add an element at a centimeter position and select it.
    pub fn add_element(&mut self, element_type: ElementType, position: Point) -> ElementId {
        let mut new_id = ElementId::new();
        self.edit_plan(|plan| {
            let (plan, id) = plan.add_element(element_type, position);
            new_id = id;
            plan
        });
        self.selected = Some(new_id.clone());
        new_id
    }

    pub fn update_element(&mut self, id: &str, update: &ElementUpdate) {
        self.edit_plan(|plan| plan.update_element(id, update));
    }

    /// Delete an element, clearing the selection if it was selected.
    pub fn delete_element(&mut self, id: &str) {
        self.edit_plan(|plan| plan.delete_element(id));
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
    }

    pub fn move_element(&mut self, id: &str, position: Point) {
        self.edit_plan(|plan| plan.move_element(id, position));
    }

    /// Merge room attributes; the scale follows a new room size.
    pub fn update_floor_plan(&mut self, update: &FloorPlanUpdate) {
        self.edit_plan(|plan| plan.update_floor_plan(update));
        self.recompute_scale();
    }

    pub fn bring_to_front(&mut self, id: &str) {
        self.edit_plan(|plan| plan.bring_to_front(id));
    }

    pub fn send_to_back(&mut self, id: &str) {
        self.edit_plan(|plan| plan.send_to_back(id));
    }

    /// Apply a raw text edit from the properties panel.
    pub fn set_property(&mut self, id: &str, field: PropertyField, input: &str) {
        self.edit_plan(|plan| apply_property(plan, id, field, input));
    }

    // --- Selection ---

    /// Select an element, or clear the selection with `None`.
    /// Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected = match id {
            Some(id) if self.plan.contains(&id) => Some(id),
            Some(id) => {
                log::debug!("select: unknown id {}", id);
                None
            }
            None => None,
        };
    }

    /// Handles of the selected element, for drawing.
    pub fn selected_handles(&self) -> Vec<Handle> {
        self.selected_element().map(handles::handles).unwrap_or_default()
    }

    // --- Pointer ---

    /// What lies under a screen point: the selected element's handles,
    /// then the topmost element body, then the canvas.
    pub fn hit_test(&self, screen: Point) -> PointerTarget {
        let point = self.viewport.screen_to_canvas(screen);
        let tolerance = self.viewport.px_to_cm(self.config.handle_hit_tolerance_px);

        if let Some(element) = self.selected_element() {
            match handles::hit_test(element, point, tolerance) {
                Some(HandleKind::Rotate) => {
                    return PointerTarget::RotationHandle { id: element.id.clone() };
                }
                Some(HandleKind::Resize(direction)) => {
                    return PointerTarget::ResizeHandle {
                        id: element.id.clone(),
                        direction,
                    };
                }
                None => {}
            }
        }

        match self.plan.element_at(point) {
            Some(element) => PointerTarget::Element { id: element.id.clone() },
            None => PointerTarget::Canvas,
        }
    }

    /// Pointer pressed on `target`.
    ///
    /// Ignored while another interaction is in progress. Targets naming an
    /// unknown element are ignored.
    pub fn pointer_down(&mut self, screen: Point, target: PointerTarget) {
        if self.session.is_active() {
            log::debug!("pointer_down ignored: session active on {:?}", self.session.element_id());
            return;
        }
        let pointer_cm = self.viewport.screen_to_canvas(screen);

        let id = match &target {
            PointerTarget::Canvas => {
                self.selected = None;
                return;
            }
            PointerTarget::Element { id }
            | PointerTarget::ResizeHandle { id, .. }
            | PointerTarget::RotationHandle { id } => id,
        };
        let Some(element) = self.plan.element(id) else {
            log::debug!("pointer_down ignored: unknown id {}", id);
            return;
        };

        self.session = match target {
            PointerTarget::Element { .. } => TransformSession::begin_drag(element, pointer_cm),
            PointerTarget::ResizeHandle { direction, .. } => {
                TransformSession::begin_resize(element, direction, screen, &self.viewport)
            }
            PointerTarget::RotationHandle { .. } => TransformSession::begin_rotate(element, pointer_cm),
            PointerTarget::Canvas => TransformSession::Idle,
        };
        self.selected = Some(element.id.clone());
    }

    /// Pointer pressed; the target is found with [`Editor::hit_test`].
    pub fn pointer_down_at(&mut self, screen: Point) {
        let target = self.hit_test(screen);
        self.pointer_down(screen, target);
    }

    pub fn pointer_move(&mut self, screen: Point) {
        if !self.session.is_active() {
            return;
        }
        let plan = std::mem::replace(&mut self.plan, blank_plan());
        self.plan = self.session.pointer_move(plan, screen, &self.viewport, &self.config);
    }

    /// Pointer released; ends any interaction.
    pub fn pointer_up(&mut self, _screen: Point) {
        self.session.end();
    }

    /// Hand the current plan to `sink`. Saving only ever happens here.
    pub fn save(&self, sink: &mut dyn PlanSink) -> FloorPlanResult<()> {
        log::info!("Saving plan {} ({} elements)", self.plan.id, self.plan.len());
        sink.save(&self.plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    const TOL: f64 = 1e-9;

    /// Editor with a 200x80 table at (100, 100) cm, scale 1, origin 0.
    /// The table spans screen (50, 50) to (150, 90).
    fn editor_with_table() -> (Editor, ElementId) {
        let mut editor = Editor::new(FloorPlan::default(), EditorConfig::default());
        let id = editor.add_element(ElementType::Table, Point::new(100.0, 100.0));
        (editor, id)
    }

    #[test]
    fn test_new_editor_defaults() {
        let editor = Editor::new(FloorPlan::default(), EditorConfig::default());
        assert!((editor.scale() - 1.0).abs() < f64::EPSILON);
        assert!(editor.selected().is_none());
        assert!(!editor.session().is_active());
        assert!(editor.container_size().is_none());
    }

    #[test]
    fn test_container_size_sets_auto_scale() {
        let mut editor = Editor::new(FloorPlan::default(), EditorConfig::default());
        // Room needs 500x400 px; 80 px margins.
        editor.set_container_size(Size::new(1080.0, 880.0));
        assert!((editor.scale() - 2.0).abs() < f64::EPSILON);
        editor.set_container_size(Size::new(330.0, 280.0));
        assert!((editor.scale() - 0.5).abs() < f64::EPSILON);
        editor.set_container_size(Size::new(10.0, 10.0));
        assert!((editor.scale() - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_floor_plan_recomputes_scale() {
        let mut editor = Editor::new(FloorPlan::default(), EditorConfig::default());
        editor.set_container_size(Size::new(1080.0, 880.0));
        editor.update_floor_plan(&FloorPlanUpdate {
            room_size: Some(Size::new(2000.0, 1600.0)),
            ..Default::default()
        });
        assert!((editor.scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_selects_and_delete_clears() {
        let (mut editor, id) = editor_with_table();
        assert_eq!(editor.selected(), Some(id.as_str()));
        assert_eq!(editor.selected_handles().len(), 9);

        editor.delete_element("ghost");
        assert_eq!(editor.selected(), Some(id.as_str()));

        editor.delete_element(&id);
        assert!(editor.selected().is_none());
        assert!(editor.plan().is_empty());
        assert!(editor.selected_handles().is_empty());
    }

    #[test]
    fn test_select_unknown_clears() {
        let (mut editor, _) = editor_with_table();
        editor.select(Some("ghost".to_string()));
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_hit_test() {
        let (editor, id) = editor_with_table();
        assert_eq!(editor.hit_test(Point::new(100.0, 70.0)), PointerTarget::Element { id: id.clone() });
        assert_eq!(
            editor.hit_test(Point::new(150.0, 70.0)),
            PointerTarget::ResizeHandle { id: id.clone(), direction: ResizeDirection::E }
        );
        // Rotation handle sits 30 cm above the top edge.
        assert_eq!(editor.hit_test(Point::new(100.0, 35.0)), PointerTarget::RotationHandle { id });
        assert_eq!(editor.hit_test(Point::new(400.0, 300.0)), PointerTarget::Canvas);
    }

    #[test]
    fn test_selected_handles_win_over_bodies() {
        let (mut editor, table) = editor_with_table();
        // A stage on top of the table's east handle.
        let stage = editor.add_element(ElementType::Stage, Point::new(275.0, 100.0));
        assert_eq!(editor.hit_test(Point::new(150.0, 70.0)), PointerTarget::Element { id: stage });

        editor.select(Some(table.clone()));
        assert_eq!(
            editor.hit_test(Point::new(150.0, 70.0)),
            PointerTarget::ResizeHandle { id: table, direction: ResizeDirection::E }
        );
    }

    #[test]
    fn test_drag_through_editor() {
        let (mut editor, id) = editor_with_table();
        editor.pointer_down_at(Point::new(100.0, 70.0));
        assert!(matches!(editor.session(), TransformSession::Dragging { .. }));

        editor.pointer_move(Point::new(150.0, 120.0));
        editor.pointer_up(Point::new(150.0, 120.0));
        assert!(!editor.session().is_active());
        assert_eq!(editor.plan().element(&id).unwrap().position, Point::new(200.0, 200.0));
    }

    #[test]
    fn test_resize_keeps_scale_from_grab() {
        let (mut editor, id) = editor_with_table();
        editor.pointer_down_at(Point::new(150.0, 70.0));
        editor.pointer_move(Point::new(175.0, 70.0));
        assert!((editor.plan().element(&id).unwrap().size.width - 250.0).abs() < TOL);

        // Live scale doubles mid-drag; the drag keeps using scale 1.
        editor.set_container_size(Size::new(1080.0, 880.0));
        assert!((editor.scale() - 2.0).abs() < f64::EPSILON);
        editor.pointer_move(Point::new(200.0, 70.0));
        assert!((editor.plan().element(&id).unwrap().size.width - 300.0).abs() < TOL);
        editor.pointer_up(Point::new(200.0, 70.0));
    }

    #[test]
    fn test_rotate_through_editor() {
        let (mut editor, id) = editor_with_table();
        editor.pointer_down_at(Point::new(100.0, 35.0));
        assert!(matches!(editor.session(), TransformSession::Rotating { .. }));
        // Swing from straight above the center to straight right of it.
        editor.pointer_move(Point::new(150.0, 70.0));
        editor.pointer_up(Point::new(150.0, 70.0));
        assert!((editor.plan().element(&id).unwrap().rotation - 90.0).abs() < TOL);
    }

    #[test]
    fn test_pointer_down_ignored_during_session() {
        let (mut editor, id) = editor_with_table();
        editor.pointer_down(Point::new(100.0, 70.0), PointerTarget::Element { id: id.clone() });
        editor.pointer_down(Point::new(400.0, 300.0), PointerTarget::Canvas);
        assert_eq!(editor.selected(), Some(id.as_str()));
        assert!(matches!(editor.session(), TransformSession::Dragging { .. }));
    }

    #[test]
    fn test_canvas_clears_selection() {
        let (mut editor, _) = editor_with_table();
        editor.pointer_down(Point::new(400.0, 300.0), PointerTarget::Canvas);
        assert!(editor.selected().is_none());
        assert!(!editor.session().is_active());
    }

    #[test]
    fn test_unknown_target_ignored() {
        let (mut editor, _) = editor_with_table();
        let before = editor.plan().clone();
        editor.pointer_down(Point::ZERO, PointerTarget::RotationHandle { id: "ghost".to_string() });
        assert!(!editor.session().is_active());
        editor.pointer_move(Point::new(20.0, 20.0));
        assert_eq!(editor.plan(), &before);
    }

    #[test]
    fn test_delete_mid_session() {
        let (mut editor, id) = editor_with_table();
        editor.pointer_down_at(Point::new(100.0, 70.0));
        editor.delete_element(&id);
        editor.pointer_move(Point::new(300.0, 300.0));
        assert!(editor.plan().is_empty());
        editor.pointer_up(Point::new(300.0, 300.0));
        assert!(!editor.session().is_active());
    }

    #[test]
    fn test_set_property() {
        let (mut editor, id) = editor_with_table();
        editor.set_property(&id, PropertyField::Width, "abc");
        assert!((editor.plan().element(&id).unwrap().size.width - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coordinate_helpers_use_origin() {
        let mut editor = Editor::new(FloorPlan::default(), EditorConfig::default());
        editor.set_canvas_origin(Point::new(40.0, 40.0));
        let cm = editor.screen_to_canvas_cm(Point::new(90.0, 140.0));
        assert_eq!(cm, Point::new(100.0, 200.0));
        assert_eq!(editor.canvas_cm_to_screen(cm), Point::new(90.0, 140.0));
    }

    #[test]
    fn test_save_is_explicit() {
        let (mut editor, id) = editor_with_table();
        let mut sink = MemorySink::new();
        editor.move_element(&id, Point::new(0.0, 0.0));
        assert!(sink.saved().is_empty());

        editor.save(&mut sink).unwrap();
        assert_eq!(sink.saved().len(), 1);
        assert_eq!(sink.last(), Some(editor.plan()));
    }

    #[test]
    fn test_pointer_target_serde() {
        let target: PointerTarget =
            serde_json::from_str(r#"{"kind":"resize_handle","id":"table_1","direction":"ne"}"#).unwrap();
        assert_eq!(
            target,
            PointerTarget::ResizeHandle { id: "table_1".to_string(), direction: ResizeDirection::NE }
        );
        let canvas: PointerTarget = serde_json::from_str(r#"{"kind":"canvas"}"#).unwrap();
        assert_eq!(canvas, PointerTarget::Canvas);
    }
}
