//! Drives an [`Editor`] through a recorded script.

use crate::error::{AppError, AppResult};
use crate::script::{HostEvent, Script};
use crate::sinks::{JsonFileSink, StdoutSink};
use clap::Parser;
use floorplan_core::{Editor, FloorPlan, MemorySink, PlanSink};
use kurbo::{Point, Size};
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line arguments of the `floorplan` binary.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "floorplan", version, about = "Replay host events against a floor plan")]
pub struct Args {
    /// Floor plan JSON to load.
    pub plan: PathBuf,
    /// Replay script JSON.
    pub script: PathBuf,
    /// Where to write the resulting plan; standard output when omitted.
    pub output: Option<PathBuf>,
}

fn read_file(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply one host event to the editor.
pub fn apply_event(editor: &mut Editor, event: &HostEvent, sink: &mut dyn PlanSink) -> AppResult<()> {
    match event {
        HostEvent::PointerDown { x, y, target } => {
            let screen = Point::new(*x, *y);
            match target {
                Some(target) => editor.pointer_down(screen, target.clone()),
                None => editor.pointer_down_at(screen),
            }
        }
        HostEvent::PointerMove { x, y } => editor.pointer_move(Point::new(*x, *y)),
        HostEvent::PointerUp { x, y } => editor.pointer_up(Point::new(*x, *y)),
        HostEvent::ContainerResize { width, height } => {
            editor.set_container_size(Size::new(*width, *height));
        }
        HostEvent::AddElement { element_type, x, y } => {
            let id = editor.add_element(*element_type, Point::new(*x, *y));
            log::info!("Added {}", id);
        }
        HostEvent::DeleteElement { id } => editor.delete_element(id),
        HostEvent::SetProperty { id, field, value } => editor.set_property(id, *field, value),
        HostEvent::UpdateFloorPlan(update) => editor.update_floor_plan(update),
        HostEvent::Save => editor.save(sink)?,
    }
    Ok(())
}

/// Replay a script against a plan. Every `save` event goes to `sink`.
pub fn replay(plan: FloorPlan, script: &Script, sink: &mut dyn PlanSink) -> AppResult<Editor> {
    let config = script.config.clone().unwrap_or_default();
    let mut editor = Editor::new(plan, config);
    if let Some(origin) = script.origin {
        editor.set_canvas_origin(origin);
    }
    if let Some(container) = script.container {
        editor.set_container_size(container);
    }

    for (index, event) in script.events.iter().enumerate() {
        log::debug!("Event {}: {:?}", index, event);
        apply_event(&mut editor, event, sink)?;
    }
    Ok(editor)
}

/// Replay a script and save only the final plan to `sink`.
///
/// Intermediate `save` events are collected in memory, so `sink` receives
/// exactly one document.
pub fn replay_final(
    plan: FloorPlan,
    script: &Script,
    sink: &mut dyn PlanSink,
) -> AppResult<Editor> {
    let mut checkpoints = MemorySink::new();
    let editor = replay(plan, script, &mut checkpoints)?;
    log::debug!("Script requested {} intermediate saves", checkpoints.saved().len());
    editor.save(sink)?;
    Ok(editor)
}

/// Load the plan and script named by `args`, replay, and save the final
/// plan to the output file (or stdout).
pub fn run(args: &Args) -> AppResult<FloorPlan> {
    let plan = FloorPlan::from_json(&read_file(&args.plan)?)?;
    let script = Script::from_json(&read_file(&args.script)?)?;
    log::info!(
        "Replaying {} events on plan '{}' ({} elements)",
        script.events.len(),
        plan.name,
        plan.len()
    );

    let mut file_sink;
    let mut stdout_sink = StdoutSink;
    let sink: &mut dyn PlanSink = match &args.output {
        Some(path) => {
            file_sink = JsonFileSink::new(path);
            &mut file_sink
        }
        None => &mut stdout_sink,
    };

    let editor = replay_final(plan, &script, sink)?;
    Ok(editor.into_plan())
}
