//! Save destinations for floor plans.
//!
//! The engine never persists on its own; a host passes a sink to
//! [`Editor::save`](crate::editor::Editor::save) when the user asks.

use crate::error::FloorPlanResult;
use crate::plan::FloorPlan;

/// Receiver of explicitly saved plans.
pub trait PlanSink {
    /// Persist a snapshot of the plan.
    fn save(&mut self, plan: &FloorPlan) -> FloorPlanResult<()>;
}

/// In-memory sink for testing and hosts that persist elsewhere.
/// Keeps every saved snapshot in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: Vec<FloorPlan>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All snapshots, oldest first.
    pub fn saved(&self) -> &[FloorPlan] {
        &self.saved
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<&FloorPlan> {
        self.saved.last()
    }
}

impl PlanSink for MemorySink {
    fn save(&mut self, plan: &FloorPlan) -> FloorPlanResult<()> {
        self.saved.push(plan.clone());
        Ok(())
    }
}
