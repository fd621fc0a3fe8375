//! Save destinations used by the replay host.

use floorplan_core::{FloorPlan, FloorPlanError, FloorPlanResult, PlanSink};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes each saved plan as pretty JSON to a file, replacing its contents.
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
    saves: usize,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            saves: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl PlanSink for JsonFileSink {
    fn save(&mut self, plan: &FloorPlan) -> FloorPlanResult<()> {
        let json = plan.to_json()?;
        fs::write(&self.path, json).map_err(|e| {
            FloorPlanError::Io(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        self.saves += 1;
        log::info!("Saved plan to {}", self.path.display());
        Ok(())
    }
}

/// Prints each saved plan as pretty JSON to standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl PlanSink for StdoutSink {
    fn save(&mut self, plan: &FloorPlan) -> FloorPlanResult<()> {
        let json = plan.to_json()?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}").map_err(|e| FloorPlanError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_core::ElementType;
    use kurbo::Point;
    use tempfile::tempdir;

    #[test]
    fn test_json_file_sink_writes_plan() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let mut sink = JsonFileSink::new(&path);

        let (plan, id) = FloorPlan::default().add_element(ElementType::Pillar, Point::new(40.0, 40.0));
        sink.save(&plan).unwrap();
        assert_eq!(sink.saves(), 1);

        let loaded = FloorPlan::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, plan);
        assert!(loaded.contains(&id));
    }

    #[test]
    fn test_json_file_sink_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let mut sink = JsonFileSink::new(&path);

        let first = FloorPlan::default();
        let mut second = first.clone();
        second.name = "Patio".to_string();
        sink.save(&first).unwrap();
        sink.save(&second).unwrap();

        let loaded = FloorPlan::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.name, "Patio");
        assert_eq!(sink.saves(), 2);
    }

    #[test]
    fn test_json_file_sink_missing_directory() {
        let dir = tempdir().unwrap();
        let mut sink = JsonFileSink::new(dir.path().join("missing").join("plan.json"));
        let err = sink.save(&FloorPlan::default()).unwrap_err();
        assert!(matches!(err, FloorPlanError::Io(_)));
        assert_eq!(sink.saves(), 0);
    }
}
