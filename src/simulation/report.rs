//! Summary of a completed simulation run

use crate::game_of_life::SimulationStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Outcome of running a simulation until it finished
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub rule: String,
    pub rows: usize,
    pub cols: usize,
    pub toroidal: bool,
    /// Generations computed
    pub iterations: usize,
    pub max_iterations: usize,
    pub status: SimulationStatus,
    pub initial_living_cells: usize,
    pub final_living_cells: usize,
    /// Living cells after each generation, starting with generation 1
    pub living_history: Vec<usize>,
    /// Snapshot files written, in generation order
    pub exported_files: Vec<PathBuf>,
}

impl RunReport {
    /// Peak population over the initial grid and every generation
    pub fn peak_living_cells(&self) -> usize {
        self.living_history
            .iter()
            .copied()
            .chain(std::iter::once(self.initial_living_cells))
            .max()
            .unwrap_or(0)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run Summary:")?;
        writeln!(f, "  Rule: {}", self.rule)?;
        writeln!(
            f,
            "  Grid: {}x{}{}",
            self.rows,
            self.cols,
            if self.toroidal { " (toroidal)" } else { "" }
        )?;
        writeln!(f, "  Iterations: {} / {}", self.iterations, self.max_iterations)?;
        writeln!(f, "  Status: {}", self.status)?;
        writeln!(
            f,
            "  Living cells: {} → {} (peak {})",
            self.initial_living_cells,
            self.final_living_cells,
            self.peak_living_cells()
        )?;
        write!(f, "  Exported files: {}", self.exported_files.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunReport {
        RunReport {
            rule: "Conway".to_string(),
            rows: 5,
            cols: 5,
            toroidal: false,
            iterations: 2,
            max_iterations: 10,
            status: SimulationStatus::Running,
            initial_living_cells: 3,
            final_living_cells: 4,
            living_history: vec![6, 4],
            exported_files: vec![PathBuf::from("out_1.txt"), PathBuf::from("out_2.txt")],
        }
    }

    #[test]
    fn test_peak_living_cells() {
        assert_eq!(sample().peak_living_cells(), 6);

        let mut empty = sample();
        empty.living_history.clear();
        assert_eq!(empty.peak_living_cells(), 3);
    }

    #[test]
    fn test_json_output() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"status\": \"running\""));

        let parsed = RunReport::from_json(&json).unwrap();
        assert_eq!(parsed.living_history, vec![6, 4]);
    }

    #[test]
    fn test_display() {
        let text = sample().to_string();
        assert!(text.contains("Iterations: 2 / 10"));
        assert!(text.contains("Status: running"));
        assert!(text.contains("peak 6"));
    }
}
