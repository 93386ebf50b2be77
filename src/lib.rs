//! Game of Life simulation engine
//!
//! This library provides a fixed-size cellular automaton grid with optional
//! toroidal wrap-around, pluggable transition rules, and a generation stepper
//! that detects stability and termination.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, Result};
pub use simulation::{RunReport, SimulationService};

use game_of_life::Grid;
use simulation::{FileGridExporter, FileGridLoader};

/// Main entry point: load, run until finished and export according to settings.
///
/// `on_generation` is called with generation 0 and after every step.
pub fn run_simulation<F>(settings: Settings, on_generation: F) -> anyhow::Result<RunReport>
where
    F: FnMut(usize, &Grid),
{
    let exporter = FileGridExporter::new(settings.output.output_directory.clone());
    let exporter_ref: Option<&dyn simulation::GridExporter> = if settings.output.export {
        Some(&exporter)
    } else {
        None
    };

    let mut service = SimulationService::new(settings, &FileGridLoader, exporter_ref)?;
    service.run_to_completion(on_generation)
}
