//! Simulation service: wires loading, stepping and exporting together

use super::ports::{GridExporter, GridLoader};
use super::report::RunReport;
use crate::config::Settings;
use crate::game_of_life::{rule_from_name, Grid, Simulation, SimulationStatus};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

const DEFAULT_BASE_NAME: &str = "output";

/// Drives one simulation run independent of any user interface
pub struct SimulationService<'a> {
    settings: Settings,
    exporter: Option<&'a dyn GridExporter>,
    engine: Simulation,
    initial_living_cells: usize,
    living_history: Vec<usize>,
    exported_files: Vec<PathBuf>,
}

impl<'a> SimulationService<'a> {
    /// Load the initial grid through `loader` and build the engine from settings
    pub fn new(
        settings: Settings,
        loader: &dyn GridLoader,
        exporter: Option<&'a dyn GridExporter>,
    ) -> Result<Self> {
        let path = &settings.input.initial_state_file;
        let initial = loader
            .load_grid(path, settings.simulation.toroidal)
            .with_context(|| format!("Failed to load initial state from {}", path.display()))?;

        Self::with_grid(settings, initial, exporter)
    }

    /// Build the service around an already constructed grid (useful for testing)
    pub fn with_grid(
        settings: Settings,
        initial: Grid,
        exporter: Option<&'a dyn GridExporter>,
    ) -> Result<Self> {
        let rule = rule_from_name(&settings.simulation.rule)
            .with_context(|| format!("Unknown rule '{}'", settings.simulation.rule))?;

        info!(
            rows = initial.rows(),
            cols = initial.cols(),
            toroidal = initial.is_toroidal(),
            rule = rule.name(),
            max_iterations = settings.simulation.max_iterations,
            "simulation created"
        );

        let initial_living_cells = initial.living_count();
        let engine = Simulation::new(initial, rule, settings.simulation.max_iterations);

        Ok(Self {
            settings,
            exporter,
            engine,
            initial_living_cells,
            living_history: Vec::new(),
            exported_files: Vec::new(),
        })
    }

    /// Run one generation, then export it when an exporter is attached.
    ///
    /// A generation is only recorded in the report once its export has
    /// succeeded. When the export fails the engine has still advanced.
    pub fn step(&mut self) -> Result<()> {
        self.engine.step().context("Failed to compute next generation")?;

        let grid = self.engine.current_grid();
        let iteration = self.engine.current_iteration();
        let exported = match self.exporter {
            Some(exporter) => Some(
                exporter
                    .export_grid(grid, self.base_name(), iteration)
                    .with_context(|| format!("Failed to export generation {}", iteration))?,
            ),
            None => None,
        };

        self.living_history.push(grid.living_count());
        self.exported_files.extend(exported);
        Ok(())
    }

    /// Step until the engine reports it has finished.
    ///
    /// `on_generation` sees the initial grid as generation 0 and then every
    /// computed generation.
    pub fn run_to_completion<F>(&mut self, mut on_generation: F) -> Result<RunReport>
    where
        F: FnMut(usize, &Grid),
    {
        on_generation(self.engine.current_iteration(), self.engine.current_grid());
        while !self.engine.has_finished() {
            self.step()?;
            on_generation(self.engine.current_iteration(), self.engine.current_grid());
        }

        let report = self.report();
        info!(
            iterations = report.iterations,
            status = %report.status,
            living = report.final_living_cells,
            "simulation finished"
        );
        Ok(report)
    }

    /// Snapshot of the run so far
    pub fn report(&self) -> RunReport {
        let grid = self.engine.current_grid();
        RunReport {
            rule: self.engine.rule_name().to_string(),
            rows: grid.rows(),
            cols: grid.cols(),
            toroidal: grid.is_toroidal(),
            iterations: self.engine.current_iteration(),
            max_iterations: self.engine.max_iterations(),
            status: self.engine.status(),
            initial_living_cells: self.initial_living_cells,
            final_living_cells: grid.living_count(),
            living_history: self.living_history.clone(),
            exported_files: self.exported_files.clone(),
        }
    }

    fn base_name(&self) -> &str {
        let base = self.settings.output.output_base_name.as_str();
        if base.is_empty() {
            DEFAULT_BASE_NAME
        } else {
            base
        }
    }

    pub fn current_grid(&self) -> &Grid {
        self.engine.current_grid()
    }

    pub fn is_stable(&self) -> bool {
        self.engine.is_stable()
    }

    pub fn has_finished(&self) -> bool {
        self.engine.has_finished()
    }

    pub fn current_iteration(&self) -> usize {
        self.engine.current_iteration()
    }

    pub fn status(&self) -> SimulationStatus {
        self.engine.status()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use crate::game_of_life::{load_grid_from_file, parse_grid_from_string};
    use crate::simulation::ports::{FileGridExporter, FileGridLoader};
    use std::cell::RefCell;
    use std::path::Path;
    use tempfile::tempdir;

    /// Keeps exported generations in memory
    #[derive(Default)]
    struct RecordingExporter {
        exported: RefCell<Vec<(String, usize, Grid)>>,
    }

    impl GridExporter for RecordingExporter {
        fn export_grid(
            &self,
            grid: &Grid,
            base_name: &str,
            iteration: usize,
        ) -> crate::error::Result<PathBuf> {
            self.exported
                .borrow_mut()
                .push((base_name.to_string(), iteration, grid.clone()));
            Ok(PathBuf::from(format!("{}_{}.txt", base_name, iteration)))
        }
    }

    struct FailingExporter;

    impl GridExporter for FailingExporter {
        fn export_grid(
            &self,
            _grid: &Grid,
            base_name: &str,
            _iteration: usize,
        ) -> crate::error::Result<PathBuf> {
            Err(LifeError::io(
                base_name,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }
    }

    struct FailingLoader;

    impl GridLoader for FailingLoader {
        fn load_grid(&self, _path: &Path, _toroidal: bool) -> crate::error::Result<Grid> {
            Err(LifeError::MalformedInput("bad header".to_string()))
        }
    }

    fn blinker() -> Grid {
        parse_grid_from_string(
            "5 5\n0 0 0 0 0\n0 0 0 0 0\n0 1 1 1 0\n0 0 0 0 0\n0 0 0 0 0\n",
            false,
        )
        .unwrap()
    }

    fn settings(max_iterations: usize) -> Settings {
        let mut settings = Settings::default();
        settings.simulation.max_iterations = max_iterations;
        settings
    }

    #[test]
    fn test_exports_every_generation() {
        let exporter = RecordingExporter::default();
        let mut service = SimulationService::with_grid(settings(4), blinker(), Some(&exporter)).unwrap();

        let report = service.run_to_completion(|_, _| {}).unwrap();

        assert_eq!(report.iterations, 4);
        assert_eq!(report.status, SimulationStatus::MaxReached);
        assert_eq!(report.living_history, vec![3, 3, 3, 3]);

        let exported = exporter.exported.borrow();
        let iterations: Vec<usize> = exported.iter().map(|(_, i, _)| *i).collect();
        assert_eq!(iterations, vec![1, 2, 3, 4]);
        assert!(exported.iter().all(|(base, _, _)| base == "output"));
        assert_eq!(exported[1].2, blinker());
        assert_eq!(report.exported_files[0], PathBuf::from("output_1.txt"));
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let mut service = SimulationService::with_grid(settings(3), blinker(), None).unwrap();
        let mut seen = Vec::new();

        service
            .run_to_completion(|iteration, grid| seen.push((iteration, grid.living_count())))
            .unwrap();

        assert_eq!(seen, vec![(0, 3), (1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_empty_base_name_falls_back() {
        let exporter = RecordingExporter::default();
        let mut config = settings(1);
        config.output.output_base_name = String::new();
        let mut service = SimulationService::with_grid(config, blinker(), Some(&exporter)).unwrap();

        service.step().unwrap();

        assert_eq!(exporter.exported.borrow()[0].0, "output");
    }

    #[test]
    fn test_base_name_kept_verbatim() {
        let exporter = RecordingExporter::default();
        let mut config = settings(1);
        config.output.output_base_name = " x".to_string();
        let mut service = SimulationService::with_grid(config, blinker(), Some(&exporter)).unwrap();

        service.step().unwrap();

        assert_eq!(exporter.exported.borrow()[0].0, " x");
    }

    #[test]
    fn test_failed_export_leaves_report_consistent() {
        let exporter = FailingExporter;
        let mut service = SimulationService::with_grid(settings(3), blinker(), Some(&exporter)).unwrap();

        assert!(service.step().is_err());

        let report = service.report();
        assert_eq!(service.current_iteration(), 1);
        assert!(report.living_history.is_empty());
        assert!(report.exported_files.is_empty());
    }

    #[test]
    fn test_stops_when_stable() {
        let block = parse_grid_from_string("4 4\n0 0 0 0\n0 1 1 0\n0 1 1 0\n0 0 0 0\n", false).unwrap();
        let mut service = SimulationService::with_grid(settings(50), block, None).unwrap();

        let report = service.run_to_completion(|_, _| {}).unwrap();

        assert_eq!(report.iterations, 1);
        assert_eq!(report.status, SimulationStatus::Stable);
        assert!(service.is_stable());
        assert!(report.exported_files.is_empty());
    }

    #[test]
    fn test_zero_bound_produces_one_generation() {
        let mut service = SimulationService::with_grid(settings(0), blinker(), None).unwrap();
        assert!(!service.has_finished());

        let report = service.run_to_completion(|_, _| {}).unwrap();
        assert_eq!(report.iterations, 1);
        assert_eq!(service.current_iteration(), 1);
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let mut config = settings(3);
        config.simulation.rule = "B3/S23/X".to_string();
        assert!(SimulationService::with_grid(config, blinker(), None).is_err());
    }

    #[test]
    fn test_loader_errors_propagate() {
        let result = SimulationService::new(settings(3), &FailingLoader, None);
        let error = result.err().unwrap();
        assert!(matches!(
            error.downcast_ref::<LifeError>(),
            Some(LifeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_file_round_trip_through_service() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("blinker.txt");
        std::fs::write(&input, crate::game_of_life::grid_to_string(&blinker())).unwrap();

        let mut config = settings(2);
        config.simulation.toroidal = true;
        config.input.initial_state_file = input;
        config.output.output_base_name = "blink".to_string();

        let exporter = FileGridExporter::new(temp_dir.path().join("out"));
        let mut service = SimulationService::new(config, &FileGridLoader, Some(&exporter)).unwrap();
        service.run_to_completion(|_, _| {}).unwrap();

        let second = load_grid_from_file(temp_dir.path().join("out").join("blink_2.txt"), true).unwrap();
        assert_eq!(&second, service.current_grid());
        assert_eq!(second, blinker());
        assert!(service.current_grid().is_toroidal());
    }
}
