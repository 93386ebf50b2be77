//! Generation stepper: owns the board, applies the rule, detects termination

use super::cell::CellState;
use super::grid::Grid;
use super::rules::Rule;
use crate::error::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Lifecycle of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    /// No step taken yet
    NotStarted,
    Running,
    /// Last step produced the same grid as the one before it
    Stable,
    /// Iteration bound reached
    MaxReached,
}

impl SimulationStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, SimulationStatus::Stable | SimulationStatus::MaxReached)
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SimulationStatus::NotStarted => "not started",
            SimulationStatus::Running => "running",
            SimulationStatus::Stable => "stable",
            SimulationStatus::MaxReached => "max iterations reached",
        };
        f.write_str(label)
    }
}

/// Game of Life simulation engine.
///
/// Keeps the current generation and the one before it so that stability can
/// be detected. Every step reads only the pre-step grid and writes into a
/// fresh buffer, so cell updates are simultaneous.
pub struct Simulation {
    current: Grid,
    previous: Grid,
    rule: Box<dyn Rule>,
    max_iterations: usize,
    iteration: usize,
}

impl Simulation {
    pub fn new(initial: Grid, rule: Box<dyn Rule>, max_iterations: usize) -> Self {
        Self {
            previous: initial.clone(),
            current: initial,
            rule,
            max_iterations,
            iteration: 0,
        }
    }

    /// Advance one generation.
    ///
    /// The next grid is fully computed before any engine state changes, so an
    /// error from the rule leaves the simulation exactly as it was.
    pub fn step(&mut self) -> Result<()> {
        let current = &self.current;
        let rule = self.rule.as_ref();

        let states = current
            .cell_slice()
            .par_iter()
            .map(|cell| rule.next_state(cell, current))
            .collect::<Result<Vec<CellState>>>()?;

        let next = current.blank_like().with_states(states);
        self.previous = std::mem::replace(&mut self.current, next);
        self.iteration += 1;

        debug!(
            iteration = self.iteration,
            living = self.current.living_count(),
            "generation computed"
        );
        Ok(())
    }

    /// True when the last step left the grid unchanged. Never true before the first step.
    pub fn is_stable(&self) -> bool {
        self.iteration > 0 && self.current == self.previous
    }

    /// False until at least one step has been taken, even with a zero bound.
    pub fn has_finished(&self) -> bool {
        if self.iteration == 0 {
            return false;
        }
        self.is_stable() || self.iteration >= self.max_iterations
    }

    pub fn status(&self) -> SimulationStatus {
        if self.iteration == 0 {
            SimulationStatus::NotStarted
        } else if self.is_stable() {
            SimulationStatus::Stable
        } else if self.iteration >= self.max_iterations {
            SimulationStatus::MaxReached
        } else {
            SimulationStatus::Running
        }
    }

    pub fn current_grid(&self) -> &Grid {
        &self.current
    }

    pub fn previous_grid(&self) -> &Grid {
        &self.previous
    }

    pub fn current_iteration(&self) -> usize {
        self.iteration
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn rule_name(&self) -> &str {
        self.rule.name()
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("rule", &self.rule.name())
            .field("iteration", &self.iteration)
            .field("max_iterations", &self.max_iterations)
            .field("rows", &self.current.rows())
            .field("cols", &self.current.cols())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use crate::game_of_life::cell::Cell;
    use crate::game_of_life::rules::{ConwayRule, LifeLikeRule};

    fn grid_from(pattern: &[&str], toroidal: bool) -> Grid {
        let rows = pattern
            .iter()
            .map(|line| line.chars().map(|ch| ch == '1').collect())
            .collect();
        Grid::from_rows(rows, toroidal).unwrap()
    }

    fn conway(initial: Grid, max_iterations: usize) -> Simulation {
        Simulation::new(initial, Box::new(ConwayRule), max_iterations)
    }

    /// Fails on any live cell at the given row
    struct PoisonRowRule(usize);

    impl Rule for PoisonRowRule {
        fn name(&self) -> &str {
            "poison"
        }

        fn next_state(&self, cell: &Cell, grid: &Grid) -> Result<CellState> {
            if cell.row() == self.0 && cell.is_alive() {
                // Reach outside the grid on purpose
                grid.at(grid.rows(), 0)?;
            }
            Ok(cell.state())
        }
    }

    #[test]
    fn test_still_life_block() {
        let block = grid_from(&["0000", "0110", "0110", "0000"], false);
        let mut life = conway(block.clone(), 10);

        life.step().unwrap();

        assert_eq!(life.current_grid(), &block);
        assert!(life.is_stable());
        assert!(life.has_finished());
        assert_eq!(life.status(), SimulationStatus::Stable);
        assert_eq!(life.current_iteration(), 1);
    }

    #[test]
    fn test_oscillator_blinker() {
        let horizontal = grid_from(&["00000", "00000", "01110", "00000", "00000"], false);
        let vertical = grid_from(&["00000", "00100", "00100", "00100", "00000"], false);
        let mut life = conway(horizontal.clone(), 10);

        life.step().unwrap();
        assert_eq!(life.current_grid(), &vertical);
        assert!(!life.is_stable());
        assert!(!life.has_finished());
        assert_eq!(life.status(), SimulationStatus::Running);

        life.step().unwrap();
        assert_eq!(life.current_grid(), &horizontal);
        assert_eq!(life.previous_grid(), &vertical);
        assert!(!life.is_stable());
    }

    #[test]
    fn test_lonely_cell_dies() {
        let mut life = conway(grid_from(&["000", "010", "000"], false), 5);
        life.step().unwrap();
        assert!(life.current_grid().is_empty());
    }

    #[test]
    fn test_synchronous_update() {
        // L-tromino fills in to a block
        let tromino = grid_from(&["110", "100", "000"], false);
        let mut life = conway(tromino, 5);

        life.step().unwrap();

        let expected = grid_from(&["110", "110", "000"], false);
        assert_eq!(life.current_grid(), &expected);
    }

    #[test]
    fn test_synchronous_update_diverges_from_in_place() {
        let pattern = grid_from(&["0100", "0110", "1000", "0000"], false);

        let mut in_place = pattern.clone();
        for row in 0..in_place.rows() {
            for col in 0..in_place.cols() {
                let cell = *in_place.at(row, col).unwrap();
                let next = ConwayRule.next_state(&cell, &in_place).unwrap();
                in_place.set(row, col, next).unwrap();
            }
        }

        let mut life = conway(pattern, 5);
        life.step().unwrap();

        // In-place scanning kills (1,1) because (0,2) and (1,0) were already born
        let expected = grid_from(&["0110", "1110", "0100", "0000"], false);
        assert_eq!(life.current_grid(), &expected);
        assert_ne!(life.current_grid(), &in_place);
    }

    #[test]
    fn test_not_finished_before_first_step() {
        let block = grid_from(&["0000", "0110", "0110", "0000"], false);
        let life = conway(block, 10);

        assert_eq!(life.current_grid(), life.previous_grid());
        assert!(!life.is_stable());
        assert!(!life.has_finished());
        assert_eq!(life.status(), SimulationStatus::NotStarted);
        assert_eq!(life.current_iteration(), 0);
    }

    #[test]
    fn test_zero_bound_still_takes_one_step() {
        let blinker = grid_from(&["000", "111", "000"], false);
        let mut life = conway(blinker, 0);

        assert!(!life.has_finished());
        life.step().unwrap();
        assert!(life.has_finished());
        assert_eq!(life.status(), SimulationStatus::MaxReached);
        assert!(life.status().is_terminal());
    }

    #[test]
    fn test_max_iterations_bound() {
        let blinker = grid_from(&["00000", "00000", "01110", "00000", "00000"], false);
        let mut life = conway(blinker, 3);

        let mut steps = 0;
        while !life.has_finished() {
            life.step().unwrap();
            steps += 1;
        }

        assert_eq!(steps, 3);
        assert_eq!(life.status(), SimulationStatus::MaxReached);
    }

    #[test]
    fn test_determinism() {
        let glider = grid_from(&["00100", "10100", "01100", "00000", "00000"], true);
        let mut a = conway(glider.clone(), 20);
        let mut b = conway(glider, 20);

        for _ in 0..12 {
            a.step().unwrap();
            b.step().unwrap();
            assert_eq!(a.current_grid(), b.current_grid());
        }
    }

    #[test]
    fn test_glider_returns_on_torus() {
        // A glider on a 5x5 torus translates back onto itself after 20 generations
        let glider = grid_from(&["01000", "00100", "11100", "00000", "00000"], true);
        let mut life = conway(glider.clone(), 100);

        for _ in 0..20 {
            life.step().unwrap();
        }

        assert_eq!(life.current_grid(), &glider);
        assert_eq!(life.current_grid().living_count(), 5);
    }

    #[test]
    fn test_step_preserves_topology() {
        let mut life = conway(grid_from(&["010", "010", "010"], true), 5);
        life.step().unwrap();
        assert!(life.current_grid().is_toroidal());
        assert_eq!((life.current_grid().rows(), life.current_grid().cols()), (3, 3));
    }

    #[test]
    fn test_failed_step_leaves_engine_untouched() {
        let initial = grid_from(&["000", "010", "000"], false);
        let mut life = Simulation::new(initial.clone(), Box::new(PoisonRowRule(1)), 5);

        let result = life.step();

        assert!(matches!(result, Err(LifeError::OutOfRange { .. })));
        assert_eq!(life.current_iteration(), 0);
        assert_eq!(life.current_grid(), &initial);
        assert_eq!(life.status(), SimulationStatus::NotStarted);
    }

    #[test]
    fn test_alternative_rule() {
        // Under Seeds every live cell dies and two-neighbor dead cells are born
        let pair = grid_from(&["0000", "0110", "0000"], false);
        let mut life = Simulation::new(pair, Box::new(LifeLikeRule::parse("B2/S").unwrap()), 5);

        life.step().unwrap();

        let expected = grid_from(&["0110", "0000", "0110"], false);
        assert_eq!(life.current_grid(), &expected);
        assert_eq!(life.rule_name(), "B2/S");
    }

    #[test]
    fn test_empty_grid_is_stable_after_step() {
        let mut life = conway(Grid::new(0, 0, false), 10);
        life.step().unwrap();
        assert!(life.is_stable());
        assert!(life.has_finished());
    }
}
