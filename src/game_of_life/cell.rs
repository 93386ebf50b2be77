//! Cell state and positioned cells

use serde::{Deserialize, Serialize};

/// Alive/dead marker for a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    /// Check if the state is alive
    #[inline]
    pub const fn is_alive(self) -> bool {
        matches!(self, CellState::Alive)
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

impl From<CellState> for bool {
    fn from(state: CellState) -> Self {
        state.is_alive()
    }
}

/// A cell placed at a fixed grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    state: CellState,
}

impl Cell {
    pub(crate) const fn new(row: usize, col: usize, state: CellState) -> Self {
        Self { row, col, state }
    }

    pub const fn row(&self) -> usize {
        self.row
    }

    pub const fn col(&self) -> usize {
        self.col
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    #[inline]
    pub const fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    /// Replace the state; the position never changes
    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}
