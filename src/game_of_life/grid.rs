//! Grid representation and neighbor queries

use super::cell::{Cell, CellState};
use crate::error::{LifeError, Result};
use itertools::iproduct;
use std::fmt;

/// Dense rectangular board of cells, stored row-major
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    toroidal: bool,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell dead.
    ///
    /// Callers must have checked that `rows * cols` fits; public construction
    /// goes through `try_new` or `from_rows`.
    pub(crate) fn new(rows: usize, cols: usize, toroidal: bool) -> Self {
        let cells = (0..rows * cols)
            .map(|index| Cell::new(index / cols, index % cols, CellState::Dead))
            .collect();

        Self {
            rows,
            cols,
            toroidal,
            cells,
        }
    }

    /// Create a grid from signed dimensions, rejecting negative or overflowing sizes
    pub fn try_new(rows: i64, cols: i64, toroidal: bool) -> Result<Self> {
        let invalid = || LifeError::InvalidDimension { rows, cols };

        let r = usize::try_from(rows).map_err(|_| invalid())?;
        let c = usize::try_from(cols).map_err(|_| invalid())?;
        r.checked_mul(c).ok_or_else(invalid)?;

        Ok(Self::new(r, c, toroidal))
    }

    /// Create a grid from a 2D boolean array
    pub fn from_rows(rows: Vec<Vec<bool>>, toroidal: bool) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if let Some(ragged) = rows.iter().find(|row| row.len() != width) {
            return Err(LifeError::InvalidDimension {
                rows: height as i64,
                cols: ragged.len() as i64,
            });
        }

        let mut grid = Self::new(height, width, toroidal);
        for (cell, alive) in grid.cells.iter_mut().zip(rows.into_iter().flatten()) {
            cell.set_state(alive.into());
        }
        Ok(grid)
    }

    /// Build an empty grid with the same dimensions and topology
    pub fn blank_like(&self) -> Self {
        Self::new(self.rows, self.cols, self.toroidal)
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub const fn is_toroidal(&self) -> bool {
        self.toroidal
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.index(row, col))
    }

    /// Get the cell at coordinates; no wrapping is applied
    pub fn at(&self, row: usize, col: usize) -> Result<&Cell> {
        let idx = self.check_bounds(row, col)?;
        Ok(&self.cells[idx])
    }

    /// Mutable access to the cell at coordinates
    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell> {
        let idx = self.check_bounds(row, col)?;
        Ok(&mut self.cells[idx])
    }

    pub fn is_alive(&self, row: usize, col: usize) -> Result<bool> {
        self.at(row, col).map(Cell::is_alive)
    }

    /// Set cell state at coordinates
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        self.at_mut(row, col)?.set_state(state);
        Ok(())
    }

    /// Iterate over all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub(crate) fn cell_slice(&self) -> &[Cell] {
        &self.cells
    }

    /// Replace every cell state in row-major order. Caller guarantees the length.
    pub(crate) fn with_states(mut self, states: Vec<CellState>) -> Self {
        debug_assert_eq!(states.len(), self.cells.len());
        for (cell, state) in self.cells.iter_mut().zip(states) {
            cell.set_state(state);
        }
        self
    }

    /// Count living cells in the Moore neighborhood of (row, col)
    pub fn count_alive_neighbors(&self, row: usize, col: usize) -> Result<u8> {
        self.check_bounds(row, col)?;

        let count = iproduct!([-1isize, 0, 1], [-1isize, 0, 1])
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .filter(|&(dr, dc)| self.is_neighbor_alive(row as isize + dr, col as isize + dc))
            .count();

        Ok(count as u8)
    }

    /// Check a neighbor coordinate, wrapping first on a toroidal grid.
    /// Only called for neighbors of an in-bounds cell, so both dimensions are non-zero.
    fn is_neighbor_alive(&self, row: isize, col: isize) -> bool {
        let (row, col) = if self.toroidal {
            (
                row.rem_euclid(self.rows as isize),
                col.rem_euclid(self.cols as isize),
            )
        } else {
            (row, col)
        };

        if row < 0 || col < 0 {
            return false;
        }
        let (row, col) = (row as usize, col as usize);

        row < self.rows && col < self.cols && self.cells[self.index(row, col)].is_alive()
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .filter(|cell| cell.is_alive())
            .map(|cell| (cell.row(), cell.col()))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }
}

/// Equal when dimensions and per-cell aliveness match; topology is ignored.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.is_alive() == b.is_alive())
    }
}

impl Eq for Grid {}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            for cell in row {
                let symbol = if cell.is_alive() { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
