//! File I/O operations for Game of Life grids
//!
//! Snapshot format: a `<rows> <cols>` header followed by `rows` lines of
//! `cols` space-separated `0`/`1` values, `1` meaning alive.

use super::cell::CellState;
use super::Grid;
use crate::error::{LifeError, Result};
use itertools::Itertools;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load a grid snapshot from a text file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P, toroidal: bool) -> Result<Grid> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| LifeError::io(path, e))?;

    let grid = parse_grid_from_string(&content, toroidal)?;
    debug!(path = %path.display(), rows = grid.rows(), cols = grid.cols(), "grid loaded");
    Ok(grid)
}

/// Parse a grid from its snapshot representation.
///
/// Tokens are whitespace separated, so line breaks inside the cell block are
/// not significant. Anything after the last expected cell is ignored.
pub fn parse_grid_from_string(content: &str, toroidal: bool) -> Result<Grid> {
    let mut tokens = content.split_whitespace();

    let mut dimension = |label: &str| -> Result<usize> {
        let token = tokens
            .next()
            .ok_or_else(|| LifeError::MalformedInput(format!("missing {} in header", label)))?;
        token.parse::<usize>().map_err(|_| {
            LifeError::MalformedInput(format!(
                "{} must be a non-negative integer, found '{}'",
                label, token
            ))
        })
    };
    let rows = dimension("row count")?;
    let cols = dimension("column count")?;

    if rows.checked_mul(cols).is_none() {
        return Err(LifeError::MalformedInput(format!(
            "grid of {}x{} cells is too large",
            rows, cols
        )));
    }

    // The header size is only trusted once that many cells have been read
    let total = rows * cols;
    let mut states = Vec::new();
    for (index, token) in tokens.by_ref().take(total).enumerate() {
        let state = match token {
            "0" => CellState::Dead,
            "1" => CellState::Alive,
            other => {
                return Err(LifeError::MalformedInput(format!(
                    "invalid cell value '{}' at ({}, {}); only 0 and 1 are allowed",
                    other,
                    index / cols,
                    index % cols
                )))
            }
        };
        states.push(state);
    }

    if states.len() < total {
        return Err(LifeError::MalformedInput(format!(
            "expected {} cells, found {}",
            total,
            states.len()
        )));
    }

    Ok(Grid::new(rows, cols, toroidal).with_states(states))
}

/// Convert a grid to its snapshot representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = format!("{} {}\n", grid.rows(), grid.cols());

    if grid.cols() > 0 {
        for row in grid.cell_slice().chunks(grid.cols()) {
            let line = row
                .iter()
                .map(|cell| if cell.is_alive() { '1' } else { '0' })
                .join(" ");
            result.push_str(&line);
            result.push('\n');
        }
    }

    result
}

/// Save a grid snapshot to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let path = path.as_ref();

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| LifeError::io(parent, e))?;
    }

    std::fs::write(path, grid_to_string(grid)).map_err(|e| LifeError::io(path, e))
}

/// File name for an exported generation: `<base>_<iteration>.txt`
pub fn generation_file_name(base_name: &str, iteration: usize) -> PathBuf {
    PathBuf::from(format!("{}_{}.txt", base_name, iteration))
}

/// Create example snapshot files for testing
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| LifeError::io(dir, e))?;

    let examples: [(&str, &[&str]); 4] = [
        ("glider.txt", &["00100", "10100", "01100", "00000", "00000"]),
        ("blinker.txt", &["00000", "00000", "01110", "00000", "00000"]),
        ("block.txt", &["0000", "0110", "0110", "0000"]),
        ("beacon.txt", &["110000", "110000", "001100", "001100"]),
    ];

    for (file_name, pattern) in examples {
        let rows = pattern
            .iter()
            .map(|line| line.chars().map(|ch| ch == '1').collect())
            .collect();
        let grid = Grid::from_rows(rows, false)?;
        save_grid_to_file(&grid, dir.join(file_name))?;
    }

    Ok(())
}
