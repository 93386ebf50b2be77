//! Game of Life core functionality

pub mod cell;
pub mod engine;
pub mod grid;
pub mod io;
pub mod rules;

pub use cell::{Cell, CellState};
pub use engine::{Simulation, SimulationStatus};
pub use grid::Grid;
pub use io::{
    create_example_grids, generation_file_name, grid_to_string, load_grid_from_file,
    parse_grid_from_string, save_grid_to_file,
};
pub use rules::{rule_from_name, ConwayRule, LifeLikeRule, Rule};
