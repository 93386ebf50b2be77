//! Display and output formatting utilities

use crate::game_of_life::{Grid, SimulationStatus};

/// Format grids for console output
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.rows() * (grid.cols() * 3 + 1));
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let alive = grid.is_alive(row, col).unwrap_or(false);
                output.push(if alive { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.cols() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for row in 0..grid.rows() {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.cols() {
                let alive = grid.is_alive(row, col).unwrap_or(false);
                output.push_str(if alive { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Header line plus compact board for one generation
    pub fn format_generation(iteration: usize, grid: &Grid) -> String {
        format!(
            "Generation {} (Living: {}):\n{}",
            iteration,
            grid.living_count(),
            Self::format_grid_compact(grid)
        )
    }

    /// Dimensions, topology, population and density
    pub fn format_grid_statistics(grid: &Grid) -> String {
        let total = grid.rows() * grid.cols();
        let density = if total > 0 {
            grid.living_count() as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        format!(
            "Grid Statistics:\n  Size: {}x{}\n  Topology: {}\n  Living cells: {}\n  Density: {:.1}%\n",
            grid.rows(),
            grid.cols(),
            if grid.is_toroidal() { "toroidal" } else { "bounded" },
            grid.living_count(),
            density
        )
    }
}

/// ANSI styling for console messages.
///
/// Plain text is returned when `NO_COLOR` is set or `TERM` is `dumb`.
pub struct ColorOutput;

impl ColorOutput {
    pub fn success(text: &str) -> String {
        paint(text, Color::Green, color_enabled())
    }

    pub fn info(text: &str) -> String {
        paint(text, Color::Blue, color_enabled())
    }

    /// Status label colored by how the run ended
    pub fn status(status: SimulationStatus) -> String {
        paint(&status.to_string(), status_color(status), color_enabled())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

fn status_color(status: SimulationStatus) -> Color {
    match status {
        SimulationStatus::Stable => Color::Green,
        SimulationStatus::MaxReached => Color::Yellow,
        SimulationStatus::NotStarted | SimulationStatus::Running => Color::Blue,
    }
}

fn color_enabled() -> bool {
    allows_color(std::env::var_os("NO_COLOR").is_some(), std::env::var("TERM").ok().as_deref())
}

fn allows_color(no_color: bool, term: Option<&str>) -> bool {
    !no_color && term != Some("dumb")
}

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{}m{}\x1b[0m", color.code(), text)
    } else {
        text.to_string()
    }
}
