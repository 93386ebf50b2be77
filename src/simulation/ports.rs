//! Loader and exporter seams between the engine and the filesystem

use crate::error::Result;
use crate::game_of_life::{generation_file_name, load_grid_from_file, save_grid_to_file, Grid};
use std::path::{Path, PathBuf};
use tracing::info;

/// Source of initial grids
pub trait GridLoader {
    fn load_grid(&self, path: &Path, toroidal: bool) -> Result<Grid>;
}

/// Sink for generations produced during a run
pub trait GridExporter {
    /// Write `grid` as generation `iteration` and return where it went
    fn export_grid(&self, grid: &Grid, base_name: &str, iteration: usize) -> Result<PathBuf>;
}

/// Reads snapshot text files
#[derive(Debug, Clone, Copy, Default)]
pub struct FileGridLoader;

impl GridLoader for FileGridLoader {
    fn load_grid(&self, path: &Path, toroidal: bool) -> Result<Grid> {
        load_grid_from_file(path, toroidal)
    }
}

/// Writes one snapshot file per generation into a directory
#[derive(Debug, Clone)]
pub struct FileGridExporter {
    output_directory: PathBuf,
}

impl FileGridExporter {
    pub fn new<P: Into<PathBuf>>(output_directory: P) -> Self {
        Self {
            output_directory: output_directory.into(),
        }
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }
}

impl GridExporter for FileGridExporter {
    fn export_grid(&self, grid: &Grid, base_name: &str, iteration: usize) -> Result<PathBuf> {
        let path = self
            .output_directory
            .join(generation_file_name(base_name, iteration));
        save_grid_to_file(grid, &path)?;
        info!(iteration, path = %path.display(), "generation exported");
        Ok(path)
    }
}
