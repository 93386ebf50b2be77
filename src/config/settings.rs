//! Configuration settings for the simulation runner

use crate::game_of_life::rule_from_name;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Upper bound on generations; at least one step is always taken
    pub max_iterations: usize,
    /// Wrap neighbor lookups around the grid edges
    pub toroidal: bool,
    /// `conway`, a preset name, or a `B../S..` rulestring
    pub rule: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub initial_state_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write one snapshot file per generation
    pub export: bool,
    pub output_base_name: String,
    pub output_directory: PathBuf,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                max_iterations: 100,
                toroidal: false,
                rule: "conway".to_string(),
            },
            input: InputConfig {
                initial_state_file: PathBuf::from("input/patterns/glider.txt"),
            },
            output: OutputConfig {
                export: true,
                output_base_name: "output".to_string(),
                output_directory: PathBuf::from("output/generations"),
                format: OutputFormat::Text,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// Only the file contents are checked here; call [`Settings::validate`]
    /// once command line overrides have been merged.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        rule_from_name(&self.simulation.rule)
            .with_context(|| format!("Unknown rule '{}'", self.simulation.rule))?;

        if self.output.export && self.output.output_base_name.is_empty() {
            anyhow::bail!("Output base name must not be empty when export is enabled");
        }

        if !self.input.initial_state_file.exists() {
            anyhow::bail!(
                "Initial state file does not exist: {}",
                self.input.initial_state_file.display()
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(max_iterations) = cli_overrides.max_iterations {
            self.simulation.max_iterations = max_iterations;
        }
        if cli_overrides.toroidal {
            self.simulation.toroidal = true;
        }
        if let Some(ref rule) = cli_overrides.rule {
            self.simulation.rule = rule.clone();
        }
        if let Some(ref input_file) = cli_overrides.input_file {
            self.input.initial_state_file = input_file.clone();
        }
        if let Some(ref base_name) = cli_overrides.output_base_name {
            self.output.output_base_name = base_name.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if cli_overrides.no_export {
            self.output.export = false;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub max_iterations: Option<usize>,
    pub toroidal: bool,
    pub rule: Option<String>,
    pub input_file: Option<PathBuf>,
    pub output_base_name: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub no_export: bool,
    pub format: Option<OutputFormat>,
}
