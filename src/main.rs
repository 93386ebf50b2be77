//! Console driver for the Game of Life simulation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life_sim::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{create_example_grids, load_grid_from_file},
    run_simulation,
    utils::{ColorOutput, GridFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "game_of_life_sim")]
#[command(about = "Game of Life simulation engine")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation until it is stable or reaches the iteration bound
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Initial state file (overrides config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Base name for exported generations (overrides config)
        #[arg(short = 'b', long)]
        output_base: Option<String>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Maximum iterations (overrides config)
        #[arg(short = 'n', long)]
        max_iterations: Option<usize>,

        /// Wrap neighbors around the grid edges
        #[arg(short, long)]
        toroidal: bool,

        /// Rule: conway, highlife, seeds, day_and_night or a B../S.. rulestring
        #[arg(short, long)]
        rule: Option<String>,

        /// Do not write generation files
        #[arg(long)]
        no_export: bool,

        /// Print every generation
        #[arg(long)]
        show_generations: bool,

        /// Summary format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Create example configuration and input files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Print a grid snapshot with statistics
    Inspect {
        /// Snapshot file
        path: PathBuf,

        /// Treat the grid as toroidal
        #[arg(short, long)]
        toroidal: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            input,
            output_base,
            output_dir,
            max_iterations,
            toroidal,
            rule,
            no_export,
            show_generations,
            format,
        } => {
            let overrides = CliOverrides {
                max_iterations,
                toroidal,
                rule,
                input_file: input,
                output_base_name: output_base,
                output_dir,
                no_export,
                format,
            };
            run_command(config, &overrides, show_generations)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Inspect { path, toroidal } => inspect_command(path, toroidal),
    }
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        warn!(path = %config_path.display(), "config file not found, using defaults");
        Ok(Settings::default())
    }
}

fn run_command(config_path: PathBuf, overrides: &CliOverrides, show_generations: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;

    info!(
        input = %settings.input.initial_state_file.display(),
        rule = %settings.simulation.rule,
        max_iterations = settings.simulation.max_iterations,
        toroidal = settings.simulation.toroidal,
        "starting simulation"
    );

    let format = settings.output.format;
    let start_time = Instant::now();

    let report = run_simulation(settings, |iteration, grid| {
        if show_generations {
            println!("{}", GridFormatter::format_generation(iteration, grid));
        }
    })?;

    match format {
        OutputFormat::Json => {
            println!("{}", report.to_json().context("Failed to serialize run report")?);
        }
        OutputFormat::Text => {
            println!(
                "Simulation finished ({}) after {} iteration(s) in {:.3}s",
                ColorOutput::status(report.status),
                report.iterations,
                start_time.elapsed().as_secs_f64()
            );
            println!("{}", report);
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/patterns");
    let output_dir = directory.join("output/generations");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&input_dir).context("Failed to create example grids")?;
    println!("Created example patterns in: {}", input_dir.display());

    // Toroidal glider variant
    let mut torus_config = Settings::default();
    torus_config.simulation.toroidal = true;
    torus_config.simulation.max_iterations = 40;
    torus_config.output.output_base_name = "glider_torus".to_string();
    torus_config
        .to_file(config_dir.join("torus.yaml"))
        .context("Failed to create torus configuration")?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your initial states to {}", input_dir.display());
    println!("3. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

fn inspect_command(path: PathBuf, toroidal: bool) -> Result<()> {
    let grid = load_grid_from_file(&path, toroidal)
        .with_context(|| format!("Failed to load grid from {}", path.display()))?;

    println!("Grid ({}x{}):", grid.rows(), grid.cols());
    println!("{}", GridFormatter::format_grid_with_coords(&grid));
    println!("{}", GridFormatter::format_grid_statistics(&grid));

    Ok(())
}
