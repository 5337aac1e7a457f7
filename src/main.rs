use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use wallplotter::{
    convert_file, init_logging, simulate_file, write_outputs, Config, InstructionPolicy,
    BUILD_DATE, VERSION,
};
use wallplotter_settings::default_config_path;

#[derive(Parser)]
#[command(name = "wallplotter")]
#[command(about = "Convert SVG line art into wall plotter motor instructions", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an SVG drawing into previews and a motor instruction file
    #[command(alias = "c")]
    Convert(ConvertArgs),

    /// Replay a motor instruction file and preview what it draws
    #[command(alias = "s")]
    Simulate(SimulateArgs),

    /// Write the default configuration to a file
    InitConfig {
        /// Destination; defaults to the platform config directory
        path: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input SVG file
    svg: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Distance between sampled points on paper, in mm
    #[arg(short, long)]
    sampling: Option<f64>,

    /// Decimal places in the instruction file
    #[arg(short, long)]
    precision: Option<usize>,

    /// Instruction policy: absolute or timed
    #[arg(long)]
    policy: Option<InstructionPolicy>,

    /// Also write PNG previews
    #[arg(long)]
    raster: bool,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Motor instruction file
    instructions: PathBuf,

    /// Preview SVG to write
    #[arg(long, default_value = "preview_simulated.svg")]
    preview: PathBuf,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let candidate = path
        .map(Path::to_path_buf)
        .or_else(|| default_config_path().filter(|p| p.exists()));
    match candidate {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            Config::load_from_file(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

fn convert(args: ConvertArgs, mut config: Config) -> Result<()> {
    if let Some(sampling) = args.sampling {
        config.sampling.distance_mm = sampling;
    }
    if let Some(precision) = args.precision {
        config.instructions.precision = precision;
    }
    if let Some(policy) = args.policy {
        config.instructions.policy = policy;
    }

    let conversion = convert_file(&args.svg, &config)?;
    let files = write_outputs(&conversion, &config, &args.out_dir, args.raster)?;

    info!(
        paths = conversion.drawing.len(),
        points = conversion.drawing.point_count(),
        max_deviation = conversion.simulation.max_deviation,
        warnings = conversion.report.len(),
        instructions = %files.instructions.display(),
        "Conversion complete"
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    info!(version = VERSION, built = BUILD_DATE, "wallplotter");

    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Convert(args) => convert(args, config),
        Commands::Simulate(args) => {
            let plotted = simulate_file(&args.instructions, &args.preview, &config)?;
            info!(
                paths = plotted.len(),
                points = plotted.point_count(),
                preview = %args.preview.display(),
                "Simulation complete"
            );
            Ok(())
        }
        Commands::InitConfig { path } => {
            let path = path
                .or_else(default_config_path)
                .context("No platform config directory; pass a path")?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            config.save_to_file(&path)?;
            info!(path = %path.display(), "Wrote configuration");
            Ok(())
        }
    }
}
