//! End-to-end conversion
//!
//! SVG drawing in, motor instruction file and previews out:
//!
//! 1. sample every curve at the configured spacing and fit the result
//!    into the canvas to learn the scale
//! 2. sample again with the spacing divided by that scale, so points end
//!    up the configured distance apart on paper, then fit and normalize
//!    the finer pass on its own bounds
//! 3. sequence the strokes and scan for moves that are too short
//! 4. generate instructions and replay them on the mock plotter

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;
use wallplotter_camtools::{
    check_pack_quality, fit_scale, load_svg, normalize, sample_pack, sequence, SamplerParams,
    SvgDocument,
};
use wallplotter_core::{
    BoardPoint, Bounds, CanvasPoint, GeometryError, PlotPack, QualityReport, Result,
};
use wallplotter_kinematics::{
    load_instructions, save_instructions, Calibration, GeneratorParams, InstructionGenerator,
    InstructionPack, KinematicsModel,
};
use wallplotter_settings::Config;
use wallplotter_visualizer::{MockPlotter, PreviewScene, SimulationParams, SimulationReport};

pub const CONVERTED_PREVIEW_FILE: &str = "1_preview_converted.svg";
pub const INSTRUCTIONS_PREVIEW_FILE: &str = "2_preview_instructions.svg";
pub const INSTRUCTIONS_FILE: &str = "3_motor_instructions.txt";

/// Raster preview resolution
const PIXELS_PER_MM: f64 = 1.0;

/// Everything a conversion produces.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Sequenced drawing on the canvas
    pub drawing: PlotPack<CanvasPoint>,
    pub instructions: InstructionPack,
    pub simulation: SimulationReport,
    /// Warnings from every stage, in pipeline order
    pub report: QualityReport,
}

/// Kinematics and calibration for one configuration.
fn rig(config: &Config) -> Result<(KinematicsModel, Calibration)> {
    let model = KinematicsModel::new(config.workspace()?, config.motor.mm_per_degree)?;
    let calibration = Calibration::from_measurement(&model, config.calibration.pen_position())?;
    Ok((model, calibration))
}

/// Generator settings taken from `config`.
pub fn generator_params(config: &Config) -> GeneratorParams {
    GeneratorParams {
        policy: config.instructions.policy,
        rope_mm_per_second: config.motor.rope_mm_per_second,
        min_move_mm: config.motor.min_move_mm,
        drift_tolerance_mm: config.simulation.drift_tolerance_mm,
    }
}

/// Sample and normalize `document` into the canvas.
pub fn sample_document(document: &SvgDocument, config: &Config) -> Result<PlotPack<CanvasPoint>> {
    let canvas = config.canvas_geometry();
    let params = SamplerParams::new(
        config.sampling.distance_mm,
        config.sampling.collinear_tolerance,
    )?;

    let first = sample_pack(&document.curves, &params);
    if first.is_empty() {
        return Err(GeometryError::EmptyPack.into());
    }
    let coarse_scale = fit_scale(&Bounds::of_pack(&first)?, &canvas)?;

    let fine = params.with_sampling_distance(params.sampling_distance() / coarse_scale)?;
    let second = sample_pack(&document.curves, &fine);
    // The finer pass can reach curve extrema the coarse one skipped.
    let bounds = Bounds::of_pack(&second)?;
    let scale = fit_scale(&bounds, &canvas)?;
    info!(
        first_pass = first.point_count(),
        second_pass = second.point_count(),
        coarse_scale,
        scale,
        "Resampled drawing at canvas resolution"
    );
    normalize(&second, &bounds, scale, &canvas)
}

/// Run every stage on a parsed document.
pub fn convert_document(document: &SvgDocument, config: &Config) -> Result<Conversion> {
    config.validate()?;
    let (model, calibration) = rig(config)?;
    let workspace = *model.workspace();

    let drawing = sequence(sample_document(document, config)?);

    let start = calibration.pen_position().to_canvas(&workspace).ok();
    let mut report = check_pack_quality(&drawing, start, config.sampling.quality_threshold_mm);

    let generated = InstructionGenerator::new(
        &model,
        &calibration,
        generator_params(config),
    )?
    .generate(&drawing)?;
    report.merge(generated.report);

    let simulation =
        MockPlotter::with_params(model, calibration, SimulationParams::from_config(config))
            .verify(&generated.instructions, &drawing)?;
    report.merge(simulation.report.clone());

    report.log_summary("conversion");
    Ok(Conversion {
        drawing,
        instructions: generated.instructions,
        simulation,
        report,
    })
}

/// Load an SVG file and convert it.
pub fn convert_file(svg: &Path, config: &Config) -> anyhow::Result<Conversion> {
    let document =
        load_svg(svg).with_context(|| format!("Failed to read drawing {}", svg.display()))?;
    convert_document(&document, config)
        .with_context(|| format!("Failed to convert {}", svg.display()))
}

/// Paths written by [`write_outputs`].
#[derive(Debug, Clone)]
pub struct OutputFiles {
    pub converted_preview: PathBuf,
    pub instructions_preview: PathBuf,
    pub instructions: PathBuf,
    pub rasters: Vec<PathBuf>,
}

/// Write the previews and the instruction file into `out_dir`.
pub fn write_outputs(
    conversion: &Conversion,
    config: &Config,
    out_dir: &Path,
    raster: bool,
) -> anyhow::Result<OutputFiles> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let workspace = config.workspace()?;

    let converted = PreviewScene::from_canvas_pack(&workspace, &conversion.drawing)?;
    let replayed = PreviewScene::new(&workspace, &conversion.simulation.plotted);

    let files = OutputFiles {
        converted_preview: out_dir.join(CONVERTED_PREVIEW_FILE),
        instructions_preview: out_dir.join(INSTRUCTIONS_PREVIEW_FILE),
        instructions: out_dir.join(INSTRUCTIONS_FILE),
        rasters: if raster {
            vec![
                out_dir.join(CONVERTED_PREVIEW_FILE).with_extension("png"),
                out_dir.join(INSTRUCTIONS_PREVIEW_FILE).with_extension("png"),
            ]
        } else {
            Vec::new()
        },
    };

    converted
        .save_svg(&files.converted_preview)
        .context("Failed to write the converted preview")?;
    replayed
        .save_svg(&files.instructions_preview)
        .context("Failed to write the instruction preview")?;
    save_instructions(
        &files.instructions,
        &conversion.instructions,
        config.instructions.precision,
    )
    .context("Failed to write motor instructions")?;

    for (scene, path) in [&converted, &replayed].into_iter().zip(&files.rasters) {
        scene
            .save_image(path, PIXELS_PER_MM)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(files)
}

/// Replay an instruction file and write a preview of what it draws.
pub fn simulate_file(
    instructions: &Path,
    preview: &Path,
    config: &Config,
) -> anyhow::Result<PlotPack<BoardPoint>> {
    config.validate()?;
    let pack = load_instructions(instructions)
        .with_context(|| format!("Failed to read {}", instructions.display()))?;
    let (model, calibration) = rig(config)?;

    let plotted =
        MockPlotter::with_params(model, calibration, SimulationParams::from_config(config))
            .plot(&pack)
            .context("Instructions leave the drawable area")?;
    PreviewScene::new(model.workspace(), &plotted)
        .save_svg(preview)
        .with_context(|| format!("Failed to write {}", preview.display()))?;
    Ok(plotted)
}
