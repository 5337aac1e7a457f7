use wallplotter_core::{CanvasPoint, PlotPack, PlotPath};
use wallplotter_kinematics::{
    Calibration, GeneratorParams, InstructionGenerator, InstructionPack, KinematicsModel,
};
use wallplotter_settings::{Config, InstructionPolicy};
use wallplotter_visualizer::{MockPlotter, SimulationParams};

fn arc(config: &Config, steps: usize) -> PlotPack<CanvasPoint> {
    let canvas = config.canvas_geometry();
    let points = (0..=steps)
        .map(|i| {
            let t = std::f64::consts::PI * i as f64 / steps as f64;
            CanvasPoint::new(105.0 + 80.0 * t.cos(), 148.5 + 80.0 * t.sin(), &canvas).unwrap()
        })
        .collect();
    PlotPack::new(vec![PlotPath::new(points).unwrap()])
}

#[test]
fn test_timed_replay_matches_generator_state() {
    let mut config = Config::default();
    config.instructions.policy = InstructionPolicy::Timed;
    let model =
        KinematicsModel::new(config.workspace().unwrap(), config.motor.mm_per_degree).unwrap();
    let calibration =
        Calibration::from_measurement(&model, config.calibration.pen_position()).unwrap();

    // Start the arc at the pen position so the first move is short.
    let mut pack = arc(&config, 250);
    let canvas = config.canvas_geometry();
    let start = PlotPath::new(vec![CanvasPoint::new(148.0, 160.0, &canvas).unwrap()]).unwrap();
    pack = PlotPack::new(std::iter::once(start).chain(pack.into_paths()).collect());

    let generated = InstructionGenerator::new(
        &model,
        &calibration,
        GeneratorParams {
            policy: config.instructions.policy,
            ..GeneratorParams::default()
        },
    )
    .unwrap()
    .generate(&pack)
    .unwrap();
    assert!(matches!(generated.instructions, InstructionPack::Timed(_)));

    let mut plotter =
        MockPlotter::with_params(model, calibration, SimulationParams::from_config(&config));
    let result = plotter.verify(&generated.instructions, &pack).unwrap();

    // Replay reproduces the state the generator tracked, so both agree on drift.
    assert_eq!(result.drift_count(), generated.report.drift_count());
    assert!(result.max_deviation < config.simulation.drift_tolerance_mm);
}
