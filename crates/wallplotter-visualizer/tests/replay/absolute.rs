use wallplotter_core::{CanvasPoint, PlanarPoint, PlotPack, PlotPath};
use wallplotter_kinematics::{Calibration, GeneratorParams, InstructionGenerator, KinematicsModel};
use wallplotter_settings::Config;
use wallplotter_visualizer::{MockPlotter, PreviewScene};

fn square(config: &Config) -> PlotPack<CanvasPoint> {
    let canvas = config.canvas_geometry();
    let corners = [(10.0, 10.0), (200.0, 10.0), (200.0, 287.0), (10.0, 287.0), (10.0, 10.0)];
    let stroke = PlotPath::new(
        corners
            .iter()
            .map(|&(x, y)| CanvasPoint::new(x, y, &canvas).unwrap())
            .collect(),
    )
    .unwrap();
    let dot = PlotPath::new(vec![CanvasPoint::new(105.0, 148.5, &canvas).unwrap()]).unwrap();
    PlotPack::new(vec![stroke, dot])
}

#[test]
fn test_absolute_replay_lands_on_targets() {
    let config = Config::default();
    let model =
        KinematicsModel::new(config.workspace().unwrap(), config.motor.mm_per_degree).unwrap();
    let calibration =
        Calibration::from_measurement(&model, config.calibration.pen_position()).unwrap();
    let pack = square(&config);

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

    let mut plotter = MockPlotter::new(model, calibration);
    let result = plotter.verify(&generated.instructions, &pack).unwrap();

    assert_eq!(result.drift_count(), 0);
    assert!(result.max_deviation < 1e-6);
    assert!(result.plotted.same_shape(&pack));
    assert_eq!(result.deviations.len(), 2);

    let corner = result.plotted.paths()[0].points()[1];
    assert!((corner.x() - 545.0).abs() < 1e-6);
    assert!((corner.y() - 345.0).abs() < 1e-6);
}

#[test]
fn test_replayed_scene_has_every_stroke() {
    let config = Config::default();
    let workspace = config.workspace().unwrap();
    let model = KinematicsModel::new(workspace, config.motor.mm_per_degree).unwrap();
    let calibration =
        Calibration::from_measurement(&model, config.calibration.pen_position()).unwrap();
    let pack = square(&config);
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

    let plotted = MockPlotter::new(model, calibration)
        .plot(&generated.instructions)
        .unwrap();
    let replayed = PreviewScene::new(&workspace, &plotted);
    let intended = PreviewScene::from_canvas_pack(&workspace, &pack).unwrap();
    assert_eq!(replayed.stroke_count(), 2);
    assert_eq!(intended.stroke_count(), 2);
}
