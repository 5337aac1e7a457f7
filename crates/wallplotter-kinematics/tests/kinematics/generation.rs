use wallplotter_core::{CanvasPoint, PlotPack, PlotPath, QualityWarning};
use wallplotter_kinematics::{
    timed_command, Calibration, GeneratorParams, InstructionGenerator, InstructionPack,
    KinematicsModel, MoveKind, RopeLengths,
};
use wallplotter_settings::{Config, InstructionPolicy};

struct Rig {
    model: KinematicsModel,
    calibration: Calibration,
    config: Config,
}

fn rig() -> Rig {
    let config = Config::default();
    let model =
        KinematicsModel::new(config.workspace().unwrap(), config.motor.mm_per_degree).unwrap();
    let calibration =
        Calibration::from_measurement(&model, config.calibration.pen_position()).unwrap();
    Rig {
        model,
        calibration,
        config,
    }
}

fn line(rig: &Rig, from: (f64, f64), to: (f64, f64), steps: usize) -> PlotPack<CanvasPoint> {
    let canvas = rig.config.canvas_geometry();
    let points = (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            CanvasPoint::new(
                from.0 + (to.0 - from.0) * t,
                from.1 + (to.1 - from.1) * t,
                &canvas,
            )
            .unwrap()
        })
        .collect();
    PlotPack::new(vec![PlotPath::new(points).unwrap()])
}

#[test]
fn test_absolute_matches_forward_mapping() {
    let rig = rig();
    let pack = line(&rig, (20.0, 30.0), (150.0, 250.0), 10);
    let generated = InstructionGenerator::new(
        &rig.model,
        &rig.calibration,
        GeneratorParams::default(),
    )
    .unwrap()
    .generate(&pack)
    .unwrap();

    let InstructionPack::Absolute(paths) = &generated.instructions else {
        panic!("expected absolute instructions");
    };
    let initial = rig.calibration.initial_degrees();
    for (point, instruction) in pack.paths()[0].iter().zip(paths[0].instructions()) {
        let degrees = rig
            .model
            .degrees_for(&rig.model.canvas_rope_lengths(point).unwrap());
        assert!((instruction.left_degrees - (degrees.left - initial.left)).abs() < 1e-9);
        assert!((instruction.right_degrees - (degrees.right - initial.right)).abs() < 1e-9);
    }
}

#[test]
fn test_timed_small_steps_do_not_drift() {
    let rig = rig();
    // Start at the pen position so the travel move is trivial.
    let pack = line(&rig, (148.0, 160.0), (60.0, 40.0), 200);
    let params = GeneratorParams {
        policy: InstructionPolicy::Timed,
        ..GeneratorParams::default()
    };
    let generated = InstructionGenerator::new(&rig.model, &rig.calibration, params)
        .unwrap()
        .generate(&pack)
        .unwrap();

    assert_eq!(generated.report.drift_count(), 0);
    let InstructionPack::Timed(paths) = &generated.instructions else {
        panic!("expected timed instructions");
    };
    let moves: Vec<_> = paths[0].moves().collect();
    assert_eq!(moves.len(), 201);
    assert_eq!(moves[0].0, MoveKind::Travel);
    for (_, instruction) in &moves[1..] {
        assert!(instruction.left_speed.abs() == 100 || instruction.right_speed.abs() == 100);
        assert!(instruction.duration > 0.0);
    }
}

#[test]
fn test_short_actuation_warnings_are_advisory() {
    let rig = rig();
    // 100 steps over 10 mm: every draw move is well below the default minimum.
    let pack = line(&rig, (100.0, 100.0), (110.0, 100.0), 100);
    let generated = InstructionGenerator::new(
        &rig.model,
        &rig.calibration,
        GeneratorParams::default(),
    )
    .unwrap()
    .generate(&pack)
    .unwrap();

    assert_eq!(generated.instructions.path_lengths(), vec![101]);
    let short = generated
        .report
        .iter()
        .filter(|w| matches!(w, QualityWarning::ShortActuation { .. }))
        .count();
    assert_eq!(short, 100);
}

#[test]
fn test_timed_command_signs_follow_deltas() {
    let (cmd, _) = timed_command(&RopeLengths::new(-8.0, -2.0), 1000.0);
    assert_eq!((cmd.left_speed, cmd.right_speed), (-100, -25));
    assert!((cmd.duration - 0.008).abs() < 1e-12);
}
