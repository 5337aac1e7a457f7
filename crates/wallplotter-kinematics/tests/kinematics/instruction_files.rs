use tempfile::TempDir;
use wallplotter_core::{CanvasPoint, Error, FileFormatError, PlotPack, PlotPath};
use wallplotter_kinematics::{
    load_instructions, save_instructions, Calibration, GeneratorParams, InstructionGenerator,
    InstructionPack, KinematicsModel,
};
use wallplotter_settings::{Config, InstructionPolicy};

fn generate(policy: InstructionPolicy) -> InstructionPack {
    let config = Config::default();
    let model =
        KinematicsModel::new(config.workspace().unwrap(), config.motor.mm_per_degree).unwrap();
    let calibration =
        Calibration::from_measurement(&model, config.calibration.pen_position()).unwrap();
    let canvas = config.canvas_geometry();
    let stroke = |points: &[(f64, f64)]| {
        PlotPath::new(
            points
                .iter()
                .map(|&(x, y)| CanvasPoint::new(x, y, &canvas).unwrap())
                .collect(),
        )
        .unwrap()
    };
    let pack = PlotPack::new(vec![
        stroke(&[(10.0, 10.0), (50.0, 10.0), (50.0, 80.0)]),
        stroke(&[(120.0, 200.0), (180.0, 260.0)]),
    ]);
    let params = GeneratorParams {
        policy,
        ..GeneratorParams::default()
    };
    InstructionGenerator::new(&model, &calibration, params)
        .unwrap()
        .generate(&pack)
        .unwrap()
        .instructions
}

#[test]
fn test_absolute_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("3_motor_instructions.txt");
    let pack = generate(InstructionPolicy::Absolute);

    save_instructions(&path, &pack, 4).unwrap();
    let loaded = load_instructions(&path).unwrap();

    let (InstructionPack::Absolute(written), InstructionPack::Absolute(read)) = (&pack, &loaded)
    else {
        panic!("expected absolute packs");
    };
    assert_eq!(loaded.path_lengths(), vec![3, 2]);
    for (a, b) in written.iter().zip(read) {
        for (x, y) in a.instructions().iter().zip(b.instructions()) {
            assert!((x.left_degrees - y.left_degrees).abs() < 1e-4);
            assert!((x.right_degrees - y.right_degrees).abs() < 1e-4);
        }
    }
}

#[test]
fn test_timed_file_keeps_speeds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("timed.txt");
    let pack = generate(InstructionPolicy::Timed);

    save_instructions(&path, &pack, 2).unwrap();
    let loaded = load_instructions(&path).unwrap();
    assert_eq!(loaded.policy(), InstructionPolicy::Timed);

    let (InstructionPack::Timed(written), InstructionPack::Timed(read)) = (&pack, &loaded) else {
        panic!("expected timed packs");
    };
    for (a, b) in written.iter().zip(read) {
        for (x, y) in a.instructions().iter().zip(b.instructions()) {
            assert_eq!((x.left_speed, x.right_speed), (y.left_speed, y.right_speed));
            // Durations are summed on replay, so they survive unrounded.
            assert_eq!(x.duration, y.duration);
        }
    }
}

#[test]
fn test_first_line_is_path_count() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("count.txt");
    save_instructions(&path, &generate(InstructionPolicy::Absolute), 4).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().next(), Some("2"));
    assert!(text.ends_with("\n\n"));
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_instructions(&dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_load_truncated_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("truncated.txt");
    std::fs::write(&path, "2\n1.0,2.0\n\n").unwrap();
    let err = load_instructions(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::FileFormat(FileFormatError::PathCount {
            expected: 2,
            found: 1
        })
    ));
}
