use proptest::prelude::*;
use wallplotter_core::{BoardPoint, PlanarPoint};
use wallplotter_kinematics::KinematicsModel;
use wallplotter_settings::Config;

fn model() -> KinematicsModel {
    let config = Config::default();
    KinematicsModel::new(config.workspace().unwrap(), config.motor.mm_per_degree).unwrap()
}

proptest! {
    #[test]
    fn prop_inverse_undoes_forward(x in 60.0f64..850.0, y in 100.0f64..1200.0) {
        let m = model();
        let p = BoardPoint::new(x, y, &m.workspace().board()).unwrap();
        let back = m.position_for(&m.rope_lengths(&p)).unwrap();
        prop_assert!(back.distance_to(&p) < 1e-6, "{:?} came back as {:?}", p, back);
    }

    #[test]
    fn prop_degrees_round_trip(x in 60.0f64..850.0, y in 100.0f64..1200.0) {
        let m = model();
        let p = BoardPoint::new(x, y, &m.workspace().board()).unwrap();
        let lengths = m.lengths_for(&m.degrees_for(&m.rope_lengths(&p)));
        let back = m.position_for(&lengths).unwrap();
        prop_assert!(back.distance_to(&p) < 1e-6);
    }
}

#[test]
fn test_canvas_corners_round_trip() {
    let m = model();
    let canvas = m.workspace().canvas();
    for (x, y) in [
        (0.0, 0.0),
        (canvas.size.width, 0.0),
        (0.0, canvas.size.height),
        (canvas.size.width, canvas.size.height),
    ] {
        let point = wallplotter_core::CanvasPoint::new(x, y, &canvas).unwrap();
        let board = point.to_board(m.workspace()).unwrap();
        let back = m.position_for(&m.canvas_rope_lengths(&point).unwrap()).unwrap();
        assert!(back.distance_to(&board) < 1e-6);
        let canvas_back = back.to_canvas(m.workspace()).unwrap();
        assert!((canvas_back.x() - x).abs() < 1e-6);
        assert!((canvas_back.y() - y).abs() < 1e-6);
    }
}
