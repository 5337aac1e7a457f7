use wallplotter_core::{
    CanvasGeometry, DrawableSide, Error, GeometryError, Offset, PlanarPoint, Size, Workspace,
};
use wallplotter_kinematics::{circle_intersections, KinematicsModel, RopeLengths};
use wallplotter_settings::MotorSettings;

fn narrow_model() -> KinematicsModel {
    let workspace = Workspace::new(
        Size::new(200.0, 200.0),
        CanvasGeometry {
            size: Size::new(100.0, 100.0),
            offset: Offset::new(0.0, 10.0),
            padding: 0.0,
            tolerance: 1.0,
        },
        Offset::new(0.0, 0.0),
        Offset::new(100.0, 0.0),
        DrawableSide::Below,
    )
    .unwrap();
    KinematicsModel::new(workspace, MotorSettings::default().mm_per_degree).unwrap()
}

#[test]
fn test_ropes_too_short_to_meet() {
    let err = narrow_model()
        .position_for(&RopeLengths::new(10.0, 10.0))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Geometry(GeometryError::NoIntersection { .. })
    ));
}

#[test]
fn test_one_rope_swallows_the_other() {
    let err = narrow_model()
        .position_for(&RopeLengths::new(500.0, 10.0))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Geometry(GeometryError::ContainedCircle { .. })
    ));
}

#[test]
fn test_taut_baseline_meets_once() {
    // Ropes exactly spanning the anchors put the pen on the baseline.
    let p = narrow_model()
        .position_for(&RopeLengths::new(40.0, 60.0))
        .unwrap();
    assert!((p.x() - 40.0).abs() < 1e-9);
    assert!(p.y().abs() < 1e-9);
}

#[test]
fn test_circle_intersections_no_solution() {
    let result = circle_intersections((0.0, 0.0), 10.0, (100.0, 0.0), 10.0);
    assert!(matches!(result, Err(GeometryError::NoIntersection { .. })));
}
