use proptest::prelude::*;
use wallplotter_camtools::{sample_curve, sample_pack, CurvePath, CurveSegment, SamplerParams};
use wallplotter_core::SourcePoint;

#[test]
fn test_straight_curve_yields_two_points() {
    let start = SourcePoint::new(0.0, 0.0);
    let end = SourcePoint::new(60.0, 80.0);
    let line = CurveSegment::line(start, end);
    let params = SamplerParams::new(10.0, 1e-3).unwrap();

    let path = sample_curve(&line, &params).unwrap();
    assert_eq!(path.points(), &[start, end]);
}

#[test]
fn test_circle_keeps_interior_points() {
    let curves = wallplotter_camtools::parse_path_data("M 0 0 A 50 50 0 1 1 0 0.001").unwrap();
    let params = SamplerParams::new(1.0, 1e-3).unwrap();
    let path = sample_curve(&curves[0], &params).unwrap();
    // Roughly one point per millimetre of circumference.
    assert!(path.len() > 250, "got {} points", path.len());
}

#[test]
fn test_sample_pack_drops_degenerate_curves() {
    let params = SamplerParams::new(1.0, 1e-3).unwrap();
    let empty = CurvePath::new(SourcePoint::new(3.0, 3.0));
    let mut line = CurvePath::new(SourcePoint::new(0.0, 0.0));
    line.push(CurveSegment::line(
        SourcePoint::new(0.0, 0.0),
        SourcePoint::new(5.0, 0.0),
    ));

    let pack = sample_pack(&[empty, line], &params);
    assert_eq!(pack.len(), 1);
    assert_eq!(pack.point_count(), 2);
}

proptest! {
    #[test]
    fn straight_lines_collapse_to_endpoints(
        x0 in -500.0f64..500.0,
        y0 in -500.0f64..500.0,
        dx in 0.01f64..400.0,
        dy in -400.0f64..400.0,
        flip in any::<bool>(),
        distance in 0.05f64..50.0,
    ) {
        let dx = if flip { -dx } else { dx };
        let start = SourcePoint::new(x0, y0);
        let end = SourcePoint::new(x0 + dx, y0 + dy);
        let params = SamplerParams::new(distance, 1e-3).unwrap();

        let path = sample_curve(&CurveSegment::line(start, end), &params).unwrap();
        prop_assert_eq!(path.len(), 2);
        prop_assert_eq!(path.first(), start);
        prop_assert_eq!(path.last(), end);
    }
}
