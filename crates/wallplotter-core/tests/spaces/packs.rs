use wallplotter_core::{Bounds, PlotPack, PlotPath, SourcePoint};

fn path(points: &[(f64, f64)]) -> PlotPath<SourcePoint> {
    PlotPath::new(points.iter().map(|&(x, y)| SourcePoint::new(x, y)).collect()).unwrap()
}

#[test]
fn test_bounds_ignore_path_boundaries() {
    let pack: PlotPack<SourcePoint> = vec![
        path(&[(0.0, 0.0), (10.0, 0.0)]),
        path(&[(5.0, -5.0), (5.0, 20.0)]),
    ]
    .into();

    let bounds = Bounds::of_pack(&pack).unwrap();
    assert_eq!(bounds.width(), 10.0);
    assert_eq!(bounds.height(), 25.0);
    assert!(bounds.min_x() <= bounds.max_x());
    assert!(bounds.min_y() <= bounds.max_y());
}

#[test]
fn test_points_iterate_in_plotting_order() {
    let pack = PlotPack::new(vec![path(&[(1.0, 1.0), (2.0, 2.0)]), path(&[(3.0, 3.0)])]);
    let xs: Vec<f64> = pack.points().map(|p| p.x).collect();
    assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    assert_eq!(pack.point_count(), 3);
}
