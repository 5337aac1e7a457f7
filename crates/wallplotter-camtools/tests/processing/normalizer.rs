use wallplotter_camtools::{fit_scale, normalize};
use wallplotter_core::{
    Bounds, CanvasGeometry, Offset, PlanarPoint, PlotPack, PlotPath, Size, SourcePoint,
};

fn canvas() -> CanvasGeometry {
    CanvasGeometry {
        size: Size::new(210.0, 297.0),
        offset: Offset::new(345.0, 335.0),
        padding: 10.0,
        tolerance: 1.0,
    }
}

fn source_pack() -> PlotPack<SourcePoint> {
    let triangle = vec![
        SourcePoint::new(-40.0, 12.0),
        SourcePoint::new(360.0, 12.0),
        SourcePoint::new(160.0, 112.0),
    ];
    let tick = vec![SourcePoint::new(0.0, 50.0), SourcePoint::new(10.0, 60.0)];
    PlotPack::new(vec![
        PlotPath::new(triangle).unwrap(),
        PlotPath::new(tick).unwrap(),
    ])
}

#[test]
fn test_fit_scale_touches_padded_edge_and_centers() {
    let source = source_pack();
    let c = canvas();
    let bounds = Bounds::of_pack(&source).unwrap();
    let scale = fit_scale(&bounds, &c).unwrap();
    let out = normalize(&source, &bounds, scale, &c).unwrap();
    let fitted = Bounds::of_pack(&out).unwrap();

    // The wide drawing fills the padded width exactly.
    assert!((fitted.min_x() - 10.0).abs() < 1e-9);
    assert!((fitted.max_x() - 200.0).abs() < 1e-9);

    // It is centered vertically.
    let top_gap = fitted.min_y();
    let bottom_gap = c.size.height - fitted.max_y();
    assert!((top_gap - bottom_gap).abs() < 1e-9);

    // Aspect ratio is preserved.
    let before = bounds.width() / bounds.height();
    let after = fitted.width() / fitted.height();
    assert!((before - after).abs() < 1e-9);
}

#[test]
fn test_tall_drawing_fills_height() {
    let tall = PlotPack::new(vec![PlotPath::new(vec![
        SourcePoint::new(0.0, 0.0),
        SourcePoint::new(1.0, 10.0),
    ])
    .unwrap()]);
    let c = canvas();
    let bounds = Bounds::of_pack(&tall).unwrap();
    let scale = fit_scale(&bounds, &c).unwrap();
    let out = normalize(&tall, &bounds, scale, &c).unwrap();

    let first = out.paths()[0].first();
    let last = out.paths()[0].last();
    assert!((first.y() - 10.0).abs() < 1e-9);
    assert!((last.y() - 287.0).abs() < 1e-9);
    assert!(((first.x() + last.x()) / 2.0 - 105.0).abs() < 1e-9);
}

#[test]
fn test_point_outside_canvas_is_rejected() {
    let source = source_pack();
    let c = canvas();
    let bounds = Bounds::of_pack(&source).unwrap();
    // Twice the fit scale pushes points off the paper.
    let scale = fit_scale(&bounds, &c).unwrap() * 2.0;
    let err = normalize(&source, &bounds, scale, &c).unwrap_err();
    assert!(err.is_boundary_error());
}
