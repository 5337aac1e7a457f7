use tempfile::TempDir;
use wallplotter_camtools::{
    check_pack_quality, fit_to_canvas, load_svg, sample_pack, sequence, SamplerParams,
};
use wallplotter_core::{CanvasGeometry, Error, Offset, Size};

#[test]
fn test_svg_file_to_canvas_pack() {
    let dir = TempDir::new().unwrap();
    let svg_path = dir.path().join("square_and_curve.svg");
    std::fs::write(
        &svg_path,
        r#"<?xml version="1.0"?>
<svg viewBox="0 0 100 100" xmlns="http://www.w3.org/2000/svg">
  <path d="M 10 10 H 90 V 90 H 10 Z"/>
  <path d="M 20 50 C 20 20, 80 20, 80 50"/>
</svg>"#,
    )
    .unwrap();

    let doc = load_svg(&svg_path).unwrap();
    assert_eq!(doc.curves.len(), 2);

    let params = SamplerParams::new(1.0, 1e-3).unwrap();
    let sampled = sample_pack(&doc.curves, &params);
    // The closed square keeps its four corners plus the closing point.
    assert_eq!(sampled.paths()[0].len(), 5);

    let canvas = CanvasGeometry {
        size: Size::new(210.0, 297.0),
        offset: Offset::new(345.0, 335.0),
        padding: 10.0,
        tolerance: 1.0,
    };
    let pack = sequence(fit_to_canvas(&sampled, &canvas).unwrap());
    assert_eq!(pack.len(), 2);

    let report = check_pack_quality(&pack, None, 0.0);
    assert!(report.is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_svg(std::path::Path::new("/nonexistent/drawing.svg")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
