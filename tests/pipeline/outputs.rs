use tempfile::TempDir;
use wallplotter::pipeline::{CONVERTED_PREVIEW_FILE, INSTRUCTIONS_FILE, INSTRUCTIONS_PREVIEW_FILE};
use wallplotter::{convert_file, simulate_file, write_outputs, Config};

const DRAWING: &str = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <path d="M 10 10 H 90 V 90 H 10 Z"/>
  <path d="M 30 50 Q 50 20 70 50"/>
</svg>"#;

#[test]
fn test_convert_writes_three_files() {
    let dir = TempDir::new().unwrap();
    let svg = dir.path().join("drawing.svg");
    std::fs::write(&svg, DRAWING).unwrap();

    let config = Config::default();
    let conversion = convert_file(&svg, &config).unwrap();
    let out_dir = dir.path().join("out");
    let files = write_outputs(&conversion, &config, &out_dir, true).unwrap();

    assert_eq!(files.converted_preview, out_dir.join(CONVERTED_PREVIEW_FILE));
    assert_eq!(files.instructions_preview, out_dir.join(INSTRUCTIONS_PREVIEW_FILE));
    assert_eq!(files.instructions, out_dir.join(INSTRUCTIONS_FILE));
    for path in [&files.converted_preview, &files.instructions_preview, &files.instructions] {
        assert!(path.exists(), "{} missing", path.display());
    }
    for raster in &files.rasters {
        assert!(raster.exists(), "{} missing", raster.display());
    }

    let text = std::fs::read_to_string(&files.instructions).unwrap();
    assert_eq!(text.lines().next(), Some("2"));
    let preview = std::fs::read_to_string(&files.converted_preview).unwrap();
    // Board, two anchors, canvas and two strokes.
    assert_eq!(preview.matches("<polyline").count(), 6);
}

#[test]
fn test_simulate_replays_written_instructions() {
    let dir = TempDir::new().unwrap();
    let svg = dir.path().join("drawing.svg");
    std::fs::write(&svg, DRAWING).unwrap();

    let config = Config::default();
    let conversion = convert_file(&svg, &config).unwrap();
    let files = write_outputs(&conversion, &config, dir.path(), false).unwrap();

    let preview = dir.path().join("replay.svg");
    let plotted = simulate_file(&files.instructions, &preview, &config).unwrap();
    assert!(preview.exists());
    assert!(plotted.same_shape(&conversion.drawing));
}

#[test]
fn test_missing_svg_reports_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.svg");
    let err = convert_file(&missing, &Config::default()).unwrap_err();
    assert!(format!("{err:#}").contains("nope.svg"));
}
