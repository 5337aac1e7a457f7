use proptest::prelude::*;
use wallplotter_core::{
    BoardPoint, BoundaryError, CanvasGeometry, CanvasPoint, DrawableSide, Offset, PlanarPoint,
    Size, Workspace,
};

fn canvas() -> CanvasGeometry {
    CanvasGeometry {
        size: Size::new(200.0, 200.0),
        offset: Offset::new(100.0, 300.0),
        padding: 0.0,
        tolerance: 1.0,
    }
}

fn workspace() -> Workspace {
    Workspace::new(
        Size::new(400.0, 600.0),
        canvas(),
        Offset::new(0.0, 0.0),
        Offset::new(400.0, 0.0),
        DrawableSide::Below,
    )
    .unwrap()
}

#[test]
fn test_out_of_range_canvas_point_reports_space() {
    let err = CanvasPoint::new(250.0, 10.0, &canvas()).unwrap_err();
    match &err {
        BoundaryError::OutOfRange { x, max_x, .. } => {
            assert_eq!(*x, 250.0);
            assert_eq!(*max_x, 201.0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("canvas"));
}

#[test]
fn test_board_point_to_canvas_outside_paper_fails() {
    let ws = workspace();
    let b = BoardPoint::new(10.0, 10.0, &ws.board()).unwrap();
    assert!(b.to_canvas(&ws).is_err());
}

proptest! {
    #[test]
    fn canvas_board_translation_is_exact(x in 0.0f64..200.0, y in 0.0f64..200.0) {
        let ws = workspace();
        let p = CanvasPoint::new(x, y, &ws.canvas()).unwrap();
        let b = p.to_board(&ws).unwrap();
        prop_assert!((b.x() - (x + 100.0)).abs() < 1e-9);
        prop_assert!((b.y() - (y + 300.0)).abs() < 1e-9);
    }
}
