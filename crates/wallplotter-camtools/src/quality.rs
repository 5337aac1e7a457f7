//! Post-sequencing quality scan
//!
//! Walks every move the pen will make, inside strokes and across the
//! seams between them, and reports moves shorter than a threshold. Such
//! moves are too small for the motors to resolve reliably. The scan is
//! advisory and never fails.

use tracing::info;
use wallplotter_core::{CanvasPoint, PlanarPoint, PlotPack, QualityReport, QualityWarning};

/// Report every move shorter than `threshold` mm.
///
/// `start` is the pen position before the first move, when it lies on the
/// canvas. Without it the first point of the pack is not checked.
pub fn check_pack_quality(
    pack: &PlotPack<CanvasPoint>,
    start: Option<CanvasPoint>,
    threshold: f64,
) -> QualityReport {
    info!(threshold, "Checking the quality of produced paths");
    let mut report = QualityReport::new();
    let mut previous = start;

    for (path_index, path) in pack.iter().enumerate() {
        for (point_index, point) in path.iter().enumerate() {
            if let Some(prev) = previous {
                let distance = prev.distance_to(point);
                if distance < threshold {
                    report.push(QualityWarning::ShortMove {
                        path: path_index,
                        point: point_index,
                        distance,
                    });
                }
            }
            previous = Some(*point);
        }
    }

    info!(short_moves = report.len(), "Checking the quality of produced paths - done");
    report
}
