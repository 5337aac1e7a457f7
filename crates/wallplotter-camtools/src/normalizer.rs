//! Path Normalizer
//!
//! Fits a sampled drawing into the padded canvas with one uniform scale
//! factor and centers it on both axes.

use tracing::{debug, info};
use wallplotter_core::{
    Axis, Bounds, CanvasGeometry, CanvasPoint, GeometryError, ParameterError, PlotPack,
    SourcePoint,
};

/// Uniform scale that fits `bounds` into the padded canvas.
///
/// Fails when the drawing has no extent on an axis or when the padding
/// leaves no drawable area.
pub fn fit_scale(bounds: &Bounds, canvas: &CanvasGeometry) -> wallplotter_core::Result<f64> {
    let target = canvas.usable_size();
    if target.width <= 0.0 || target.height <= 0.0 {
        return Err(ParameterError::InvalidValue {
            name: "canvas.padding".to_string(),
            reason: format!(
                "padding {} leaves no drawable area on a {}x{} canvas",
                canvas.padding, canvas.size.width, canvas.size.height
            ),
        }
        .into());
    }

    if bounds.width() <= 0.0 {
        return Err(GeometryError::DegenerateBounds { axis: Axis::X }.into());
    }
    if bounds.height() <= 0.0 {
        return Err(GeometryError::DegenerateBounds { axis: Axis::Y }.into());
    }

    let scale_x = target.width / bounds.width();
    let scale_y = target.height / bounds.height();
    let scale = scale_x.min(scale_y);
    debug!(scale_x, scale_y, scale, "Computed fit scale");
    Ok(scale)
}

/// Map a source pack into canvas space.
///
/// `bounds` and `scale` come from [`fit_scale`], possibly computed on an
/// earlier sampling pass of the same drawing.
pub fn normalize(
    pack: &PlotPack<SourcePoint>,
    bounds: &Bounds,
    scale: f64,
    canvas: &CanvasGeometry,
) -> wallplotter_core::Result<PlotPack<CanvasPoint>> {
    info!(paths = pack.len(), scale, "Normalizing paths");

    let origin_x = canvas.size.width / 2.0 - bounds.width() * scale / 2.0;
    let origin_y = canvas.size.height / 2.0 - bounds.height() * scale / 2.0;

    let normalized = pack.try_map(|p| {
        CanvasPoint::new(
            origin_x + (p.x - bounds.min_x()) * scale,
            origin_y + (p.y - bounds.min_y()) * scale,
            canvas,
        )
    })?;

    info!(points = normalized.point_count(), "Normalizing paths - done");
    Ok(normalized)
}

/// Compute bounds and scale, then normalize in one pass.
pub fn fit_to_canvas(
    pack: &PlotPack<SourcePoint>,
    canvas: &CanvasGeometry,
) -> wallplotter_core::Result<PlotPack<CanvasPoint>> {
    let bounds = Bounds::of_pack(pack)?;
    let scale = fit_scale(&bounds, canvas)?;
    normalize(pack, &bounds, scale, canvas)
}
