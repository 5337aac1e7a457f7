//! Board previews
//!
//! Draws the board outline, both anchors, the paper and the strokes in
//! board millimetres, either as an SVG document or as a raster image.

use chrono::Utc;
use image::{Rgb, RgbImage};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;
use wallplotter_core::{
    BoardPoint, CanvasPoint, Error, PlanarPoint, PlotPack, Result, Size, Workspace,
};

/// Half the side of an anchor marker, in mm
const ANCHOR_MARKER_HALF_SIZE: f64 = 2.0;

/// What a layer of the scene shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Board,
    Anchor,
    Canvas,
    Stroke,
}

impl LayerKind {
    fn stroke_color(&self) -> &'static str {
        match self {
            Self::Board => "#808080",
            Self::Anchor => "#d03030",
            Self::Canvas => "#3060d0",
            Self::Stroke => "#000000",
        }
    }

    fn pixel(&self) -> Rgb<u8> {
        match self {
            Self::Board => Rgb([128, 128, 128]),
            Self::Anchor => Rgb([208, 48, 48]),
            Self::Canvas => Rgb([48, 96, 208]),
            Self::Stroke => Rgb([0, 0, 0]),
        }
    }
}

/// One polyline of the scene, in board millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub points: Vec<(f64, f64)>,
}

fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Vec<(f64, f64)> {
    vec![
        (x, y),
        (x + width, y),
        (x + width, y + height),
        (x, y + height),
        (x, y),
    ]
}

/// Everything a preview shows, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewScene {
    board: Size,
    layers: Vec<Layer>,
}

impl PreviewScene {
    /// Scene for strokes already in board space.
    pub fn new(workspace: &Workspace, strokes: &PlotPack<BoardPoint>) -> Self {
        let board = workspace.board();
        let canvas = workspace.canvas();
        let mut layers = vec![Layer {
            kind: LayerKind::Board,
            points: rectangle(0.0, 0.0, board.width, board.height),
        }];

        let h = ANCHOR_MARKER_HALF_SIZE;
        for anchor in [workspace.left_anchor(), workspace.right_anchor()] {
            layers.push(Layer {
                kind: LayerKind::Anchor,
                points: rectangle(anchor.x() - h, anchor.y() - h, 2.0 * h, 2.0 * h),
            });
        }

        layers.push(Layer {
            kind: LayerKind::Canvas,
            points: rectangle(
                canvas.offset.x,
                canvas.offset.y,
                canvas.size.width,
                canvas.size.height,
            ),
        });

        layers.extend(strokes.iter().map(|path| Layer {
            kind: LayerKind::Stroke,
            points: path.iter().map(|p| (p.x(), p.y())).collect(),
        }));

        Self { board, layers }
    }

    /// Scene for a canvas drawing, moved onto the board.
    pub fn from_canvas_pack(workspace: &Workspace, pack: &PlotPack<CanvasPoint>) -> Result<Self> {
        let strokes = pack.try_map(|p| p.to_board(workspace))?;
        Ok(Self::new(workspace, &strokes))
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn stroke_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|l| l.kind == LayerKind::Stroke)
            .count()
    }

    /// SVG document in board millimetres.
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            svg,
            "<!-- Wall plotter preview, generated {} -->",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"#,
            w = self.board.width,
            h = self.board.height
        );
        for layer in &self.layers {
            if layer.points.len() == 1 {
                let (x, y) = layer.points[0];
                let _ = writeln!(
                    svg,
                    r#"  <circle cx="{x:.3}" cy="{y:.3}" r="0.5" fill="{}"/>"#,
                    layer.kind.stroke_color()
                );
                continue;
            }
            let points = layer
                .points
                .iter()
                .map(|(x, y)| format!("{x:.3},{y:.3}"))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(
                svg,
                r#"  <polyline points="{points}" fill="none" stroke="{}" stroke-width="1"/>"#,
                layer.kind.stroke_color()
            );
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Rasterize at `pixels_per_mm`.
    pub fn render_image(&self, pixels_per_mm: f64) -> RgbImage {
        let width = (self.board.width * pixels_per_mm).ceil().max(1.0) as u32;
        let height = (self.board.height * pixels_per_mm).ceil().max(1.0) as u32;
        let mut img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

        let to_pixel = |(x, y): (f64, f64)| {
            (
                (x * pixels_per_mm).round() as i32,
                (y * pixels_per_mm).round() as i32,
            )
        };

        for layer in &self.layers {
            let color = layer.kind.pixel();
            if let [only] = layer.points.as_slice() {
                let (x, y) = to_pixel(*only);
                draw_line_segment(&mut img, x, y, x, y, color);
                continue;
            }
            for pair in layer.points.windows(2) {
                let (x0, y0) = to_pixel(pair[0]);
                let (x1, y1) = to_pixel(pair[1]);
                draw_line_segment(&mut img, x0, y0, x1, y1, color);
            }
        }
        img
    }

    pub fn save_svg(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_svg())?;
        info!(path = %path.display(), strokes = self.stroke_count(), "Wrote preview");
        Ok(())
    }

    /// Write a raster preview; the format follows the file extension.
    pub fn save_image(&self, path: &Path, pixels_per_mm: f64) -> Result<()> {
        self.render_image(pixels_per_mm)
            .save(path)
            .map_err(|e| Error::other(format!("failed to write {}: {e}", path.display())))?;
        info!(path = %path.display(), "Wrote raster preview");
        Ok(())
    }
}

fn draw_line_segment(img: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        if x >= 0 && x < img.width() as i32 && y >= 0 && y < img.height() as i32 {
            img.put_pixel(x as u32, y as u32, color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
