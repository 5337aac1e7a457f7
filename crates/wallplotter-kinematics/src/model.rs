//! Kinematics Model
//!
//! Maps pen positions to rope lengths and back for a two-anchor V-plotter.
//!
//! Forward kinematics is the Euclidean distance from the pen to each anchor.
//! Inverse kinematics intersects the two circles centered on the anchors.
//! Two intersections exist in general; the configured [`DrawableSide`]
//! picks the one on the paper's side of the anchor baseline.

use serde::{Deserialize, Serialize};
use tracing::trace;
use wallplotter_core::{
    BoardPoint, CanvasPoint, DrawableSide, GeometryError, ParameterError, PlanarPoint, Result,
    Workspace,
};

/// Rope length from each anchor to the pen, in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RopeLengths {
    pub left: f64,
    pub right: f64,
}

impl RopeLengths {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Per-rope change needed to reach `target`
    pub fn delta_to(&self, target: &RopeLengths) -> RopeLengths {
        RopeLengths::new(target.left - self.left, target.right - self.right)
    }

    pub fn offset_by(&self, delta: &RopeLengths) -> RopeLengths {
        RopeLengths::new(self.left + delta.left, self.right + delta.right)
    }

    /// Largest absolute component
    pub fn max_abs(&self) -> f64 {
        self.left.abs().max(self.right.abs())
    }
}

/// Motor rotation corresponding to rope lengths, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorDegrees {
    pub left: f64,
    pub right: f64,
}

impl MotorDegrees {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }
}

/// A point relative to the left anchor. Only used inside this module.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AnchorPoint {
    x: f64,
    y: f64,
}

impl AnchorPoint {
    fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Intersect two circles.
///
/// Returns both intersection points; they coincide when the circles touch.
/// Fails when the circles are apart, nested, or share a center.
pub fn circle_intersections(
    c0: (f64, f64),
    r0: f64,
    c1: (f64, f64),
    r1: f64,
) -> std::result::Result<[(f64, f64); 2], GeometryError> {
    for r in [r0, r1] {
        if !r.is_finite() || r < 0.0 {
            return Err(GeometryError::InvalidRadius { value: r });
        }
    }

    let (dx, dy) = (c1.0 - c0.0, c1.1 - c0.1);
    let d = dx.hypot(dy);

    if d == 0.0 {
        return Err(GeometryError::CoincidentCenters);
    }
    if d > r0 + r1 {
        return Err(GeometryError::NoIntersection {
            distance: d,
            r0,
            r1,
        });
    }
    if d < (r0 - r1).abs() {
        return Err(GeometryError::ContainedCircle {
            distance: d,
            r0,
            r1,
        });
    }

    let a = (r0 * r0 - r1 * r1 + d * d) / (2.0 * d);
    // Touching circles can leave a tiny negative radicand after round-off.
    let h = (r0 * r0 - a * a).max(0.0).sqrt();

    let mx = c0.0 + a * dx / d;
    let my = c0.1 + a * dy / d;

    Ok([
        (mx + h * dy / d, my - h * dx / d),
        (mx - h * dy / d, my + h * dx / d),
    ])
}

/// Forward and inverse mapping for one physical workspace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicsModel {
    workspace: Workspace,
    mm_per_degree: f64,
}

impl KinematicsModel {
    /// Model for `workspace` with `mm_per_degree` of rope wound per motor degree.
    pub fn new(workspace: Workspace, mm_per_degree: f64) -> Result<Self> {
        if !mm_per_degree.is_finite() || mm_per_degree <= 0.0 {
            return Err(ParameterError::OutOfRange {
                name: "mm_per_degree".to_string(),
                value: mm_per_degree,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        Ok(Self {
            workspace,
            mm_per_degree,
        })
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn mm_per_degree(&self) -> f64 {
        self.mm_per_degree
    }

    fn to_anchor(&self, p: &BoardPoint) -> AnchorPoint {
        let origin = self.workspace.left_anchor();
        AnchorPoint {
            x: p.x() - origin.x(),
            y: p.y() - origin.y(),
        }
    }

    fn from_anchor(&self, p: AnchorPoint) -> Result<BoardPoint> {
        let origin = self.workspace.left_anchor();
        Ok(BoardPoint::new(
            p.x + origin.x(),
            p.y + origin.y(),
            &self.workspace.board(),
        )?)
    }

    fn right_anchor(&self) -> AnchorPoint {
        self.to_anchor(&self.workspace.right_anchor())
    }

    /// Rope lengths with the pen at `p`
    pub fn rope_lengths(&self, p: &BoardPoint) -> RopeLengths {
        let pen = self.to_anchor(p);
        let right = self.right_anchor();
        RopeLengths::new(
            pen.norm(),
            AnchorPoint {
                x: pen.x - right.x,
                y: pen.y - right.y,
            }
            .norm(),
        )
    }

    /// Rope lengths with the pen at a canvas point
    pub fn canvas_rope_lengths(&self, p: &CanvasPoint) -> Result<RopeLengths> {
        let board = p.to_board(&self.workspace)?;
        Ok(self.rope_lengths(&board))
    }

    pub fn degrees_for(&self, lengths: &RopeLengths) -> MotorDegrees {
        MotorDegrees::new(
            lengths.left / self.mm_per_degree,
            lengths.right / self.mm_per_degree,
        )
    }

    pub fn lengths_for(&self, degrees: &MotorDegrees) -> RopeLengths {
        RopeLengths::new(
            degrees.left * self.mm_per_degree,
            degrees.right * self.mm_per_degree,
        )
    }

    /// Pen position for the given rope lengths.
    ///
    /// Fails with a geometry error when no position exists and with a
    /// boundary error when the position is off the board.
    pub fn position_for(&self, lengths: &RopeLengths) -> Result<BoardPoint> {
        let right = self.right_anchor();
        let roots = circle_intersections(
            (0.0, 0.0),
            lengths.left,
            (right.x, right.y),
            lengths.right,
        )?;

        // Sign of baseline x (root - left anchor); positive is below when y grows downwards.
        let side = |(x, y): (f64, f64)| right.x * y - right.y * x;
        let wanted = match self.workspace.drawable_side() {
            DrawableSide::Below => 1.0,
            DrawableSide::Above => -1.0,
        };
        let [first, second] = roots;
        let (x, y) = if side(first) * wanted >= side(second) * wanted {
            first
        } else {
            second
        };
        trace!(left = lengths.left, right = lengths.right, x, y, "Inverse mapping");

        self.from_anchor(AnchorPoint { x, y })
    }
}
