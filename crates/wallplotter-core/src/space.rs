//! Coordinate spaces
//!
//! Every point carries the space it lives in as its type:
//!
//! - [`SourcePoint`]: raw vector-drawing units, unvalidated
//! - [`CanvasPoint`]: the drawing surface (paper), in millimetres
//! - [`BoardPoint`]: the mounting panel the anchors are fixed to, in millimetres
//!
//! Validated points can only be built through their constructors, and
//! conversions between spaces are explicit methods. Board and canvas
//! coordinates grow rightwards and downwards, like SVG.

use crate::error::{BoundaryError, Error, GeometryError, ParameterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a coordinate space in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSpace {
    Source,
    Canvas,
    Board,
    Anchor,
}

impl fmt::Display for CoordinateSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Canvas => write!(f, "canvas"),
            Self::Board => write!(f, "board"),
            Self::Anchor => write!(f, "anchor"),
        }
    }
}

/// A point in one planar coordinate space.
///
/// Distances are only defined between points of the same space.
pub trait PlanarPoint: Copy + fmt::Debug {
    fn x(&self) -> f64;
    fn y(&self) -> f64;

    /// Euclidean distance to another point of the same space
    fn distance_to(&self, other: &Self) -> f64 {
        (self.x() - other.x()).hypot(self.y() - other.y())
    }
}

/// Width and height of a rectangle in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Translation of one space relative to another, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

fn check_range(
    space: CoordinateSpace,
    x: f64,
    y: f64,
    min: f64,
    max_x: f64,
    max_y: f64,
) -> std::result::Result<(), BoundaryError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(BoundaryError::NonFinite { space, x, y });
    }
    if x < min || x > max_x || y < min || y > max_y {
        return Err(BoundaryError::OutOfRange {
            space,
            x,
            y,
            min,
            max_x,
            max_y,
        });
    }
    Ok(())
}

/// A point in source (vector drawing) units. Never validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourcePoint {
    pub x: f64,
    pub y: f64,
}

impl SourcePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl PlanarPoint for SourcePoint {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// The sheet of paper taped to the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasGeometry {
    /// Paper size
    pub size: Size,
    /// Top-left corner of the paper in board space
    pub offset: Offset,
    /// Margin kept free on every side when fitting a drawing
    pub padding: f64,
    /// Slack accepted outside the paper to absorb scaling round-off
    pub tolerance: f64,
}

impl CanvasGeometry {
    /// Area left for the drawing once padding is removed on both sides
    pub fn usable_size(&self) -> Size {
        Size::new(
            self.size.width - 2.0 * self.padding,
            self.size.height - 2.0 * self.padding,
        )
    }
}

/// A point on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasPoint {
    x: f64,
    y: f64,
}

impl CanvasPoint {
    /// Create a canvas point, rejecting coordinates outside the paper
    /// (plus tolerance).
    pub fn new(
        x: f64,
        y: f64,
        canvas: &CanvasGeometry,
    ) -> std::result::Result<Self, BoundaryError> {
        check_range(
            CoordinateSpace::Canvas,
            x,
            y,
            -canvas.tolerance,
            canvas.size.width + canvas.tolerance,
            canvas.size.height + canvas.tolerance,
        )?;
        Ok(Self { x, y })
    }

    /// Translate onto the board.
    pub fn to_board(&self, workspace: &Workspace) -> std::result::Result<BoardPoint, BoundaryError> {
        let offset = workspace.canvas().offset;
        BoardPoint::new(self.x + offset.x, self.y + offset.y, &workspace.board())
    }
}

impl PlanarPoint for CanvasPoint {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// A point on the mounting board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoardPoint {
    x: f64,
    y: f64,
}

impl BoardPoint {
    /// Create a board point, rejecting coordinates outside the panel.
    pub fn new(x: f64, y: f64, board: &Size) -> std::result::Result<Self, BoundaryError> {
        check_range(CoordinateSpace::Board, x, y, 0.0, board.width, board.height)?;
        Ok(Self { x, y })
    }

    /// Express this board position on the canvas.
    pub fn to_canvas(
        &self,
        workspace: &Workspace,
    ) -> std::result::Result<CanvasPoint, BoundaryError> {
        let canvas = workspace.canvas();
        CanvasPoint::new(self.x - canvas.offset.x, self.y - canvas.offset.y, &canvas)
    }
}

impl PlanarPoint for BoardPoint {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// Which side of the anchor baseline the drawable region lies on.
///
/// With board y growing downwards, `Below` is the usual wall mount: both
/// anchors sit above the paper. Inverse kinematics uses this to pick one of
/// the two circle intersections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawableSide {
    #[default]
    Below,
    Above,
}

impl fmt::Display for DrawableSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Below => write!(f, "below"),
            Self::Above => write!(f, "above"),
        }
    }
}

/// Physical layout of the plotter: board, anchors and paper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Workspace {
    board: Size,
    canvas: CanvasGeometry,
    left_anchor: BoardPoint,
    right_anchor: BoardPoint,
    drawable_side: DrawableSide,
}

impl Workspace {
    /// Build a workspace, validating that anchors and paper fit on the board.
    pub fn new(
        board: Size,
        canvas: CanvasGeometry,
        left_anchor: Offset,
        right_anchor: Offset,
        drawable_side: DrawableSide,
    ) -> Result<Self> {
        if board.width <= 0.0 || board.height <= 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "board".to_string(),
                reason: format!("size must be positive, got {}x{}", board.width, board.height),
            }
            .into());
        }
        if canvas.size.width <= 0.0 || canvas.size.height <= 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "canvas".to_string(),
                reason: format!(
                    "size must be positive, got {}x{}",
                    canvas.size.width, canvas.size.height
                ),
            }
            .into());
        }
        if canvas.tolerance < 0.0 {
            return Err(ParameterError::OutOfRange {
                name: "canvas.tolerance".to_string(),
                value: canvas.tolerance,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }

        // Both canvas corners must land on the board.
        BoardPoint::new(canvas.offset.x, canvas.offset.y, &board)?;
        BoardPoint::new(
            canvas.offset.x + canvas.size.width,
            canvas.offset.y + canvas.size.height,
            &board,
        )?;

        let left_anchor = BoardPoint::new(left_anchor.x, left_anchor.y, &board)?;
        let right_anchor = BoardPoint::new(right_anchor.x, right_anchor.y, &board)?;
        if left_anchor.distance_to(&right_anchor) == 0.0 {
            return Err(Error::Geometry(GeometryError::CoincidentCenters));
        }

        Ok(Self {
            board,
            canvas,
            left_anchor,
            right_anchor,
            drawable_side,
        })
    }

    pub fn board(&self) -> Size {
        self.board
    }

    pub fn canvas(&self) -> CanvasGeometry {
        self.canvas
    }

    pub fn left_anchor(&self) -> BoardPoint {
        self.left_anchor
    }

    pub fn right_anchor(&self) -> BoardPoint {
        self.right_anchor
    }

    pub fn drawable_side(&self) -> DrawableSide {
        self.drawable_side
    }

    /// Distance between the two anchors
    pub fn anchor_separation(&self) -> f64 {
        self.left_anchor.distance_to(&self.right_anchor)
    }
}
