//! Continuous curves in source units
//!
//! A [`CurvePath`] is a chain of segments where each segment starts where
//! the previous one ended. Segments are backed by `lyon::geom` primitives.

use lyon::geom::{
    point, Arc, CubicBezierSegment, LineSegment, Point, QuadraticBezierSegment, SvgArc,
};
use wallplotter_core::SourcePoint;

/// Samples used to measure the arc length of a curved segment
const LENGTH_SAMPLES: usize = 256;

/// A continuous parametric curve.
pub trait Curve {
    /// Total arc length in source units
    fn length(&self) -> f64;

    /// Point at parameter `t` in `[0, 1]`
    fn point(&self, t: f64) -> SourcePoint;
}

/// One drawing primitive of a curve.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSegment {
    Line(LineSegment<f64>),
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
    Arc(Arc<f64>),
}

impl CurveSegment {
    pub fn line(from: SourcePoint, to: SourcePoint) -> Self {
        Self::Line(LineSegment {
            from: to_lyon(from),
            to: to_lyon(to),
        })
    }

    pub fn quadratic(from: SourcePoint, ctrl: SourcePoint, to: SourcePoint) -> Self {
        Self::Quadratic(QuadraticBezierSegment {
            from: to_lyon(from),
            ctrl: to_lyon(ctrl),
            to: to_lyon(to),
        })
    }

    pub fn cubic(
        from: SourcePoint,
        ctrl1: SourcePoint,
        ctrl2: SourcePoint,
        to: SourcePoint,
    ) -> Self {
        Self::Cubic(CubicBezierSegment {
            from: to_lyon(from),
            ctrl1: to_lyon(ctrl1),
            ctrl2: to_lyon(ctrl2),
            to: to_lyon(to),
        })
    }

    /// Elliptical arc in SVG endpoint notation; degenerate radii become a line.
    pub fn svg_arc(arc: SvgArc<f64>) -> Self {
        if arc.is_straight_line() {
            Self::Line(LineSegment {
                from: arc.from,
                to: arc.to,
            })
        } else {
            Self::Arc(arc.to_arc())
        }
    }

    fn sample(&self, t: f64) -> Point<f64> {
        match self {
            Self::Line(s) => s.sample(t),
            Self::Quadratic(s) => s.sample(t),
            Self::Cubic(s) => s.sample(t),
            Self::Arc(s) => s.sample(t),
        }
    }

    pub fn from(&self) -> SourcePoint {
        from_lyon(self.sample(0.0))
    }

    pub fn to(&self) -> SourcePoint {
        from_lyon(self.sample(1.0))
    }

    /// Arc length, exact for lines and measured by dense sampling otherwise
    pub fn length(&self) -> f64 {
        match self {
            Self::Line(s) => s.length(),
            _ => {
                let mut length = 0.0;
                let mut prev = self.sample(0.0);
                for i in 1..=LENGTH_SAMPLES {
                    let next = self.sample(i as f64 / LENGTH_SAMPLES as f64);
                    length += (next - prev).length();
                    prev = next;
                }
                length
            }
        }
    }

    pub fn point(&self, t: f64) -> SourcePoint {
        from_lyon(self.sample(t.clamp(0.0, 1.0)))
    }
}

impl Curve for CurveSegment {
    fn length(&self) -> f64 {
        CurveSegment::length(self)
    }

    fn point(&self, t: f64) -> SourcePoint {
        CurveSegment::point(self, t)
    }
}

/// A continuous chain of segments.
///
/// `point(t)` spreads `t` over the segments in proportion to their length.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePath {
    start: SourcePoint,
    segments: Vec<CurveSegment>,
    lengths: Vec<f64>,
    total_length: f64,
}

impl CurvePath {
    /// Start an empty chain at `start`.
    pub fn new(start: SourcePoint) -> Self {
        Self {
            start,
            segments: Vec::new(),
            lengths: Vec::new(),
            total_length: 0.0,
        }
    }

    /// Append a segment; it must begin at the current end point.
    pub fn push(&mut self, segment: CurveSegment) {
        let length = segment.length();
        self.total_length += length;
        self.lengths.push(length);
        self.segments.push(segment);
    }

    pub fn start(&self) -> SourcePoint {
        self.start
    }

    pub fn end(&self) -> SourcePoint {
        self.segments.last().map_or(self.start, CurveSegment::to)
    }

    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Curve for CurvePath {
    fn length(&self) -> f64 {
        self.total_length
    }

    fn point(&self, t: f64) -> SourcePoint {
        if self.segments.is_empty() || self.total_length <= 0.0 {
            return self.start;
        }

        let t = t.clamp(0.0, 1.0);
        let target = t * self.total_length;
        let mut travelled = 0.0;

        for (segment, &length) in self.segments.iter().zip(&self.lengths) {
            if length > 0.0 && target <= travelled + length {
                return segment.point((target - travelled) / length);
            }
            travelled += length;
        }

        self.end()
    }
}

fn to_lyon(p: SourcePoint) -> Point<f64> {
    point(p.x, p.y)
}

fn from_lyon(p: Point<f64>) -> SourcePoint {
    SourcePoint::new(p.x, p.y)
}
