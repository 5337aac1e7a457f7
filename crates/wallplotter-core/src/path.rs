//! Strokes, drawing jobs and their bounds.
//!
//! A [`PlotPath`] is one continuous pen-down stroke and is never empty.
//! A [`PlotPack`] is a whole drawing job; its order is the plotting order.

use crate::error::{Axis, GeometryError};
use crate::space::PlanarPoint;
use serde::Serialize;

/// Ordered, non-empty sequence of points in one coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPath<P> {
    points: Vec<P>,
}

impl<P: PlanarPoint> PlotPath<P> {
    /// Create a path; fails when `points` is empty.
    pub fn new(points: Vec<P>) -> Result<Self, GeometryError> {
        if points.is_empty() {
            return Err(GeometryError::EmptyPath);
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[P] {
        &self.points
    }

    pub fn first(&self) -> P {
        self.points[0]
    }

    pub fn last(&self) -> P {
        self.points[self.points.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.points.iter()
    }

    pub fn into_points(self) -> Vec<P> {
        self.points
    }

    /// Drawn length of the stroke.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }

    /// Convert every point, stopping at the first failure.
    pub fn try_map<Q, E, F>(&self, mut f: F) -> Result<PlotPath<Q>, E>
    where
        Q: PlanarPoint,
        F: FnMut(&P) -> Result<Q, E>,
    {
        let points = self.points.iter().map(&mut f).collect::<Result<Vec<_>, E>>()?;
        Ok(PlotPath { points })
    }
}

impl<'a, P> IntoIterator for &'a PlotPath<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// A complete drawing job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPack<P> {
    paths: Vec<PlotPath<P>>,
}

impl<P> Default for PlotPack<P> {
    fn default() -> Self {
        Self { paths: Vec::new() }
    }
}

impl<P: PlanarPoint> PlotPack<P> {
    pub fn new(paths: Vec<PlotPath<P>>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PlotPath<P>] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlotPath<P>> {
        self.paths.iter()
    }

    pub fn into_paths(self) -> Vec<PlotPath<P>> {
        self.paths
    }

    /// Total number of points over all paths
    pub fn point_count(&self) -> usize {
        self.paths.iter().map(PlotPath::len).sum()
    }

    /// Iterate all points in plotting order.
    pub fn points(&self) -> impl Iterator<Item = &P> {
        self.paths.iter().flat_map(|p| p.iter())
    }

    /// Convert every point of every path, stopping at the first failure.
    pub fn try_map<Q, E, F>(&self, mut f: F) -> Result<PlotPack<Q>, E>
    where
        Q: PlanarPoint,
        F: FnMut(&P) -> Result<Q, E>,
    {
        let paths = self
            .paths
            .iter()
            .map(|path| path.try_map(&mut f))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(PlotPack { paths })
    }

    /// Check that `other` has the same number of paths and points per path.
    pub fn same_shape<Q: PlanarPoint>(&self, other: &PlotPack<Q>) -> bool {
        self.paths.len() == other.paths.len()
            && self
                .paths
                .iter()
                .zip(other.paths.iter())
                .all(|(a, b)| a.len() == b.len())
    }
}

impl<P: PlanarPoint> From<Vec<PlotPath<P>>> for PlotPack<P> {
    fn from(paths: Vec<PlotPath<P>>) -> Self {
        Self::new(paths)
    }
}

impl<'a, P> IntoIterator for &'a PlotPack<P> {
    type Item = &'a PlotPath<P>;
    type IntoIter = std::slice::Iter<'a, PlotPath<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Axis-aligned bounding box over a pack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Bounds {
    /// Compute the bounds of every point in `pack`.
    pub fn of_pack<P: PlanarPoint>(pack: &PlotPack<P>) -> Result<Self, GeometryError> {
        Self::of_points(pack.points())
    }

    /// Compute the bounds of a point sequence.
    pub fn of_points<'a, P, I>(points: I) -> Result<Self, GeometryError>
    where
        P: PlanarPoint + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut any = false;

        for p in points {
            min_x = min_x.min(p.x());
            max_x = max_x.max(p.x());
            min_y = min_y.min(p.y());
            max_y = max_y.max(p.y());
            any = true;
        }

        if !any {
            return Err(GeometryError::EmptyPack);
        }

        Ok(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width(),
            Axis::Y => self.height(),
        }
    }
}
