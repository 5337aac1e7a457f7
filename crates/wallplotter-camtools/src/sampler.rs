//! Curve Sampler
//!
//! Flattens continuous curves into polylines at a fixed spatial resolution.
//! Runs of nearly collinear samples collapse into one segment: a new sample
//! whose direction from the last kept point matches the current reference
//! direction replaces that point instead of being appended.

use crate::curve::Curve;
use std::f64::consts::PI;
use tracing::debug;
use wallplotter_core::{ParameterError, PlotPack, PlotPath, SourcePoint};

/// Smallest heading difference that always counts as the same direction, in radians
const ABSOLUTE_ANGLE_FLOOR: f64 = 1e-9;

/// Sampling parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerParams {
    sampling_distance: f64,
    collinear_tolerance: f64,
}

impl SamplerParams {
    /// Validate and build sampling parameters.
    pub fn new(sampling_distance: f64, collinear_tolerance: f64) -> Result<Self, ParameterError> {
        if !sampling_distance.is_finite() || sampling_distance <= 0.0 {
            return Err(ParameterError::OutOfRange {
                name: "sampling_distance".to_string(),
                value: sampling_distance,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        if !collinear_tolerance.is_finite() || collinear_tolerance < 0.0 {
            return Err(ParameterError::OutOfRange {
                name: "collinear_tolerance".to_string(),
                value: collinear_tolerance,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        Ok(Self {
            sampling_distance,
            collinear_tolerance,
        })
    }

    pub fn sampling_distance(&self) -> f64 {
        self.sampling_distance
    }

    pub fn collinear_tolerance(&self) -> f64 {
        self.collinear_tolerance
    }

    /// Same tolerance, different spacing.
    pub fn with_sampling_distance(&self, sampling_distance: f64) -> Result<Self, ParameterError> {
        Self::new(sampling_distance, self.collinear_tolerance)
    }
}

fn same_direction(a: f64, b: f64, rel_tol: f64) -> bool {
    // Compare on the circle so that +PI and -PI are the same heading.
    let mut diff = (a - b).abs() % (2.0 * PI);
    if diff > PI {
        diff = 2.0 * PI - diff;
    }
    diff <= (rel_tol * a.abs().max(b.abs())).max(ABSOLUTE_ANGLE_FLOOR)
}

/// Sample one curve.
///
/// Returns `None` when the curve is too short to yield a single step.
pub fn sample_curve<C: Curve + ?Sized>(
    curve: &C,
    params: &SamplerParams,
) -> Option<PlotPath<SourcePoint>> {
    let steps = (curve.length() / params.sampling_distance).ceil();
    if !(steps >= 1.0) {
        return None;
    }
    let steps = steps as usize;

    let mut points = vec![curve.point(0.0)];
    let mut reference: Option<f64> = None;

    for i in 1..=steps {
        let p = curve.point(i as f64 / steps as f64);
        let last = points[points.len() - 1];
        if p == last {
            continue;
        }

        let direction = (p.y - last.y).atan2(p.x - last.x);
        match reference {
            Some(r) if same_direction(direction, r, params.collinear_tolerance) => {
                let end = points.len() - 1;
                points[end] = p;
            }
            _ => {
                points.push(p);
                reference = Some(direction);
            }
        }
    }

    PlotPath::new(points).ok()
}

/// Sample every curve, dropping the degenerate ones.
pub fn sample_pack<'a, C, I>(curves: I, params: &SamplerParams) -> PlotPack<SourcePoint>
where
    C: Curve + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let mut paths = Vec::new();
    for (index, curve) in curves.into_iter().enumerate() {
        match sample_curve(curve, params) {
            Some(path) => {
                debug!(curve = index, points = path.len(), "Sampled curve");
                paths.push(path);
            }
            None => debug!(curve = index, "Dropped zero-length curve"),
        }
    }
    PlotPack::new(paths)
}
