//! Quality diagnostics
//!
//! Warnings collected while converting and simulating a drawing. None of
//! them stops a run; they are logged at the end so the operator can adjust
//! sampling or calibration and re-run.

use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// Advisory signal raised by a pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityWarning {
    /// Two consecutive targets are closer than the quality threshold
    ShortMove {
        path: usize,
        point: usize,
        distance: f64,
    },
    /// The largest rope change of a move is below the resolvable minimum
    ShortActuation {
        path: usize,
        point: usize,
        delta_mm: f64,
    },
    /// Reconstructed position diverges from the intended one
    Drift {
        path: usize,
        point: usize,
        deviation: f64,
    },
}

impl QualityWarning {
    /// Path and point index the warning refers to
    pub fn location(&self) -> (usize, usize) {
        match *self {
            Self::ShortMove { path, point, .. }
            | Self::ShortActuation { path, point, .. }
            | Self::Drift { path, point, .. } => (path, point),
        }
    }

    pub fn is_drift(&self) -> bool {
        matches!(self, Self::Drift { .. })
    }
}

impl fmt::Display for QualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortMove {
                path,
                point,
                distance,
            } => write!(
                f,
                "path {path} point {point}: move of {distance:.4} mm is below the quality threshold, consider a coarser sampling distance"
            ),
            Self::ShortActuation {
                path,
                point,
                delta_mm,
            } => write!(
                f,
                "path {path} point {point}: rope change of {delta_mm:.4} mm may not be resolvable by the motors"
            ),
            Self::Drift {
                path,
                point,
                deviation,
            } => write!(
                f,
                "path {path} point {point}: reconstructed position is {deviation:.4} mm off target"
            ),
        }
    }
}

/// Ordered collection of quality warnings from one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityReport {
    warnings: Vec<QualityWarning>,
}

impl QualityReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: QualityWarning) {
        self.warnings.push(warning);
    }

    /// Append every warning of `other`, keeping its order.
    pub fn merge(&mut self, other: QualityReport) {
        self.warnings.extend(other.warnings);
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QualityWarning> {
        self.warnings.iter()
    }

    pub fn drift_count(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_drift()).count()
    }

    /// Log every warning, then a one-line summary.
    pub fn log_summary(&self, stage: &str) {
        for warning in &self.warnings {
            warn!(stage, "{}", warning);
        }
        if self.warnings.is_empty() {
            info!(stage, "No quality warnings");
        } else {
            warn!(stage, count = self.warnings.len(), "Quality warnings recorded");
        }
    }
}

impl Extend<QualityWarning> for QualityReport {
    fn extend<T: IntoIterator<Item = QualityWarning>>(&mut self, iter: T) {
        self.warnings.extend(iter);
    }
}

impl<'a> IntoIterator for &'a QualityReport {
    type Item = &'a QualityWarning;
    type IntoIter = std::slice::Iter<'a, QualityWarning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.iter()
    }
}
