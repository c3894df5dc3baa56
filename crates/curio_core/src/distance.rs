//! Behavior-space distance metrics.
//!
//! A metric is a pure function behavior x behavior -> non-negative real.
//! The closed set covers the common cases; `Custom` is the escape hatch for
//! domain-specific metrics. Both arguments must have the same dimensionality;
//! that is fixed per experiment and upheld by callers.

use std::fmt;
use std::sync::Arc;

/// Distance strategy used by the novelty engine.
#[derive(Clone, Default)]
pub enum DistanceMetric {
    /// Straight-line distance. The standard choice for positional behaviors.
    #[default]
    Euclidean,
    /// Sum of per-dimension absolute differences.
    Manhattan,
    /// Caller-supplied metric over equal-length slices.
    Custom(Arc<dyn Fn(&[f64], &[f64]) -> f64 + Send + Sync>),
}

impl DistanceMetric {
    /// Measures the distance between two equal-length behavior vectors.
    #[must_use]
    pub fn measure(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y).powi(2))
                .sum::<f64>()
                .sqrt(),
            DistanceMetric::Manhattan => {
                a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
            }
            DistanceMetric::Custom(f) => f(a, b),
        }
    }
}

impl fmt::Debug for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMetric::Euclidean => write!(f, "Euclidean"),
            DistanceMetric::Manhattan => write!(f, "Manhattan"),
            DistanceMetric::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
