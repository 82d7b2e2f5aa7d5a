//! Distance metrics between feature payloads.
//!
//! The classifier only relies on [`Metric`]; the built-in metrics cover the
//! common case of dense `f64` feature vectors (anything `AsRef<[f64]>`).
//! Built-in metrics refuse vectors of unequal length through
//! [`Metric::check_dimensions`], which the selector runs before measuring.

use std::fmt;
use std::str::FromStr;

/// A distance function between two feature payloads.
///
/// Implementations must return a non-negative value (NaN and negative
/// results are rejected by the selector) and should be symmetric for the
/// neighbor vote to be meaningful.
pub trait Metric<F: ?Sized> {
    /// Returns the distance between `a` and `b`.
    fn distance(&self, a: &F, b: &F) -> f64;

    /// Checks that `sample` and `query` can be compared under this metric.
    ///
    /// The default accepts every pair.
    fn check_dimensions(&self, sample: &F, query: &F) -> Result<(), DimensionMismatch> {
        let _ = (sample, query);
        Ok(())
    }
}

impl<F: ?Sized, M: Metric<F> + ?Sized> Metric<F> for &M {
    fn distance(&self, a: &F, b: &F) -> f64 {
        (**self).distance(a, b)
    }

    fn check_dimensions(&self, sample: &F, query: &F) -> Result<(), DimensionMismatch> {
        (**self).check_dimensions(sample, query)
    }
}

/// Feature lengths that a metric cannot compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionMismatch {
    /// Length the metric requires: the query's length, or the weight count
    /// for [`WeightedEuclidean`].
    pub expected: usize,
    /// Length actually found.
    pub found: usize,
}

#[inline]
fn same_len(sample: &[f64], query: &[f64]) -> Result<(), DimensionMismatch> {
    if sample.len() == query.len() {
        Ok(())
    } else {
        Err(DimensionMismatch {
            expected: query.len(),
            found: sample.len(),
        })
    }
}

/// Euclidean (L2) distance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Euclidean;

/// Squared Euclidean distance. Same neighbor ordering as [`Euclidean`] without the sqrt.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SquaredEuclidean;

/// Manhattan (L1) distance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Manhattan;

/// Euclidean distance with a per-dimension weight on each squared difference.
///
/// ```text
/// d(a, b) = sqrt(Σⱼ weights[j] × (a[j] − b[j])²)
/// ```
///
/// Both vectors must have exactly `weights.len()` features.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEuclidean {
    weights: Vec<f64>,
}

impl WeightedEuclidean {
    /// Creates a weighted metric from per-dimension weights.
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// Returns the per-dimension weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

#[inline]
fn sq_dist(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

impl<F: AsRef<[f64]> + ?Sized> Metric<F> for Euclidean {
    fn distance(&self, a: &F, b: &F) -> f64 {
        sq_dist(a.as_ref(), b.as_ref()).sqrt()
    }

    fn check_dimensions(&self, sample: &F, query: &F) -> Result<(), DimensionMismatch> {
        same_len(sample.as_ref(), query.as_ref())
    }
}

impl<F: AsRef<[f64]> + ?Sized> Metric<F> for SquaredEuclidean {
    fn distance(&self, a: &F, b: &F) -> f64 {
        sq_dist(a.as_ref(), b.as_ref())
    }

    fn check_dimensions(&self, sample: &F, query: &F) -> Result<(), DimensionMismatch> {
        same_len(sample.as_ref(), query.as_ref())
    }
}

impl<F: AsRef<[f64]> + ?Sized> Metric<F> for Manhattan {
    fn distance(&self, a: &F, b: &F) -> f64 {
        let (a, b) = (a.as_ref(), b.as_ref());
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
    }

    fn check_dimensions(&self, sample: &F, query: &F) -> Result<(), DimensionMismatch> {
        same_len(sample.as_ref(), query.as_ref())
    }
}

impl<F: AsRef<[f64]> + ?Sized> Metric<F> for WeightedEuclidean {
    fn check_dimensions(&self, sample: &F, query: &F) -> Result<(), DimensionMismatch> {
        let expected = self.weights.len();
        match [query.as_ref().len(), sample.as_ref().len()]
            .into_iter()
            .find(|&n| n != expected)
        {
            Some(found) => Err(DimensionMismatch { expected, found }),
            None => Ok(()),
        }
    }

    fn distance(&self, a: &F, b: &F) -> f64 {
        debug_assert_eq!(a.as_ref().len(), self.weights.len());
        debug_assert_eq!(b.as_ref().len(), self.weights.len());
        let mut acc = 0.0;
        for ((x, y), w) in a.as_ref().iter().zip(b.as_ref()).zip(&self.weights) {
            let d = x - y;
            acc += w * d * d;
        }
        acc.sqrt()
    }
}

/// Selectable built-in metric, e.g. from a configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetricKind {
    /// See [`Euclidean`].
    #[default]
    Euclidean,
    /// See [`SquaredEuclidean`].
    SquaredEuclidean,
    /// See [`Manhattan`].
    Manhattan,
}

impl<F: AsRef<[f64]> + ?Sized> Metric<F> for MetricKind {
    fn distance(&self, a: &F, b: &F) -> f64 {
        match self {
            MetricKind::Euclidean => Euclidean.distance(a, b),
            MetricKind::SquaredEuclidean => SquaredEuclidean.distance(a, b),
            MetricKind::Manhattan => Manhattan.distance(a, b),
        }
    }

    fn check_dimensions(&self, sample: &F, query: &F) -> Result<(), DimensionMismatch> {
        same_len(sample.as_ref(), query.as_ref())
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricKind::Euclidean => "euclidean",
            MetricKind::SquaredEuclidean => "squared-euclidean",
            MetricKind::Manhattan => "manhattan",
        };
        f.write_str(name)
    }
}

/// Returned when parsing an unknown metric name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric: {0:?}")]
pub struct UnknownMetric(pub String);

impl FromStr for MetricKind {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "euclidean" | "l2" => Ok(MetricKind::Euclidean),
            "squared-euclidean" | "squared_euclidean" | "sqeuclidean" => {
                Ok(MetricKind::SquaredEuclidean)
            }
            "manhattan" | "l1" => Ok(MetricKind::Manhattan),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_euclidean_3_4_5() {
        let d = Euclidean.distance(&[0.0, 0.0][..], &[3.0, 4.0][..]);
        assert_abs_diff_eq!(d, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_squared_euclidean() {
        let d = SquaredEuclidean.distance(&vec![1.0, 2.0], &vec![4.0, 6.0]);
        assert_abs_diff_eq!(d, 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_manhattan() {
        let d = Manhattan.distance(&vec![1.0, -2.0, 3.0], &vec![0.0, 2.0, 3.5]);
        assert_abs_diff_eq!(d, 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_weighted_euclidean() {
        // sqrt(4 × 1² + 1 × 2²) = sqrt(8)
        let m = WeightedEuclidean::new(vec![4.0, 1.0]);
        let d = m.distance(&vec![0.0, 0.0], &vec![1.0, 2.0]);
        assert_abs_diff_eq!(d, 8.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(m.weights(), &[4.0, 1.0]);
    }

    #[test]
    fn test_weighted_unit_weights_match_euclidean() {
        let a = vec![1.5, -0.5, 2.0];
        let b = vec![0.0, 1.0, -1.0];
        let w = WeightedEuclidean::new(vec![1.0; 3]);
        assert_abs_diff_eq!(w.distance(&a, &b), Euclidean.distance(&a, &b), epsilon = 1e-12);
    }

    #[test]
    fn test_identical_vectors_zero() {
        let a = vec![0.25; 16];
        assert_eq!(Euclidean.distance(&a, &a), 0.0);
        assert_eq!(Manhattan.distance(&a, &a), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = vec![1.0, 7.0, -3.0];
        let b = vec![2.0, 0.5, 4.0];
        for kind in [
            MetricKind::Euclidean,
            MetricKind::SquaredEuclidean,
            MetricKind::Manhattan,
        ] {
            assert_abs_diff_eq!(kind.distance(&a, &b), kind.distance(&b, &a), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_kind_dispatch() {
        let a = vec![0.0, 0.0];
        let b = vec![3.0, 4.0];
        assert_abs_diff_eq!(MetricKind::Euclidean.distance(&a, &b), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            MetricKind::SquaredEuclidean.distance(&a, &b),
            25.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(MetricKind::Manhattan.distance(&a, &b), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("euclidean".parse::<MetricKind>(), Ok(MetricKind::Euclidean));
        assert_eq!("L1".parse::<MetricKind>(), Ok(MetricKind::Manhattan));
        assert_eq!(
            "squared-euclidean".parse::<MetricKind>(),
            Ok(MetricKind::SquaredEuclidean)
        );
        assert_eq!(
            "cosine".parse::<MetricKind>(),
            Err(UnknownMetric("cosine".into()))
        );
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in [
            MetricKind::Euclidean,
            MetricKind::SquaredEuclidean,
            MetricKind::Manhattan,
        ] {
            assert_eq!(kind.to_string().parse::<MetricKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_check_dimensions_built_ins() {
        let a = vec![0.0, 100.0];
        let b = vec![0.0];
        let err = DimensionMismatch {
            expected: 1,
            found: 2,
        };
        assert_eq!(Euclidean.check_dimensions(&a, &b), Err(err));
        assert_eq!(SquaredEuclidean.check_dimensions(&a, &b), Err(err));
        assert_eq!(Manhattan.check_dimensions(&a, &b), Err(err));
        assert_eq!(MetricKind::Manhattan.check_dimensions(&a, &b), Err(err));
        assert_eq!(Euclidean.check_dimensions(&a, &a), Ok(()));
    }

    #[test]
    fn test_check_dimensions_weighted_uses_weight_count() {
        let m = WeightedEuclidean::new(vec![1.0, 1.0]);
        assert_eq!(m.check_dimensions(&vec![1.0, 2.0], &vec![0.0, 0.0]), Ok(()));
        assert_eq!(
            m.check_dimensions(&vec![1.0, 2.0], &vec![0.0, 0.0, 0.0]),
            Err(DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            m.check_dimensions(&vec![1.0], &vec![0.0, 0.0]),
            Err(DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_check_dimensions_through_reference() {
        let m = &Euclidean;
        let sample: Vec<f64> = vec![1.0];
        let query: Vec<f64> = Vec::new();
        assert!(Metric::<Vec<f64>>::check_dimensions(&m, &sample, &query).is_err());
    }

    #[test]
    fn test_kind_default() {
        assert_eq!(MetricKind::default(), MetricKind::Euclidean);
    }
}
