//! Labeled sample records and their stable identifiers.

use std::fmt;

use crate::distance::Metric;

/// Stable identifier attached to a sample when it is loaded.
///
/// Pool lookups (held-out designation, removal) go through this id rather
/// than value equality, so two samples with identical features and labels
/// are never confused with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SampleId(pub u64);

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A feature payload with a label and a stable id.
///
/// Samples are immutable once built. Distances to a query are never stored
/// on the sample; they live in the selector invocation that computed them.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<F> {
    id: SampleId,
    label: String,
    features: F,
}

impl<F> Sample<F> {
    /// Creates a new sample.
    pub fn new(id: SampleId, label: impl Into<String>, features: F) -> Self {
        Self {
            id,
            label: label.into(),
            features,
        }
    }

    /// Returns the sample's stable id.
    pub fn id(&self) -> SampleId {
        self.id
    }

    /// Returns the sample's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the feature payload.
    pub fn features(&self) -> &F {
        &self.features
    }

    /// Computes the distance from this sample to `query` under `metric`.
    pub fn distance_to<M>(&self, query: &F, metric: &M) -> f64
    where
        M: Metric<F> + ?Sized,
    {
        metric.distance(&self.features, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Euclidean;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_accessors() {
        let s = Sample::new(SampleId(7), "alice", vec![1.0, 2.0]);
        assert_eq!(s.id(), SampleId(7));
        assert_eq!(s.label(), "alice");
        assert_eq!(s.features(), &vec![1.0, 2.0]);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(SampleId(42).to_string(), "#42");
    }

    #[test]
    fn test_distance_to() {
        let s = Sample::new(SampleId(0), "a", vec![0.0, 0.0]);
        assert_abs_diff_eq!(s.distance_to(&vec![3.0, 4.0], &Euclidean), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_value_equal_samples_keep_distinct_ids() {
        let a = Sample::new(SampleId(1), "x", vec![1.0]);
        let b = Sample::new(SampleId(2), "x", vec![1.0]);
        assert_eq!(a.label(), b.label());
        assert_eq!(a.features(), b.features());
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }
}
