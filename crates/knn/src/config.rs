//! Configuration for building a classifier.

use crate::distance::MetricKind;
use crate::error::KnnError;

/// Number of neighbors consulted when none is configured.
pub const DEFAULT_K: usize = 5;

/// Configuration for a [`Classifier`](crate::Classifier) using a built-in metric.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use kvote_knn::{KnnConfig, MetricKind};
///
/// let config = KnnConfig::new(3).with_metric(MetricKind::Manhattan);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KnnConfig {
    /// Number of nearest neighbors to consult.
    k: usize,
    /// Distance metric between feature vectors.
    metric: MetricKind,
}

impl KnnConfig {
    /// Creates a new configuration with the given k.
    ///
    /// Defaults: `metric = Euclidean`.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            metric: MetricKind::Euclidean,
        }
    }

    /// Sets the distance metric.
    pub fn with_metric(mut self, metric: MetricKind) -> Self {
        self.metric = metric;
        self
    }

    /// Returns the number of nearest neighbors.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the distance metric.
    pub fn metric(&self) -> MetricKind {
        self.metric
    }

    /// Validates this configuration.
    ///
    /// Returns an error if k < 1.
    pub fn validate(&self) -> Result<(), KnnError> {
        if self.k < 1 {
            return Err(KnnError::InvalidK { k: self.k });
        }
        Ok(())
    }
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self::new(DEFAULT_K)
    }
}
