//! Error types for the kvote-knn crate.

use crate::sample::SampleId;

/// Error type for all fallible operations in the kvote-knn crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnnError {
    /// Returned when k is zero.
    #[error("k must be >= 1, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
    },

    /// Returned when classification or held-out selection runs against an empty pool.
    #[error("sample pool is empty")]
    EmptyPool,

    /// Returned when voting is attempted on an empty k-closest set.
    #[error("no neighbors to vote on")]
    EmptySelection,

    /// Returned when a held-out designation names a sample that is not in the pool.
    #[error("sample {id} not found in pool")]
    HeldOutNotFound {
        /// The identifier that was looked up.
        id: SampleId,
    },

    /// Returned when the held-out workflow runs without a held-out sample.
    #[error("no held-out sample is set")]
    NoHeldOut,

    /// Returned when the metric yields NaN or a negative distance.
    #[error("metric returned invalid distance {distance} for sample {id}")]
    InvalidDistance {
        /// The pool sample whose distance was invalid.
        id: SampleId,
        /// The offending distance value.
        distance: f64,
    },

    /// Returned when a pool sample and the query cannot be compared under the metric.
    #[error("sample {id} has {found} features where the metric expects {expected}")]
    DimensionMismatch {
        /// The pool sample that failed the check.
        id: SampleId,
        /// Feature count the metric requires.
        expected: usize,
        /// Feature count found on the sample or the query.
        found: usize,
    },
}
