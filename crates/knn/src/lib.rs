//! k-nearest-neighbor classification by plurality vote.
//!
//! A [`Classifier`] owns a [`SamplePool`] of labeled [`Sample`]s. To
//! classify a query it measures the distance from every pool sample under a
//! [`Metric`], keeps the k closest, and returns the most frequent label
//! among them.
//!
//! | Step | Rule |
//! |------|------|
//! | Selection | exact k smallest distances; ties keep pool order |
//! | Short pool | fewer than k samples → the whole pool votes |
//! | Vote | strictly highest count wins; ties go to the label seen first (nearest first) |
//!
//! The held-out workflow sets one pool sample aside, classifies it against
//! the rest and reports the prediction next to the true label.
//!
//! # Quick start
//!
//! ```
//! use kvote_knn::{Classifier, KnnConfig, MetricKind, Sample, SampleId};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let config = KnnConfig::new(3).with_metric(MetricKind::Euclidean);
//! let mut clf = Classifier::from_config(&config).unwrap();
//! for (i, (label, x)) in [("a", 0.0), ("a", 0.5), ("a", 1.0), ("b", 5.0), ("b", 5.5)]
//!     .into_iter()
//!     .enumerate()
//! {
//!     clf.add_sample(Sample::new(SampleId(i as u64), label, vec![x, x]));
//! }
//!
//! assert_eq!(clf.classify(&vec![0.2, 0.2]).unwrap().label(), "a");
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let test = clf.self_test(&mut rng).unwrap();
//! println!("predicted {} / actual {}", test.predicted(), test.actual());
//! ```
//!
//! # Architecture
//!
//! ```text
//! Classifier::classify()
//!   ├─ select_k_closest()   (select.rs)
//!   │    ├─ Metric::distance() for every pool sample   (distance.rs)
//!   │    └─ bounded sorted-insert working set
//!   └─ Tally::winner()      (vote.rs)
//! ```
//!
//! For repeated queries, use [`Classifier::classify_with_scratch`] with a
//! reusable [`KnnScratch`].

pub mod classifier;
pub mod config;
pub mod distance;
pub mod error;
pub mod pool;
pub mod result;
pub mod sample;
pub mod select;
pub mod vote;

pub use classifier::Classifier;
pub use config::{DEFAULT_K, KnnConfig};
pub use distance::{
    DimensionMismatch, Euclidean, Manhattan, Metric, MetricKind, SquaredEuclidean, UnknownMetric,
    WeightedEuclidean,
};
pub use error::KnnError;
pub use pool::SamplePool;
pub use result::{Classification, NeighborSummary, SelfTest};
pub use sample::{Sample, SampleId};
pub use select::{KnnScratch, Neighbor, select_k_closest, select_k_closest_with_scratch};
pub use vote::{Tally, vote};
