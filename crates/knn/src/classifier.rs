//! Classifier orchestration and the held-out self-test workflow.

use rand::Rng;

use crate::config::KnnConfig;
use crate::distance::{Metric, MetricKind};
use crate::error::KnnError;
use crate::pool::SamplePool;
use crate::result::{Classification, SelfTest};
use crate::sample::{Sample, SampleId};
use crate::select::{KnnScratch, Neighbor, select_k_closest, select_k_closest_with_scratch};
use crate::vote::Tally;

/// A k-nearest-neighbor plurality classifier.
///
/// Owns its sample pool (and the pool's held-out slot), its metric and k.
/// Classification borrows the classifier immutably; only pool edits and
/// held-out designation need `&mut self`.
///
/// # Example
///
/// ```
/// use kvote_knn::{Classifier, Euclidean, Sample, SampleId};
///
/// let mut clf = Classifier::new(3, Euclidean).unwrap();
/// clf.add_samples([
///     Sample::new(SampleId(0), "small", vec![1.0]),
///     Sample::new(SampleId(1), "small", vec![2.0]),
///     Sample::new(SampleId(2), "large", vec![9.0]),
///     Sample::new(SampleId(3), "large", vec![10.0]),
/// ]);
///
/// let result = clf.classify(&vec![1.5]).unwrap();
/// assert_eq!(result.label(), "small");
///
/// let test = clf.self_test_with(SampleId(3)).unwrap();
/// assert_eq!(test.actual(), "large");
/// ```
#[derive(Debug, Clone)]
pub struct Classifier<F, M> {
    k: usize,
    metric: M,
    pool: SamplePool<F>,
}

impl<F, M: Metric<F>> Classifier<F, M> {
    /// Creates an empty classifier consulting `k` neighbors under `metric`.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::InvalidK`] if `k == 0`.
    pub fn new(k: usize, metric: M) -> Result<Self, KnnError> {
        if k == 0 {
            return Err(KnnError::InvalidK { k });
        }
        Ok(Self {
            k,
            metric,
            pool: SamplePool::new(),
        })
    }

    /// Returns the number of neighbors consulted.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Changes the number of neighbors consulted.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::InvalidK`] if `k == 0`; the current k is kept.
    pub fn set_k(&mut self, k: usize) -> Result<(), KnnError> {
        if k == 0 {
            return Err(KnnError::InvalidK { k });
        }
        self.k = k;
        Ok(())
    }

    /// Returns the distance metric.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Returns the sample pool.
    pub fn pool(&self) -> &SamplePool<F> {
        &self.pool
    }

    /// Adds one labeled sample to the pool.
    pub fn add_sample(&mut self, sample: Sample<F>) {
        self.pool.add(sample);
    }

    /// Adds labeled samples to the pool, in order.
    pub fn add_samples(&mut self, samples: impl IntoIterator<Item = Sample<F>>) {
        self.pool.extend(samples);
    }

    /// Removes every sample from the pool. A held-out sample stays held out.
    pub fn clear_samples(&mut self) {
        self.pool.clear();
    }

    /// Removes the first pool sample with `id`, preserving the order of the rest.
    ///
    /// The held-out sample is not part of the pool and is never removed here.
    pub fn remove_sample(&mut self, id: SampleId) -> Option<Sample<F>> {
        self.pool.remove(id)
    }

    /// Returns the k-closest set for `query`, ascending by distance.
    ///
    /// # Errors
    ///
    /// See [`select_k_closest`].
    pub fn nearest(&self, query: &F) -> Result<Vec<Neighbor<'_, F>>, KnnError> {
        select_k_closest(&self.pool, query, &self.metric, self.k)
    }

    /// Classifies `query` by plurality vote among its k nearest pool samples.
    ///
    /// # Errors
    ///
    /// - [`KnnError::EmptyPool`] if the pool is empty
    /// - [`KnnError::InvalidDistance`] if the metric misbehaves
    pub fn classify(&self, query: &F) -> Result<Classification, KnnError> {
        let neighbors = self.nearest(query)?;
        decide(&neighbors)
    }

    /// Same as [`classify`](Self::classify), reusing `scratch` for selection buffers.
    ///
    /// # Errors
    ///
    /// See [`classify`](Self::classify).
    pub fn classify_with_scratch(
        &self,
        query: &F,
        scratch: &mut KnnScratch,
    ) -> Result<Classification, KnnError> {
        let neighbors =
            select_k_closest_with_scratch(&self.pool, query, &self.metric, self.k, scratch)?;
        decide(&neighbors)
    }

    /// Returns the held-out sample, if one is set.
    pub fn held_out(&self) -> Option<&Sample<F>> {
        self.pool.held_out()
    }

    /// Holds out the pool sample with `id`, returning any previous held-out
    /// sample to the pool first.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::HeldOutNotFound`] if no pool sample has `id`.
    pub fn set_held_out(&mut self, id: SampleId) -> Result<&Sample<F>, KnnError> {
        self.pool.set_held_out(id)
    }

    /// Holds out a uniformly random pool sample, returning any previous
    /// held-out sample to the pool first.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::EmptyPool`] if there is nothing to pick from.
    pub fn pick_held_out(&mut self, rng: &mut impl Rng) -> Result<&Sample<F>, KnnError> {
        self.pool.pick_random_held_out(rng)
    }

    /// Returns the held-out sample (if any) to the pool.
    pub fn restore_held_out(&mut self) -> Option<SampleId> {
        self.pool.restore_held_out()
    }

    /// Classifies the current held-out sample against the remaining pool.
    ///
    /// # Errors
    ///
    /// - [`KnnError::NoHeldOut`] if no sample is held out
    /// - any error from [`classify`](Self::classify)
    pub fn classify_held_out(&self) -> Result<SelfTest, KnnError> {
        let held = self.pool.held_out().ok_or(KnnError::NoHeldOut)?;
        let classification = self.classify(held.features())?;
        Ok(SelfTest::new(held.id(), held.label(), classification))
    }

    /// Holds out a random sample and classifies it against the rest.
    ///
    /// # Errors
    ///
    /// [`KnnError::EmptyPool`] if the pool is empty, or left empty by the
    /// hold-out (a pool of one sample), or any error from
    /// [`classify`](Self::classify).
    ///
    /// When classification fails the picked sample stays held out; call
    /// [`restore_held_out`](Self::restore_held_out) to return it to the pool.
    pub fn self_test(&mut self, rng: &mut impl Rng) -> Result<SelfTest, KnnError> {
        self.pool.pick_random_held_out(rng)?;
        self.classify_held_out()
    }

    /// Holds out the sample with `id` and classifies it against the rest.
    ///
    /// # Errors
    ///
    /// [`KnnError::HeldOutNotFound`] if `id` is not in the pool, or any
    /// error from [`classify`](Self::classify). As with
    /// [`self_test`](Self::self_test), a sample that was found stays held out
    /// even if classification fails.
    pub fn self_test_with(&mut self, id: SampleId) -> Result<SelfTest, KnnError> {
        self.pool.set_held_out(id)?;
        self.classify_held_out()
    }
}

impl<F: AsRef<[f64]>> Classifier<F, MetricKind> {
    /// Creates an empty classifier from a validated [`KnnConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::InvalidK`] if the configured k is 0.
    pub fn from_config(config: &KnnConfig) -> Result<Self, KnnError> {
        config.validate()?;
        Self::new(config.k(), config.metric())
    }
}

fn decide<F>(neighbors: &[Neighbor<'_, F>]) -> Result<Classification, KnnError> {
    let (label, votes) = Tally::from_neighbors(neighbors).winner()?;
    Ok(Classification::new(label, votes, neighbors))
}
