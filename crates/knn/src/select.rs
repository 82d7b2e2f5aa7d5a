//! Top-k nearest neighbor selection over a sample pool.

use std::cmp::Ordering;
use std::fmt;

use crate::distance::Metric;
use crate::error::KnnError;
use crate::pool::SamplePool;
use crate::sample::{Sample, SampleId};

/// A pool sample paired with its distance to one specific query.
///
/// Neighbors borrow the pool, so a k-closest set cannot outlive the pool
/// state it was computed from.
pub struct Neighbor<'a, F> {
    sample: &'a Sample<F>,
    distance: f64,
}

impl<'a, F> Neighbor<'a, F> {
    /// Returns the neighboring sample.
    pub fn sample(&self) -> &'a Sample<F> {
        self.sample
    }

    /// Returns the sample's distance to the query.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns the neighboring sample's id.
    pub fn id(&self) -> SampleId {
        self.sample.id()
    }

    /// Returns the neighboring sample's label.
    pub fn label(&self) -> &'a str {
        self.sample.label()
    }
}

impl<F> Clone for Neighbor<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for Neighbor<'_, F> {}

impl<F> fmt::Debug for Neighbor<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neighbor")
            .field("id", &self.sample.id())
            .field("label", &self.sample.label())
            .field("distance", &self.distance)
            .finish()
    }
}

/// Pre-allocated buffers for repeated selections.
///
/// Reuse across calls to [`select_k_closest_with_scratch`] to avoid
/// per-query allocation, e.g. when running many held-out self-tests.
/// Buffers grow as needed and never shrink.
#[derive(Debug, Clone, Default)]
pub struct KnnScratch {
    /// Per-query distances, indexed by pool position.
    pub(crate) distances: Vec<f64>,
    /// Working set of (distance, pool position), ascending by distance.
    pub(crate) closest: Vec<(f64, usize)>,
}

impl KnnScratch {
    /// Creates scratch buffers with capacity for a pool of `max_samples`.
    pub fn new(max_samples: usize) -> Self {
        Self {
            distances: Vec::with_capacity(max_samples),
            closest: Vec::with_capacity(max_samples),
        }
    }
}

/// Returns the `min(k, pool.len())` pool samples closest to `query`,
/// ascending by distance.
///
/// Samples at equal distance keep their relative pool order.
///
/// # Errors
///
/// - [`KnnError::InvalidK`] if `k == 0`
/// - [`KnnError::EmptyPool`] if the pool is empty
/// - [`KnnError::InvalidDistance`] if the metric yields NaN or a negative value
pub fn select_k_closest<'a, F, M>(
    pool: &'a SamplePool<F>,
    query: &F,
    metric: &M,
    k: usize,
) -> Result<Vec<Neighbor<'a, F>>, KnnError>
where
    M: Metric<F> + ?Sized,
{
    let mut scratch = KnnScratch::new(pool.len());
    select_k_closest_with_scratch(pool, query, metric, k, &mut scratch)
}

/// Same as [`select_k_closest`], reusing `scratch` for the working buffers.
///
/// # Errors
///
/// See [`select_k_closest`].
pub fn select_k_closest_with_scratch<'a, F, M>(
    pool: &'a SamplePool<F>,
    query: &F,
    metric: &M,
    k: usize,
    scratch: &mut KnnScratch,
) -> Result<Vec<Neighbor<'a, F>>, KnnError>
where
    M: Metric<F> + ?Sized,
{
    if k == 0 {
        return Err(KnnError::InvalidK { k });
    }
    if pool.is_empty() {
        return Err(KnnError::EmptyPool);
    }

    // Every distance is computed before selection starts.
    compute_distances(pool.as_slice(), query, metric, &mut scratch.distances)?;

    let k_eff = k.min(pool.len());
    select_from_distances(&scratch.distances, k_eff, &mut scratch.closest);

    let samples = pool.as_slice();
    Ok(scratch
        .closest
        .iter()
        .map(|&(distance, idx)| Neighbor {
            sample: &samples[idx],
            distance,
        })
        .collect())
}

/// Fills `out` with the distance from every sample to `query`.
fn compute_distances<F, M>(
    samples: &[Sample<F>],
    query: &F,
    metric: &M,
    out: &mut Vec<f64>,
) -> Result<(), KnnError>
where
    M: Metric<F> + ?Sized,
{
    out.clear();
    for sample in samples {
        metric
            .check_dimensions(sample.features(), query)
            .map_err(|m| KnnError::DimensionMismatch {
                id: sample.id(),
                expected: m.expected,
                found: m.found,
            })?;
        let distance = sample.distance_to(query, metric);
        if distance.is_nan() || distance < 0.0 {
            return Err(KnnError::InvalidDistance {
                id: sample.id(),
                distance,
            });
        }
        out.push(distance);
    }
    Ok(())
}

/// Bounded sorted-insert selection of the `k_eff` smallest distances.
///
/// The working set is seeded with the first `k_eff` entries (stably
/// sorted). Each later entry replaces the current worst only when strictly
/// smaller, and is inserted after any entries of equal distance, so ties
/// keep their input order.
///
/// # Panics
///
/// Debug-asserts that `k_eff >= 1` and `k_eff <= distances.len()`.
pub(crate) fn select_from_distances(
    distances: &[f64],
    k_eff: usize,
    working: &mut Vec<(f64, usize)>,
) {
    debug_assert!(k_eff >= 1);
    debug_assert!(k_eff <= distances.len());

    working.clear();
    working.extend(distances[..k_eff].iter().copied().enumerate().map(|(i, d)| (d, i)));
    working.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    for (idx, &d) in distances.iter().enumerate().skip(k_eff) {
        if d < working[k_eff - 1].0 {
            working.pop();
            let pos = working.partition_point(|&(wd, _)| wd <= d);
            working.insert(pos, (d, idx));
        }
    }
}
