//! The mutable pool of labeled samples and its held-out slot.

use rand::Rng;

use crate::error::KnnError;
use crate::sample::{Sample, SampleId};

/// Labeled samples available to the classifier, plus at most one sample
/// set aside for self-testing.
///
/// Iteration order is insertion order; the selector relies on it for
/// reproducible tie-breaks. The held-out sample is never a member of the
/// pool while it is set aside.
#[derive(Debug, Clone)]
pub struct SamplePool<F> {
    samples: Vec<Sample<F>>,
    held_out: Option<Sample<F>>,
}

impl<F> Default for SamplePool<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> SamplePool<F> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            held_out: None,
        }
    }

    /// Appends a sample. No duplicate check is performed.
    pub fn add(&mut self, sample: Sample<F>) {
        self.samples.push(sample);
    }

    /// Appends every sample from `samples`, in order.
    pub fn extend(&mut self, samples: impl IntoIterator<Item = Sample<F>>) {
        self.samples.extend(samples);
    }

    /// Removes every sample from the pool.
    ///
    /// The held-out slot is left as is; use [`restore_held_out`](Self::restore_held_out)
    /// first to discard it together with the pool.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Removes and returns the first sample with `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: SampleId) -> Option<Sample<F>> {
        let idx = self.position(id)?;
        Some(self.samples.remove(idx))
    }

    /// Number of samples in the pool (the held-out sample is not counted).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` when the pool holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates the pool in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample<F>> {
        self.samples.iter()
    }

    /// Returns the pool as a slice.
    pub fn as_slice(&self) -> &[Sample<F>] {
        &self.samples
    }

    /// Returns `true` when a sample with `id` is in the pool.
    pub fn contains(&self, id: SampleId) -> bool {
        self.position(id).is_some()
    }

    /// Returns the held-out sample, if one is set.
    pub fn held_out(&self) -> Option<&Sample<F>> {
        self.held_out.as_ref()
    }

    /// Moves the held-out sample (if any) back to the end of the pool.
    ///
    /// Returns the id of the restored sample.
    pub fn restore_held_out(&mut self) -> Option<SampleId> {
        let sample = self.held_out.take()?;
        let id = sample.id();
        self.samples.push(sample);
        Some(id)
    }

    /// Sets the sample with `id` aside as the held-out sample.
    ///
    /// Any previously held-out sample is returned to the pool first, so
    /// designating the current held-out id again simply re-selects it.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::HeldOutNotFound`] if no pool sample has `id`. The
    /// previous held-out sample has been returned to the pool in that case
    /// and the slot is left empty.
    pub fn set_held_out(&mut self, id: SampleId) -> Result<&Sample<F>, KnnError> {
        self.restore_held_out();
        let idx = self
            .position(id)
            .ok_or(KnnError::HeldOutNotFound { id })?;
        Ok(self.hold_out_at(idx))
    }

    /// Sets a uniformly random pool sample aside as the held-out sample.
    ///
    /// Any previously held-out sample is returned to the pool first and is
    /// eligible to be picked again.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::EmptyPool`] if the pool (after restoring) is empty.
    pub fn pick_random_held_out(&mut self, rng: &mut impl Rng) -> Result<&Sample<F>, KnnError> {
        self.restore_held_out();
        if self.samples.is_empty() {
            return Err(KnnError::EmptyPool);
        }
        let idx = rng.random_range(0..self.samples.len());
        Ok(self.hold_out_at(idx))
    }

    fn position(&self, id: SampleId) -> Option<usize> {
        self.samples.iter().position(|s| s.id() == id)
    }

    fn hold_out_at(&mut self, idx: usize) -> &Sample<F> {
        let sample = self.samples.remove(idx);
        self.held_out.insert(sample)
    }
}

impl<'a, F> IntoIterator for &'a SamplePool<F> {
    type Item = &'a Sample<F>;
    type IntoIter = std::slice::Iter<'a, Sample<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<F> FromIterator<Sample<F>> for SamplePool<F> {
    fn from_iter<I: IntoIterator<Item = Sample<F>>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
            held_out: None,
        }
    }
}
