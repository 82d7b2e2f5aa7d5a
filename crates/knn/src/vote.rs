//! Plurality voting over a k-closest set.
//!
//! Labels are tallied in the order they are first seen. The winner is the
//! label with the strictly highest count found while scanning that order,
//! so an exact tie goes to the label that appears first in the k-closest
//! sequence, i.e. the one with the nearest representative.

use crate::error::KnnError;
use crate::select::Neighbor;

/// Per-label vote counts in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<'a> {
    counts: Vec<(&'a str, usize)>,
    total: usize,
}

impl<'a> Tally<'a> {
    /// Tallies `labels` in iteration order.
    pub fn from_labels(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts: Vec<(&'a str, usize)> = Vec::new();
        let mut total = 0;
        for label in labels {
            // Linear scan: the number of distinct labels among k neighbors is small.
            match counts.iter_mut().find(|(l, _)| *l == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((label, 1)),
            }
            total += 1;
        }
        Self { counts, total }
    }

    /// Tallies the labels of a k-closest set, nearest first.
    pub fn from_neighbors<F>(neighbors: &[Neighbor<'a, F>]) -> Self {
        Self::from_labels(neighbors.iter().map(|n| n.label()))
    }

    /// Returns `(label, count)` pairs in first-seen order.
    pub fn counts(&self) -> &[(&'a str, usize)] {
        &self.counts
    }

    /// Returns the vote count for `label` (0 if it received none).
    pub fn count(&self, label: &str) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(0, |&(_, n)| n)
    }

    /// Returns the number of votes cast.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` when no votes were cast.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Returns the winning label and its count.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::EmptySelection`] if no votes were cast.
    pub fn winner(&self) -> Result<(&'a str, usize), KnnError> {
        let mut best: Option<(&'a str, usize)> = None;
        for &(label, n) in &self.counts {
            if best.is_none_or(|(_, b)| n > b) {
                best = Some((label, n));
            }
        }
        best.ok_or(KnnError::EmptySelection)
    }
}

/// Returns the plurality label of a k-closest set.
///
/// # Errors
///
/// Returns [`KnnError::EmptySelection`] if `neighbors` is empty.
pub fn vote<'a, F>(neighbors: &[Neighbor<'a, F>]) -> Result<&'a str, KnnError> {
    Tally::from_neighbors(neighbors).winner().map(|(label, _)| label)
}
