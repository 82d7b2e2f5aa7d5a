//! Output types for classification queries and held-out self-tests.

use crate::sample::SampleId;
use crate::select::Neighbor;
use crate::vote::Tally;

/// One member of a k-closest set, detached from the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborSummary {
    /// Id of the neighboring sample.
    pub id: SampleId,
    /// Label of the neighboring sample.
    pub label: String,
    /// Distance from the query.
    pub distance: f64,
}

impl<F> From<&Neighbor<'_, F>> for NeighborSummary {
    fn from(n: &Neighbor<'_, F>) -> Self {
        Self {
            id: n.id(),
            label: n.label().to_string(),
            distance: n.distance(),
        }
    }
}

/// Result of classifying one query.
///
/// Owns everything it reports, so it can be kept after the classifier's
/// pool changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    label: String,
    votes: usize,
    neighbors: Vec<NeighborSummary>,
}

impl Classification {
    pub(crate) fn new<F>(label: &str, votes: usize, neighbors: &[Neighbor<'_, F>]) -> Self {
        Self {
            label: label.to_string(),
            votes,
            neighbors: neighbors.iter().map(NeighborSummary::from).collect(),
        }
    }

    /// Returns the winning label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns how many neighbors voted for the winning label.
    pub fn votes(&self) -> usize {
        self.votes
    }

    /// Returns the k-closest set, ascending by distance.
    ///
    /// Holds fewer than k entries when the pool was smaller than k.
    pub fn neighbors(&self) -> &[NeighborSummary] {
        &self.neighbors
    }

    /// Recounts the neighbors' labels in nearest-first order.
    pub fn tally(&self) -> Tally<'_> {
        Tally::from_labels(self.neighbors.iter().map(|n| n.label.as_str()))
    }
}

/// Result of classifying the held-out sample against the rest of the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfTest {
    held_out: SampleId,
    actual: String,
    classification: Classification,
}

impl SelfTest {
    pub(crate) fn new(held_out: SampleId, actual: &str, classification: Classification) -> Self {
        Self {
            held_out,
            actual: actual.to_string(),
            classification,
        }
    }

    /// Returns the id of the held-out sample.
    pub fn held_out(&self) -> SampleId {
        self.held_out
    }

    /// Returns the held-out sample's true label.
    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// Returns the predicted label.
    pub fn predicted(&self) -> &str {
        self.classification.label()
    }

    /// Returns the full classification of the held-out sample.
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Returns `true` when the prediction matches the true label.
    pub fn is_correct(&self) -> bool {
        self.predicted() == self.actual
    }
}
