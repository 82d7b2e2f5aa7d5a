//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus helpers that check the
//! invariants a sample table must hold before it reaches the classifier.

use crate::error::IoError;

/// Upper bound on messages kept verbatim; the count still covers every error.
const MAX_DETAILS: usize = 20;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
///
/// Create a collector, push zero or more error messages, then call
/// [`finish`](Self::finish) to obtain `Ok(())` when everything is valid or a
/// single `Err` that summarises every violation.
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Move every error from `other` into this collector.
    pub(crate) fn merge(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    /// Returns `true` when no errors have been recorded.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins the first messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let count = self.errors.len();
        let mut details = self.errors[..count.min(MAX_DETAILS)].join("; ");
        if count > MAX_DETAILS {
            details.push_str(&format!("; ... and {} more", count - MAX_DETAILS));
        }
        Err(IoError::Validation { count, details })
    }
}

// ---------------------------------------------------------------------------
// Standalone validation helpers
// ---------------------------------------------------------------------------

/// Check that every row has the same number of features as the first row,
/// and that there is at least one feature.
pub(crate) fn validate_dimensions(rows: &[Vec<f64>]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    let Some(first) = rows.first() else {
        return c;
    };

    let dim = first.len();
    if dim == 0 {
        c.push("rows have no feature columns");
    }
    for (i, row) in rows.iter().enumerate().skip(1) {
        if row.len() != dim {
            c.push(format!("row {i} has {} features, expected {dim}", row.len()));
        }
    }

    c
}

/// Check that every feature value is finite.
///
/// Records one message per offending cell.
pub(crate) fn validate_finite(rows: &[Vec<f64>]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for (i, row) in rows.iter().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            if !val.is_finite() {
                c.push(format!("non-finite feature at row {i}, feature {j}: {val}"));
            }
        }
    }

    c
}

/// Check that every row has a label and that no label is empty.
///
/// `None` marks a row too short to reach the label column.
pub(crate) fn validate_labels<'a>(
    labels: impl IntoIterator<Item = Option<&'a str>>,
) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for (i, label) in labels.into_iter().enumerate() {
        match label {
            None => c.push(format!("missing label at row {i}")),
            Some("") => c.push(format!("empty label at row {i}")),
            Some(_) => {}
        }
    }

    c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
