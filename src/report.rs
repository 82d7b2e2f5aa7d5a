//! Human-readable and JSON rendering of classification results.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Serialize, Serializer};
use tracing::info;

use kvote_knn::{Classification, NeighborSummary, SelfTest};

/// Running count of correct held-out predictions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    pub fn record(&mut self, test: &SelfTest) {
        self.total += 1;
        if test.is_correct() {
            self.correct += 1;
        }
    }

    /// Fraction of correct predictions, 0.0 when nothing was recorded.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Prints the neighbor list and the winning vote for one classification.
pub fn print_classification(out: &mut impl Write, classification: &Classification) -> Result<()> {
    writeln!(out, "The k nearest neighbors are:")?;
    for n in classification.neighbors() {
        writeln!(out, "  {} {} (distance {:.6})", n.id, n.label, n.distance)?;
    }
    writeln!(
        out,
        "The majority vote is for: {} ({} of {} votes)",
        classification.label(),
        classification.votes(),
        classification.neighbors().len()
    )?;
    Ok(())
}

/// Prints one held-out trial: the held-out id, its neighbors, the vote and
/// the real classification.
pub fn print_self_test(out: &mut impl Write, trial: usize, test: &SelfTest) -> Result<()> {
    writeln!(out, "Trial {}: held out sample {}", trial + 1, test.held_out())?;
    print_classification(out, test.classification())?;
    writeln!(out, "The real classification is: {}", test.actual())?;
    writeln!(out, "{}", if test.is_correct() { "Correct" } else { "Wrong" })?;
    writeln!(out)?;
    Ok(())
}

/// Prints the final accuracy line.
pub fn print_accuracy(out: &mut impl Write, accuracy: &Accuracy) -> Result<()> {
    writeln!(
        out,
        "Accuracy: {}/{} ({:.1}%)",
        accuracy.correct,
        accuracy.total,
        accuracy.ratio() * 100.0
    )?;
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct NeighborRecord {
    pub id: u64,
    pub label: String,
    #[serde(serialize_with = "serialize_distance")]
    pub distance: f64,
}

/// JSON numbers cannot hold infinity, so non-finite distances are written as
/// strings (`"inf"`) instead of collapsing to `null`.
fn serialize_distance<S: Serializer>(distance: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if distance.is_finite() {
        serializer.serialize_f64(*distance)
    } else {
        serializer.collect_str(distance)
    }
}

impl From<&NeighborSummary> for NeighborRecord {
    fn from(n: &NeighborSummary) -> Self {
        Self {
            id: n.id.0,
            label: n.label.clone(),
            distance: n.distance,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClassificationRecord {
    pub label: String,
    pub votes: usize,
    pub neighbors: Vec<NeighborRecord>,
}

impl From<&Classification> for ClassificationRecord {
    fn from(c: &Classification) -> Self {
        Self {
            label: c.label().to_string(),
            votes: c.votes(),
            neighbors: c.neighbors().iter().map(NeighborRecord::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TrialRecord {
    pub held_out: u64,
    pub actual: String,
    pub correct: bool,
    pub classification: ClassificationRecord,
}

impl From<&SelfTest> for TrialRecord {
    fn from(t: &SelfTest) -> Self {
        Self {
            held_out: t.held_out().0,
            actual: t.actual().to_string(),
            correct: t.is_correct(),
            classification: t.classification().into(),
        }
    }
}

/// JSON report of a `self-test` run.
#[derive(Debug, Serialize)]
pub struct SelfTestReport {
    pub k: usize,
    pub metric: String,
    pub seed: Option<u64>,
    pub samples: usize,
    pub correct: usize,
    pub trials: usize,
    pub accuracy: f64,
    pub results: Vec<TrialRecord>,
}

/// JSON report of a `classify` run.
#[derive(Debug, Serialize)]
pub struct ClassifyReport {
    pub k: usize,
    pub metric: String,
    pub samples: usize,
    pub results: Vec<ClassificationRecord>,
}

/// Serializes `report` as pretty JSON and writes it to `path`.
pub fn write_json<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    info!(path = %path.display(), "report written");
    Ok(())
}
