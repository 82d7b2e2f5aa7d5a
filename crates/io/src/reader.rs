//! CSV reader configuration and sample/query loading.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use kvote_knn::{Sample, SampleId};
use tracing::{debug, info};

use crate::error::IoError;
use crate::validate::{validate_dimensions, validate_finite, validate_labels};

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading samples and queries from CSV files.
///
/// Sample files hold one labeled sample per record: the label sits in
/// `label_column` and every other column is a numeric feature. Query files
/// hold features only. The [`Default`] implementation expects headerless,
/// comma-separated files with the label first.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether the first record is a header row to skip.
    has_headers: bool,
    /// Zero-based column holding the label in sample files.
    label_column: usize,
    /// Field delimiter byte.
    delimiter: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            has_headers: false,
            label_column: 0,
            delimiter: b',',
        }
    }
}

impl ReaderConfig {
    /// Treat the first record as a header row.
    pub fn with_has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Set the zero-based label column for sample files.
    pub fn with_label_column(mut self, column: usize) -> Self {
        self.label_column = column;
        self
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns whether a header row is expected.
    pub fn has_headers(&self) -> bool {
        self.has_headers
    }

    /// Returns the label column.
    pub fn label_column(&self) -> usize {
        self.label_column
    }

    /// Returns the field delimiter.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the delimiter is a quote, a line
    /// break, or not ASCII.
    pub fn validate(&self) -> Result<(), IoError> {
        if !self.delimiter.is_ascii() || matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(IoError::Validation {
                count: 1,
                details: format!("invalid delimiter byte 0x{:02x}", self.delimiter),
            });
        }
        Ok(())
    }

    fn open(&self, path: &Path) -> Result<csv::Reader<File>, IoError> {
        self.validate()?;
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)?)
    }
}

// ---------------------------------------------------------------------------
// read_samples / read_queries
// ---------------------------------------------------------------------------

/// Read labeled samples from a CSV file.
///
/// Each record becomes one [`Sample`] whose id is its zero-based record
/// index (headers excluded), so ids are stable for a given file.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist
/// - [`IoError::Csv`] for malformed CSV
/// - [`IoError::Parse`] for a non-numeric feature cell
/// - [`IoError::Empty`] if the file holds no records
/// - [`IoError::Validation`] for missing or empty labels, inconsistent
///   feature counts, or non-finite features
pub fn read_samples(path: &Path, config: &ReaderConfig) -> Result<Vec<Sample<Vec<f64>>>, IoError> {
    let mut reader = config.open(path)?;

    let mut labels = Vec::new();
    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        labels.push(record.get(config.label_column).map(str::to_string));
        rows.push(parse_features(&record, row, Some(config.label_column))?);
    }

    if rows.is_empty() {
        return Err(IoError::Empty {
            path: path.to_path_buf(),
        });
    }
    debug!(n_records = rows.len(), "parsed sample records");

    let mut c = validate_labels(labels.iter().map(Option::as_deref));
    c.merge(validate_dimensions(&rows));
    c.merge(validate_finite(&rows));
    c.finish()?;

    let samples: Vec<_> = labels
        .into_iter()
        .zip(rows)
        .enumerate()
        .map(|(i, (label, features))| {
            Sample::new(SampleId(i as u64), label.unwrap_or_default(), features)
        })
        .collect();

    info!(
        path = %path.display(),
        n_samples = samples.len(),
        n_features = samples[0].features().len(),
        "samples loaded"
    );
    Ok(samples)
}

/// Read unlabeled feature rows from a CSV file.
///
/// Every column is a feature; the label column setting is ignored.
///
/// # Errors
///
/// Same as [`read_samples`], minus the label checks.
pub fn read_queries(path: &Path, config: &ReaderConfig) -> Result<Vec<Vec<f64>>, IoError> {
    let mut reader = config.open(path)?;

    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        rows.push(parse_features(&record?, row, None)?);
    }

    if rows.is_empty() {
        return Err(IoError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mut c = validate_dimensions(&rows);
    c.merge(validate_finite(&rows));
    c.finish()?;

    info!(path = %path.display(), n_queries = rows.len(), "queries loaded");
    Ok(rows)
}

/// Parses every column except `skip` as an `f64`.
fn parse_features(
    record: &StringRecord,
    row: usize,
    skip: Option<usize>,
) -> Result<Vec<f64>, IoError> {
    record
        .iter()
        .enumerate()
        .filter(|&(column, _)| Some(column) != skip)
        .map(|(column, cell)| {
            cell.parse::<f64>().map_err(|_| IoError::Parse {
                row,
                column,
                value: cell.to_string(),
            })
        })
        .collect()
}
