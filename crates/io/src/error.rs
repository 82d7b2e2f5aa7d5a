//! Error types for kvote-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the kvote-io crate.
///
/// Covers missing files, CSV-level failures, unparseable cells and
/// accumulated validation problems found while reading samples or queries.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV library.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when a feature cell is not a number.
    #[error("row {row}, column {column}: cannot parse {value:?} as a number")]
    Parse {
        /// Zero-based record index.
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// The offending cell text.
        value: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a file holds no records.
    #[error("no records in {}", path.display())]
    Empty {
        /// Path to the file that was read.
        path: PathBuf,
    },
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.csv");
    }

    #[test]
    fn display_csv() {
        let err = IoError::Csv {
            reason: "bad quote".to_string(),
        };
        assert_eq!(err.to_string(), "csv error: bad quote");
    }

    #[test]
    fn display_parse() {
        let err = IoError::Parse {
            row: 4,
            column: 2,
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "row 4, column 2: cannot parse \"abc\" as a number"
        );
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "a; b".to_string(),
        };
        assert_eq!(err.to_string(), "2 validation error(s): a; b");
    }

    #[test]
    fn display_empty() {
        let err = IoError::Empty {
            path: PathBuf::from("faces.csv"),
        };
        assert_eq!(err.to_string(), "no records in faces.csv");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<IoError>();
    }
}
