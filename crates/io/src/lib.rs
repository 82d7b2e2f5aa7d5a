//! # kvote-io
//!
//! Read labeled samples and unlabeled queries from CSV files. Bridges
//! on-disk feature tables into the [`kvote_knn::Sample`] records the
//! classifier works on.

mod error;
mod reader;
mod validate;

pub use error::IoError;
pub use reader::{ReaderConfig, read_queries, read_samples};
