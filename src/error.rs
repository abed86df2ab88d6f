//! Error types in lloyd
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating or building a set of records
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
    #[error("row {row} has {found} features, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("records must have at least one feature")]
    NoFeatures,
    #[error("row {row} contains a non-finite value")]
    NonFinite { row: usize },
}
