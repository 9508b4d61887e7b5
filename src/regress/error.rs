// src/regress/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegressError {
    #[error("shape mismatch: {what} ({left} vs {right})")]
    ShapeMismatch { what: &'static str, left: usize, right: usize },
    #[error("dummy index {idx} is past the last column ({ncols} columns)")]
    BadDummyIndex { idx: usize, ncols: usize },
    #[error("cannot make {splits} folds from {rows} rows")]
    BadSplits { splits: usize, rows: usize },
    #[error("test size must be in (0, 1) and leave rows on both sides, got {0}")]
    BadTestSize(f64),
    #[error("no rows to work with")]
    Empty,
    #[error("model used before it was fitted")]
    NotFitted,
    #[error("column `{column}` row {row} is not numeric: {value:?}")]
    NonNumeric { column: String, row: usize, value: String },
    #[error("unknown column `{0}`")]
    UnknownColumn(String),
    #[error("fit failed: {0}")]
    Fit(String),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

impl RegressError {
    pub(crate) fn check_len(what: &'static str, left: usize, right: usize) -> Result<(), Self> {
        if left == right {
            Ok(())
        } else {
            Err(RegressError::ShapeMismatch { what, left, right })
        }
    }
}
