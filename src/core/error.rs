//! Error types for the hiring pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SVMError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Optimization failed: {0}")]
    OptimizationError(String),

    #[error("No model loaded")]
    ModelNotLoaded,

    #[error("Invalid label: expected -1 or +1, got {0}")]
    InvalidLabel(f64),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SVMError {
    fn from(err: serde_json::Error) -> Self {
        SVMError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SVMError>;
