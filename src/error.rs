use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, NnError>;

/// Every failure the engine can report.
///
/// Shape errors mean a programming or data-integrity defect; I/O errors mean
/// the dataset or model file could not be used. Neither is retried.
#[derive(Error, Debug)]
pub enum NnError {
    #[error("matrix dimension is zero: {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("data length {actual} does not satisfy matrix dimensions (expected {expected})")]
    InvalidDataLength { expected: usize, actual: usize },

    #[error("incompatible shapes for {op}: {left:?} and {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("vector lengths differ for dot product: {left} and {right}")]
    VectorLengthMismatch { left: usize, right: usize },

    #[error("{axis} index {index} out of range (must be < {bound})")]
    IndexOutOfRange {
        axis: &'static str,
        index: usize,
        bound: usize,
    },

    #[error("invalid layer: {0}")]
    InvalidLayer(String),

    #[error("learning rate must be positive and finite, got {0}")]
    InvalidLearningRate(f64),

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("row {row}: {message}")]
    Parse { row: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("model encoding error: {0}")]
    Encode(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
