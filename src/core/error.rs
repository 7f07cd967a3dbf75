//! Error types for the visualizer pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvmToyError {
    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Training failed: {0}")]
    TrainingFailed(String),

    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    #[error("Predicted label {label} is outside the {palette}-color palette")]
    LabelOutOfRange { label: f64, palette: usize },

    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, SvmToyError>;
