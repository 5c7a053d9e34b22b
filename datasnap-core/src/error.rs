use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Insufficient groups: {0}")]
    InsufficientGroups(String),

    #[error("Length mismatch: first sample has {left} values, second has {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Zero variance: {0}")]
    ZeroVariance(String),

    #[error("Invalid significance level {0}: alpha must be strictly between 0 and 1")]
    InvalidAlpha(f64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AnalysisError {
    /// True for failures caused by the selected columns or parameters, which
    /// the caller can recover from by changing its inputs.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, AnalysisError::Serialization(_))
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Serialization(err.to_string())
    }
}
