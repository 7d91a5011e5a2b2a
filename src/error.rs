//! Error types for gap-score.

use thiserror::Error;

/// Result type for gap-score operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for gap-score operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A row did not satisfy the column, label or offset contract.
    #[error("Malformed row: {0}")]
    MalformedRow(String),

    /// A row parsed but breaks a label invariant (both candidates marked coreferent).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A gold example had no system prediction (strict scoring only).
    #[error("Missing prediction for {id}")]
    MissingPrediction {
        /// Example ID with no prediction.
        id: String,
    },

    /// Bias is undefined because the masculine F1 is zero.
    #[error("Division undefined: masculine F1 is zero")]
    DivisionUndefined,

    /// File-level dataset problem.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a malformed row error.
    pub fn malformed_row(msg: impl Into<String>) -> Self {
        Error::MalformedRow(msg.into())
    }

    /// Create an invariant violation error.
    pub fn invariant_violation(msg: impl Into<String>) -> Self {
        Error::InvariantViolation(msg.into())
    }

    /// Create a missing prediction error.
    pub fn missing_prediction(id: impl Into<String>) -> Self {
        Error::MissingPrediction { id: id.into() }
    }

    /// Create a dataset error.
    pub fn dataset(msg: impl Into<String>) -> Self {
        Error::Dataset(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(format!("{}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Dataset(format!("{}", err))
    }
}
