//! Error types for encoding, training and prediction.

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A sample field that failed its range or enumeration check.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Numeric field outside its inclusive range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Display label not part of the field's enumeration
    #[error("unknown {field} {value:?}")]
    UnknownCategory { field: &'static str, value: String },

    /// Integer code not part of the field's enumeration
    #[error("unknown {field} code {code}")]
    UnknownCode { field: &'static str, code: u8 },
}

/// Errors surfaced by the risk classification pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid user-supplied sample
    #[error("invalid sample: {0}")]
    Validation(#[from] ValidationError),

    /// The classifier produced a label the risk table does not cover
    #[error("classifier returned label {label}, expected 0..=5")]
    ClassifierOutOfDomain { label: usize },

    /// Embedded training data failed to parse or validate
    #[error("training corpus row {row}: {reason}")]
    Corpus { row: usize, reason: String },

    /// Fitting the ensemble failed
    #[error("training failed: {0}")]
    Training(String),

    /// The ensemble could not score a feature row
    #[error("prediction failed: {0}")]
    Prediction(String),

    /// Invalid forest configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the caller supplied an invalid sample.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
