//! Error types for the bmi_core library.

use std::fmt;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bmi_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// User-entered weight or height was rejected
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

/// Which input field a validation error refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Weight,
    Height,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Weight => write!(f, "weight"),
            Field::Height => write!(f, "height"),
        }
    }
}

/// Rejection reasons for raw weight/height text
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} '{value}' is not a number")]
    NotANumber { field: Field, value: String },

    #[error("{field} must be a finite number")]
    NotFinite { field: Field },

    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: Field, value: f64 },

    /// Both values parse, but together they give no usable BMI
    #[error("weight {weight} kg and height {height} m are outside the recordable range")]
    OutOfRange { weight: f64, height: f64 },
}

impl InputError {
    /// The single field that failed validation, if the error is about one
    pub fn field(&self) -> Option<Field> {
        match self {
            InputError::NotANumber { field, .. }
            | InputError::NotFinite { field }
            | InputError::NotPositive { field, .. } => Some(*field),
            InputError::OutOfRange { .. } => None,
        }
    }
}
