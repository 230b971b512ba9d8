//! Error types for the calorie predictor
//!
//! Validation failures are recoverable and local to one field; the user fixes
//! the input and submits again. Model load failures disable prediction for the
//! rest of the session.

use crate::fields::Field;
use std::path::PathBuf;
use thiserror::Error;

/// Toast text shown when any field is left blank
pub const MISSING_FIELDS_MESSAGE: &str = "Please enter all the required fields";

/// Toast text shown when the model asset cannot be loaded
pub const MODEL_LOAD_MESSAGE: &str = "Failed to load model";

/// Toast text shown when the inference runtime fails on a valid input
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed";

/// Rejection of the raw form values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A field was absent or blank after trimming
    #[error("Missing required field: {0}")]
    MissingField(Field),

    /// The text could not be parsed as a number
    #[error("Invalid number for {field}: {value:?}")]
    Format { field: Field, value: String },

    /// The value lies outside the allowed inclusive range
    #[error("Invalid {field} value {value}: allowed range is [{min}, {max}]")]
    Range {
        field: Field,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingField(field) => *field,
            ValidationError::Format { field, .. } => *field,
            ValidationError::Range { field, .. } => *field,
        }
    }

    /// Message suitable for a one-line notification
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingField(_) => MISSING_FIELDS_MESSAGE.to_string(),
            ValidationError::Format { field, .. } => {
                format!("Invalid {} value. Please enter a number.", field.label())
            }
            ValidationError::Range { field, .. } => field.range_message().to_string(),
        }
    }
}

/// Main error type for the predictor
#[derive(Error, Debug)]
pub enum PredictorError {
    /// Model asset missing, unreadable or malformed
    #[error("Failed to load model from {}: {reason}", path.display())]
    ModelLoad { path: PathBuf, reason: String },

    /// Input rejected before inference
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Inference runtime errors
    #[error("Inference error: {0}")]
    Inference(#[from] candle_core::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Interactive input errors
    #[error("Input error: {0}")]
    Readline(String),
}

impl PredictorError {
    pub fn model_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PredictorError::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for predictor operations
pub type Result<T> = std::result::Result<T, PredictorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_names_field_and_bounds() {
        let err = ValidationError::Range {
            field: Field::Age,
            value: 14.999,
            min: 15.0,
            max: 80.0,
        };
        let text = err.to_string();
        assert!(text.contains("age"));
        assert!(text.contains("15"));
        assert!(text.contains("80"));
        assert_eq!(err.field(), Field::Age);
    }

    #[test]
    fn test_user_messages() {
        let missing = ValidationError::MissingField(Field::Weight);
        assert_eq!(missing.user_message(), MISSING_FIELDS_MESSAGE);

        let format = ValidationError::Format {
            field: Field::HeartRate,
            value: "fast".to_string(),
        };
        assert_eq!(
            format.user_message(),
            "Invalid heart rate value. Please enter a number."
        );

        let range = ValidationError::Range {
            field: Field::Sex,
            value: 2.0,
            min: 0.0,
            max: 1.0,
        };
        assert!(range.user_message().contains("0 for male or 1 for female"));
    }

    #[test]
    fn test_validation_converts_into_predictor_error() {
        let err: PredictorError = ValidationError::MissingField(Field::Sex).into();
        assert!(matches!(err, PredictorError::Validation(_)));
        assert!(err.to_string().contains("sex"));
    }

    #[test]
    fn test_model_load_error_display() {
        let err = PredictorError::model_load("assets/missing.safetensors", "No such file");
        let text = err.to_string();
        assert!(text.contains("assets/missing.safetensors"));
        assert!(text.contains("No such file"));
    }
}
