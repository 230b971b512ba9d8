//! Process exit codes for the `calories` binary

use crate::form::Outcome;

/// Prediction rendered
pub const EXIT_OK: i32 = 0;
/// Input rejected by validation
pub const EXIT_INVALID_INPUT: i32 = 1;
/// Model asset could not be loaded
pub const EXIT_MODEL_UNAVAILABLE: i32 = 2;
/// The model loaded but failed on a valid input
pub const EXIT_PREDICTION_FAILED: i32 = 3;

/// Exit code for the outcome of a single submission
pub fn outcome_code(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Rendered(_) => EXIT_OK,
        Outcome::Rejected(_) => EXIT_INVALID_INPUT,
        Outcome::Unavailable => EXIT_MODEL_UNAVAILABLE,
        Outcome::Failed(_) => EXIT_PREDICTION_FAILED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use crate::fields::Field;
    use crate::form::Prediction;

    #[test]
    fn test_outcome_codes() {
        let rendered = Outcome::Rendered(Prediction {
            calories: 42.0,
            label: "Calories burnt: 42".to_string(),
        });
        assert_eq!(outcome_code(&rendered), EXIT_OK);
        assert_eq!(
            outcome_code(&Outcome::Rejected(ValidationError::MissingField(Field::Age))),
            EXIT_INVALID_INPUT
        );
        assert_eq!(outcome_code(&Outcome::Unavailable), EXIT_MODEL_UNAVAILABLE);
    }

    #[test]
    fn test_runtime_failure_is_not_invalid_input() {
        let failed = Outcome::Failed("shape mismatch".to_string());
        assert_eq!(outcome_code(&failed), EXIT_PREDICTION_FAILED);
        assert_ne!(outcome_code(&failed), EXIT_INVALID_INPUT);
    }
}
