//! Prediction form
//!
//! Mirrors a single screen: seven text fields, one predict action and a
//! result label. Each submission is independent; only the loaded model is
//! carried between them.

pub mod notify;

pub use notify::{MemoryNotifier, Notifier, TerminalNotifier};

use crate::errors::{
    Result, ValidationError, MODEL_LOAD_MESSAGE, PREDICTION_FAILED_MESSAGE,
};
use crate::input::{parse_and_validate, PredictionInput, RawFields};
use crate::model::{load_model, ModelHandle, Regressor};
use serde::Serialize;
use std::path::Path;

const RESULT_PREFIX: &str = "Calories burnt: ";

/// Run the model on a validated input
///
/// The scalar is returned exactly as the model produced it.
pub fn predict<R: Regressor + ?Sized>(model: &R, input: &PredictionInput) -> Result<f32> {
    model.forward(&input.features())
}

/// Text shown in the result label
pub fn render(value: f32) -> String {
    format!("{}{}", RESULT_PREFIX, value)
}

/// A successful prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub calories: f32,
    pub label: String,
}

/// Result of pressing the predict action once
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Label updated with the prediction
    Rendered(Prediction),
    /// Input refused; the user was notified and the label left as is
    Rejected(ValidationError),
    /// No model loaded; nothing was attempted
    Unavailable,
    /// The runtime failed on a valid input
    Failed(String),
}

impl Outcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Outcome::Rendered(_))
    }
}

/// Form state: the model (if it loaded), the notifier and the result label
pub struct PredictionForm<R, N> {
    model: Option<R>,
    notifier: N,
    result_label: Option<String>,
}

impl<N: Notifier> PredictionForm<ModelHandle, N> {
    /// Load the bundled model and open the form
    ///
    /// A load failure is logged and notified here, once. The form stays usable
    /// for input but every submission is `Outcome::Unavailable`.
    pub fn open(model_path: impl AsRef<Path>, notifier: N) -> Self {
        Self::from_load_result(load_model(model_path), notifier)
    }
}

impl<R: Regressor, N: Notifier> PredictionForm<R, N> {
    pub fn with_model(model: R, notifier: N) -> Self {
        Self {
            model: Some(model),
            notifier,
            result_label: None,
        }
    }

    pub fn from_load_result(model: Result<R>, mut notifier: N) -> Self {
        let model = match model {
            Ok(model) => Some(model),
            Err(e) => {
                tracing::error!(error = %e, "Model unavailable, prediction disabled");
                notifier.notify(MODEL_LOAD_MESSAGE);
                None
            }
        };

        Self {
            model,
            notifier,
            result_label: None,
        }
    }

    /// Whether the predict action does anything
    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&R> {
        self.model.as_ref()
    }

    /// Current label text, `None` until the first successful prediction
    pub fn result_label(&self) -> Option<&str> {
        self.result_label.as_deref()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Handle one press of the predict action
    pub fn submit(&mut self, raw: &RawFields) -> Outcome {
        let Some(model) = self.model.as_ref() else {
            tracing::debug!("Predict ignored, no model loaded");
            return Outcome::Unavailable;
        };

        let input = match parse_and_validate(raw) {
            Ok(input) => input,
            Err(e) => {
                tracing::debug!(field = %e.field(), error = %e, "Input rejected");
                self.notifier.notify(&e.user_message());
                return Outcome::Rejected(e);
            }
        };

        match predict(model, &input) {
            Ok(calories) => {
                let label = render(calories);
                tracing::debug!(calories, "Prediction rendered");
                self.result_label = Some(label.clone());
                Outcome::Rendered(Prediction { calories, label })
            }
            Err(e) => {
                tracing::error!(error = %e, "Inference failed");
                self.notifier.notify(PREDICTION_FAILED_MESSAGE);
                Outcome::Failed(e.to_string())
            }
        }
    }
}
