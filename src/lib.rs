//! Calorie burn predictor
//!
//! Validates seven body and activity measurements, runs them through a
//! pre-trained regression model loaded from a memory-mapped asset and renders
//! the predicted calories burnt.
//!
//! # Architecture
//!
//! - **fields / input**: field ranges and raw-text validation
//! - **model**: asset loading and the forward pass
//! - **form**: one predict action, its notifications and result label
//! - **cli / repl / doctor**: terminal surfaces

pub mod errors;
pub mod fields;
pub mod input;
pub mod model;
pub mod form;

// Re-export commonly used types
pub use errors::{PredictorError, Result, ValidationError};
pub use fields::{Field, FieldRange, FEATURE_COUNT};
pub use form::{predict, render, Outcome, Prediction, PredictionForm};
pub use input::{parse_and_validate, PredictionInput, RawFields};
pub use model::{load_model, ModelHandle, Regressor};

// Terminal surfaces
pub mod cli;
pub mod doctor;
pub mod logging;
pub mod repl;
