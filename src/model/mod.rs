//! Regression model: asset loading and forward pass
//!
//! The model asset is a safetensors file holding a small dense network.
//! It is memory-mapped once at startup and read-only afterwards.

pub mod loader;
pub mod network;

pub use loader::{load_model, DEFAULT_MODEL_PATH};
pub use network::ModelHandle;

use crate::errors::Result;
use crate::fields::FEATURE_COUNT;

/// Anything that maps one feature row to a single predicted value
pub trait Regressor {
    /// Run inference on a single `[1, FEATURE_COUNT]` row
    fn forward(&self, features: &[f32; FEATURE_COUNT]) -> Result<f32>;
}

impl<R: Regressor + ?Sized> Regressor for &R {
    fn forward(&self, features: &[f32; FEATURE_COUNT]) -> Result<f32> {
        (**self).forward(features)
    }
}

impl<R: Regressor + ?Sized> Regressor for Box<R> {
    fn forward(&self, features: &[f32; FEATURE_COUNT]) -> Result<f32> {
        (**self).forward(features)
    }
}
