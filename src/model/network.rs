//! Dense regression network evaluated with candle

use crate::errors::Result;
use crate::fields::FEATURE_COUNT;
use crate::model::Regressor;
use candle_core::{Device, Module, Tensor};
use candle_nn::Linear;
use std::path::{Path, PathBuf};

/// Feature standardisation applied before the first layer
#[derive(Debug, Clone)]
pub(crate) struct Normalizer {
    /// Shape `[1, FEATURE_COUNT]`
    pub mean: Tensor,
    /// Shape `[1, FEATURE_COUNT]`, strictly positive
    pub std: Tensor,
}

/// Loaded model, created once and shared by every prediction
///
/// Hidden layers use ReLU; the final layer is linear with a single output.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    path: PathBuf,
    layers: Vec<Linear>,
    normalizer: Option<Normalizer>,
    widths: Vec<usize>,
    device: Device,
}

impl ModelHandle {
    pub(crate) fn new(
        path: PathBuf,
        layers: Vec<Linear>,
        normalizer: Option<Normalizer>,
        widths: Vec<usize>,
        device: Device,
    ) -> Self {
        Self {
            path,
            layers,
            normalizer,
            widths,
            device,
        }
    }

    /// Asset the model was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Input width followed by each layer's output width, e.g. `[7, 16, 1]`
    pub fn layer_widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn is_normalized(&self) -> bool {
        self.normalizer.is_some()
    }
}

impl Regressor for ModelHandle {
    fn forward(&self, features: &[f32; FEATURE_COUNT]) -> Result<f32> {
        let mut xs = Tensor::from_slice(features.as_slice(), (1, FEATURE_COUNT), &self.device)?;

        if let Some(norm) = &self.normalizer {
            xs = xs.broadcast_sub(&norm.mean)?.broadcast_div(&norm.std)?;
        }

        let last = self.layers.len().saturating_sub(1);
        for (i, layer) in self.layers.iter().enumerate() {
            xs = layer.forward(&xs)?;
            if i < last {
                xs = xs.relu()?;
            }
        }

        let value = xs.flatten_all()?.get(0)?.to_scalar::<f32>()?;
        Ok(value)
    }
}
