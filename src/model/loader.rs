//! Model asset loading
//!
//! Tensor layout inside the safetensors asset:
//! - `layers.<i>.weight` `[out, in]` and optional `layers.<i>.bias` `[out]`,
//!   with `i` running contiguously from 0
//! - optional `input.mean` and `input.std` `[7]`, present together
//!
//! Every tensor is converted to f32 on load.

use crate::errors::{PredictorError, Result};
use crate::fields::FEATURE_COUNT;
use crate::model::network::{ModelHandle, Normalizer};
use candle_core::safetensors::MmapedSafetensors;
use candle_core::{DType, Device, Tensor};
use candle_nn::Linear;
use std::collections::HashSet;
use std::path::Path;

/// Bundled asset location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "assets/calories_model.safetensors";

const LAYER_PREFIX: &str = "layers.";
const MEAN_TENSOR: &str = "input.mean";
const STD_TENSOR: &str = "input.std";

/// Map the model asset and build an inference handle
///
/// Fails with `PredictorError::ModelLoad` when the asset is missing or its
/// tensors do not describe a `FEATURE_COUNT -> 1` network.
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelHandle> {
    let path = path.as_ref();
    let fail = |reason: String| PredictorError::model_load(path, reason);

    if !path.is_file() {
        return Err(fail("asset not found".to_string()));
    }

    // SAFETY: the asset is opened read-only and is not modified while mapped.
    let tensors = unsafe { MmapedSafetensors::new(path) }.map_err(|e| fail(e.to_string()))?;
    let names: HashSet<String> = tensors.tensors().into_iter().map(|(name, _)| name).collect();
    let device = Device::Cpu;

    let layer_count = count_layers(&names).map_err(fail)?;

    let mut layers = Vec::with_capacity(layer_count);
    let mut widths = vec![FEATURE_COUNT];
    for i in 0..layer_count {
        let weight = load_f32(&tensors, &format!("{LAYER_PREFIX}{i}.weight"), &device)
            .map_err(|e| fail(e.to_string()))?;
        let (out_dim, in_dim) = weight
            .dims2()
            .map_err(|_| fail(format!("layer {} weight must be 2-D, got {:?}", i, weight.dims())))?;

        let expected_in = widths[widths.len() - 1];
        if in_dim != expected_in {
            return Err(fail(format!(
                "layer {} takes {} inputs but receives {}",
                i, in_dim, expected_in
            )));
        }

        let bias_name = format!("{LAYER_PREFIX}{i}.bias");
        let bias = if names.contains(&bias_name) {
            let bias = load_f32(&tensors, &bias_name, &device).map_err(|e| fail(e.to_string()))?;
            if bias.dims() != [out_dim] {
                return Err(fail(format!(
                    "layer {} bias has shape {:?}, expected [{}]",
                    i,
                    bias.dims(),
                    out_dim
                )));
            }
            Some(bias)
        } else {
            None
        };

        layers.push(Linear::new(weight, bias));
        widths.push(out_dim);
    }

    let output_width = widths[widths.len() - 1];
    if output_width != 1 {
        return Err(fail(format!(
            "model must produce a single value, last layer has {} outputs",
            output_width
        )));
    }

    let normalizer = load_normalizer(&tensors, &names, &device).map_err(fail)?;

    tracing::info!(
        path = %path.display(),
        layers = layer_count,
        widths = ?widths,
        normalized = normalizer.is_some(),
        "Loaded calorie model"
    );

    Ok(ModelHandle::new(
        path.to_path_buf(),
        layers,
        normalizer,
        widths,
        device,
    ))
}

/// Number of dense layers, requiring indices `0..n` with no gaps
fn count_layers(names: &HashSet<String>) -> std::result::Result<usize, String> {
    let mut indices: Vec<usize> = names
        .iter()
        .filter_map(|name| layer_index(name, ".weight"))
        .collect();
    indices.sort_unstable();

    if indices.is_empty() {
        return Err("asset contains no dense layers".to_string());
    }

    for (expected, index) in indices.iter().enumerate() {
        if *index != expected {
            return Err(format!("layer {} is missing", expected));
        }
    }

    Ok(indices.len())
}

fn layer_index(name: &str, suffix: &str) -> Option<usize> {
    name.strip_prefix(LAYER_PREFIX)?
        .strip_suffix(suffix)?
        .parse()
        .ok()
}

fn load_f32(
    tensors: &MmapedSafetensors,
    name: &str,
    device: &Device,
) -> candle_core::Result<Tensor> {
    tensors.load(name, device)?.to_dtype(DType::F32)
}

fn load_normalizer(
    tensors: &MmapedSafetensors,
    names: &HashSet<String>,
    device: &Device,
) -> std::result::Result<Option<Normalizer>, String> {
    match (names.contains(MEAN_TENSOR), names.contains(STD_TENSOR)) {
        (false, false) => return Ok(None),
        (true, true) => {}
        _ => {
            return Err(format!(
                "{} and {} must be provided together",
                MEAN_TENSOR, STD_TENSOR
            ))
        }
    }

    let load_row = |name: &str| -> std::result::Result<Tensor, String> {
        let tensor = load_f32(tensors, name, device).map_err(|e| e.to_string())?;
        if tensor.dims() != [FEATURE_COUNT] {
            return Err(format!(
                "{} has shape {:?}, expected [{}]",
                name,
                tensor.dims(),
                FEATURE_COUNT
            ));
        }
        tensor.reshape((1, FEATURE_COUNT)).map_err(|e| e.to_string())
    };

    let mean = load_row(MEAN_TENSOR)?;
    let std = load_row(STD_TENSOR)?;

    let scales = std
        .flatten_all()
        .and_then(|t| t.to_vec1::<f32>())
        .map_err(|e| e.to_string())?;
    if scales.iter().any(|s| !(*s > 0.0)) {
        return Err(format!("{} must be strictly positive", STD_TENSOR));
    }

    Ok(Some(Normalizer { mean, std }))
}
