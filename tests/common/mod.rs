//! Shared fixtures: small safetensors models with hand-checkable outputs

#![allow(dead_code)]

use calorie_predictor::{Field, RawFields, FEATURE_COUNT};
use candle_core::{Device, Tensor};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub fn write_tensors(path: &Path, tensors: Vec<(&str, Tensor)>) {
    let map: HashMap<String, Tensor> = tensors
        .into_iter()
        .map(|(name, tensor)| (name.to_string(), tensor))
        .collect();
    candle_core::safetensors::save(&map, path).unwrap();
}

pub fn matrix(rows: usize, cols: usize, values: &[f32]) -> Tensor {
    Tensor::from_slice(values, (rows, cols), &Device::Cpu).unwrap()
}

pub fn vector(values: &[f32]) -> Tensor {
    Tensor::from_slice(values, values.len(), &Device::Cpu).unwrap()
}

/// Single linear layer: `sum(weights[i] * x[i]) + bias`
pub fn linear_model(dir: &Path, weights: [f32; FEATURE_COUNT], bias: f32) -> PathBuf {
    let path = dir.join("linear.safetensors");
    write_tensors(
        &path,
        vec![
            ("layers.0.weight", matrix(1, FEATURE_COUNT, &weights)),
            ("layers.0.bias", vector(&[bias])),
        ],
    );
    path
}

/// Calorie-like linear model roughly in the range of real predictions
pub fn calorie_model(dir: &Path) -> PathBuf {
    linear_model(dir, [-10.0, 0.5, 0.1, 0.2, 6.0, 0.8, 2.0], -150.0)
}

pub fn reference_raw() -> RawFields {
    RawFields::new()
        .with(Field::Sex, "0")
        .with(Field::Age, "30")
        .with(Field::Height, "175")
        .with(Field::Weight, "70")
        .with(Field::Duration, "30")
        .with(Field::HeartRate, "110")
        .with(Field::BodyTemperature, "37.5")
}
