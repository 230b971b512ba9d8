//! Raw form values and their validation into a `PredictionInput`

use crate::errors::ValidationError;
use crate::fields::{Field, FEATURE_COUNT};
use serde::Serialize;
use std::collections::BTreeMap;

/// Text entered for each field, keyed by field
///
/// Keys are accepted under their canonical names and aliases (see `Field`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    values: BTreeMap<Field, String>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text for a field, replacing any previous value
    pub fn set(&mut self, field: Field, text: impl Into<String>) {
        self.values.insert(field, text.into());
    }

    /// Builder form of `set`
    pub fn with(mut self, field: Field, text: impl Into<String>) -> Self {
        self.set(field, text);
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build from arbitrary name/text pairs; unknown names are skipped
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::new();
        for (key, value) in pairs {
            match key.as_ref().parse::<Field>() {
                Ok(field) => raw.set(field, value),
                Err(_) => tracing::debug!(key = key.as_ref(), "Ignoring unknown field"),
            }
        }
        raw
    }

    /// Trimmed text for a field, `None` when absent or blank
    fn trimmed(&self, field: Field) -> Option<&str> {
        self.get(field).map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Seven validated measurements, all inside their ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionInput {
    sex: u8,
    age: f32,
    height: f32,
    weight: f32,
    duration: f32,
    heart_rate: f32,
    body_temperature: f32,
}

impl PredictionInput {
    pub fn sex(&self) -> u8 {
        self.sex
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn heart_rate(&self) -> f32 {
        self.heart_rate
    }

    pub fn body_temperature(&self) -> f32 {
        self.body_temperature
    }

    /// Value of a single field as the model sees it
    pub fn value(&self, field: Field) -> f32 {
        match field {
            Field::Sex => f32::from(self.sex),
            Field::Age => self.age,
            Field::Height => self.height,
            Field::Weight => self.weight,
            Field::Duration => self.duration,
            Field::HeartRate => self.heart_rate,
            Field::BodyTemperature => self.body_temperature,
        }
    }

    /// Feature row in model order
    pub fn features(&self) -> [f32; FEATURE_COUNT] {
        Field::ALL.map(|field| self.value(field))
    }
}

/// Validate raw form text into a `PredictionInput`
///
/// Blank fields are reported before any parsing happens; range checks run in
/// field order and stop at the first violation.
pub fn parse_and_validate(raw: &RawFields) -> Result<PredictionInput, ValidationError> {
    let mut texts = [""; FEATURE_COUNT];
    for field in Field::ALL {
        texts[field.index()] = raw
            .trimmed(field)
            .ok_or(ValidationError::MissingField(field))?;
    }

    let mut values = [0f32; FEATURE_COUNT];
    for field in Field::ALL {
        values[field.index()] = parse_value(field, texts[field.index()])?;
    }

    for field in Field::ALL {
        let value = values[field.index()];
        let range = field.range();
        if !range.contains(value) {
            return Err(ValidationError::Range {
                field,
                value,
                min: range.min,
                max: range.max,
            });
        }
    }

    Ok(PredictionInput {
        // In range, so exactly 0.0 or 1.0
        sex: values[Field::Sex.index()] as u8,
        age: values[Field::Age.index()],
        height: values[Field::Height.index()],
        weight: values[Field::Weight.index()],
        duration: values[Field::Duration.index()],
        heart_rate: values[Field::HeartRate.index()],
        body_temperature: values[Field::BodyTemperature.index()],
    })
}

fn parse_value(field: Field, text: &str) -> Result<f32, ValidationError> {
    let format_error = || ValidationError::Format {
        field,
        value: text.to_string(),
    };

    if field.is_integer() {
        // Out-of-range integers still parse so they surface as range errors
        text.parse::<i64>()
            .map(|v| v as f32)
            .map_err(|_| format_error())
    } else {
        text.parse::<f32>().map_err(|_| format_error())
    }
}
