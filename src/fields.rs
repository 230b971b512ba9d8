//! Form fields for the calorie predictor
//!
//! Each measurement the model consumes is a `Field` with a fixed position in
//! the feature vector, an inclusive physiological range and the message shown
//! when a value falls outside it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of features the model expects per row
pub const FEATURE_COUNT: usize = 7;

/// A single input measurement, in feature-vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Sex,
    Age,
    Height,
    Weight,
    Duration,
    HeartRate,
    BodyTemperature,
}

/// Inclusive bounds for a field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f32,
    pub max: f32,
}

impl FieldRange {
    const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// NaN is never contained.
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl fmt::Display for FieldRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

impl Field {
    /// All fields in the order they are validated and fed to the model
    pub const ALL: [Field; FEATURE_COUNT] = [
        Field::Sex,
        Field::Age,
        Field::Height,
        Field::Weight,
        Field::Duration,
        Field::HeartRate,
        Field::BodyTemperature,
    ];

    /// Canonical key used in raw field maps and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Field::Sex => "sex",
            Field::Age => "age",
            Field::Height => "height",
            Field::Weight => "weight",
            Field::Duration => "duration",
            Field::HeartRate => "heart_rate",
            Field::BodyTemperature => "body_temperature",
        }
    }

    /// Human wording used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            Field::Sex => "gender",
            Field::Age => "age",
            Field::Height => "height",
            Field::Weight => "weight",
            Field::Duration => "duration",
            Field::HeartRate => "heart rate",
            Field::BodyTemperature => "body temperature",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Field::Sex => "0=male, 1=female",
            Field::Age => "years",
            Field::Height => "cm",
            Field::Weight => "kg",
            Field::Duration => "minutes",
            Field::HeartRate => "bpm",
            Field::BodyTemperature => "°C",
        }
    }

    pub fn range(&self) -> FieldRange {
        match self {
            Field::Sex => FieldRange::new(0.0, 1.0),
            Field::Age => FieldRange::new(15.0, 80.0),
            Field::Height => FieldRange::new(140.0, 210.0),
            Field::Weight => FieldRange::new(30.0, 250.0),
            Field::Duration => FieldRange::new(5.0, 240.0),
            Field::HeartRate => FieldRange::new(60.0, 220.0),
            Field::BodyTemperature => FieldRange::new(35.0, 41.0),
        }
    }

    /// Position of this field in the feature vector
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Sex is the only integer-valued field
    pub fn is_integer(&self) -> bool {
        matches!(self, Field::Sex)
    }

    /// Prompt shown by the interactive form
    pub fn prompt(&self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        let capitalised = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
        format!("{} ({}): ", capitalised, self.unit())
    }

    /// Toast text for a value outside `range()`
    pub fn range_message(&self) -> &'static str {
        match self {
            Field::Sex => "Invalid gender value. Please enter 0 for male or 1 for female.",
            Field::Age => "Invalid age value. Please enter an age between 15 and 80.",
            Field::Height => "Invalid height value. Please enter a height between 140 and 210 cm.",
            Field::Weight => "Invalid weight value. Please enter a weight between 30 and 250 kg.",
            Field::Duration => {
                "Invalid duration value. Please enter a duration between 5 and 240 mins."
            }
            Field::HeartRate => {
                "Invalid heart rate value. Please enter a heart rate between 60 and 220 bpm."
            }
            Field::BodyTemperature => {
                "Invalid body temperature value. Please enter a temperature between 35 and 41 °C."
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sex" | "gender" => Ok(Field::Sex),
            "age" => Ok(Field::Age),
            "height" => Ok(Field::Height),
            "weight" => Ok(Field::Weight),
            "duration" => Ok(Field::Duration),
            "heart_rate" | "heart-rate" | "heartrate" => Ok(Field::HeartRate),
            "body_temperature" | "body-temperature" | "body_temp" | "temperature" => {
                Ok(Field::BodyTemperature)
            }
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_matches_index() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = Field::Age.range();
        assert!(range.contains(15.0));
        assert!(range.contains(80.0));
        assert!(!range.contains(14.999));
        assert!(!range.contains(80.001));
    }

    #[test]
    fn test_range_rejects_nan_and_infinity() {
        let range = Field::Weight.range();
        assert!(!range.contains(f32::NAN));
        assert!(!range.contains(f32::INFINITY));
        assert!(!range.contains(f32::NEG_INFINITY));
    }

    #[test]
    fn test_field_parsing_with_aliases() {
        assert_eq!("gender".parse::<Field>().unwrap(), Field::Sex);
        assert_eq!("Heart-Rate".parse::<Field>().unwrap(), Field::HeartRate);
        assert_eq!("body_temp".parse::<Field>().unwrap(), Field::BodyTemperature);
        assert!("pulse".parse::<Field>().is_err());
    }

    #[test]
    fn test_name_round_trips() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn test_prompt_is_capitalised() {
        assert_eq!(Field::HeartRate.prompt(), "Heart rate (bpm): ");
        assert_eq!(Field::Sex.prompt(), "Gender (0=male, 1=female): ");
    }

    #[test]
    fn test_range_messages_name_bounds() {
        let msg = Field::Height.range_message();
        assert!(msg.contains("140"));
        assert!(msg.contains("210"));
    }
}
