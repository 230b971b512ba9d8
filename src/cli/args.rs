//! Command-line argument parsing
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::fields::Field;
use crate::input::RawFields;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Predict calories burnt during exercise
#[derive(Parser, Debug)]
#[command(name = "calories")]
#[command(version)]
#[command(about = "Predict calories burnt during exercise from body and activity measurements", long_about = None)]
pub struct Args {
    /// Model asset (safetensors); overrides the configured path
    #[arg(short, long, global = true)]
    pub model: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict once from command-line values
    Predict(PredictArgs),

    /// Start the interactive form
    Start,

    /// Check configuration and model asset
    Doctor,

    /// Display current configuration
    Config,
}

/// Field values for a one-shot prediction, taken as text and validated later
#[derive(ClapArgs, Debug, Default)]
pub struct PredictArgs {
    /// 0 for male, 1 for female
    #[arg(long, visible_alias = "gender", allow_hyphen_values = true)]
    pub sex: Option<String>,

    /// Age in years (15-80)
    #[arg(long, allow_hyphen_values = true)]
    pub age: Option<String>,

    /// Height in cm (140-210)
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<String>,

    /// Weight in kg (30-250)
    #[arg(long, allow_hyphen_values = true)]
    pub weight: Option<String>,

    /// Exercise duration in minutes (5-240)
    #[arg(long, allow_hyphen_values = true)]
    pub duration: Option<String>,

    /// Heart rate in bpm (60-220)
    #[arg(long, allow_hyphen_values = true)]
    pub heart_rate: Option<String>,

    /// Body temperature in °C (35-41)
    #[arg(long, visible_alias = "body-temp", allow_hyphen_values = true)]
    pub body_temperature: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    /// Collect the provided values; absent flags stay absent
    pub fn raw_fields(&self) -> RawFields {
        let values = [
            (Field::Sex, &self.sex),
            (Field::Age, &self.age),
            (Field::Height, &self.height),
            (Field::Weight, &self.weight),
            (Field::Duration, &self.duration),
            (Field::HeartRate, &self.heart_rate),
            (Field::BodyTemperature, &self.body_temperature),
        ];

        let mut raw = RawFields::new();
        for (field, value) in values {
            if let Some(text) = value {
                raw.set(field, text.clone());
            }
        }
        raw
    }
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Log level forced by the flags, `None` to defer to configuration
    pub fn log_level(&self) -> Option<&'static str> {
        match self {
            Verbosity::Quiet => Some("error"),
            Verbosity::Normal => None,
            Verbosity::Verbose => Some("debug"),
            Verbosity::VeryVerbose => Some("trace"),
        }
    }
}
