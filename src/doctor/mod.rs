//! Doctor command - configuration and model health checks

use crate::cli::Config;
use crate::fields::Field;
use crate::form::{predict, render};
use crate::input::{parse_and_validate, RawFields};
use crate::model::{load_model, ModelHandle};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Reference row used to exercise the model
const REFERENCE_INPUT: [(Field, &str); 7] = [
    (Field::Sex, "0"),
    (Field::Age, "30"),
    (Field::Height, "175"),
    (Field::Weight, "70"),
    (Field::Duration, "30"),
    (Field::HeartRate, "110"),
    (Field::BodyTemperature, "37.5"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

impl CheckStatus {
    fn symbol(&self) -> &str {
        match self {
            Self::Pass => "✓",
            Self::Warning => "⚠",
            Self::Fail => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthCheck {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub latency_ms: Option<u64>,
}

impl HealthCheck {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            latency_ms: None,
        }
    }

    fn with_latency(mut self, started: Instant) -> Self {
        self.latency_ms = Some(started.elapsed().as_millis() as u64);
        self
    }
}

#[derive(Debug, Clone)]
pub struct HealthReport {
    pub checks: Vec<HealthCheck>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        !self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }

    pub fn check(&self, name: &str) -> Option<&HealthCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    pub fn print(&self, color: bool) {
        println!("\nCalorie predictor health check\n");

        for check in &self.checks {
            let symbol = check.status.symbol();
            let symbol = if !color {
                symbol.normal()
            } else {
                match check.status {
                    CheckStatus::Pass => symbol.green(),
                    CheckStatus::Warning => symbol.yellow(),
                    CheckStatus::Fail => symbol.red(),
                }
            };
            let latency = check
                .latency_ms
                .map(|ms| format!(" ({}ms)", ms))
                .unwrap_or_default();

            println!(
                "  {} {:<22} {}{}",
                symbol,
                format!("{}:", check.name),
                check.message,
                latency
            );
        }

        println!();

        if self.is_healthy() {
            println!("  All checks passed\n");
        } else {
            println!("  Some checks failed\n");
        }
    }
}

/// Runs the health checks for one configuration and model path
pub struct Doctor {
    config_path: Option<PathBuf>,
    model_path: PathBuf,
}

impl Doctor {
    pub fn new(config_path: Option<PathBuf>, model_path: PathBuf) -> Self {
        Self {
            config_path,
            model_path,
        }
    }

    pub fn run_checks(&self) -> HealthReport {
        let mut checks = vec![self.check_config(), self.check_asset()];

        let started = Instant::now();
        match load_model(&self.model_path) {
            Ok(model) => {
                checks.push(
                    HealthCheck::new(
                        "Model",
                        CheckStatus::Pass,
                        format!(
                            "Loaded {}, layer widths {:?}",
                            model.path().display(),
                            model.layer_widths()
                        ),
                    )
                    .with_latency(started),
                );
                checks.push(Self::check_reference_prediction(&model));
            }
            Err(e) => {
                checks.push(HealthCheck::new("Model", CheckStatus::Fail, e.to_string()));
                checks.push(HealthCheck::new(
                    "Reference prediction",
                    CheckStatus::Warning,
                    "Skipped, model not loaded",
                ));
            }
        }

        HealthReport { checks }
    }

    fn check_config(&self) -> HealthCheck {
        let explicit = self.config_path.as_deref();
        let shown = explicit
            .map(Path::to_path_buf)
            .or_else(Config::default_path)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string());

        match Config::load(explicit) {
            Ok(_) => HealthCheck::new("Configuration", CheckStatus::Pass, shown),
            Err(e) => HealthCheck::new("Configuration", CheckStatus::Fail, e.to_string()),
        }
    }

    fn check_asset(&self) -> HealthCheck {
        match std::fs::metadata(&self.model_path) {
            Ok(meta) if meta.is_file() => HealthCheck::new(
                "Model asset",
                CheckStatus::Pass,
                format!("{} ({} bytes)", self.model_path.display(), meta.len()),
            ),
            Ok(_) => HealthCheck::new(
                "Model asset",
                CheckStatus::Fail,
                format!("{} is not a file", self.model_path.display()),
            ),
            Err(e) => HealthCheck::new(
                "Model asset",
                CheckStatus::Fail,
                format!("{}: {}", self.model_path.display(), e),
            ),
        }
    }

    /// Predict the reference row twice; both runs must agree
    fn check_reference_prediction(model: &ModelHandle) -> HealthCheck {
        const NAME: &str = "Reference prediction";
        let started = Instant::now();

        let raw = RawFields::from_pairs(REFERENCE_INPUT.map(|(field, text)| (field.name(), text)));
        let input = match parse_and_validate(&raw) {
            Ok(input) => input,
            Err(e) => return HealthCheck::new(NAME, CheckStatus::Fail, e.to_string()),
        };

        let first = predict(model, &input);
        let second = predict(model, &input);
        match (first, second) {
            (Ok(a), Ok(b)) if a.to_bits() == b.to_bits() => {
                let status = if a.is_finite() {
                    CheckStatus::Pass
                } else {
                    CheckStatus::Warning
                };
                HealthCheck::new(NAME, status, render(a)).with_latency(started)
            }
            (Ok(a), Ok(b)) => HealthCheck::new(
                NAME,
                CheckStatus::Fail,
                format!("Non-deterministic output: {} vs {}", a, b),
            ),
            (Err(e), _) | (_, Err(e)) => HealthCheck::new(NAME, CheckStatus::Fail, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_model_fails_report() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        Config::default().save(&config_path).unwrap();

        let doctor = Doctor::new(Some(config_path), temp_dir.path().join("absent.safetensors"));
        let report = doctor.run_checks();

        assert!(!report.is_healthy());
        assert_eq!(report.check("Configuration").unwrap().status, CheckStatus::Pass);
        assert_eq!(report.check("Model asset").unwrap().status, CheckStatus::Fail);
        assert_eq!(report.check("Model").unwrap().status, CheckStatus::Fail);
        assert_eq!(
            report.check("Reference prediction").unwrap().status,
            CheckStatus::Warning
        );
    }

    #[test]
    fn test_broken_config_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[logging]\nlevel = \"loud\"\n").unwrap();

        let doctor = Doctor::new(Some(config_path), temp_dir.path().join("m.safetensors"));
        let report = doctor.run_checks();
        assert_eq!(report.check("Configuration").unwrap().status, CheckStatus::Fail);
    }

    #[test]
    fn test_status_symbols() {
        assert_eq!(CheckStatus::Pass.symbol(), "✓");
        assert_eq!(CheckStatus::Fail.symbol(), "✗");
    }
}
