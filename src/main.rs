//! Calorie predictor - CLI entry point

use anyhow::Result;
use calorie_predictor::{
    cli::{
        exit::{outcome_code, EXIT_MODEL_UNAVAILABLE},
        Args, Commands, Config, PredictArgs,
    },
    doctor::Doctor,
    form::{Outcome, PredictionForm, TerminalNotifier},
    logging,
    repl::{input::InputHandler, FormSession},
};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    logging::init(&logging::filter_directive(
        args.verbosity().log_level(),
        &config.logging.level,
    ));

    if !config.display.color_output {
        colored::control::set_override(false);
    }

    let model_path = model_path(&args, &config);
    tracing::debug!(model = %model_path.display(), "Resolved model path");

    match &args.command {
        Some(Commands::Predict(predict)) => run_predict(predict, &config, &model_path),
        Some(Commands::Start) => run_session(&config, &model_path),
        Some(Commands::Doctor) => run_doctor(&args, &config, model_path),
        Some(Commands::Config) => {
            show_config(&args, &config, &model_path);
            Ok(())
        }
        None => {
            println!("Calorie predictor v{}", env!("CARGO_PKG_VERSION"));
            println!("\nUsage:");
            println!("  calories predict --sex 0 --age 30 ...   Predict once");
            println!("  calories start                          Interactive form");
            println!("  calories doctor                         Check model and config");
            println!("  calories config                         Show configuration");
            println!();
            Ok(())
        }
    }
}

fn model_path(args: &Args, config: &Config) -> PathBuf {
    args.model.clone().unwrap_or_else(|| config.model_path())
}

fn run_predict(predict: &PredictArgs, config: &Config, model_path: &Path) -> Result<()> {
    let notifier = TerminalNotifier::new(config.display.color_output);
    let mut form = PredictionForm::open(model_path, notifier);

    if !form.is_available() {
        std::process::exit(EXIT_MODEL_UNAVAILABLE);
    }

    match form.submit(&predict.raw_fields()) {
        Outcome::Rendered(prediction) => {
            if predict.json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                println!("{}", prediction.label);
            }
            Ok(())
        }
        outcome => std::process::exit(outcome_code(&outcome)),
    }
}

fn run_session(config: &Config, model_path: &Path) -> Result<()> {
    let color = config.display.color_output;
    let form = PredictionForm::open(model_path, TerminalNotifier::new(color));
    let input = InputHandler::with_history(config.history_path(), config.repl.max_history)?;

    let mut session = FormSession::new(form, input, color);
    session.run()?;
    Ok(())
}

fn run_doctor(args: &Args, config: &Config, model_path: PathBuf) -> Result<()> {
    let doctor = Doctor::new(args.config.clone(), model_path);
    let report = doctor.run_checks();
    report.print(config.display.color_output);

    std::process::exit(if report.is_healthy() { 0 } else { 1 });
}

fn show_config(args: &Args, config: &Config, model_path: &Path) {
    let source = args
        .config
        .clone()
        .or_else(|| Config::default_path().filter(|p| p.exists()))
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());

    println!("\n{}", "Calorie predictor configuration".bold());
    println!("  Source: {}\n", source);

    println!("Model:");
    println!("  Path:      {}", model_path.display());
    println!();

    println!("Display:");
    println!("  Color:     {}", if config.display.color_output { "enabled" } else { "disabled" });
    println!();

    println!("Session:");
    println!("  History:   {}", config.history_path().display());
    println!("  Max lines: {}", config.repl.max_history);
    println!();

    println!("Logging:");
    println!("  Level:     {}", config.logging.level);
    println!("  Verbosity: {}", args.verbosity().as_str());
    println!();
}
