//! Interactive form session
//!
//! Prompts for each field in order and submits the form after the last one,
//! the terminal counterpart of filling seven text boxes and pressing predict.
//! Lines starting with `/` are commands.

pub mod input;

use crate::errors::Result;
use crate::fields::Field;
use crate::form::{Notifier, Outcome, PredictionForm};
use crate::input::RawFields;
use crate::model::Regressor;
use colored::Colorize;
use input::{InputHandler, Line};

/// Built-in session commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Clear,
    Help,
    Unknown(String),
}

/// Check if input is a command (starts with /)
pub fn is_command(input: &str) -> bool {
    input.trim_start().starts_with('/')
}

impl Command {
    pub fn parse(input: &str) -> Self {
        match input.trim().trim_start_matches('/').to_ascii_lowercase().as_str() {
            "exit" | "quit" | "q" => Command::Exit,
            "clear" | "reset" => Command::Clear,
            "help" | "h" | "?" => Command::Help,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Flow control after a line was handled
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Reprompt,
    Restart,
    Exit,
}

/// Interactive session around a `PredictionForm`
pub struct FormSession<R, N> {
    form: PredictionForm<R, N>,
    input: InputHandler,
    color: bool,
}

impl<R: Regressor, N: Notifier> FormSession<R, N> {
    pub fn new(form: PredictionForm<R, N>, input: InputHandler, color: bool) -> Self {
        Self { form, input, color }
    }

    /// Run until `/exit` or Ctrl-D; history is saved on the way out
    pub fn run(&mut self) -> Result<()> {
        self.show_banner();

        'forms: loop {
            let mut raw = RawFields::new();

            for field in Field::ALL {
                let text = loop {
                    match self.input.read_line(&field.prompt())? {
                        Line::Text(text) if is_command(&text) => {
                            match self.handle_command(Command::parse(&text)) {
                                Step::Reprompt => continue,
                                Step::Restart => continue 'forms,
                                Step::Exit => break 'forms,
                            }
                        }
                        Line::Text(text) if text.is_empty() => {
                            println!("Form cleared");
                            continue 'forms;
                        }
                        Line::Text(text) => break text,
                        Line::Interrupted => {
                            println!("Form cleared (use /exit to quit)");
                            continue 'forms;
                        }
                        Line::Eof => break 'forms,
                    }
                };

                raw.set(field, text);
            }

            self.submit(&raw);
        }

        self.input.save_history()
    }

    fn submit(&mut self, raw: &RawFields) {
        match self.form.submit(raw) {
            Outcome::Rendered(prediction) => {
                if self.color {
                    println!("{}\n", prediction.label.green().bold());
                } else {
                    println!("{}\n", prediction.label);
                }
            }
            // The notifier has already shown the reason
            Outcome::Rejected(_) | Outcome::Failed(_) => println!(),
            Outcome::Unavailable => {}
        }
    }

    fn handle_command(&mut self, command: Command) -> Step {
        match command {
            Command::Exit => Step::Exit,
            Command::Clear => {
                println!("Form cleared");
                Step::Restart
            }
            Command::Help => {
                self.show_help();
                Step::Reprompt
            }
            Command::Unknown(name) => {
                println!("Unknown command: /{} (try /help)", name);
                Step::Reprompt
            }
        }
    }

    fn show_banner(&self) {
        let rule = "=".repeat(56);
        if self.color {
            println!("\n{}", rule.cyan());
            println!("{}", "  Calorie burn predictor".bold().cyan());
            println!("{}\n", rule.cyan());
        } else {
            println!("\n{}\n  Calorie burn predictor\n{}\n", rule, rule);
        }
        if !self.form.is_available() {
            let hint = "Model unavailable, predictions are disabled for this session.";
            if self.color {
                println!("{}", hint.dimmed());
            } else {
                println!("{}", hint);
            }
        }
        println!("Enter each value and press Enter; an empty line starts over, /help for commands.\n");
    }

    fn show_help(&self) {
        println!("Fields:");
        for field in Field::ALL {
            let range = field.range();
            println!("  {:<18} {} to {} ({})", field.name(), range.min, range.max, field.unit());
        }
        println!("Commands:");
        println!("  /clear   start the form again (or an empty line)");
        println!("  /help    show this help");
        println!("  /exit    quit");
        println!();
    }
}
