//! Input handler for the interactive form using rustyline
//!
//! Provides line editing and persistent history across sessions.

use crate::errors::{PredictorError, Result};
use rustyline::config::Config as EditorConfig;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// What a single read produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Trimmed text, possibly empty
    Text(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D
    Eof,
}

/// Input handler managing the readline interface and history
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl InputHandler {
    /// Create new input handler without persistent history
    pub fn new() -> Result<Self> {
        Ok(InputHandler {
            editor: Self::editor(1000)?,
            history_path: None,
        })
    }

    /// Create input handler with persistent history
    pub fn with_history(history_file: PathBuf, max_entries: usize) -> Result<Self> {
        let mut editor = Self::editor(max_entries)?;

        if history_file.exists() {
            if let Err(e) = editor.load_history(&history_file) {
                tracing::warn!(path = %history_file.display(), error = %e, "Could not load history");
            }
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
        })
    }

    fn editor(max_entries: usize) -> Result<DefaultEditor> {
        let config = EditorConfig::builder()
            .max_history_size(max_entries)
            .map_err(readline_error)?
            .auto_add_history(false)
            .build();
        DefaultEditor::with_config(config).map_err(readline_error)
    }

    /// Read one line with the given prompt
    pub fn read_line(&mut self, prompt: &str) -> Result<Line> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }
                Ok(Line::Text(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) => Ok(Line::Interrupted),
            Err(ReadlineError::Eof) => Ok(Line::Eof),
            Err(err) => Err(readline_error(err)),
        }
    }

    /// Save history to disk
    ///
    /// Called on graceful shutdown
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor.save_history(path).map_err(readline_error)?;
        }
        Ok(())
    }

    pub fn add_history_entry(&mut self, entry: &str) {
        let _ = self.editor.add_history_entry(entry);
    }

    /// Get history size
    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }

    pub fn history_path(&self) -> Option<&PathBuf> {
        self.history_path.as_ref()
    }
}

fn readline_error(err: ReadlineError) -> PredictorError {
    PredictorError::Readline(err.to_string())
}
