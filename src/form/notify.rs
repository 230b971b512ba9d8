//! User notification sinks
//!
//! A notification is a short, transient, one-line message: a rejected field,
//! a model that failed to load. The terminal sink writes it to stderr; the
//! memory sink keeps it for callers that render messages themselves.

use colored::Colorize;

/// Destination for one-line user notifications
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, message: &str) {
        (**self).notify(message)
    }
}

/// Writes notifications to stderr
#[derive(Debug, Clone)]
pub struct TerminalNotifier {
    color: bool,
}

impl TerminalNotifier {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn format(&self, message: &str) -> String {
        if self.color {
            format!("{} {}", "!".yellow().bold(), message.yellow())
        } else {
            format!("! {}", message)
        }
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{}", self.format(message));
    }
}

/// Collects notifications in order of arrival
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    messages: Vec<String>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    /// Number of notifications equal to `message`
    pub fn count(&self, message: &str) -> usize {
        self.messages.iter().filter(|m| m.as_str() == message).count()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
