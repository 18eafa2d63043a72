//! I/O types for the shell.
//!
//! These types define the interface between the shell core and its host
//! environment.

use serde::{Deserialize, Serialize};

use crate::candidates::Candidate;

/// An input event from the user.
///
/// Hosts with native line editing (the terminal host) only ever emit
/// `Submit`; embedded hosts forward the control keys and apply the line
/// updates the core sends back via `IoHost::set_line`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum InputEvent {
    /// Enter: submit the line for execution.
    Submit { line: String },
    /// Tab or Shift+Tab: drive completion on the pending line.
    Tab { line: String, backward: bool },
    /// Up arrow: recall the previous history entry.
    HistoryUp,
    /// Down arrow: recall the next history entry.
    HistoryDown,
}

/// A signal from the host (Ctrl+C, Ctrl+D, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "lowercase")]
pub enum Signal {
    /// User pressed Ctrl+C (interrupt).
    Interrupt,
    /// User pressed Ctrl+D (end of file).
    Eof,
}

/// One rendered line, tagged with a display category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub text: String,
    #[serde(default)]
    pub style: OutputStyle,
}

impl Output {
    pub fn command(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Command,
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Normal,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Error,
        }
    }
}

/// Style hint for output rendering. Categories carry no behavioral
/// meaning; hosts use them for styling only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Echo of a submitted command line.
    Command,
    /// Plain output.
    #[default]
    Normal,
    /// Positive/structural output (directory names, headers, welcome).
    Success,
    /// Error message.
    Error,
}

/// Prompt configuration sent from core to host before each line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Label shown before the path (e.g. `guest@jsonsh`).
    pub label: String,
    /// Rendered current path (`~` at the root).
    pub path: String,
    /// Children of the current node, for host-side argument completion.
    pub candidates: Vec<Candidate>,
}

/// Reason the shell exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// User typed 'exit' or 'quit'.
    UserExit,
    /// User pressed Ctrl+D.
    Eof,
}
