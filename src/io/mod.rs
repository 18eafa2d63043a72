//! I/O abstraction for the shell.
//!
//! This module defines the interface between the shell core and its host
//! environment. The core interacts only through the `IoHost` trait, so
//! different hosts (terminal, embedded, testing) can provide their own
//! implementations.

pub mod test_host;
pub mod types;

pub use test_host::TestHost;
pub use types::*;

/// Error type for I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(String),
}

/// Host interface for shell I/O operations.
///
/// The shell core calls these methods to interact with the user. The core
/// never touches a terminal or screen directly; command handlers return
/// structured lines and the host decides how to render them.
pub trait IoHost {
    /// Wait for input to become available.
    ///
    /// This may block (terminal hosts) or return immediately (event-driven
    /// hosts). After this returns, `read_event()` or `read_signal()`
    /// should yield something.
    fn wait_for_input(&mut self) -> Result<(), IoError>;

    /// Read the next input event, if available.
    fn read_event(&mut self) -> Result<Option<InputEvent>, IoError>;

    /// Read any pending signal (Ctrl+C, Ctrl+D).
    fn read_signal(&mut self) -> Result<Option<Signal>, IoError>;

    /// Write one output line.
    fn write_output(&mut self, output: Output) -> Result<(), IoError>;

    /// Update the prompt configuration for the next line.
    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError>;

    /// Replace the pending input line (history recall, Tab completion).
    /// The caret moves to the end of the line.
    fn set_line(&mut self, line: &str) -> Result<(), IoError>;

    /// Clear all previously rendered output.
    fn clear_screen(&mut self) -> Result<(), IoError>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), IoError> {
        Ok(())
    }
}
