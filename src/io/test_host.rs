//! Test host implementation for in-memory I/O testing.
//!
//! An implementation of the `IoHost` trait that uses in-memory buffers
//! instead of a real terminal, so the shell loop can be exercised without
//! terminal interaction. Unlike the terminal host it has no line editor of
//! its own: it forwards Tab and history keys as events and records the
//! line updates the core sends back. Compiled unconditionally so
//! integration tests (and embedding hosts) can reuse it.

use std::collections::VecDeque;

use super::{InputEvent, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

/// Test host with in-memory I/O buffers.
///
/// Input events and signals are queued and consumed in order. Output is
/// buffered for later inspection.
#[derive(Debug, Default)]
pub struct TestHost {
    /// Queue of events to be returned by `read_event()`.
    event_queue: VecDeque<InputEvent>,
    /// Queue of signals to be returned by `read_signal()`.
    signal_queue: VecDeque<Signal>,
    /// Buffer of all output written via `write_output()`.
    output_buffer: Vec<Output>,
    /// Every line update received via `set_line()`, newest last.
    line_updates: Vec<String>,
    /// The most recent prompt configuration.
    last_prompt: Option<PromptConfig>,
    /// Number of prompts written.
    prompt_count: usize,
    /// Number of times `clear_screen()` was called.
    clear_count: usize,
}

impl TestHost {
    /// Create a new empty test host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a line to be submitted.
    pub fn queue_line(&mut self, line: impl Into<String>) {
        self.event_queue.push_back(InputEvent::Submit { line: line.into() });
    }

    /// Queue multiple lines to be submitted.
    pub fn queue_lines(&mut self, lines: impl IntoIterator<Item = impl Into<String>>) {
        for line in lines {
            self.queue_line(line);
        }
    }

    /// Queue a Tab press on the given pending line.
    pub fn queue_tab(&mut self, line: impl Into<String>) {
        self.event_queue.push_back(InputEvent::Tab {
            line: line.into(),
            backward: false,
        });
    }

    /// Queue a Shift+Tab press on the given pending line.
    pub fn queue_back_tab(&mut self, line: impl Into<String>) {
        self.event_queue.push_back(InputEvent::Tab {
            line: line.into(),
            backward: true,
        });
    }

    /// Queue an arbitrary event.
    pub fn queue_event(&mut self, event: InputEvent) {
        self.event_queue.push_back(event);
    }

    /// Queue a signal.
    pub fn queue_signal(&mut self, signal: Signal) {
        self.signal_queue.push_back(signal);
    }

    /// All output written so far.
    pub fn output(&self) -> &[Output] {
        &self.output_buffer
    }

    /// Output text of a specific style.
    pub fn output_with_style(&self, style: OutputStyle) -> Vec<&str> {
        self.output_buffer
            .iter()
            .filter(|o| o.style == style)
            .map(|o| o.text.as_str())
            .collect()
    }

    /// All error output.
    pub fn errors(&self) -> Vec<&str> {
        self.output_with_style(OutputStyle::Error)
    }

    /// Line updates received from the core, oldest first.
    pub fn line_updates(&self) -> &[String] {
        &self.line_updates
    }

    /// The most recent line update, if any.
    pub fn current_line(&self) -> Option<&str> {
        self.line_updates.last().map(String::as_str)
    }

    /// The last prompt configuration, if any.
    pub fn last_prompt(&self) -> Option<&PromptConfig> {
        self.last_prompt.as_ref()
    }

    /// Number of prompts written so far.
    pub fn prompt_count(&self) -> usize {
        self.prompt_count
    }

    /// Number of times the screen was cleared.
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }
}

impl IoHost for TestHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        // In test mode there is nothing to wait for; the caller queues
        // events up front.
        Ok(())
    }

    fn read_event(&mut self) -> Result<Option<InputEvent>, IoError> {
        Ok(self.event_queue.pop_front())
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.signal_queue.pop_front())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        self.output_buffer.push(output);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.last_prompt = Some(config);
        self.prompt_count += 1;
        Ok(())
    }

    fn set_line(&mut self, line: &str) -> Result<(), IoError> {
        self.line_updates.push(line.to_string());
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), IoError> {
        self.output_buffer.clear();
        self.clear_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_consumed_in_order() {
        let mut host = TestHost::new();
        host.queue_line("ls");
        host.queue_tab("cd pr");

        assert!(matches!(
            host.read_event().unwrap(),
            Some(InputEvent::Submit { line }) if line == "ls"
        ));
        assert!(matches!(
            host.read_event().unwrap(),
            Some(InputEvent::Tab { backward: false, .. })
        ));
        assert!(host.read_event().unwrap().is_none());
    }

    #[test]
    fn signals_are_consumed_in_order() {
        let mut host = TestHost::new();
        host.queue_signal(Signal::Interrupt);
        host.queue_signal(Signal::Eof);

        assert!(matches!(host.read_signal().unwrap(), Some(Signal::Interrupt)));
        assert!(matches!(host.read_signal().unwrap(), Some(Signal::Eof)));
        assert!(host.read_signal().unwrap().is_none());
    }

    #[test]
    fn output_is_buffered_with_styles() {
        let mut host = TestHost::new();
        host.write_output(Output::normal("plain")).unwrap();
        host.write_output(Output::error("oops")).unwrap();

        assert_eq!(host.output().len(), 2);
        assert_eq!(host.errors(), vec!["oops"]);
    }

    #[test]
    fn clear_screen_empties_buffer() {
        let mut host = TestHost::new();
        host.write_output(Output::normal("text")).unwrap();
        host.clear_screen().unwrap();

        assert!(host.output().is_empty());
        assert_eq!(host.clear_count(), 1);
    }

    #[test]
    fn set_line_records_updates() {
        let mut host = TestHost::new();
        host.set_line("cd projects").unwrap();
        assert_eq!(host.current_line(), Some("cd projects"));
    }

    #[test]
    fn write_prompt_stores_config_and_counts() {
        let mut host = TestHost::new();
        host.write_prompt(PromptConfig {
            label: "guest@jsonsh".to_string(),
            path: "~/projects".to_string(),
            candidates: Vec::new(),
        })
        .unwrap();

        assert_eq!(host.prompt_count(), 1);
        assert_eq!(host.last_prompt().unwrap().path, "~/projects");
    }
}
