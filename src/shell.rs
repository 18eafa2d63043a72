//! Platform-independent shell core.
//!
//! The core owns all per-instance state and drives the prompt loop over an
//! `IoHost`. Hosts with their own line editor only deliver submitted
//! lines; dumber hosts forward Tab and history keys as events and apply
//! the line updates the core sends back. Execution of a submitted line
//! runs to completion before the next prompt is written.

use crate::commands::{self, Effect};
use crate::complete::{Completion, CompletionSession};
use crate::config::ShellConfig;
use crate::context::ShellContext;
use crate::document::{DocumentSource, LoadError};
use crate::host::TerminalHost;
use crate::candidates;
use crate::io::{ExitReason, InputEvent, IoError, IoHost, Output, PromptConfig, Signal};

/// One shell instance: document, path, history, completion state.
/// Independent instances share nothing.
pub struct ShellCore {
    config: ShellConfig,
    ctx: ShellContext,
    completion: CompletionSession,
    load_error: Option<LoadError>,
}

impl ShellCore {
    /// Create a core over an already-parsed document.
    pub fn new(config: ShellConfig, document: serde_json::Value) -> Self {
        Self {
            config,
            ctx: ShellContext::new(document),
            completion: CompletionSession::new(),
            load_error: None,
        }
    }

    /// Create a core by fetching the configured data source. A failed load
    /// falls back to an empty document; the error is reported on the first
    /// `run`.
    pub fn load(config: ShellConfig) -> Self {
        let source = DocumentSource::from_spec(&config.data_source);
        let (document, load_error) = source.load_or_empty();
        Self {
            config,
            ctx: ShellContext::new(document),
            completion: CompletionSession::new(),
            load_error,
        }
    }

    pub fn context(&self) -> &ShellContext {
        &self.ctx
    }

    /// Run the shell loop, reading/writing through the provided I/O host.
    pub fn run(&mut self, io: &mut impl IoHost) -> Result<ExitReason, IoError> {
        if let Some(err) = self.load_error.take() {
            io.write_output(Output::error(format!(
                "Failed to load document: {} (starting with an empty one)",
                err
            )))?;
        }
        if !self.config.welcome_message.is_empty() {
            io.write_output(Output::success(self.config.welcome_message.clone()))?;
        }

        loop {
            self.update_prompt(io)?;
            io.wait_for_input()?;

            if let Some(signal) = io.read_signal()? {
                match signal {
                    Signal::Eof => {
                        io.write_output(Output::success("logout"))?;
                        io.flush()?;
                        return Ok(ExitReason::Eof);
                    }
                    Signal::Interrupt => {
                        io.write_output(Output::normal("^C"))?;
                        continue;
                    }
                }
            }

            let event = match io.read_event()? {
                Some(event) => event,
                None => continue,
            };

            match event {
                InputEvent::Submit { line } => {
                    if self.submit(&line, io)? == Some(ExitReason::UserExit) {
                        return Ok(ExitReason::UserExit);
                    }
                }
                InputEvent::Tab { line, backward } => {
                    match self.completion.tab(&line, backward, &self.ctx) {
                        Completion::Replace(new_line) => io.set_line(&new_line)?,
                        Completion::Hint(text) => io.write_output(Output::normal(text))?,
                        Completion::None => {}
                    }
                }
                InputEvent::HistoryUp => {
                    if let Some(line) = self.ctx.history_up() {
                        io.set_line(line)?;
                    }
                }
                InputEvent::HistoryDown => {
                    if let Some(line) = self.ctx.history_down() {
                        io.set_line(line)?;
                    }
                }
            }
        }
    }

    /// Execute one submitted line; errors are rendered, never propagated.
    fn submit(
        &mut self,
        line: &str,
        io: &mut impl IoHost,
    ) -> Result<Option<ExitReason>, IoError> {
        let line = line.trim();
        self.completion.reset();

        io.write_output(Output::command(format!(
            "{}:{}$ {}",
            self.config.prompt_label,
            self.ctx.path().render(),
            line
        )))?;
        self.ctx.push_history(line);

        let result = commands::execute(line, &mut self.ctx);
        for output in result.lines {
            io.write_output(output)?;
        }
        match result.effect {
            Some(Effect::ClearScreen) => io.clear_screen()?,
            Some(Effect::Exit) => {
                io.write_output(Output::success("logout"))?;
                io.flush()?;
                return Ok(Some(ExitReason::UserExit));
            }
            None => {}
        }
        io.flush()?;
        Ok(None)
    }

    fn update_prompt(&self, io: &mut impl IoHost) -> Result<(), IoError> {
        let children = match self.ctx.current_node() {
            Some(node) => candidates::children(node),
            None => Vec::new(),
        };
        io.write_prompt(PromptConfig {
            label: self.config.prompt_label.clone(),
            path: self.ctx.path().render(),
            candidates: children,
        })
    }
}

/// Run an interactive shell on the terminal with the given configuration.
pub fn run(config: ShellConfig) -> Result<ExitReason, IoError> {
    let mut host = TerminalHost::new().map_err(|e| IoError::Io(e.to_string()))?;
    let mut core = ShellCore::load(config);
    core.run(&mut host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{OutputStyle, TestHost};
    use serde_json::json;

    fn core() -> ShellCore {
        ShellCore::new(
            ShellConfig::default(),
            json!({
                "projects": [{"title": "Atlas"}, {"title": "Orbit"}],
                "skills": ["Go", "Rust"]
            }),
        )
    }

    #[test]
    fn eof_exits_cleanly() {
        let mut core = core();
        let mut host = TestHost::new();
        host.queue_signal(Signal::Eof);

        let result = core.run(&mut host);
        assert!(matches!(result, Ok(ExitReason::Eof)));
    }

    #[test]
    fn exit_command_leaves_the_shell() {
        let mut core = core();
        let mut host = TestHost::new();
        host.queue_line("exit");

        let result = core.run(&mut host);
        assert!(matches!(result, Ok(ExitReason::UserExit)));
    }

    #[test]
    fn interrupt_is_not_fatal() {
        let mut core = core();
        let mut host = TestHost::new();
        host.queue_signal(Signal::Interrupt);
        host.queue_line("exit");

        let result = core.run(&mut host);
        assert!(matches!(result, Ok(ExitReason::UserExit)));
    }

    #[test]
    fn prompt_reflects_the_current_path() {
        let mut core = core();
        let mut host = TestHost::new();
        host.queue_line("cd projects");
        host.queue_line("exit");

        core.run(&mut host).unwrap();
        assert_eq!(host.last_prompt().unwrap().path, "~/projects");
    }

    #[test]
    fn prompt_carries_candidates_for_the_host_completer() {
        let mut core = core();
        let mut host = TestHost::new();
        host.queue_line("exit");

        core.run(&mut host).unwrap();
        let prompt = host.last_prompt().unwrap();
        let names: Vec<&str> = prompt.candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["projects", "skills"]);
        assert!(prompt.candidates.iter().all(|c| c.container));
    }

    #[test]
    fn submitted_lines_are_echoed_with_the_prompt() {
        let mut core = core();
        let mut host = TestHost::new();
        host.queue_line("ls");
        host.queue_line("exit");

        core.run(&mut host).unwrap();
        let echoes = host.output_with_style(OutputStyle::Command);
        assert_eq!(echoes[0], "guest@jsonsh:~$ ls");
    }

    #[test]
    fn an_error_still_yields_a_fresh_prompt() {
        let mut core = core();
        let mut host = TestHost::new();
        host.queue_line("cd nonexistent");
        host.queue_line("exit");

        let result = core.run(&mut host);
        assert!(matches!(result, Ok(ExitReason::UserExit)));
        assert_eq!(host.errors(), vec!["No such directory: nonexistent"]);
        // One prompt before each of the two submitted lines.
        assert!(host.prompt_count() >= 2);
    }

    #[test]
    fn clear_command_clears_the_host() {
        let mut core = core();
        let mut host = TestHost::new();
        host.queue_line("ls");
        host.queue_line("clear");
        host.queue_line("exit");

        core.run(&mut host).unwrap();
        assert_eq!(host.clear_count(), 1);
    }

    #[test]
    fn tab_event_completes_the_pending_line() {
        let mut core = core();
        let mut host = TestHost::new();
        host.queue_tab("cat sk");
        host.queue_line("exit");

        core.run(&mut host).unwrap();
        assert_eq!(host.current_line(), Some("cat skills"));
    }

    #[test]
    fn history_events_recall_previous_lines() {
        let mut core = core();
        let mut host = TestHost::new();
        host.queue_line("ls");
        host.queue_line("cd projects");
        host.queue_event(InputEvent::HistoryUp);
        host.queue_event(InputEvent::HistoryUp);
        host.queue_line("exit");

        core.run(&mut host).unwrap();
        assert_eq!(host.line_updates(), ["cd projects", "ls"]);
    }

    #[test]
    fn load_failure_reports_once_and_degrades_to_empty() {
        let config = ShellConfig {
            data_source: "/no/such/file.json".to_string(),
            ..ShellConfig::default()
        };
        let mut core = ShellCore::load(config);
        let mut host = TestHost::new();
        host.queue_line("ls");
        host.queue_line("exit");

        core.run(&mut host).unwrap();
        assert_eq!(host.errors().len(), 1);
        assert!(host.errors()[0].starts_with("Failed to load document"));
        let normals = host.output_with_style(OutputStyle::Normal);
        assert!(normals.contains(&"(empty)"));
    }

    #[test]
    fn instances_do_not_share_state() {
        let mut a = core();
        let mut b = core();
        let mut host = TestHost::new();
        host.queue_line("cd projects");
        host.queue_line("exit");
        a.run(&mut host).unwrap();

        assert_eq!(a.context().path().render(), "~/projects");
        assert_eq!(b.context().path().render(), "~");
        let mut host_b = TestHost::new();
        host_b.queue_line("exit");
        b.run(&mut host_b).unwrap();
        assert!(b.context().history().len() == 1);
    }
}
