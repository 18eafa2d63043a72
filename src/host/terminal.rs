//! Terminal host implementation using Reedline.
//!
//! This host provides interactive terminal I/O with:
//! - Readline-style line editing (Vi and Emacs modes)
//! - Tab completion over verbs and the current node's children
//! - Syntax highlighting
//! - In-memory command history (nothing is persisted)
//!
//! Reedline owns the pending line, so this host only ever emits submitted
//! lines; the core's completion and history engines serve hosts without a
//! line editor of their own.

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use nu_ansi_term::{Color, Style};
use reedline::{
    default_emacs_keybindings, default_vi_insert_keybindings, default_vi_normal_keybindings,
    ColumnarMenu, DefaultHinter, EditMode, Emacs, KeyCode, KeyModifiers, MenuBuilder, Prompt,
    PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline, ReedlineEvent,
    ReedlineMenu, Signal as ReedlineSignal, Vi,
};

use crate::candidates::Candidate;
use crate::completer::ShellCompleter;
use crate::highlighter::ShellHighlighter;
use crate::io::{InputEvent, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

/// Terminal host using Reedline for interactive I/O.
pub struct TerminalHost {
    line_editor: Reedline,
    pending_event: Option<InputEvent>,
    pending_signal: Option<Signal>,
    current_prompt: PromptConfig,
    /// Shared with the completer; refreshed on every prompt.
    candidates: Arc<Mutex<Vec<Candidate>>>,
}

impl TerminalHost {
    /// Create a new terminal host.
    pub fn new() -> io::Result<Self> {
        let candidates: Arc<Mutex<Vec<Candidate>>> = Arc::new(Mutex::new(Vec::new()));

        let completer = Box::new(ShellCompleter::new(Arc::clone(&candidates)));
        let highlighter = Box::new(ShellHighlighter::new());
        let hinter = Box::new(
            DefaultHinter::default().with_style(Style::new().fg(Color::LightGray).dimmed()),
        );

        let completion_menu = Box::new(
            ColumnarMenu::default()
                .with_name("completion_menu")
                .with_text_style(Style::new().fg(Color::Cyan))
                .with_selected_text_style(Style::new().fg(Color::Black).on(Color::Cyan).bold()),
        );

        let edit_mode: Box<dyn EditMode> = if should_use_vi_mode() {
            let mut insert_keybindings = default_vi_insert_keybindings();
            let normal_keybindings = default_vi_normal_keybindings();

            insert_keybindings.add_binding(
                KeyModifiers::NONE,
                KeyCode::Tab,
                ReedlineEvent::UntilFound(vec![
                    ReedlineEvent::Menu("completion_menu".to_string()),
                    ReedlineEvent::MenuNext,
                ]),
            );
            insert_keybindings.add_binding(
                KeyModifiers::SHIFT,
                KeyCode::BackTab,
                ReedlineEvent::MenuPrevious,
            );

            Box::new(Vi::new(insert_keybindings, normal_keybindings))
        } else {
            let mut keybindings = default_emacs_keybindings();
            keybindings.add_binding(
                KeyModifiers::NONE,
                KeyCode::Tab,
                ReedlineEvent::UntilFound(vec![
                    ReedlineEvent::Menu("completion_menu".to_string()),
                    ReedlineEvent::MenuNext,
                ]),
            );
            keybindings.add_binding(
                KeyModifiers::SHIFT,
                KeyCode::BackTab,
                ReedlineEvent::MenuPrevious,
            );

            Box::new(Emacs::new(keybindings))
        };

        let line_editor = Reedline::create()
            .with_completer(completer)
            .with_highlighter(highlighter)
            .with_hinter(hinter)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(edit_mode);

        Ok(Self {
            line_editor,
            pending_event: None,
            pending_signal: None,
            current_prompt: PromptConfig::default(),
            candidates,
        })
    }
}

impl IoHost for TerminalHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        let prompt = TerminalPrompt::from_config(&self.current_prompt);

        match self.line_editor.read_line(&prompt) {
            Ok(ReedlineSignal::Success(line)) => {
                self.pending_event = Some(InputEvent::Submit { line });
            }
            Ok(ReedlineSignal::CtrlC) => {
                self.pending_signal = Some(Signal::Interrupt);
            }
            Ok(ReedlineSignal::CtrlD) => {
                self.pending_signal = Some(Signal::Eof);
            }
            Err(e) => {
                return Err(IoError::Io(format!("Reedline error: {}", e)));
            }
        }

        Ok(())
    }

    fn read_event(&mut self) -> Result<Option<InputEvent>, IoError> {
        Ok(self.pending_event.take())
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.pending_signal.take())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        let styled = match output.style {
            // Reedline already echoed the submitted line.
            OutputStyle::Command => return Ok(()),
            OutputStyle::Normal => output.text,
            OutputStyle::Success => Color::Green.paint(&output.text).to_string(),
            OutputStyle::Error => Color::Red.paint(&output.text).to_string(),
        };
        println!("{}", styled);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        *self
            .candidates
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = config.candidates.clone();
        self.current_prompt = config;
        Ok(())
    }

    fn set_line(&mut self, _line: &str) -> Result<(), IoError> {
        // Reedline owns the pending line; this host never emits the events
        // that would trigger a line update.
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), IoError> {
        self.line_editor
            .clear_screen()
            .map_err(|e| IoError::Io(e.to_string()))
    }

    fn flush(&mut self) -> Result<(), IoError> {
        io::stdout().flush().map_err(|e| IoError::Io(e.to_string()))
    }
}

/// Prompt implementation for the terminal: `label:path $`.
struct TerminalPrompt {
    label: String,
    path: String,
}

impl TerminalPrompt {
    fn from_config(config: &PromptConfig) -> Self {
        Self {
            label: config.label.clone(),
            path: config.path.clone(),
        }
    }
}

impl Prompt for TerminalPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(format!(
            "{}:{}",
            Color::LightBlue.paint(&self.label),
            Color::Yellow.paint(&self.path)
        ))
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<'_, str> {
        match edit_mode {
            PromptEditMode::Default | PromptEditMode::Emacs => {
                Cow::Owned(format!("{} ", Color::Green.bold().paint("$")))
            }
            PromptEditMode::Vi(vi_mode) => {
                let indicator = match vi_mode {
                    reedline::PromptViMode::Normal => Color::Blue.bold().paint("[N]$"),
                    reedline::PromptViMode::Insert => Color::Green.bold().paint("[I]$"),
                };
                Cow::Owned(format!("{} ", indicator))
            }
            PromptEditMode::Custom(s) => Cow::Owned(format!("({})$ ", s)),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(": ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}

/// Check if vi mode should be used based on environment configuration.
fn should_use_vi_mode() -> bool {
    if let Ok(mode) = std::env::var("JSONSH_EDIT_MODE") {
        let mode = mode.to_lowercase();
        return mode == "vi" || mode == "vim";
    }

    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = std::env::var(var) {
            let editor = editor.to_lowercase();
            if editor.contains("vim") || editor == "vi" {
                return true;
            }
        }
    }

    check_inputrc_vi_mode()
}

/// Check .inputrc for a vi editing-mode setting.
fn check_inputrc_vi_mode() -> bool {
    let inputrc_paths = [
        std::env::var("INPUTRC").ok().map(PathBuf::from),
        dirs::home_dir().map(|p| p.join(".inputrc")),
        Some(PathBuf::from("/etc/inputrc")),
    ];

    for path in inputrc_paths.into_iter().flatten() {
        if let Ok(content) = std::fs::read_to_string(&path) {
            for line in content.lines() {
                let line = line.trim();
                if line.starts_with("set") && line.contains("editing-mode") && line.contains("vi") {
                    return true;
                }
            }
        }
    }

    false
}
