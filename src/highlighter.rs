use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

/// Syntax highlighter for the shell prompt.
pub struct ShellHighlighter {
    verbs: Vec<&'static str>,
}

impl ShellHighlighter {
    pub fn new() -> Self {
        Self {
            verbs: vec!["help", "ls", "cd", "cat", "clear", "exit", "quit"],
        }
    }
}

impl Default for ShellHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for ShellHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if line.is_empty() {
            return styled;
        }

        // An optional leading marker belongs to the verb.
        let (command, rest) = match line.find(char::is_whitespace) {
            Some(pos) => (&line[..pos], &line[pos..]),
            None => (line, ""),
        };

        let bare = command.strip_prefix('/').unwrap_or(command);
        let cmd_style = if self.verbs.contains(&bare.to_lowercase().as_str()) {
            Style::new().bold().fg(Color::Cyan)
        } else {
            Style::new().fg(Color::Red)
        };
        styled.push((cmd_style, command.to_string()));

        if rest.is_empty() {
            return styled;
        }

        match bare.to_lowercase().as_str() {
            "cd" | "cat" => {
                styled.push((Style::new().fg(Color::Yellow), rest.to_string()));
            }
            _ => {
                styled.push((Style::new(), rest.to_string()));
            }
        }

        styled
    }
}
