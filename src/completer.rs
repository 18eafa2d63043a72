//! Tab completer for the terminal host.
//!
//! The first word completes against the known verbs. The argument
//! completes against the current node's children, which the shell core
//! publishes with every prompt; `cd` only sees containers. Reedline's
//! completion menu provides the cycling.

use std::sync::{Arc, Mutex, PoisonError};

use reedline::{Completer, Span, Suggestion};

use crate::candidates::Candidate;
use crate::complete::parse_line;
use crate::fuzzy;

const VERBS: &[&str] = &["help", "ls", "cd", "cat", "clear", "exit"];

/// Command and argument completer for the shell prompt.
pub struct ShellCompleter {
    /// Children of the current node, updated by the host on every prompt.
    candidates: Arc<Mutex<Vec<Candidate>>>,
}

impl ShellCompleter {
    pub fn new(candidates: Arc<Mutex<Vec<Candidate>>>) -> Self {
        Self { candidates }
    }

    fn argument_suggestions(&self, verb: &str, arg: &str, span: Span) -> Vec<Suggestion> {
        let children = self
            .candidates
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let containers_only = verb.eq_ignore_ascii_case("cd");
        let mut names: Vec<String> = children
            .iter()
            .filter(|c| !containers_only || c.container)
            .map(|c| c.name.clone())
            .collect();
        names.sort();
        names.dedup();

        let matches = if arg.is_empty() {
            names
        } else {
            fuzzy::filter(&names, arg)
        };

        matches
            .into_iter()
            .map(|value| Suggestion {
                value,
                description: None,
                style: None,
                extra: None,
                span,
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}

impl Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line_to_pos = &line[..pos];
        let parsed = parse_line(line_to_pos);

        // Still typing the verb itself?
        if parsed.arg_start >= line_to_pos.len()
            && !line_to_pos.ends_with(char::is_whitespace)
        {
            let start = line_to_pos.rfind(parsed.verb).unwrap_or(0);
            return VERBS
                .iter()
                .filter(|v| v.starts_with(parsed.verb))
                .map(|v| Suggestion {
                    value: (*v).to_string(),
                    description: Some(verb_description(v).to_string()),
                    style: None,
                    extra: None,
                    span: Span::new(start, pos),
                    append_whitespace: true,
                    match_indices: None,
                })
                .collect();
        }

        self.argument_suggestions(parsed.verb, parsed.arg, Span::new(parsed.arg_start, pos))
    }
}

fn verb_description(verb: &str) -> &'static str {
    match verb {
        "help" => "Show help",
        "ls" => "List the current directory",
        "cd" => "Enter a directory",
        "cat" => "Show a file or object",
        "clear" => "Clear the screen",
        "exit" => "Leave the shell",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completer(children: Vec<(&str, bool)>) -> ShellCompleter {
        let candidates = children
            .into_iter()
            .map(|(name, container)| Candidate {
                name: name.to_string(),
                container,
            })
            .collect();
        ShellCompleter::new(Arc::new(Mutex::new(candidates)))
    }

    fn values(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.value.as_str()).collect()
    }

    #[test]
    fn completes_verbs_on_the_first_word() {
        let mut c = completer(vec![]);
        let suggestions = c.complete("c", 1);
        assert_eq!(values(&suggestions), vec!["cd", "cat", "clear"]);
    }

    #[test]
    fn completes_arguments_against_children() {
        let mut c = completer(vec![("projects", true), ("bio", false)]);
        let suggestions = c.complete("cat pr", 6);
        assert_eq!(values(&suggestions), vec!["projects"]);
        assert_eq!(suggestions[0].span, Span::new(4, 6));
    }

    #[test]
    fn cd_arguments_exclude_leaves() {
        let mut c = completer(vec![("projects", true), ("bio", false)]);
        let suggestions = c.complete("cd b", 4);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn empty_argument_lists_everything_in_scope() {
        let mut c = completer(vec![("projects", true), ("bio", false)]);
        let suggestions = c.complete("ls ", 3);
        assert_eq!(values(&suggestions), vec!["bio", "projects"]);
    }
}
