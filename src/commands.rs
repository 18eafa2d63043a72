//! Command parsing and execution.
//!
//! Verbs:
//! - `help` - Show usage
//! - `ls` - List the current directory
//! - `cd <key|..|/>` - Enter a directory (fuzzy matching)
//! - `cat <name|index|N.txt>` - Show a file or object (fuzzy matching)
//! - `clear` - Clear the screen
//! - `exit` - Leave the shell
//!
//! Handlers never touch the host: they return structured `Output` lines
//! plus an optional effect, and the shell core renders them. Errors are
//! output, not aborts; every command path ends with a fresh prompt.

use serde_json::Value;

use crate::context::ShellContext;
use crate::fuzzy;
use crate::io::Output;
use crate::names;
use crate::tree::{is_container, is_string_array, Segment};

/// Everything that can go wrong inside a command handler. All variants are
/// recovered locally and rendered as a single error line.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("No such directory: {0}")]
    NoSuchDirectory(String),
    #[error("No such key: {0}")]
    NoSuchKey(String),
    #[error("No such file: {0}")]
    NoSuchFile(String),
    #[error("No such item: {0}")]
    NoSuchItem(String),
    #[error("Not a directory ({0})")]
    NotADirectory(&'static str),
    #[error("Cannot cd into a primitive value.")]
    NotAContainer,
    #[error("Command not found: {0} (try 'help')")]
    CommandNotFound(String),
    #[error("Not found.")]
    StalePath,
}

/// Side effect requested by a command, applied by the shell core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Drop all previously rendered output.
    ClearScreen,
    /// Leave the shell.
    Exit,
}

/// Result of executing one command line.
#[derive(Debug, Default)]
pub struct CommandResult {
    pub lines: Vec<Output>,
    pub effect: Option<Effect>,
}

impl CommandResult {
    fn none() -> Self {
        Self::default()
    }

    fn lines(lines: Vec<Output>) -> Self {
        Self {
            lines,
            effect: None,
        }
    }

    fn effect(effect: Effect) -> Self {
        Self {
            lines: Vec::new(),
            effect: Some(effect),
        }
    }

    fn error(err: ShellError) -> Self {
        Self::lines(vec![Output::error(err.to_string())])
    }
}

/// Parse and execute one submitted line.
pub fn execute(input: &str, ctx: &mut ShellContext) -> CommandResult {
    let input = input.trim();
    // A leading marker is accepted and ignored: `/ls` == `ls`.
    let input = input.strip_prefix('/').unwrap_or(input);

    let mut parts = input.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or("");
    let arg = parts.next().unwrap_or("").trim();

    let result = match verb.to_lowercase().as_str() {
        "" => return CommandResult::none(),
        "help" => Ok(CommandResult::lines(help_lines())),
        "ls" => cmd_ls(ctx),
        "cd" => cmd_cd(arg, ctx),
        "cat" => cmd_cat(arg, ctx),
        "clear" => Ok(CommandResult::effect(Effect::ClearScreen)),
        "exit" | "quit" => Ok(CommandResult::effect(Effect::Exit)),
        other => Err(ShellError::CommandNotFound(other.to_string())),
    };

    result.unwrap_or_else(CommandResult::error)
}

fn help_lines() -> Vec<Output> {
    vec![
        Output::success("Available commands:"),
        Output::normal("  help               Show this help"),
        Output::normal("  ls                 List the current directory"),
        Output::normal("  cd <key|..|/>      Enter a directory (fuzzy matching & Tab completion)"),
        Output::normal("  cat <name|N.txt>   Show a file or object (fuzzy matching & Tab)"),
        Output::normal("  clear              Clear the screen"),
        Output::normal("  exit               Leave the shell"),
        Output::normal("Tips: Tab autocompletes, Shift+Tab cycles backward. A leading / is optional."),
    ]
}

fn cmd_ls(ctx: &ShellContext) -> Result<CommandResult, ShellError> {
    let node = ctx.current_node().ok_or(ShellError::StalePath)?;

    let lines = match node {
        Value::Object(map) => {
            if map.is_empty() {
                vec![Output::normal("(empty)")]
            } else {
                map.iter()
                    .map(|(key, value)| {
                        if is_container(value) {
                            Output::success(format!("{}/", key))
                        } else {
                            Output::normal(key.clone())
                        }
                    })
                    .collect()
            }
        }
        Value::Array(items) => {
            if items.is_empty() {
                vec![Output::normal("(empty)")]
            } else {
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| Output::normal(names::display_name(item, i)))
                    .collect()
            }
        }
        // Scalars are not enterable, but handle them anyway.
        other => vec![Output::normal(scalar_text(other))],
    };

    Ok(CommandResult::lines(lines))
}

/// Resolved destination of a `cd` argument. Resolution borrows the current
/// node; the path mutation happens afterwards.
enum CdOutcome {
    Descend(Segment),
    /// Ambiguous: show the candidates, stay put.
    Ambiguous(Vec<Output>),
}

fn cmd_cd(arg: &str, ctx: &mut ShellContext) -> Result<CommandResult, ShellError> {
    if arg.is_empty() {
        return Err(ShellError::Usage("cd <key|..|/>"));
    }
    if arg == "/" || arg == "~" {
        ctx.path_mut().clear();
        return Ok(CommandResult::none());
    }
    if arg == ".." {
        // No-op at the root, never an error.
        ctx.path_mut().pop();
        return Ok(CommandResult::none());
    }

    let node = ctx.current_node().ok_or(ShellError::StalePath)?;
    match resolve_cd(arg, node)? {
        CdOutcome::Descend(segment) => {
            ctx.path_mut().push(segment);
            Ok(CommandResult::none())
        }
        CdOutcome::Ambiguous(lines) => Ok(CommandResult::lines(lines)),
    }
}

fn resolve_cd(arg: &str, node: &Value) -> Result<CdOutcome, ShellError> {
    match node {
        Value::Object(map) => {
            let key = if map.contains_key(arg) {
                arg.to_string()
            } else {
                let dir_keys: Vec<String> = map
                    .iter()
                    .filter(|(_, v)| is_container(v))
                    .map(|(k, _)| k.clone())
                    .collect();
                let matches = fuzzy::filter(&dir_keys, arg);
                match matches.len() {
                    1 => matches.into_iter().next().unwrap_or_default(),
                    0 => return Err(ShellError::NoSuchDirectory(arg.to_string())),
                    _ => {
                        let listed: Vec<String> =
                            matches.into_iter().map(|m| format!("{}/", m)).collect();
                        return Ok(CdOutcome::Ambiguous(vec![Output::normal(
                            listed.join("  "),
                        )]));
                    }
                }
            };

            let target = map.get(&key).ok_or(ShellError::StalePath)?;
            if !is_container(target) {
                return Err(ShellError::NotADirectory("expects object or array"));
            }
            Ok(CdOutcome::Descend(Segment::Key(key)))
        }
        Value::Array(items) => {
            // Derived names of every element; leaves resolve too so they
            // can report a distinguishable error below.
            let entries: Vec<(usize, String)> = items
                .iter()
                .enumerate()
                .map(|(i, v)| (i, names::display_name(v, i)))
                .collect();

            // Numeric forms first: 1-based preferred, 0 accepted.
            let mut chosen: Option<usize> = parse_index(arg, items.len());

            // Exact derived name, first occurrence wins.
            if chosen.is_none() {
                chosen = entries
                    .iter()
                    .find(|(_, name)| name == arg)
                    .map(|(i, _)| *i);
            }

            // Fuzzy over the deduplicated name list.
            if chosen.is_none() {
                let mut candidate_names: Vec<String> =
                    entries.iter().map(|(_, name)| name.clone()).collect();
                candidate_names.sort();
                candidate_names.dedup();
                let matches = fuzzy::filter(&candidate_names, arg);
                match matches.len() {
                    1 => {
                        chosen = entries
                            .iter()
                            .find(|(_, name)| name == &matches[0])
                            .map(|(i, _)| *i);
                    }
                    0 => {}
                    _ => {
                        return Ok(CdOutcome::Ambiguous(vec![Output::normal(
                            matches.join("  "),
                        )]))
                    }
                }
            }

            let index = match chosen {
                Some(i) => i,
                None => return Err(ShellError::NoSuchDirectory(arg.to_string())),
            };
            if !is_container(&items[index]) {
                return Err(ShellError::NotADirectory("file item; use cat to view"));
            }

            let name = names::display_name(&items[index], index);
            Ok(CdOutcome::Descend(Segment::Index { index, name }))
        }
        _ => Err(ShellError::NotAContainer),
    }
}

fn cmd_cat(arg: &str, ctx: &ShellContext) -> Result<CommandResult, ShellError> {
    if arg.is_empty() {
        return Err(ShellError::Usage("cat <key|name|index|N.txt>"));
    }

    let node = ctx.current_node().ok_or(ShellError::StalePath)?;

    match node {
        Value::Object(map) => {
            if let Some(value) = map.get(arg) {
                return Ok(CommandResult::lines(vec![Output::normal(render_value(
                    value,
                ))]));
            }
            let keys: Vec<String> = map.keys().cloned().collect();
            let matches = fuzzy::filter(&keys, arg);
            match matches.len() {
                1 => Ok(CommandResult::lines(vec![Output::normal(render_value(
                    &map[&matches[0]],
                ))])),
                0 => Err(ShellError::NoSuchKey(arg.to_string())),
                _ => Ok(CommandResult::lines(vec![Output::normal(
                    matches.join("  "),
                )])),
            }
        }
        Value::Array(items) => {
            // display_name applies the filename rule to string elements.
            let missing: fn(String) -> ShellError = if is_string_array(node) {
                ShellError::NoSuchFile
            } else {
                ShellError::NoSuchItem
            };
            let file_names: Vec<String> = items
                .iter()
                .enumerate()
                .map(|(i, v)| names::display_name(v, i))
                .collect();

            let mut chosen = parse_index(arg, items.len());
            if chosen.is_none() {
                chosen = file_names
                    .iter()
                    .position(|name| name.eq_ignore_ascii_case(arg));
            }
            if chosen.is_none() {
                let matches = fuzzy::filter(&file_names, arg);
                match matches.len() {
                    1 => chosen = file_names.iter().position(|name| name == &matches[0]),
                    0 => {}
                    _ => {
                        return Ok(CommandResult::lines(vec![Output::normal(
                            matches.join("  "),
                        )]))
                    }
                }
            }

            match chosen {
                Some(i) => Ok(CommandResult::lines(vec![Output::normal(render_value(
                    &items[i],
                ))])),
                None => Err(missing(arg.to_string())),
            }
        }
        other => Ok(CommandResult::lines(vec![Output::normal(render_value(
            other,
        ))])),
    }
}

/// Numeric argument forms: bare digits, optionally with the pseudo-file
/// suffix (`3` or `3.txt`). 1-based is preferred; 0 addresses the first
/// element. Returns a valid 0-based index or nothing.
fn parse_index(arg: &str, len: usize) -> Option<usize> {
    let lowered = arg.to_lowercase();
    let digits = lowered.strip_suffix(".txt").unwrap_or(&lowered);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: usize = digits.parse().ok()?;
    if n >= 1 && n <= len {
        Some(n - 1)
    } else if n < len {
        Some(n)
    } else {
        None
    }
}

/// Pretty-print a value: strings verbatim, everything else as indented
/// JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Plain text for a scalar `ls` target.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
