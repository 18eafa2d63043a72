//! Line parsing and the Tab-completion state machine.
//!
//! Completion is scoped to one prompt line: the session remembers the last
//! match set and a cycle index, and is reset when a line is submitted.
//! Pressing Tab twice on the same match set cycles through it; Shift+Tab
//! cycles backward.

use crate::candidates::Scope;
use crate::context::ShellContext;
use crate::fuzzy;

/// A raw input line split into verb and argument region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Whether the line carried the optional leading `/` marker.
    pub marker: bool,
    pub verb: &'a str,
    /// Argument text, trimmed.
    pub arg: &'a str,
    /// Byte offset of the argument region in the original line, for hosts
    /// that complete in place.
    pub arg_start: usize,
}

/// Split a raw line into an optional `/` marker, a verb, and the argument
/// region. `ls foo` and `/ls foo` parse identically apart from the marker.
pub fn parse_line(raw: &str) -> ParsedLine<'_> {
    let trimmed_start = raw.trim_start();
    let mut offset = raw.len() - trimmed_start.len();

    let (marker, rest) = match trimmed_start.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, trimmed_start),
    };
    if marker {
        offset += 1;
    }

    let verb_len = rest
        .find(char::is_whitespace)
        .unwrap_or(rest.len());
    let verb = &rest[..verb_len];
    let after_verb = &rest[verb_len..];
    let ws_len = after_verb.len() - after_verb.trim_start().len();
    let arg_start = offset + verb_len + ws_len;
    let arg = raw[arg_start..].trim();

    ParsedLine {
        marker,
        verb,
        arg,
        arg_start,
    }
}

/// Rebuild a line with the argument region replaced by `completion`.
fn replace_argument(parsed: &ParsedLine<'_>, completion: &str) -> String {
    let marker = if parsed.marker { "/" } else { "" };
    format!("{}{} {}", marker, parsed.verb, completion)
}

/// Which candidate scope a verb completes against.
fn scope_for_verb(verb: &str) -> Scope {
    if verb.eq_ignore_ascii_case("cd") {
        Scope::Directories
    } else {
        Scope::All
    }
}

/// Outcome of one Tab press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Replace the pending line; caret goes to the end.
    Replace(String),
    /// Print the match list below the prompt; line unchanged.
    Hint(String),
    /// Nothing to complete; line unchanged.
    None,
}

/// Tab-completion state for one prompt line.
#[derive(Debug, Default)]
pub struct CompletionSession {
    last_matches: Vec<String>,
    /// Cycle position within `last_matches`; `None` before cycling starts.
    cycle: Option<usize>,
    /// The line as this session last saw or produced it. While the line is
    /// untouched, repeated Tabs keep cycling the remembered set instead of
    /// rescoring against their own replacement text.
    last_line: Option<String>,
}

impl CompletionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the match set; called whenever a line is submitted.
    pub fn reset(&mut self) {
        self.last_matches.clear();
        self.cycle = None;
        self.last_line = None;
    }

    /// Handle one Tab (or Shift+Tab) press on `line`.
    pub fn tab(&mut self, line: &str, backward: bool, ctx: &ShellContext) -> Completion {
        let parsed = parse_line(line);

        let untouched = self.last_line.as_deref() == Some(line);
        if untouched && !self.last_matches.is_empty() {
            return self.cycle_step(&parsed, backward);
        }

        let scope = scope_for_verb(parsed.verb);

        // Container markers are display-only; match against bare names.
        let candidates: Vec<String> = ctx
            .candidate_names(scope)
            .into_iter()
            .map(|name| name.strip_suffix('/').unwrap_or(&name).to_string())
            .collect();

        let matches = if parsed.arg.is_empty() {
            candidates
        } else {
            fuzzy::filter(&candidates, parsed.arg)
        };

        if matches.is_empty() {
            return Completion::None;
        }

        // User typed more but landed on the same set: keep cycling.
        if !self.last_matches.is_empty() && self.last_matches == matches {
            self.last_line = Some(line.to_string());
            return self.cycle_step(&parsed, backward);
        }

        self.last_matches = matches;
        self.cycle = None;

        if self.last_matches.len() == 1 {
            let replaced = replace_argument(&parsed, &self.last_matches[0]);
            self.last_line = Some(replaced.clone());
            return Completion::Replace(replaced);
        }

        let prefix = fuzzy::common_prefix(&self.last_matches);
        if !prefix.is_empty() && prefix.len() > parsed.arg.len() {
            let replaced = replace_argument(&parsed, &prefix);
            self.last_line = Some(replaced.clone());
            return Completion::Replace(replaced);
        }

        // Nothing to extend: show the set; the next Tab starts cycling.
        self.last_line = Some(line.to_string());
        Completion::Hint(self.last_matches.join("  "))
    }

    fn cycle_step(&mut self, parsed: &ParsedLine<'_>, backward: bool) -> Completion {
        let n = self.last_matches.len() as isize;
        let i = self.cycle.map(|i| i as isize).unwrap_or(-1);
        let next = if backward {
            (i - 1 + n).rem_euclid(n)
        } else {
            (i + 1).rem_euclid(n)
        } as usize;
        self.cycle = Some(next);
        let replaced = replace_argument(parsed, &self.last_matches[next]);
        self.last_line = Some(replaced.clone());
        Completion::Replace(replaced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> ShellContext {
        ShellContext::new(json!({
            "projects": [{"title": "Atlas"}, {"title": "Orbit"}],
            "profile": {"name": "A"},
            "bio": "text"
        }))
    }

    #[test]
    fn parse_strips_optional_marker() {
        let with = parse_line("/cd foo");
        let without = parse_line("cd foo");
        assert!(with.marker);
        assert!(!without.marker);
        assert_eq!(with.verb, "cd");
        assert_eq!(with.arg, "foo");
        assert_eq!(without.arg, "foo");
    }

    #[test]
    fn parse_locates_argument_region() {
        let parsed = parse_line("cat  pro");
        assert_eq!(parsed.verb, "cat");
        assert_eq!(parsed.arg_start, 5);
        assert_eq!(parsed.arg, "pro");
    }

    #[test]
    fn parse_bare_verb_has_empty_arg() {
        let parsed = parse_line("ls");
        assert_eq!(parsed.verb, "ls");
        assert_eq!(parsed.arg, "");
        assert_eq!(parsed.arg_start, 2);
    }

    #[test]
    fn unique_match_completes_outright() {
        let ctx = ctx();
        let mut session = CompletionSession::new();
        assert_eq!(
            session.tab("cat bi", false, &ctx),
            Completion::Replace("cat bio".to_string())
        );
    }

    #[test]
    fn marker_is_preserved_in_replacement() {
        let ctx = ctx();
        let mut session = CompletionSession::new();
        assert_eq!(
            session.tab("/cat bi", false, &ctx),
            Completion::Replace("/cat bio".to_string())
        );
    }

    #[test]
    fn common_prefix_extends_before_cycling() {
        let ctx = ctx();
        let mut session = CompletionSession::new();
        // "pr" matches both profile and projects; shared prefix is "pro".
        assert_eq!(
            session.tab("cd pr", false, &ctx),
            Completion::Replace("cd pro".to_string())
        );
    }

    #[test]
    fn exhausted_prefix_hints_then_cycles() {
        let ctx = ctx();
        let mut session = CompletionSession::new();
        assert_eq!(
            session.tab("cd pro", false, &ctx),
            Completion::Hint("profile  projects".to_string())
        );
        assert_eq!(
            session.tab("cd pro", false, &ctx),
            Completion::Replace("cd profile".to_string())
        );
        assert_eq!(
            session.tab("cd profile", false, &ctx),
            Completion::Replace("cd projects".to_string())
        );
        // Cycling wraps back to the first match.
        assert_eq!(
            session.tab("cd projects", false, &ctx),
            Completion::Replace("cd profile".to_string())
        );
    }

    #[test]
    fn shift_tab_retreats_to_previous_match() {
        let ctx = ctx();
        let mut session = CompletionSession::new();
        session.tab("cd pro", false, &ctx); // hint
        session.tab("cd pro", false, &ctx); // profile (index 0)
        session.tab("cd profile", false, &ctx); // projects (index 1)
        assert_eq!(
            session.tab("cd projects", true, &ctx),
            Completion::Replace("cd profile".to_string())
        );
    }

    #[test]
    fn empty_argument_offers_full_candidate_list() {
        let ctx = ctx();
        let mut session = CompletionSession::new();
        // cd scope: containers only, sorted; their shared prefix is filled
        // in before any cycling starts.
        assert_eq!(
            session.tab("cd ", false, &ctx),
            Completion::Replace("cd pro".to_string())
        );
    }

    #[test]
    fn cd_scope_excludes_leaves() {
        let ctx = ctx();
        let mut session = CompletionSession::new();
        assert_eq!(session.tab("cd bi", false, &ctx), Completion::None);
    }

    #[test]
    fn cat_scope_includes_leaves() {
        let ctx = ctx();
        let mut session = CompletionSession::new();
        assert_eq!(
            session.tab("cat bi", false, &ctx),
            Completion::Replace("cat bio".to_string())
        );
    }

    #[test]
    fn no_matches_is_noop() {
        let ctx = ctx();
        let mut session = CompletionSession::new();
        assert_eq!(session.tab("cat zzz", false, &ctx), Completion::None);
    }

    #[test]
    fn typed_characters_reset_the_cycle() {
        let ctx = ctx();
        let mut session = CompletionSession::new();
        session.tab("cd pro", false, &ctx); // hint over {profile, projects}
        session.tab("cd pro", false, &ctx); // cycling at profile
        // Editing the line abandons the cycle; the set is rescored against
        // the typed argument ("proj" still subsequence-matches "profile").
        assert_eq!(
            session.tab("cd proj", false, &ctx),
            Completion::Hint("projects  profile".to_string())
        );
    }

    #[test]
    fn cycling_over_n_matches_returns_after_n_presses() {
        let ctx = ShellContext::new(json!({
            "aa": {}, "ab": {}, "ac": {}
        }));
        let mut session = CompletionSession::new();
        session.tab("cd a", false, &ctx); // hint: aa ab ac
        let first = session.tab("cd a", false, &ctx);
        let mut line = match &first {
            Completion::Replace(l) => l.clone(),
            other => panic!("expected replacement, got {:?}", other),
        };
        assert_eq!(line, "cd aa");
        for _ in 0..3 {
            match session.tab(&line, false, &ctx) {
                Completion::Replace(l) => line = l,
                other => panic!("expected replacement, got {:?}", other),
            }
        }
        // Three more presses over three matches land back on the first.
        assert_eq!(line, "cd aa");
    }
}
