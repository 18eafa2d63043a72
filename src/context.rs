//! Per-instance shell state.
//!
//! Everything a shell instance owns lives here: the immutable document,
//! the breadcrumb path, and the command history with its recall cursor.
//! Independent instances share nothing.

use serde_json::Value;

use crate::candidates::{self, Scope};
use crate::tree::NodePath;

/// State owned by one shell instance.
#[derive(Debug)]
pub struct ShellContext {
    document: Value,
    path: NodePath,
    history: Vec<String>,
    /// Recall position; `None` means no recall is active.
    history_cursor: Option<usize>,
}

impl ShellContext {
    pub fn new(document: Value) -> Self {
        Self {
            document,
            path: NodePath::root(),
            history: Vec::new(),
            history_cursor: None,
        }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn path_mut(&mut self) -> &mut NodePath {
        &mut self.path
    }

    /// The value the path currently points at. `None` only if the path has
    /// gone stale, which correct usage never produces.
    pub fn current_node(&self) -> Option<&Value> {
        self.path.resolve(&self.document)
    }

    /// Candidate names for the current node under the given verb scope.
    pub fn candidate_names(&self, scope: Scope) -> Vec<String> {
        match self.current_node() {
            Some(node) => candidates::list(node, scope),
            None => Vec::new(),
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Append a submitted line and drop any active recall.
    pub fn push_history(&mut self, line: impl Into<String>) {
        self.history.push(line.into());
        self.history_cursor = None;
    }

    /// Recall one entry backward (Up). Stops at the oldest entry.
    pub fn history_up(&mut self) -> Option<&str> {
        if self.history.is_empty() {
            return None;
        }
        let next = match self.history_cursor {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_cursor = Some(next);
        Some(&self.history[next])
    }

    /// Recall one entry forward (Down). Stays at the newest entry while a
    /// recall is active; with no recall active, clears the line.
    pub fn history_down(&mut self) -> Option<&str> {
        if self.history.is_empty() {
            return None;
        }
        match self.history_cursor {
            Some(i) => {
                let next = (i + 1).min(self.history.len() - 1);
                self.history_cursor = Some(next);
                Some(&self.history[next])
            }
            None => Some(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recall_walks_back_and_stops_at_oldest() {
        let mut ctx = ShellContext::new(json!({}));
        ctx.push_history("first");
        ctx.push_history("second");

        assert_eq!(ctx.history_up(), Some("second"));
        assert_eq!(ctx.history_up(), Some("first"));
        assert_eq!(ctx.history_up(), Some("first"));
    }

    #[test]
    fn recall_forward_stops_at_newest() {
        let mut ctx = ShellContext::new(json!({}));
        ctx.push_history("first");
        ctx.push_history("second");

        ctx.history_up();
        ctx.history_up();
        assert_eq!(ctx.history_down(), Some("second"));
        assert_eq!(ctx.history_down(), Some("second"));
    }

    #[test]
    fn down_without_recall_clears_line() {
        let mut ctx = ShellContext::new(json!({}));
        ctx.push_history("first");
        assert_eq!(ctx.history_down(), Some(""));
    }

    #[test]
    fn recall_with_empty_history_is_noop() {
        let mut ctx = ShellContext::new(json!({}));
        assert_eq!(ctx.history_up(), None);
        assert_eq!(ctx.history_down(), None);
    }

    #[test]
    fn submit_resets_recall_cursor() {
        let mut ctx = ShellContext::new(json!({}));
        ctx.push_history("first");
        ctx.history_up();
        ctx.push_history("second");
        assert_eq!(ctx.history_up(), Some("second"));
    }

    #[test]
    fn recall_never_mutates_history() {
        let mut ctx = ShellContext::new(json!({}));
        ctx.push_history("only");
        ctx.history_up();
        ctx.history_down();
        assert_eq!(ctx.history(), ["only"]);
    }
}
