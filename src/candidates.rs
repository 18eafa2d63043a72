//! Candidate names for the children of the current node.
//!
//! `cd` completes against containers only; `ls`/`cat` (and unknown verbs)
//! see every child, with containers carrying a trailing `/` marker for
//! display. Lists are deduplicated and sorted; derived names are not
//! guaranteed unique, ambiguity is surfaced at resolution time.

use serde_json::Value;

use crate::names;
use crate::tree::is_container;

/// A derived child name, tagged with whether the child is navigable.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Candidate {
    pub name: String,
    pub container: bool,
}

/// Which children a verb is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Containers only, bare names (`cd`).
    Directories,
    /// Every child, containers suffixed with `/` (`ls`, `cat`, default).
    All,
}

/// Derived names for every child of `node`, in element/definition order,
/// without deduplication.
pub fn children(node: &Value) -> Vec<Candidate> {
    match node {
        Value::Object(obj) => obj
            .iter()
            .map(|(key, value)| Candidate {
                name: key.clone(),
                container: is_container(value),
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| Candidate {
                name: names::display_name(item, i),
                container: is_container(item),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Deduplicated, sorted display names for completion and ambiguity hints.
pub fn list(node: &Value, scope: Scope) -> Vec<String> {
    let mut names: Vec<String> = children(node)
        .into_iter()
        .filter_map(|c| match scope {
            Scope::Directories => c.container.then_some(c.name),
            Scope::All => Some(if c.container {
                format!("{}/", c.name)
            } else {
                c.name
            }),
        })
        .collect();
    names.sort();
    names.dedup();
    names
}
