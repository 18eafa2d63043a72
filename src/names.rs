//! Display-name heuristics for children of the current node.
//!
//! Array elements have no natural filename, so one is derived: objects are
//! scanned for an identity-like key, strings become their own (sanitized)
//! filename, and everything else gets a positional `N.txt` name. The
//! heuristic is pure and order-stable; object keys are visited in
//! definition order.

use serde_json::{Map, Value};

/// Identity-like keys, tried first, in fixed priority order.
const PREFERRED_KEYS: &[&str] = &[
    "name",
    "title",
    "institution",
    "company",
    "organization",
    "org",
    "school",
    "degree",
    "role",
    "position",
    "project",
    "label",
    "filename",
    "file",
];

/// Terms matched case-insensitively against key names as a second pass.
const IDENTITY_TERMS: &[&str] = &[
    "name",
    "title",
    "company",
    "institution",
    "school",
    "org",
    "project",
    "position",
    "role",
];

fn non_empty_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

/// Pick the key whose value best identifies `obj`, if any.
fn best_display_key<'a>(obj: &'a Map<String, Value>) -> Option<&'a str> {
    for key in PREFERRED_KEYS {
        if let Some(value) = obj.get(*key) {
            if non_empty_str(value).is_some() {
                return Some(key);
            }
        }
    }
    for (key, value) in obj {
        let lowered = key.to_lowercase();
        if IDENTITY_TERMS.iter().any(|term| lowered.contains(term))
            && non_empty_str(value).is_some()
        {
            return Some(key);
        }
    }
    for (key, value) in obj {
        if non_empty_str(value).is_some() {
            return Some(key);
        }
    }
    for key in ["id", "slug", "key"] {
        if matches!(obj.get(key), Some(v) if !v.is_null()) {
            return Some(key);
        }
    }
    None
}

/// Positional fallback: `1.txt`, `2.txt`, ...
pub fn positional_name(index: usize) -> String {
    format!("{}.txt", index + 1)
}

/// Filename for a string element: trimmed, path separators replaced with
/// a dash, blank strings fall back to the positional name.
pub fn filename_from_string(s: &str, index: usize) -> String {
    let base = s.trim();
    if base.is_empty() {
        return positional_name(index);
    }
    base.replace(['/', '\\'], "-")
}

/// Stable display name for the element at `index`.
pub fn display_name(value: &Value, index: usize) -> String {
    match value {
        Value::Object(obj) => match best_display_key(obj) {
            Some(key) => match &obj[key] {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            None => positional_name(index),
        },
        Value::String(s) => filename_from_string(s, index),
        _ => positional_name(index),
    }
}
