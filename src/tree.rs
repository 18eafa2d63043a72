//! Path segments into the JSON document and resolution against it.
//!
//! A `NodePath` is the shell's breadcrumb trail: one segment per `cd`.
//! Segments are only ever pushed after the target has been confirmed to
//! exist and to be a container, so resolution should not fail in practice;
//! `resolve` still returns `Option` and callers treat `None` as a stale
//! path rather than panicking.

use serde_json::Value;

/// One hop from the document root toward the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Selects `node[key]` on an object.
    Key(String),
    /// Selects `node[index]` on an array. The display name is cached at
    /// descent time so the rendered path stays stable.
    Index { index: usize, name: String },
}

impl Segment {
    /// The textual label used when rendering the path.
    pub fn label(&self) -> &str {
        match self {
            Segment::Key(key) => key,
            Segment::Index { name, .. } => name,
        }
    }
}

/// Ordered segments from the root to the current node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    segments: Vec<Segment>,
}

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Pop the last segment. No-op at the root.
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    /// Reset to the document root.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Walk the path from the document root. An object-key segment requires
    /// a present key on an object; an index segment requires an in-range
    /// array index. Any mismatch yields `None`.
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        let mut node = document;
        for segment in &self.segments {
            node = match segment {
                Segment::Key(key) => node.as_object()?.get(key)?,
                Segment::Index { index, .. } => node.as_array()?.get(*index)?,
            };
        }
        Some(node)
    }

    /// Render for the prompt: `~` at the root, `~/a/b` below it.
    pub fn render(&self) -> String {
        if self.segments.is_empty() {
            return "~".to_string();
        }
        let parts: Vec<&str> = self.segments.iter().map(Segment::label).collect();
        format!("~/{}", parts.join("/"))
    }
}

/// Objects and arrays are navigable directories; everything else is a leaf.
pub fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

/// Non-empty arrays whose elements are all strings are presented as a
/// directory of pseudo-files named after the strings.
pub fn is_string_array(value: &Value) -> bool {
    match value.as_array() {
        Some(items) => !items.is_empty() && items.iter().all(Value::is_string),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "projects": [
                {"title": "Atlas"},
                {"title": "Orbit"}
            ],
            "skills": ["Go", "Rust"],
            "bio": "hello"
        })
    }

    #[test]
    fn resolve_empty_path_is_root() {
        let d = doc();
        let path = NodePath::root();
        assert_eq!(path.resolve(&d), Some(&d));
    }

    #[test]
    fn resolve_key_then_index() {
        let d = doc();
        let mut path = NodePath::root();
        path.push(Segment::Key("projects".to_string()));
        path.push(Segment::Index {
            index: 1,
            name: "Orbit".to_string(),
        });
        assert_eq!(path.resolve(&d), Some(&json!({"title": "Orbit"})));
    }

    #[test]
    fn resolve_missing_key_is_none() {
        let d = doc();
        let mut path = NodePath::root();
        path.push(Segment::Key("nope".to_string()));
        assert_eq!(path.resolve(&d), None);
    }

    #[test]
    fn resolve_index_on_object_is_none() {
        let d = doc();
        let mut path = NodePath::root();
        path.push(Segment::Index {
            index: 0,
            name: "x".to_string(),
        });
        assert_eq!(path.resolve(&d), None);
    }

    #[test]
    fn resolve_out_of_range_index_is_none() {
        let d = doc();
        let mut path = NodePath::root();
        path.push(Segment::Key("skills".to_string()));
        path.push(Segment::Index {
            index: 9,
            name: "x".to_string(),
        });
        assert_eq!(path.resolve(&d), None);
    }

    #[test]
    fn render_root_and_nested() {
        let mut path = NodePath::root();
        assert_eq!(path.render(), "~");

        path.push(Segment::Key("projects".to_string()));
        path.push(Segment::Index {
            index: 0,
            name: "Atlas".to_string(),
        });
        assert_eq!(path.render(), "~/projects/Atlas");
    }

    #[test]
    fn pop_at_root_is_noop() {
        let mut path = NodePath::root();
        path.pop();
        assert!(path.is_empty());
    }

    #[test]
    fn container_classification() {
        assert!(is_container(&json!({})));
        assert!(is_container(&json!([])));
        assert!(!is_container(&json!("text")));
        assert!(!is_container(&json!(42)));
        assert!(!is_container(&Value::Null));
    }

    #[test]
    fn string_array_detection() {
        assert!(is_string_array(&json!(["a", "b"])));
        assert!(!is_string_array(&json!([])));
        assert!(!is_string_array(&json!(["a", 1])));
        assert!(!is_string_array(&json!({"a": "b"})));
    }
}
