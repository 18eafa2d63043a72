//! Loading the JSON document at shell start.
//!
//! The document is fetched once, before the first prompt, and never
//! mutated afterwards. A failed load is not fatal: the shell degrades to
//! an empty root object and reports the failure as one error line.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

/// Where the document comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    File(PathBuf),
    Url(String),
    /// An already-parsed value supplied by an embedding host.
    Inline(Value),
}

/// Why a load failed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DocumentSource {
    /// `http(s)://` selects a URL; anything else is a file path.
    pub fn from_spec(spec: &str) -> Self {
        if spec.starts_with("http://") || spec.starts_with("https://") {
            DocumentSource::Url(spec.to_string())
        } else {
            DocumentSource::File(PathBuf::from(spec))
        }
    }

    /// Fetch and parse the document.
    pub fn load(&self) -> Result<Value, LoadError> {
        match self {
            DocumentSource::File(path) => {
                let text = fs::read_to_string(path)?;
                Ok(serde_json::from_str(&text)?)
            }
            DocumentSource::Url(url) => {
                let value = reqwest::blocking::get(url)?
                    .error_for_status()?
                    .json::<Value>()?;
                Ok(value)
            }
            DocumentSource::Inline(value) => Ok(value.clone()),
        }
    }

    /// Load with the empty-document fallback: on failure, return an empty
    /// root object alongside the error so the shell can report it and keep
    /// going.
    pub fn load_or_empty(&self) -> (Value, Option<LoadError>) {
        match self.load() {
            Ok(value) => (value, None),
            Err(err) => (Value::Object(Map::new()), Some(err)),
        }
    }
}
