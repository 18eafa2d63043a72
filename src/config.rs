//! Shell configuration.

use serde::{Deserialize, Serialize};

/// Options recognized by a shell instance. Field names follow the
/// camelCase keys embedding hosts pass as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    /// Label shown before the path in each prompt.
    pub prompt_label: String,
    /// Where to fetch the JSON document from: a file path or an
    /// `http(s)://` URL.
    pub data_source: String,
    /// Printed once at startup.
    pub welcome_message: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt_label: "guest@jsonsh".to_string(),
            data_source: "data.json".to_string(),
            welcome_message: "Type 'help'. Press <Tab> for autocomplete.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_populated() {
        let config = ShellConfig::default();
        assert_eq!(config.data_source, "data.json");
        assert!(!config.prompt_label.is_empty());
        assert!(!config.welcome_message.is_empty());
    }

    #[test]
    fn deserializes_partial_camel_case_options() {
        let config: ShellConfig =
            serde_json::from_str(r#"{"promptLabel": "me@site", "dataSource": "cv.json"}"#)
                .unwrap();
        assert_eq!(config.prompt_label, "me@site");
        assert_eq!(config.data_source, "cv.json");
        assert_eq!(config.welcome_message, ShellConfig::default().welcome_message);
    }
}
