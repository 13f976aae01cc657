//! UI preferences record, persisted under `StoreKey::Settings`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Ask before closing a tab
    pub tab_close_prompt: bool,
    /// Show the tab strip
    pub tab_bar: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_close_prompt: true,
            tab_bar: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default() {
        let settings: Settings = serde_json::from_value(json!({ "tabBar": false })).unwrap();
        assert!(settings.tab_close_prompt);
        assert!(!settings.tab_bar);
    }
}
