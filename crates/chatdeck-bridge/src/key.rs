//! Store keys reachable from the UI

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKey {
    /// `{ tabs, selectedTabId }`
    Tabs,
    /// UI preferences
    Settings,
}

impl StoreKey {
    pub const ALL: [StoreKey; 2] = [StoreKey::Tabs, StoreKey::Settings];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Tabs => "tabs",
            StoreKey::Settings => "settings",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StoreKey {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tabs" => Ok(StoreKey::Tabs),
            "settings" => Ok(StoreKey::Settings),
            _ => Err(BridgeError::UnknownKey(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_keys() {
        for key in StoreKey::ALL {
            assert_eq!(key.as_str().parse::<StoreKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            "../secrets".parse::<StoreKey>(),
            Err(BridgeError::UnknownKey(_))
        ));
        // Keys are exact, not case-folded
        assert!("Tabs".parse::<StoreKey>().is_err());
    }
}
