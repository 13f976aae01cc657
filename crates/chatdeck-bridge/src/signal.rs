//! Host-originated signals
//!
//! Fired by menu accelerators and OS integration in the host, delivered to
//! every UI surface. Each carries no payload except `OpenLink`, which carries
//! the URL to load.

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    NextTab,
    PreviousTab,
    FirstTab,
    LastTab,
    /// Load a chat link in the active tab
    #[serde(rename = "open-whatsapp-link")]
    OpenLink,
    #[serde(rename = "open-tab-devtools")]
    OpenTabDevTools,
    EditActiveTab,
    CloseActiveTab,
    AddNewTab,
    RestoreTab,
    OpenSettings,
}

impl SignalKind {
    pub const ALL: [SignalKind; 11] = [
        SignalKind::NextTab,
        SignalKind::PreviousTab,
        SignalKind::FirstTab,
        SignalKind::LastTab,
        SignalKind::OpenLink,
        SignalKind::OpenTabDevTools,
        SignalKind::EditActiveTab,
        SignalKind::CloseActiveTab,
        SignalKind::AddNewTab,
        SignalKind::RestoreTab,
        SignalKind::OpenSettings,
    ];

    /// Event name on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::NextTab => "next-tab",
            SignalKind::PreviousTab => "previous-tab",
            SignalKind::FirstTab => "first-tab",
            SignalKind::LastTab => "last-tab",
            SignalKind::OpenLink => "open-whatsapp-link",
            SignalKind::OpenTabDevTools => "open-tab-devtools",
            SignalKind::EditActiveTab => "edit-active-tab",
            SignalKind::CloseActiveTab => "close-active-tab",
            SignalKind::AddNewTab => "add-new-tab",
            SignalKind::RestoreTab => "restore-tab",
            SignalKind::OpenSettings => "open-settings",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::NextTab => "Next Tab",
            SignalKind::PreviousTab => "Previous Tab",
            SignalKind::FirstTab => "First Tab",
            SignalKind::LastTab => "Last Tab",
            SignalKind::OpenLink => "Open Link",
            SignalKind::OpenTabDevTools => "Open Tab DevTools",
            SignalKind::EditActiveTab => "Edit Active Tab",
            SignalKind::CloseActiveTab => "Close Active Tab",
            SignalKind::AddNewTab => "New Tab",
            SignalKind::RestoreTab => "Restore Closed Tab",
            SignalKind::OpenSettings => "Settings",
        }
    }

    /// Keyboard shortcut, if the signal has one
    pub fn default_accelerator(&self) -> Option<&'static str> {
        match self {
            SignalKind::NextTab => Some("CmdOrCtrl+Tab"),
            SignalKind::PreviousTab => Some("CmdOrCtrl+Shift+Tab"),
            SignalKind::FirstTab => Some("CmdOrCtrl+1"),
            SignalKind::LastTab => Some("CmdOrCtrl+9"),
            SignalKind::OpenLink => None,
            SignalKind::OpenTabDevTools => Some("CmdOrCtrl+Shift+I"),
            SignalKind::EditActiveTab => Some("CmdOrCtrl+E"),
            SignalKind::CloseActiveTab => Some("CmdOrCtrl+W"),
            SignalKind::AddNewTab => Some("CmdOrCtrl+T"),
            SignalKind::RestoreTab => Some("CmdOrCtrl+Shift+T"),
            SignalKind::OpenSettings => Some("CmdOrCtrl+,"),
        }
    }

    pub fn takes_payload(&self) -> bool {
        matches!(self, SignalKind::OpenLink)
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SignalKind {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignalKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BridgeError::UnknownSignal(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSignal {
    pub kind: SignalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl HostSignal {
    pub fn new(kind: SignalKind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    pub fn open_link(url: impl Into<String>) -> Self {
        Self {
            kind: SignalKind::OpenLink,
            payload: Some(url.into()),
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl From<SignalKind> for HostSignal {
    fn from(kind: SignalKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_round_trip() {
        for kind in SignalKind::ALL {
            assert_eq!(kind.as_str().parse::<SignalKind>().unwrap(), kind);
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::json!(kind.as_str()));
        }
    }

    #[test]
    fn test_unknown_signal() {
        assert!(matches!(
            "reboot".parse::<SignalKind>(),
            Err(BridgeError::UnknownSignal(_))
        ));
    }

    #[test]
    fn test_only_open_link_takes_payload() {
        let with_payload: Vec<_> = SignalKind::ALL
            .into_iter()
            .filter(|k| k.takes_payload())
            .collect();
        assert_eq!(with_payload, vec![SignalKind::OpenLink]);
        assert!(SignalKind::OpenLink.default_accelerator().is_none());
    }

    #[test]
    fn test_accelerators_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for accel in SignalKind::ALL.iter().filter_map(|k| k.default_accelerator()) {
            assert!(seen.insert(accel), "duplicate accelerator {accel}");
        }
    }
}
