//! Tab data structure
//!
//! The persisted shape is `{ id, name, config }`. The config is opaque to the
//! synchronization core: fields this crate does not know about are carried in
//! `extra` so a record written by a newer UI survives a round-trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::TabError;
use crate::Result;

pub const DEFAULT_TAB_NAME: &str = "WhatsApp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Unique identifier, also the render key and webview join key
    pub id: String,
    /// Display label
    pub name: String,
    /// Session configuration
    #[serde(default)]
    pub config: TabConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabConfig {
    /// Tab strip background, any CSS color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Desktop notifications for this session
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

impl Default for TabConfig {
    fn default() -> Self {
        Self {
            color: None,
            notifications: true,
            extra: Map::new(),
        }
    }
}

/// Fields to overwrite on an existing tab. The id is never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<TabConfig>,
}

impl TabPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            config: None,
        }
    }

    pub fn config(config: TabConfig) -> Self {
        Self {
            name: None,
            config: Some(config),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.config.is_none()
    }
}

impl Tab {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_config(name, TabConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: TabConfig) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TabError::EmptyName);
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            config,
        })
    }

    /// The tab every fresh install (and the add button) starts with
    pub fn default_tab() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: DEFAULT_TAB_NAME.to_string(),
            config: TabConfig::default(),
        }
    }

    /// Webview partition isolating this tab's cookies and storage
    pub fn partition(&self) -> String {
        format!("persist:{}", self.id)
    }

    /// Apply a patch, returning whether anything changed.
    ///
    /// An empty or whitespace-only name in the patch is ignored.
    pub fn apply(&mut self, patch: TabPatch) -> bool {
        let mut changed = false;

        if let Some(name) = patch.name {
            if !name.trim().is_empty() && name != self.name {
                self.name = name;
                changed = true;
            }
        }

        if let Some(config) = patch.config {
            if config != self.config {
                self.config = config;
                changed = true;
            }
        }

        changed
    }
}
