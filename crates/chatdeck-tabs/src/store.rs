//! Tab store aggregate
//!
//! Ordered tabs plus the current selection. Every mutation here is pure and
//! synchronous and reports whether the persisted part of the store changed,
//! so the caller can decide whether a write is owed.
//!
//! Persisted shape: `{ "tabs": [...], "selectedTabId": ... }`. The last closed
//! tab is session-only.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::TabError;
use crate::tab::{Tab, TabPatch};
use crate::Result;

/// A removed tab and the index it occupied
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTab {
    pub tab: Tab,
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStore {
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub selected_tab_id: Option<String>,
    #[serde(skip)]
    pub last_closed_tab: Option<ClosedTab>,
}

impl TabStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted record and repair it
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let mut store: TabStore = serde_json::from_value(value)?;
        store.normalize();
        Ok(store)
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "tabs": self.tabs,
            "selectedTabId": self.selected_tab_id,
        })
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn contains(&self, tab_id: &str) -> bool {
        self.position(tab_id).is_some()
    }

    pub fn position(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    pub fn get(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    pub fn selected_tab(&self) -> Option<&Tab> {
        self.selected_tab_id.as_deref().and_then(|id| self.get(id))
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected_tab_id
            .as_deref()
            .and_then(|id| self.position(id))
    }

    /// Drop duplicate ids (first occurrence wins) and fix a dangling selection.
    /// Returns true if the record had to be repaired.
    pub fn normalize(&mut self) -> bool {
        let before = self.tabs.len();
        let mut seen = HashSet::new();
        self.tabs.retain(|t| seen.insert(t.id.clone()));
        let mut repaired = self.tabs.len() != before;

        if self.selected_index().is_none() {
            let fallback = self.tabs.first().map(|t| t.id.clone());
            if fallback != self.selected_tab_id {
                self.selected_tab_id = fallback;
                repaired = true;
            }
        }

        if repaired {
            tracing::warn!(
                dropped = before - self.tabs.len(),
                "Repaired inconsistent tab record"
            );
        }

        repaired
    }

    /// Append a tab. The first tab becomes selected.
    pub fn add_tab(&mut self, tab: Tab) -> Result<()> {
        if self.contains(&tab.id) {
            return Err(TabError::DuplicateId(tab.id));
        }

        self.tabs.push(tab);
        if self.selected_index().is_none() {
            self.selected_tab_id = self.tabs.first().map(|t| t.id.clone());
        }

        Ok(())
    }

    /// Remove a tab and remember it for `restore_tab`.
    ///
    /// When the removed tab was selected, the tab now at the same index is
    /// selected, else the new last tab, else nothing. Any other selection is
    /// left as it was. Returns `None` if no tab has that id.
    pub fn remove_tab(&mut self, tab_id: &str) -> Option<Tab> {
        let index = self.position(tab_id)?;
        let tab = self.tabs.remove(index);

        if self.selected_tab_id.as_deref() == Some(tab_id) {
            self.selected_tab_id = self
                .tabs
                .get(index)
                .or_else(|| self.tabs.last())
                .map(|t| t.id.clone());
        }

        self.last_closed_tab = Some(ClosedTab {
            tab: tab.clone(),
            index,
        });

        Some(tab)
    }

    /// Re-insert the last closed tab at its old index (clamped) and select it.
    /// Returns the restored tab id, or `None` when there is nothing to restore.
    pub fn restore_tab(&mut self) -> Option<String> {
        let ClosedTab { tab, index } = self.last_closed_tab.take()?;
        let id = tab.id.clone();

        if !self.contains(&id) {
            let index = index.min(self.tabs.len());
            self.tabs.insert(index, tab);
        }
        self.selected_tab_id = Some(id.clone());

        Some(id)
    }

    /// Select a tab. Unknown ids and the already-selected id are no-ops.
    pub fn set_active(&mut self, tab_id: &str) -> bool {
        if !self.contains(tab_id) || self.selected_tab_id.as_deref() == Some(tab_id) {
            return false;
        }

        self.selected_tab_id = Some(tab_id.to_string());
        true
    }

    pub fn update_tab(&mut self, tab_id: &str, patch: TabPatch) -> Result<bool> {
        let tab = self
            .tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;

        Ok(tab.apply(patch))
    }

    /// Move a tab to a new position (clamped to the end)
    pub fn move_tab(&mut self, tab_id: &str, new_index: usize) -> bool {
        let Some(current_index) = self.position(tab_id) else {
            return false;
        };

        let insert_index = new_index.min(self.tabs.len() - 1);
        if insert_index == current_index {
            return false;
        }

        let tab = self.tabs.remove(current_index);
        self.tabs.insert(insert_index, tab);
        true
    }

    /// Tab after the selection, wrapping to the first
    pub fn next_tab_id(&self) -> Option<String> {
        let index = self.selected_index()?;
        let next = (index + 1) % self.tabs.len();
        Some(self.tabs[next].id.clone())
    }

    /// Tab before the selection, wrapping to the last
    pub fn previous_tab_id(&self) -> Option<String> {
        let index = self.selected_index()?;
        let previous = index.checked_sub(1).unwrap_or(self.tabs.len() - 1);
        Some(self.tabs[previous].id.clone())
    }

    pub fn first_tab_id(&self) -> Option<String> {
        self.tabs.first().map(|t| t.id.clone())
    }

    pub fn last_tab_id(&self) -> Option<String> {
        self.tabs.last().map(|t| t.id.clone())
    }
}
