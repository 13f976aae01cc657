//! Desktop notification permissions per webview partition
//!
//! Stored as one `{ partition: enabled }` map under a host-only key, so the
//! UI can change it only through the notification switch. Partitions with no
//! entry are allowed.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::service::StoreService;
use crate::Result;

const PERMISSIONS_KEY: &str = "notification-permissions";
const PARTITION_PREFIX: &str = "persist:";

#[derive(Clone)]
pub struct NotificationPermissions {
    service: StoreService,
}

impl NotificationPermissions {
    pub fn new(service: StoreService) -> Self {
        Self { service }
    }

    pub fn is_enabled(&self, partition: &str) -> Result<bool> {
        let map = parse(self.service.get_store(PERMISSIONS_KEY)?);
        Ok(map.get(partition).copied().unwrap_or(true))
    }

    pub fn set_enabled(&self, partition: &str, enabled: bool) -> Result<()> {
        let session = partition.strip_prefix(PARTITION_PREFIX).unwrap_or_default();
        if session.trim().is_empty() {
            return Err(CoreError::InvalidPartition(partition.to_string()));
        }

        self.service.update(PERMISSIONS_KEY, |current| {
            let mut map = parse(current);
            map.insert(partition.to_string(), enabled);
            Ok(serde_json::to_value(map)?)
        })?;

        tracing::info!(partition = %partition, enabled, "Notification permission changed");
        Ok(())
    }
}

fn parse(value: Option<Value>) -> BTreeMap<String, bool> {
    match value {
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Notification permissions unreadable, resetting");
            BTreeMap::new()
        }),
        None => BTreeMap::new(),
    }
}
