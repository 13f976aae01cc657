//! Host-side store service
//!
//! The single writer to durable storage. Values are whole JSON documents;
//! `set` always replaces, never merges. Callers send the complete state.

use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use chatdeck_storage::Database;

use crate::Result;

pub struct StoreService {
    /// In-memory copy of every stored value
    values: Arc<RwLock<HashMap<String, Value>>>,
    /// One lock per key so writes to the same key apply one at a time
    key_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
    /// Database for persistence
    db: Database,
}

impl StoreService {
    pub fn new(db: Database) -> Self {
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
            key_locks: Arc::new(Mutex::new(HashMap::new())),
            db,
        }
    }

    /// Load every stored value into memory
    pub fn initialize(&self) -> Result<usize> {
        let mut loaded = HashMap::new();
        for key in self.db.keys()? {
            if let Some(raw) = self.db.get_value(&key)? {
                match serde_json::from_str::<Value>(&raw) {
                    Ok(value) => {
                        loaded.insert(key, value);
                    }
                    Err(e) => {
                        tracing::warn!(key = %key, error = %e, "Skipping unreadable stored value");
                    }
                }
            }
        }

        let count = loaded.len();
        *self.values.write() = loaded;

        tracing::info!(stores = count, "Store service initialized");

        Ok(count)
    }

    /// Current value under `key`, `None` if nothing was ever stored
    pub fn get_store(&self, key: &str) -> Result<Option<Value>> {
        if let Some(value) = self.values.read().get(key).cloned() {
            return Ok(Some(value));
        }

        let lock = self.key_lock(key);
        let _guard = lock.lock();
        self.load(key)
    }

    /// Replace the value under `key`.
    ///
    /// Writing the value that is already stored is a no-op.
    pub fn set(&self, key: &str, value: Value) -> Result<()> {
        let lock = self.key_lock(key);
        let _guard = lock.lock();
        self.write(key, value)
    }

    /// Read-modify-write under the key lock
    pub fn update<F>(&self, key: &str, f: F) -> Result<()>
    where
        F: FnOnce(Option<Value>) -> Result<Value>,
    {
        let lock = self.key_lock(key);
        let _guard = lock.lock();
        let next = f(self.load(key)?)?;
        self.write(key, next)
    }

    // Callers hold the key lock
    fn load(&self, key: &str) -> Result<Option<Value>> {
        if let Some(value) = self.values.read().get(key).cloned() {
            return Ok(Some(value));
        }

        let Some(raw) = self.db.get_value(key)? else {
            return Ok(None);
        };

        let value: Value = serde_json::from_str(&raw)?;
        self.values.write().insert(key.to_string(), value.clone());
        Ok(Some(value))
    }

    // Callers hold the key lock
    fn write(&self, key: &str, value: Value) -> Result<()> {
        if self.values.read().get(key) == Some(&value) {
            tracing::trace!(key = %key, "Store value unchanged");
            return Ok(());
        }

        let serialized = serde_json::to_string(&value)?;
        self.db.set_value(key, &serialized)?;
        self.values.write().insert(key.to_string(), value);

        tracing::debug!(key = %key, bytes = serialized.len(), "Store value written");

        Ok(())
    }

    fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        Arc::clone(
            self.key_locks
                .lock()
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Clone for StoreService {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
            key_locks: Arc::clone(&self.key_locks),
            db: self.db.clone(),
        }
    }
}
