//! Host state container
//!
//! Owns configuration, the database and the store service. The UI never
//! sees any of this directly; it only reaches `StoreService` through the
//! bridge.

use serde_json::Value;

use chatdeck_bridge::{Settings, StoreKey};
use chatdeck_storage::Database;

use crate::config::Config;
use crate::permissions::NotificationPermissions;
use crate::service::StoreService;
use crate::Result;

pub struct Shell {
    config: Config,
    db: Database,
    store_service: StoreService,
}

impl Shell {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Ok(Self::with_database(config, db))
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self::with_database(Config::default(), db))
    }

    fn with_database(config: Config, db: Database) -> Self {
        let store_service = StoreService::new(db.clone());
        Self {
            config,
            db,
            store_service,
        }
    }

    pub fn initialize(&self) -> Result<()> {
        self.store_service.initialize()?;
        tracing::info!(
            database = %self.config.database_path.display(),
            "Shell initialized"
        );
        Ok(())
    }

    pub fn store_service(&self) -> &StoreService {
        &self.store_service
    }

    pub fn notification_permissions(&self) -> NotificationPermissions {
        NotificationPermissions::new(self.store_service.clone())
    }

    pub fn get_store(&self, key: StoreKey) -> Result<Option<Value>> {
        self.store_service.get_store(key.as_str())
    }

    pub fn set_store(&self, key: StoreKey, value: Value) -> Result<()> {
        self.store_service.set(key.as_str(), value)
    }

    /// Stored settings, defaults for anything missing or unreadable
    pub fn settings(&self) -> Result<Settings> {
        Ok(self
            .get_store(StoreKey::Settings)?
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default())
    }

    pub fn set_settings(&self, settings: &Settings) -> Result<()> {
        self.set_store(StoreKey::Settings, serde_json::to_value(settings)?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Clone for Shell {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            store_service: self.store_service.clone(),
        }
    }
}
