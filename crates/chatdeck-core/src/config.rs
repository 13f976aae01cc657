//! Host configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::CoreError;
use crate::Result;

/// Overrides the platform data directory
pub const DATA_DIR_ENV: &str = "CHATDECK_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding everything the host persists
    pub data_dir: PathBuf,
    /// Path to the database file
    pub database_path: PathBuf,
    /// Initial window size (logical pixels)
    pub window_width: f64,
    pub window_height: f64,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("chatdeck.db"),
            data_dir,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_width <= 0.0 || self.window_height <= 0.0 {
            return Err(CoreError::Config("window size must be positive".to_string()));
        }

        Ok(())
    }

    pub fn data_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }

        dirs::data_local_dir()
            .map(|d| d.join("ChatDeck"))
            .unwrap_or_else(|| PathBuf::from(".chatdeck"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
