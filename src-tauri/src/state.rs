//! Application state management
use chatdeck_core::{Config, Result, Shell};
use parking_lot::Mutex;

/// Thread-safe application state wrapper
pub struct AppState {
    shell: Shell,
    /// Chat link from the command line, delivered once the UI is ready
    pending_link: Mutex<Option<String>>,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let config = Config::default();
        let shell = Shell::new(config)?;

        Ok(Self {
            shell,
            pending_link: Mutex::new(None),
        })
    }

    pub fn initialize(&self) -> Result<()> {
        self.shell.initialize()
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn set_pending_link(&self, url: Option<String>) {
        *self.pending_link.lock() = url;
    }

    pub fn take_pending_link(&self) -> Option<String> {
        self.pending_link.lock().take()
    }
}
