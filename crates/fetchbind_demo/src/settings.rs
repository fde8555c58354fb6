use std::fs;
use std::path::Path;
use std::time::Duration;

use bind_logging::{bind_info, bind_warn};
use fetchbind_engine::{BindSettings, DEFAULT_DEBOUNCE};
use serde::{Deserialize, Serialize};

pub(crate) const SETTINGS_FILENAME: &str = "fetchbind_demo.ron";

/// On-disk demo configuration; every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DemoSettings {
    pub keyword: String,
    pub latency_ms: u64,
    pub debounce_ms: u64,
    pub poll_interval_ms: u64,
    pub poll_ignores_errors: bool,
    pub fetch_timeout_ms: Option<u64>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            latency_ms: 500,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            poll_interval_ms: 0,
            poll_ignores_errors: false,
            fetch_timeout_ms: None,
        }
    }
}

impl DemoSettings {
    pub(crate) fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub(crate) fn bind_settings(&self) -> BindSettings {
        BindSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            poll_ignores_errors: self.poll_ignores_errors,
            fetch_timeout: self.fetch_timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Loads settings from `path`, falling back to defaults when the file is
/// missing or unreadable.
pub(crate) fn load(path: &Path) -> DemoSettings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return DemoSettings::default();
        }
        Err(err) => {
            bind_warn!("Failed to read settings from {:?}: {}", path, err);
            return DemoSettings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            bind_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            bind_warn!("Failed to parse settings from {:?}: {}", path, err);
            DemoSettings::default()
        }
    }
}
