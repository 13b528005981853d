//! Engine configuration, loaded from TOML.
//!
//! ```toml
//! [notifications]
//! poll_interval_ms = 1000
//!
//! [view]
//! week_start = "sunday"
//!
//! [store]
//! path = "/home/me/.local/share/schedule-engine/events.json"
//!
//! [logging]
//! level = "warn"
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::view::{ViewOptions, WeekStartDay};

const APP_DIR: &str = "schedule-engine";
const LOCAL_CONFIG: &str = "schedule.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub notifications: NotificationsConfig,
    pub view: ViewConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub poll_interval_ms: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub week_start: WeekStartDay,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Event file. Falls back to the platform data directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// A `tracing` filter directive, used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl FromStr for EngineConfig {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl EngineConfig {
    /// Read and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        contents.parse()
    }

    /// Look for `./schedule.toml`, then `<config dir>/schedule-engine/config.toml`.
    /// Defaults when neither exists.
    pub fn load() -> Result<Self> {
        match Self::default_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join(APP_DIR).join("config.toml"));
        }
        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.notifications.poll_interval_ms == 0 {
            return Err(EngineError::Config(
                "notifications.poll_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(EngineError::Config("logging.level must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.notifications.poll_interval_ms)
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            week_start: self.view.week_start,
        }
    }

    /// The configured event file, else `<data dir>/schedule-engine/events.json`,
    /// else `./events.json`.
    pub fn store_path(&self) -> PathBuf {
        if let Some(path) = &self.store.path {
            return path.clone();
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR).join("events.json"))
            .unwrap_or_else(|| PathBuf::from("events.json"))
    }
}
