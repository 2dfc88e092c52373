use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default time between two renders of the same button
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Faster polling makes sysinfo deltas meaningless
pub const MIN_POLL_INTERVAL_MS: u64 = 250;

const APP_DIR: &str = "easy-sysinfo";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// `env_logger` filter string, e.g. `info` or `easy_sysinfo=trace`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            log_level: default_log_level(),
        }
    }
}

impl PluginConfig {
    /// Load from the user config directory, falling back to defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        // Empty or unreadable files (older formats, hand edits) fall back to defaults
        if data.is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_json::from_slice(&data).unwrap_or_default();
        Ok(config.normalized())
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_vec_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Directory holding the config file and logs
    pub fn app_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR))
    }

    pub fn log_file_path() -> Option<PathBuf> {
        Self::app_dir().map(|dir| dir.join("logs").join("plugin.log"))
    }

    fn get_config_path() -> Result<PathBuf> {
        let app_dir = Self::app_dir().with_context(|| "Could not determine config directory")?;
        Ok(app_dir.join("config.json"))
    }

    fn normalized(mut self) -> Self {
        self.poll_interval_ms = self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
        if self.log_level.trim().is_empty() {
            self.log_level = default_log_level();
        }
        self
    }
}
