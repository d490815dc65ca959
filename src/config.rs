use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Runtime settings for the binary.  Controls are deliberately absent: the
/// jump key is fixed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Target tick length in milliseconds (≈5 Hz by default).
    pub tick_ms: u64,
    /// How long the input thread waits for a key before checking whether it
    /// has been asked to stop.
    pub input_poll_ms: u64,
    /// How long the terminal keeps showing the "Hit" frame before it is
    /// restored.
    pub hit_hold_ms: u64,
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick_ms: 200,
            input_poll_ms: 50,
            hit_hold_ms: 2000,
            log_file: PathBuf::from("/tmp/pixel_jumper.log"),
        }
    }
}

impl GameConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn input_poll(&self) -> Duration {
        Duration::from_millis(self.input_poll_ms)
    }

    pub fn hit_hold(&self) -> Duration {
        Duration::from_millis(self.hit_hold_ms)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read the config at `path`.  `Ok(None)` means there is no file; the
    /// caller picks the defaults and reports it once logging is up.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)?;
        Ok(Some(Self::from_json(&text)?))
    }
}

/// `$HOME/.pixel_jumper.json`, or the working directory when `HOME` is unset.
pub fn default_config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".pixel_jumper.json")
}
