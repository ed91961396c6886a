//! Shim configuration (cinder.toml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::diagnostics::TAG;
use crate::error::{PlatformError, Result};
use crate::power::{WakeLockFlag, WakeLockFlags, WakeLockRequest};

/// File name looked up in the APK assets or next to the binary
pub const CONFIG_FILE_NAME: &str = "cinder.toml";

/// Lifecycle shim configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShimConfig {
    /// Diagnostic tag of the wake-lock. Log output always uses the fixed
    /// activity tag.
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Hold a wake-lock while the activity is resumed
    #[serde(default = "default_keep_screen_on")]
    pub keep_screen_on: bool,
    #[serde(default = "default_wake_flags")]
    pub wake_flags: Vec<WakeLockFlag>,
    /// Maximum log level (`error`, `warn`, `info`, `debug`, `trace`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_tag() -> String {
    TAG.to_string()
}

fn default_keep_screen_on() -> bool {
    true
}

fn default_wake_flags() -> Vec<WakeLockFlag> {
    vec![WakeLockFlag::FullWake, WakeLockFlag::OnAfterRelease]
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            keep_screen_on: default_keep_screen_on(),
            wake_flags: default_wake_flags(),
            log_level: default_log_level(),
        }
    }
}

impl ShimConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PlatformError::Config(e.to_string()))
    }

    /// Load from a file, or from `cinder.toml` inside a directory
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|e| {
            PlatformError::Config(format!("Failed to read {}: {}", config_path.display(), e))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PlatformError::Config(e.to_string()))
    }

    pub fn wake_lock_flags(&self) -> WakeLockFlags {
        WakeLockFlags::from_flags(&self.wake_flags)
    }

    pub fn wake_lock_request(&self) -> WakeLockRequest {
        WakeLockRequest::new(self.wake_lock_flags(), self.tag.clone())
    }
}
