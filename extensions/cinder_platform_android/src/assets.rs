//! Shim configuration loaded from the APK via NDK AssetManager
//!
//! On Android, app assets are stored in the APK file and accessed
//! through the AssetManager API. The shim looks for `cinder.toml` in the
//! APK's assets/ folder; a missing file means defaults.

use cinder_platform::{PlatformError, Result, ShimConfig};

#[cfg(target_os = "android")]
use android_activity::AndroidApp;

#[cfg(target_os = "android")]
use std::ffi::CString;

/// Parse raw asset bytes as a shim configuration
pub fn parse_config_bytes(bytes: &[u8]) -> Result<ShimConfig> {
    let content = std::str::from_utf8(bytes)
        .map_err(|e| PlatformError::Config(format!("Config is not UTF-8: {}", e)))?;
    ShimConfig::from_toml_str(content)
}

/// Configuration loader backed by the NDK AssetManager
pub struct ConfigAssetLoader {
    #[cfg(target_os = "android")]
    app: AndroidApp,
}

#[cfg(target_os = "android")]
impl ConfigAssetLoader {
    pub fn new(app: AndroidApp) -> Self {
        Self { app }
    }

    /// Load `cinder.toml`, or `None` when the APK does not ship one
    pub fn load(&self) -> Result<Option<ShimConfig>> {
        use std::io::Read;

        let c_path = CString::new(cinder_platform::config::CONFIG_FILE_NAME)
            .map_err(|e| PlatformError::Config(format!("Invalid path: {}", e)))?;

        let asset_manager: ndk::asset::AssetManager = self.app.asset_manager();
        let Some(mut asset) = asset_manager.open(&c_path) else {
            return Ok(None);
        };

        let mut buffer = Vec::new();
        asset.read_to_end(&mut buffer).map_err(|e| {
            PlatformError::Config(format!("Failed to read config asset: {}", e))
        })?;

        parse_config_bytes(&buffer).map(Some)
    }
}

// Stub implementation for non-Android builds (for cross-compilation checks)
#[cfg(not(target_os = "android"))]
impl ConfigAssetLoader {
    pub fn new() -> Self {
        Self {}
    }

    pub fn load(&self) -> Result<Option<ShimConfig>> {
        Err(PlatformError::Unsupported(
            "Android asset loading only available on Android".to_string(),
        ))
    }
}

#[cfg(not(target_os = "android"))]
impl Default for ConfigAssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_asset_bytes() {
        let config = parse_config_bytes(b"keep_screen_on = false\n").unwrap();
        assert!(!config.keep_screen_on);
        assert_eq!(config.tag, cinder_platform::TAG);
    }

    #[test]
    fn rejects_non_utf8_assets() {
        let err = parse_config_bytes(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, PlatformError::Config(_)));
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn host_loader_is_unsupported() {
        assert!(matches!(
            ConfigAssetLoader::default().load(),
            Err(PlatformError::Unsupported(_))
        ));
    }
}
