//! Settings manager for handling load/save of the settings file
//!
//! This module provides the SettingsManager struct which handles:
//! - Locating and creating the settings directory
//! - Loading settings (with version check)
//! - Saving settings atomically (write to temp file, then rename)

use super::types::*;
use log::{info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SETTINGS_FILENAME: &str = "settings.json";

pub struct SettingsManager {
    settings_directory: PathBuf,
}

impl SettingsManager {
    /// Creates a new SettingsManager for the given directory
    ///
    /// The directory will be created if it doesn't exist.
    pub fn new(settings_directory: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let settings_dir = settings_directory.as_ref().to_path_buf();

        if !settings_dir.exists() {
            fs::create_dir_all(&settings_dir)?;
        }

        Ok(SettingsManager {
            settings_directory: settings_dir,
        })
    }

    /// Per-user default location, falling back to `./settings`
    pub fn default_directory() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("game_menu"))
            .unwrap_or_else(|| PathBuf::from("./settings"))
    }

    /// Full path of the settings file
    pub fn path(&self) -> PathBuf {
        self.settings_directory.join(SETTINGS_FILENAME)
    }

    /// Load settings from disk
    pub fn load(&self) -> Result<MenuSettings, SettingsError> {
        let json = fs::read_to_string(self.path())?;
        let settings: MenuSettings = serde_json::from_str(&json)?;

        if settings.version > CURRENT_SETTINGS_VERSION {
            return Err(SettingsError::InvalidVersion(settings.version));
        }

        Ok(settings)
    }

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load_or_default(&self) -> MenuSettings {
        match self.load() {
            Ok(settings) => {
                info!("Loaded settings from {}", self.path().display());
                settings
            }
            Err(SettingsError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                info!("No settings file yet, using defaults");
                MenuSettings::default()
            }
            Err(e) => {
                warn!("Could not load settings ({}), using defaults", e);
                MenuSettings::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self, settings: &MenuSettings) -> Result<PathBuf, SettingsError> {
        let filepath = self.path();
        let temp_path = filepath.with_extension("json.tmp");

        // Pretty format so the file can be hand-edited
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &filepath)?;

        info!("Settings saved to: {}", filepath.display());

        Ok(filepath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("game_menu_settings_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_creates_directory() {
        let dir = temp_dir("create");
        let _manager = SettingsManager::new(&dir).unwrap();
        assert!(dir.is_dir());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_then_load() {
        let dir = temp_dir("roundtrip");
        let manager = SettingsManager::new(&dir).unwrap();

        let mut settings = MenuSettings::default();
        settings.audio.music_volume = 0.25;
        settings.disabled_mods.insert("Ronin.rte".to_string());
        manager.save(&settings).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, settings);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = temp_dir("missing");
        let manager = SettingsManager::new(&dir).unwrap();
        assert!(matches!(manager.load(), Err(SettingsError::IoError(_))));
        assert_eq!(manager.load_or_default(), MenuSettings::default());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_newer_version_rejected() {
        let dir = temp_dir("version");
        let manager = SettingsManager::new(&dir).unwrap();
        fs::write(manager.path(), r#"{ "version": 99 }"#).unwrap();

        assert!(matches!(manager.load(), Err(SettingsError::InvalidVersion(99))));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_corrupted_file_falls_back() {
        let dir = temp_dir("corrupt");
        let manager = SettingsManager::new(&dir).unwrap();
        fs::write(manager.path(), "{ not json").unwrap();

        assert!(matches!(manager.load(), Err(SettingsError::SerializationError(_))));
        assert_eq!(manager.load_or_default(), MenuSettings::default());
        fs::remove_dir_all(&dir).unwrap();
    }
}
