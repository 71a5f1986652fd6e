//! Settings data types
//!
//! Everything the options, control configuration and mod manager screens edit.
//! Serialized to JSON with Serde; every struct falls back to defaults for
//! missing fields so older files keep loading.

use super::input_scheme::{PlayerInput, MAX_PLAYERS};
use crate::menu::game_config::DEFAULT_STARTING_FUNDS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Current settings file version
pub const CURRENT_SETTINGS_VERSION: u32 = 1;

/// A display resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Resolution { width, height }
    }

    pub fn label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// True if this resolution fits inside `max` in both dimensions
    pub fn fits_in(&self, max: Resolution) -> bool {
        self.width <= max.width && self.height <= max.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    pub fullscreen: bool,
    pub resolution: Resolution,
}

impl Default for VideoSettings {
    fn default() -> Self {
        VideoSettings {
            fullscreen: false,
            resolution: Resolution::new(1280, 720),
        }
    }
}

/// Volumes in the range 0.0 to 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub music_volume: f32,
    pub sound_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        AudioSettings {
            music_volume: 0.6,
            sound_volume: 0.8,
        }
    }
}

/// The gameplay checkboxes on the options screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayFlags {
    pub flash_on_brain_damage: bool,
    pub blip_on_reveal_unseen: bool,
    pub show_foreign_items: bool,
    pub show_tooltips: bool,
    pub precise_collisions: bool,
}

impl Default for GameplayFlags {
    fn default() -> Self {
        GameplayFlags {
            flash_on_brain_damage: true,
            blip_on_reveal_unseen: true,
            show_foreign_items: true,
            show_tooltips: true,
            precise_collisions: true,
        }
    }
}

/// The root settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    pub version: u32,
    pub video: VideoSettings,
    pub audio: AudioSettings,
    pub gameplay: GameplayFlags,
    pub players: [PlayerInput; MAX_PLAYERS],
    /// Module paths the mod manager has switched off
    pub disabled_mods: BTreeSet<String>,
    /// Global script preset names the mod manager has switched on
    pub enabled_scripts: BTreeSet<String>,
    /// Log filter passed to env_logger ("error", "warn", "info", "debug", "trace")
    pub log_level: String,
    /// Funds a new skirmish starts with until the player picks otherwise
    pub starting_funds: i32,
}

impl Default for MenuSettings {
    fn default() -> Self {
        MenuSettings {
            version: CURRENT_SETTINGS_VERSION,
            video: VideoSettings::default(),
            audio: AudioSettings::default(),
            gameplay: GameplayFlags::default(),
            players: std::array::from_fn(PlayerInput::for_player),
            disabled_mods: BTreeSet::new(),
            enabled_scripts: BTreeSet::new(),
            log_level: "info".to_string(),
            starting_funds: DEFAULT_STARTING_FUNDS,
        }
    }
}

impl MenuSettings {
    /// Log level as a filter, falling back to Info for unknown names
    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Error types for settings load/save
#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
    InvalidVersion(u32),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(e) => write!(f, "IO error: {}", e),
            SettingsError::SerializationError(e) => write!(f, "Serialization error: {}", e),
            SettingsError::InvalidVersion(v) => write!(f, "Unsupported settings version: {}", v),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::IoError(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::SerializationError(err)
    }
}
