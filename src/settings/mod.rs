//! Persistent menu settings
//!
//! This module provides the settings the menu edits and their storage:
//! - JSON-based settings file (human-readable, hand-editable)
//! - Version check on load
//! - Per-player input devices and binding tables
//!
//! # Architecture
//!
//! - `types`: Settings data structures and error types
//! - `input_scheme`: Devices, input elements and configuration step tables
//! - `manager`: SettingsManager for file operations
//!
//! # Example Usage
//!
//! ```ignore
//! let manager = SettingsManager::new(SettingsManager::default_directory())?;
//! let mut settings = manager.load_or_default();
//! settings.audio.music_volume = 0.5;
//! manager.save(&settings)?;
//! ```

pub mod input_scheme;
pub mod manager;
pub mod types;

// Re-export commonly used types
pub use input_scheme::*;
pub use manager::SettingsManager;
pub use types::*;
