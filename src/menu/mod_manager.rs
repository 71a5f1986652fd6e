//! Mod and global script lists for the mod manager screen
//!
//! Both lists are rebuilt from the registry each time the screen opens and kept
//! sorted; list box rows map to these indices one to one. Every toggle is
//! mirrored into [`MenuSettings`] right away so the settings stay the single
//! persisted truth.

use crate::modules::ModuleRegistry;
use crate::settings::MenuSettings;
use std::cmp::Ordering;

/// A data module as shown in the mod manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModRecord {
    pub module_path: String,
    pub module_name: String,
    pub description: String,
    pub disabled: bool,
}

impl Ord for ModRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.module_path.cmp(&other.module_path)
    }
}

impl PartialOrd for ModRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A global script as shown in the mod manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRecord {
    pub preset_name: String,
    pub description: String,
    pub enabled: bool,
}

impl Ord for ScriptRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.preset_name.cmp(&other.preset_name)
    }
}

impl PartialOrd for ScriptRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// List box text for a mod
pub fn make_mod_string(record: &ModRecord) -> String {
    let state = if record.disabled { "[OFF]" } else { "[ON]" };
    format!("{} {} - {}", state, record.module_name, record.module_path)
}

/// List box text for a script
pub fn make_script_string(record: &ScriptRecord) -> String {
    let state = if record.enabled { "[ON]" } else { "[OFF]" };
    format!("{} {}", state, record.preset_name)
}

#[derive(Debug, Clone, Default)]
pub struct ModList {
    mods: Vec<ModRecord>,
    scripts: Vec<ScriptRecord>,
}

impl ModList {
    /// Builds both lists from the registry, taking on/off state from settings
    pub fn load(registry: &dyn ModuleRegistry, settings: &MenuSettings) -> Self {
        let mut mods: Vec<ModRecord> = registry
            .modules()
            .into_iter()
            .map(|module| ModRecord {
                disabled: settings.disabled_mods.contains(&module.path),
                module_path: module.path,
                module_name: module.name,
                description: module.description,
            })
            .collect();
        mods.sort();
        mods.dedup_by(|a, b| a.module_path == b.module_path);

        let mut scripts: Vec<ScriptRecord> = registry
            .global_scripts()
            .into_iter()
            .map(|script| ScriptRecord {
                enabled: settings.enabled_scripts.contains(&script.preset_name),
                preset_name: script.preset_name,
                description: script.description,
            })
            .collect();
        scripts.sort();
        scripts.dedup_by(|a, b| a.preset_name == b.preset_name);

        ModList { mods, scripts }
    }

    pub fn mods(&self) -> &[ModRecord] {
        &self.mods
    }

    pub fn scripts(&self) -> &[ScriptRecord] {
        &self.scripts
    }

    pub fn mod_strings(&self) -> Vec<String> {
        self.mods.iter().map(make_mod_string).collect()
    }

    pub fn script_strings(&self) -> Vec<String> {
        self.scripts.iter().map(make_script_string).collect()
    }

    /// Flips one mod on or off; None if the index is out of range
    pub fn toggle_mod(&mut self, index: usize, settings: &mut MenuSettings) -> Option<&ModRecord> {
        let record = self.mods.get_mut(index)?;
        record.disabled = !record.disabled;
        if record.disabled {
            settings.disabled_mods.insert(record.module_path.clone());
        } else {
            settings.disabled_mods.remove(&record.module_path);
        }
        Some(record)
    }

    /// Flips one script on or off; None if the index is out of range
    pub fn toggle_script(&mut self, index: usize, settings: &mut MenuSettings) -> Option<&ScriptRecord> {
        let record = self.scripts.get_mut(index)?;
        record.enabled = !record.enabled;
        if record.enabled {
            settings.enabled_scripts.insert(record.preset_name.clone());
        } else {
            settings.enabled_scripts.remove(&record.preset_name);
        }
        Some(record)
    }
}
