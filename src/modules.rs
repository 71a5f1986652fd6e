//! Module registry
//!
//! Source of the content the menu lists: data modules (mods), the global
//! scripts they provide and the scenes available for skirmish. The menu only
//! reads from a registry; enabled/disabled state lives in the settings.
//!
//! [`DirectoryRegistry`] scans a directory for `*.rte` module folders, each with
//! an optional `module.json` manifest:
//!
//! ```json
//! {
//!   "name": "Ronin",
//!   "description": "Mercenaries with old-world weapons",
//!   "scripts": [{ "name": "Ronin Reinforcements", "description": "..." }],
//!   "scenes": [{ "name": "Dojo Hills", "description": "...", "max_players": 4 }]
//! }
//! ```

use log::{debug, warn};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Folder suffix that marks a data module
pub const MODULE_EXTENSION: &str = "rte";

const MANIFEST_FILENAME: &str = "module.json";

/// A data module as the registry knows it
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleInfo {
    /// Folder name, e.g. "Ronin.rte"; unique key for the module
    pub path: String,
    pub name: String,
    pub description: String,
}

/// A global script a module provides
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptInfo {
    #[serde(rename = "name")]
    pub preset_name: String,
    #[serde(default)]
    pub description: String,
}

/// A scene playable in skirmish
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_max_players")]
    pub max_players: usize,
}

fn default_max_players() -> usize {
    4
}

/// Read-only view of installed content
pub trait ModuleRegistry {
    fn modules(&self) -> Vec<ModuleInfo>;
    fn global_scripts(&self) -> Vec<ScriptInfo>;
    fn scenes(&self) -> Vec<SceneInfo>;

    /// Picks up content installed or removed since the last look
    fn refresh(&mut self) -> Result<(), RegistryError> {
        Ok(())
    }
}

/// Registry backed by fixed lists
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    pub modules: Vec<ModuleInfo>,
    pub scripts: Vec<ScriptInfo>,
    pub scenes: Vec<SceneInfo>,
}

impl ModuleRegistry for StaticRegistry {
    fn modules(&self) -> Vec<ModuleInfo> {
        self.modules.clone()
    }

    fn global_scripts(&self) -> Vec<ScriptInfo> {
        self.scripts.clone()
    }

    fn scenes(&self) -> Vec<SceneInfo> {
        self.scenes.clone()
    }
}

/// Errors that can occur while scanning for modules
#[derive(Debug)]
pub enum RegistryError {
    IoError(std::io::Error),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegistryError::IoError(e) => write!(f, "IO error while scanning modules: {}", e),
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::IoError(err)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Manifest {
    name: Option<String>,
    description: String,
    scripts: Vec<ScriptInfo>,
    scenes: Vec<SceneInfo>,
}

/// Registry that scans `*.rte` folders under a root directory
pub struct DirectoryRegistry {
    root: PathBuf,
    contents: StaticRegistry,
}

impl DirectoryRegistry {
    /// Scans `root` once; call [`rescan`](Self::rescan) to pick up changes
    pub fn scan(root: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let mut registry = DirectoryRegistry {
            root: root.as_ref().to_path_buf(),
            contents: StaticRegistry::default(),
        };
        registry.rescan()?;
        Ok(registry)
    }

    /// Per-user default module location, falling back to `./modules`
    pub fn default_directory() -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join("game_menu").join("modules"))
            .unwrap_or_else(|| PathBuf::from("./modules"))
    }

    pub fn rescan(&mut self) -> Result<(), RegistryError> {
        let mut contents = StaticRegistry::default();

        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_dir() || path.extension().and_then(|e| e.to_str()) != Some(MODULE_EXTENSION) {
                continue;
            }
            let Some(folder) = path.file_name().and_then(|f| f.to_str()) else {
                continue;
            };

            let manifest = Self::read_manifest(&path);
            let stem = folder.trim_end_matches(".rte").to_string();
            contents.modules.push(ModuleInfo {
                path: folder.to_string(),
                name: manifest.name.unwrap_or(stem),
                description: manifest.description,
            });
            contents.scripts.extend(manifest.scripts);
            contents.scenes.extend(manifest.scenes);
        }

        debug!(
            "Scanned {}: {} modules, {} scripts, {} scenes",
            self.root.display(),
            contents.modules.len(),
            contents.scripts.len(),
            contents.scenes.len()
        );
        self.contents = contents;
        Ok(())
    }

    /// A missing manifest is normal; a broken one is reported and ignored
    fn read_manifest(module_dir: &Path) -> Manifest {
        let manifest_path = module_dir.join(MANIFEST_FILENAME);
        let Ok(json) = fs::read_to_string(&manifest_path) else {
            return Manifest::default();
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("Ignoring broken manifest {}: {}", manifest_path.display(), e);
            Manifest::default()
        })
    }
}

impl ModuleRegistry for DirectoryRegistry {
    fn modules(&self) -> Vec<ModuleInfo> {
        self.contents.modules()
    }

    fn global_scripts(&self) -> Vec<ScriptInfo> {
        self.contents.global_scripts()
    }

    fn scenes(&self) -> Vec<SceneInfo> {
        self.contents.scenes()
    }

    fn refresh(&mut self) -> Result<(), RegistryError> {
        self.rescan()
    }
}
