//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// File name of the configuration document
pub const CONFIG_FILE: &str = "mod_manager_config.json";

const MAX_RECENT_FOLDERS: usize = 10;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Folder the game loads mods from
    #[serde(default, deserialize_with = "empty_path_as_none")]
    pub mod_folder: Option<PathBuf>,
    /// Recently used mod folders, newest first
    #[serde(default)]
    pub recent_folders: Vec<PathBuf>,
}

// Older config files store an empty string when no folder was chosen
fn empty_path_as_none<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let path = Option::<PathBuf>::deserialize(deserializer)?;
    Ok(path.filter(|p| !p.as_os_str().is_empty()))
}

impl AppConfig {
    /// Get the config file path
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("com", "rna", "RNA Mod Manager")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Load configuration from disk, falling back to defaults if the file is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Malformed config: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// The configured mod folder, if it still exists as a directory
    pub fn valid_mod_folder(&self) -> Option<&Path> {
        self.mod_folder.as_deref().filter(|p| p.is_dir())
    }

    /// Switch to a new mod folder and remember it
    pub fn set_mod_folder(&mut self, path: PathBuf) {
        self.add_recent_folder(path.clone());
        self.mod_folder = Some(path);
    }

    /// Add a folder to recent folders
    pub fn add_recent_folder(&mut self, path: PathBuf) {
        self.recent_folders.retain(|p| p != &path);
        self.recent_folders.insert(0, path);
        self.recent_folders.truncate(MAX_RECENT_FOLDERS);
    }
}
