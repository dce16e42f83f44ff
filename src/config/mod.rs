use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod shortcuts;

pub use shortcuts::{ShortcutMap, ShortcutStore, DEFAULT_SHORTCUTS_FILE};

const SETTINGS_FILE: &str = "settings.toml";

/// Application settings persisted as TOML next to the shortcuts file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Overrides the default `shortcuts.json` location
    pub shortcuts_file: Option<PathBuf>,
    pub start_enabled: bool,
    pub high_priority: bool,
    pub log_filter: String,
    pub log_to_file: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shortcuts_file: None,
            start_enabled: true,
            high_priority: true,
            log_filter: "keytask=info".to_string(),
            log_to_file: true,
        }
    }
}

impl Settings {
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&Self::config_path()?)
    }

    pub fn load_or_create_at(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read settings from {:?}", config_path))?;
            let settings: Settings =
                toml::from_str(&content).with_context(|| "Failed to parse settings file")?;
            Ok(settings)
        } else {
            let settings = Self::default();
            settings.save_to(config_path)?;
            Ok(settings)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if needed
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write settings to {:?}", config_path))?;

        Ok(())
    }

    /// Resolved shortcuts file: explicit setting, else the per-user config dir,
    /// else the working directory.
    pub fn shortcuts_path(&self) -> PathBuf {
        if let Some(path) = &self.shortcuts_file {
            return path.clone();
        }
        project_dirs()
            .map(|dirs| dirs.config_dir().join(DEFAULT_SHORTCUTS_FILE))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SHORTCUTS_FILE))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join(SETTINGS_FILE))
    }

    pub fn logs_dir() -> Result<PathBuf> {
        let logs_dir = project_dirs()?.data_dir().join("logs");
        std::fs::create_dir_all(&logs_dir)?;
        Ok(logs_dir)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "keytask", "keytask").context("Failed to determine config directory")
}
