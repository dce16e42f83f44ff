use indexmap::IndexMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Result;

pub const DEFAULT_SHORTCUTS_FILE: &str = "shortcuts.json";

/// Hotkey descriptor -> shell command, in insertion order.
pub type ShortcutMap = IndexMap<String, String>;

/// The JSON file holding the shortcut mapping.
#[derive(Debug, Clone)]
pub struct ShortcutStore {
    path: PathBuf,
}

impl ShortcutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the mapping. Any failure yields an empty mapping.
    pub fn load(&self) -> ShortcutMap {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no shortcuts file at {:?}, starting empty", self.path);
                return ShortcutMap::new();
            }
            Err(e) => {
                warn!("failed to read shortcuts from {:?}: {}", self.path, e);
                return ShortcutMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!("ignoring invalid shortcuts file {:?}: {}", self.path, e);
                ShortcutMap::new()
            }
        }
    }

    /// Overwrites the file with the full mapping.
    pub fn save(&self, shortcuts: &ShortcutMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(shortcuts)?;
        std::fs::write(&self.path, content)?;
        debug!("saved {} shortcuts to {:?}", shortcuts.len(), self.path);

        Ok(())
    }
}
