//! Persisted user preferences.
//!
//! Preferences are stored as JSON in the user's config directory
//! (e.g., `~/.config/snipgrab/preferences.json` on Linux). The core only
//! reads them at session start; writing is the launcher UI's job, but the
//! store supports it for that UI to use.

use crate::error::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_auto_copy() -> bool {
    true
}

/// User-configurable preferences persisted between sessions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Copy automatically when a draw-ending mouseup leaves a valid
    /// selection, without waiting for an explicit confirm.
    #[serde(rename = "autoCopyOnMouseup", default = "default_auto_copy")]
    pub auto_copy_on_mouseup: bool,
}

impl Preferences {
    /// Returns the path to the preferences file.
    ///
    /// Creates the config directory if it doesn't exist.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "snipgrab").map(|dirs| {
            let config_dir = dirs.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            config_dir.join("preferences.json")
        })
    }

    /// Loads preferences from disk, falling back to defaults if not found.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Persists preferences to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            let json = serde_json::to_string_pretty(self)?;
            fs::write(path, json)?;
        }
        Ok(())
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_copy_on_mouseup: true,
        }
    }
}
