use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const SETTINGS_FILE: &str = "settings.json";

/// Persisted user preferences. Absent fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub dark_mode: bool,
    pub use_modified_hotkeys: bool,
    /// Game key -> global accelerator, e.g. `"ArrowUp" -> "W"`.
    pub keymap: BTreeMap<String, String>,
    pub auto_hide_menu: bool,
    pub hide_cursor: bool,
    pub is_offline_mode: bool,
}

/// Reads and writes `settings.json` inside the user data directory.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(user_data_dir: &Path) -> Self {
        Self {
            path: user_data_dir.join(SETTINGS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing, empty or malformed file yields the defaults.
    pub fn load(&self) -> Settings {
        tracing::debug!("Loading settings from {}", self.path.display());

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Settings::default(),
            Err(e) => {
                tracing::warn!("Failed to read settings file, using defaults: {}", e);
                return Settings::default();
            }
        };

        if contents.trim().is_empty() {
            return Settings::default();
        }

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to parse settings, using defaults: {}", e);
                Settings::default()
            }
        }
    }

    /// Overwrites the file with the full record. Last write wins.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        tracing::debug!("Saving settings to {}", self.path.display());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SettingsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn missing_file_loads_defaults() {
        let (_dir, store) = store();
        let settings = store.load();
        assert_eq!(settings, Settings::default());
        assert!(!settings.dark_mode);
        assert!(!settings.hide_cursor);
        assert!(settings.keymap.is_empty());
    }

    #[test]
    fn empty_file_loads_defaults() {
        let (_dir, store) = store();
        fs::write(store.path(), "  \n").unwrap();
        assert_eq!(store.load(), Settings::default());
        assert_eq!(store.load(), store.load());
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let (_dir, store) = store();
        fs::write(store.path(), "{ \"darkMode\": tru").unwrap();
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let (_dir, store) = store();
        let raw = r#"{ "darkMode": true, "keymap": { "Enter": "Z" } }"#;
        fs::write(store.path(), raw).unwrap();

        let settings = store.load();
        assert!(settings.dark_mode);
        assert_eq!(settings.keymap["Enter"], "Z");
        assert!(!settings.use_modified_hotkeys);
        assert!(!settings.is_offline_mode);
    }

    #[test]
    fn saved_settings_load_back() {
        let (_dir, store) = store();
        let keymap = BTreeMap::from([
            ("ArrowUp".to_string(), "W".to_string()),
            ("Space".to_string(), "CommandOrControl+J".to_string()),
        ]);
        let settings = Settings {
            dark_mode: true,
            use_modified_hotkeys: true,
            auto_hide_menu: true,
            hide_cursor: true,
            is_offline_mode: true,
            keymap,
        };

        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let (_dir, store) = store();
        store
            .save(&Settings {
                dark_mode: true,
                ..Settings::default()
            })
            .unwrap();
        store.save(&Settings::default()).unwrap();
        assert!(!store.load().dark_mode);
    }

    #[test]
    fn file_uses_camel_case_keys() {
        let (_dir, store) = store();
        store.save(&Settings::default()).unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"useModifiedHotkeys\""));
        assert!(raw.contains("\"isOfflineMode\""));
    }
}
