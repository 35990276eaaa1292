//! Player settings persistence
//!
//! Quick spin, handedness, audio toggles and volume, stored as one small
//! JSON document. Field names match the historical storage key so existing
//! saves keep working. A malformed or missing file yields defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Storage key; also the file stem on disk.
pub const SETTINGS_KEY: &str = "slotmachine_settings";

/// Persisted player settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerSettings {
    /// Halve all spin delays
    pub quick_spin: bool,
    /// Mirror the HUD controls to the right edge
    pub right_hand: bool,
    /// Background music on/off
    pub music: bool,
    /// Effect sounds on/off
    pub sound: bool,
    /// Master volume, 0.0 ..= 1.0
    pub volume: f64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            quick_spin: false,
            right_hand: true,
            music: true,
            sound: true,
            volume: 1.0,
        }
    }
}

impl PlayerSettings {
    /// Clamp out-of-range values loaded from disk.
    fn sanitized(mut self) -> Self {
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }
}

/// File-backed settings store.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at the platform config location.
    pub fn at_default_path() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("chipy").join(format!("{SETTINGS_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; any failure falls back to defaults.
    pub fn load_or_default(&self) -> PlayerSettings {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<PlayerSettings>(&content) {
                Ok(settings) => settings.sanitized(),
                Err(err) => {
                    log::warn!("settings file unreadable, using defaults: {err}");
                    PlayerSettings::default()
                }
            },
            Err(_) => PlayerSettings::default(),
        }
    }

    /// Write settings, creating the parent directory when needed.
    pub fn save(&self, settings: &PlayerSettings) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

/// Settings modal state. Every toggle writes through to the store so a
/// crash never loses a change.
#[derive(Debug)]
pub struct SettingsPanel {
    settings: PlayerSettings,
    store: SettingsStore,
}

impl SettingsPanel {
    pub fn new(store: SettingsStore) -> Self {
        let settings = store.load_or_default();
        Self { settings, store }
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn toggle_quick_spin(&mut self) -> bool {
        self.settings.quick_spin = !self.settings.quick_spin;
        self.persist();
        self.settings.quick_spin
    }

    pub fn toggle_right_hand(&mut self) -> bool {
        self.settings.right_hand = !self.settings.right_hand;
        self.persist();
        self.settings.right_hand
    }

    pub fn toggle_music(&mut self) -> bool {
        self.settings.music = !self.settings.music;
        self.persist();
        self.settings.music
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.settings.sound = !self.settings.sound;
        self.persist();
        self.settings.sound
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.settings.volume = volume.clamp(0.0, 1.0);
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.settings) {
            log::warn!("failed to save settings: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = PlayerSettings::default();
        assert!(!settings.quick_spin);
        assert!(settings.right_hand);
        assert!(settings.music);
        assert_eq!(settings.volume, 1.0);
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = r#"{"quickSpin": true, "rightHand": false, "volume": 0.5}"#;
        let settings: PlayerSettings = serde_json::from_str(json).unwrap();
        assert!(settings.quick_spin);
        assert!(!settings.right_hand);
        // Unlisted fields take defaults
        assert!(settings.music);
        assert_eq!(settings.volume, 0.5);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));

        let mut settings = PlayerSettings::default();
        settings.quick_spin = true;
        settings.volume = 0.3;
        store.save(&settings).unwrap();

        assert_eq!(store.load_or_default(), settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load_or_default(), PlayerSettings::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(
            SettingsStore::new(&path).load_or_default(),
            PlayerSettings::default()
        );
    }

    #[test]
    fn test_panel_writes_through_on_toggle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut panel = SettingsPanel::new(SettingsStore::new(&path));
        assert!(panel.toggle_quick_spin());
        panel.set_volume(2.0);

        // A fresh store sees the persisted state
        let reloaded = SettingsStore::new(&path).load_or_default();
        assert!(reloaded.quick_spin);
        assert_eq!(reloaded.volume, 1.0);
    }

    #[test]
    fn test_out_of_range_volume_is_clamped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"volume": 7.5}"#).unwrap();
        let settings = SettingsStore::new(&path).load_or_default();
        assert_eq!(settings.volume, 1.0);
    }
}
