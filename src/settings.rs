use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::remote::DEFAULT_TODOS_URL;
use crate::shared::paths::{ensure_dir, get_storage_dir};

/// Launch flags and remote configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub onboarding_checked: bool,
    #[serde(default, rename = "firstLaunch", alias = "firstLaunchChecked")]
    pub first_launch_checked: bool,
    #[serde(default = "default_remote_url")]
    pub remote_url: String,
}

fn default_remote_url() -> String {
    DEFAULT_TODOS_URL.to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            onboarding_checked: false,
            first_launch_checked: false,
            remote_url: default_remote_url(),
        }
    }
}

impl AppSettings {
    pub fn needs_onboarding(&self) -> bool {
        !self.onboarding_checked
    }

    pub fn is_first_launch(&self) -> bool {
        !self.first_launch_checked
    }

    pub fn mark_onboarding_checked(&mut self) {
        self.onboarding_checked = true;
    }

    pub fn mark_first_launch_checked(&mut self) {
        self.first_launch_checked = true;
    }

    /// Clear both launch flags. The remote URL is kept.
    pub fn reset(&mut self) {
        self.onboarding_checked = false;
        self.first_launch_checked = false;
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Get the path to the settings file
pub fn get_settings_path() -> PathBuf {
    get_storage_dir().join("settings.json")
}

/// Load settings from the default path
pub fn load_settings() -> AppSettings {
    load_settings_from(&get_settings_path())
}

/// Load settings from `path`, returning defaults if the file is missing or invalid
pub fn load_settings_from(path: &Path) -> AppSettings {
    if !path.exists() {
        tracing::info!(target: "system", "Settings file not found, using defaults");
        return AppSettings::default();
    }

    match load_settings_from_file(path) {
        Ok(settings) => {
            tracing::debug!(target: "system", "Settings loaded from {:?}", path);
            settings
        }
        Err(e) => {
            tracing::warn!(target: "system", "Failed to load settings: {}, using defaults", e);
            AppSettings::default()
        }
    }
}

fn load_settings_from_file(path: &Path) -> Result<AppSettings, SettingsError> {
    let contents = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&contents)?;
    Ok(settings)
}

/// Save settings to the default path
pub fn save_settings(settings: &AppSettings) -> Result<(), SettingsError> {
    save_settings_to(&get_settings_path(), settings)
}

pub fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let contents = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, contents)?;

    tracing::debug!(target: "system", "Settings saved to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mean_first_launch_with_onboarding() {
        let settings = AppSettings::default();
        assert!(settings.needs_onboarding());
        assert!(settings.is_first_launch());
        assert_eq!(settings.remote_url, DEFAULT_TODOS_URL);
    }

    #[test]
    fn test_marks_and_reset() {
        let mut settings = AppSettings::default();
        settings.mark_onboarding_checked();
        settings.mark_first_launch_checked();
        assert!(!settings.needs_onboarding());
        assert!(!settings.is_first_launch());

        settings.remote_url = "http://localhost:9/todos".to_string();
        settings.reset();
        assert!(settings.needs_onboarding());
        assert!(settings.is_first_launch());
        assert_eq!(settings.remote_url, "http://localhost:9/todos");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&tmp.path().join("settings.json"));
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_invalid_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_settings_from(&path), AppSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("settings.json");

        let mut settings = AppSettings::default();
        settings.mark_first_launch_checked();
        save_settings_to(&path, &settings).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"firstLaunch\": true"));

        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, r#"{"onboardingChecked": true}"#).unwrap();

        let settings = load_settings_from(&path);
        assert!(!settings.needs_onboarding());
        assert!(settings.is_first_launch());
        assert_eq!(settings.remote_url, DEFAULT_TODOS_URL);
    }

    #[test]
    fn test_first_launch_key_and_legacy_alias() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");

        std::fs::write(&path, r#"{"firstLaunch": true}"#).unwrap();
        assert!(!load_settings_from(&path).is_first_launch());

        std::fs::write(&path, r#"{"firstLaunchChecked": true}"#).unwrap();
        assert!(!load_settings_from(&path).is_first_launch());
    }
}
