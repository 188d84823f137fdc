//! formz Settings System
//!
//! Provides persisted user preferences:
//! - Appearance (light/dark/system theme)
//! - Builder defaults (new form title and description, target SQL dialect)
//! - Export formatting (submission date format)
//!
//! Settings live as pretty-printed JSON in `<config dir>/formz/settings.json`.
//! Every section is `#[serde(default)]`, so files written by older versions
//! (or edited by hand) load with the missing keys defaulted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use formz_core::SqlDialect;

mod settings_file;
mod theme;

pub use settings_file::*;
pub use theme::{ThemeMode, ThemeState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormzSettings {
    pub appearance: AppearanceSettings,
    pub builder: BuilderSettings,
    pub export: ExportSettings,
}

impl FormzSettings {
    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        SettingsStore::default_location()?.load()
    }

    pub fn save(&self) -> Result<()> {
        ensure_directories()?;
        SettingsStore::default_location()?.save(self)
    }

    pub fn settings_path() -> Result<PathBuf> {
        settings_file()
    }
}

/// A settings file at a known path
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn default_location() -> Result<Self> {
        Ok(Self::at(settings_file()?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<FormzSettings> {
        if !self.path.exists() {
            tracing::debug!(path = ?self.path, "no settings file, using defaults");
            return Ok(FormzSettings::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {:?}", self.path))?;
        serde_json::from_str(&content).with_context(|| "Failed to parse settings JSON")
    }

    pub fn save(&self, settings: &FormzSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings to {:?}", self.path))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppearanceSettings {
    pub theme_mode: ThemeModePreference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeModePreference {
    Light,
    Dark,
    /// Follow the operating system
    #[default]
    System,
}

impl ThemeModePreference {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::System, Self::Light, Self::Dark]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderSettings {
    /// Title of a freshly created form
    pub default_title: String,
    pub default_description: String,
    /// Dialect preselected when generating SQL
    pub default_dialect: SqlDialect,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            default_title: "Untitled form".to_string(),
            default_description: String::new(),
            default_dialect: SqlDialect::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// chrono format string of the submission date column
    pub date_format: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SettingsStore::at(dir.path().join("settings.json"));

        let settings = store.load().expect("load defaults");
        assert_eq!(settings, FormzSettings::default());
        assert_eq!(settings.appearance.theme_mode, ThemeModePreference::System);
        assert_eq!(settings.builder.default_dialect, SqlDialect::Postgresql);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SettingsStore::at(dir.path().join("nested").join("settings.json"));

        let mut settings = FormzSettings::default();
        settings.appearance.theme_mode = ThemeModePreference::Dark;
        settings.builder.default_dialect = SqlDialect::Mssql;
        settings.export.date_format = "%d/%m/%Y".to_string();
        store.save(&settings).expect("save settings");

        assert_eq!(store.load().expect("load settings"), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"appearance": {"theme_mode": "light"}}"#).expect("write file");

        let settings = SettingsStore::at(&path).load().expect("load settings");
        assert_eq!(settings.appearance.theme_mode, ThemeModePreference::Light);
        assert_eq!(settings.builder, BuilderSettings::default());
        assert_eq!(settings.export.date_format, "%Y-%m-%d %H:%M:%S");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").expect("write file");

        assert!(SettingsStore::at(&path).load().is_err());
    }
}
