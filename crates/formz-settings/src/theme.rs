//! Theme preference resolution
//!
//! The stored preference may be `System`; the host reports whether the OS
//! prefers dark, and `ThemeState` resolves the mode actually shown.

use anyhow::Result;

use crate::{FormzSettings, SettingsStore, ThemeModePreference};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    preference: ThemeModePreference,
    os_prefers_dark: bool,
}

impl ThemeState {
    /// Resolve the startup theme from saved settings and the OS hint
    pub fn init(settings: &FormzSettings, os_prefers_dark: bool) -> Self {
        Self {
            preference: settings.appearance.theme_mode,
            os_prefers_dark,
        }
    }

    pub fn preference(&self) -> ThemeModePreference {
        self.preference
    }

    pub fn mode(&self) -> ThemeMode {
        match self.preference {
            ThemeModePreference::Light => ThemeMode::Light,
            ThemeModePreference::Dark => ThemeMode::Dark,
            ThemeModePreference::System if self.os_prefers_dark => ThemeMode::Dark,
            ThemeModePreference::System => ThemeMode::Light,
        }
    }

    /// The OS switched between light and dark
    pub fn os_changed(&mut self, os_prefers_dark: bool) -> ThemeMode {
        self.os_prefers_dark = os_prefers_dark;
        self.mode()
    }

    /// Apply a new preference and persist it
    pub fn set(
        &mut self,
        preference: ThemeModePreference,
        settings: &mut FormzSettings,
        store: &SettingsStore,
    ) -> Result<ThemeMode> {
        self.preference = preference;
        settings.appearance.theme_mode = preference;
        store.save(settings)?;

        tracing::info!(preference = preference.display_name(), "theme preference changed");
        Ok(self.mode())
    }

    /// Flip between explicit light and dark, leaving `System` behind
    pub fn toggle(&mut self, settings: &mut FormzSettings, store: &SettingsStore) -> Result<ThemeMode> {
        let next = if self.mode().is_dark() {
            ThemeModePreference::Light
        } else {
            ThemeModePreference::Dark
        };
        self.set(next, settings, store)
    }
}
