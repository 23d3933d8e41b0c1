//! Persisted view settings, stored as JSON in the OS config directory.

use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::BandStyle;
use crate::model::{ViewMode, WeekViewport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub start_hour: u32,
    pub end_hour: u32,
    pub pixels_per_minute: f32,
    pub view_mode: ViewMode,
    #[serde(with = "crate::model::hex_color")]
    pub pause_fill: Color32,
    pub pause_rounding: f32,
    pub week_starts_monday: bool,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 22,
            pixels_per_minute: 1.0,
            view_mode: ViewMode::Week,
            pause_fill: Color32::from_rgba_unmultiplied(140, 140, 160, 50),
            pause_rounding: 0.0,
            week_starts_monday: true,
        }
    }
}

impl CalendarSettings {
    /// Copy the view-related settings onto a viewport, falling back to the
    /// full day when the stored hours are unusable.
    pub fn apply_to(&self, viewport: &mut WeekViewport) {
        if self.start_hour < self.end_hour && self.end_hour <= 24 {
            viewport.start_hour = self.start_hour;
            viewport.end_hour = self.end_hour;
        } else {
            tracing::warn!(
                start_hour = self.start_hour,
                end_hour = self.end_hour,
                "ignoring invalid hour range in settings"
            );
            viewport.start_hour = 0;
            viewport.end_hour = 24;
        }
        if self.pixels_per_minute.is_finite() && self.pixels_per_minute > 0.0 {
            viewport.pixels_per_minute = self.pixels_per_minute;
        }
        viewport.week_starts_monday = self.week_starts_monday;
        viewport.set_mode(self.view_mode);
    }

    /// Capture the current viewport state.
    pub fn capture(&mut self, viewport: &WeekViewport) {
        self.start_hour = viewport.start_hour;
        self.end_hour = viewport.end_hour;
        self.pixels_per_minute = viewport.pixels_per_minute;
        self.view_mode = viewport.mode;
        self.week_starts_monday = viewport.week_starts_monday;
    }

    pub fn band_style(&self) -> BandStyle {
        BandStyle {
            fill: self.pause_fill,
            rounding: self.pause_rounding,
        }
    }
}

/// Loads and saves [`CalendarSettings`] at a fixed path.
pub struct SettingsStore {
    pub settings: CalendarSettings,
    path: PathBuf,
}

impl SettingsStore {
    /// Open the store in the platform config directory.
    pub fn open_default() -> Self {
        Self::open(Self::default_path())
    }

    /// Open the store at `path`. A missing or unreadable file yields defaults.
    pub fn open(path: PathBuf) -> Self {
        let settings = Self::load(&path);
        Self { settings, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config_dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }

    pub fn save(&self) -> Result<()> {
        std::fs::create_dir_all(self.config_dir())?;
        let json = serde_json::to_string_pretty(&self.settings)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    fn default_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "RustWeekCalendar") {
            proj_dirs.config_dir().join("settings.json")
        } else {
            PathBuf::from(".").join("settings.json")
        }
    }

    fn load(path: &Path) -> CalendarSettings {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no settings file, using defaults");
                return CalendarSettings::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to parse settings, using defaults");
                CalendarSettings::default()
            }
        }
    }
}
