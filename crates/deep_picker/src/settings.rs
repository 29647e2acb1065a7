/*
 * Copyright (C) 2026 Open Source Robotics Foundation
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
*/

use bevy_color::Color;
use bevy_math::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::{filter::SortOrder, loader::DEFAULT_LOAD_BUDGET, picking::DuplicatePolicy};

pub const DEFAULT_MAX_SHOWABLE_ITEM_COUNT: usize = 50;

/// User preferences for the deep picker popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderSettings {
    pub window_size: Vec2,
    /// Upper bound on how many objects one pick can find.
    pub max_showable_item_count: usize,
    pub header_background_color: Color,
    pub header_text_color: Color,
    pub searchbar_text_color: Color,
    pub body_background_color: Color,
    pub row_background_color: Color,
    pub outline_color: Color,
    pub row_hover_color: Color,
    pub row_selected_color: Color,
    pub row_text_color: Color,
    /// How long the lazy loader may run in a single tick.
    pub load_budget_millis: f64,
    pub duplicate_policy: DuplicatePolicy,
    pub sort_order: SortOrder,
}

impl Default for FinderSettings {
    fn default() -> Self {
        Self {
            window_size: Vec2::new(250.0, 250.0),
            max_showable_item_count: DEFAULT_MAX_SHOWABLE_ITEM_COUNT,
            header_background_color: Color::srgba(0.16, 0.16, 0.16, 1.0),
            header_text_color: Color::WHITE,
            searchbar_text_color: Color::WHITE,
            body_background_color: Color::srgba(0.26, 0.26, 0.26, 1.0),
            row_background_color: Color::srgba(0.22, 0.22, 0.22, 1.0),
            outline_color: Color::WHITE,
            row_hover_color: Color::srgba(0.26, 0.26, 0.26, 1.0),
            row_selected_color: Color::srgba(0.24, 0.48, 0.90, 1.0),
            row_text_color: Color::WHITE,
            load_budget_millis: DEFAULT_LOAD_BUDGET.as_secs_f64() * 1000.0,
            duplicate_policy: DuplicatePolicy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to access the settings file: {0}")]
    Io(#[from] io::Error),
    #[error("unable to parse the settings: {0}")]
    Json(#[from] serde_json::Error),
}

impl FinderSettings {
    /// `<config dir>/deep_picker/settings.json` for the current user.
    pub fn default_path() -> Option<PathBuf> {
        let mut p = dirs::config_dir()?;
        p.push("deep_picker");
        p.push("settings.json");
        Some(p)
    }

    /// The loader budget as a duration. Negative or non-finite values fall
    /// back to the default budget.
    pub fn load_budget(&self) -> Duration {
        Duration::try_from_secs_f64(self.load_budget_millis / 1000.0).unwrap_or(DEFAULT_LOAD_BUDGET)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, SettingsError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from `path`. Returns `Ok(None)` when there is no file.
    pub fn try_load_from(path: &Path) -> Result<Option<Self>, SettingsError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Self::from_json(&bytes).map(Some)
    }

    /// Read settings from `path`, falling back to the defaults when the file is
    /// missing or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(err) => {
                warn!(
                    "Using default deep picker settings because {} could not be loaded: {err}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty JSON, creating its directory if
    /// needed.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use testdir::testdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = testdir!();
        let path = dir.join("settings.json");
        assert!(FinderSettings::try_load_from(&path).unwrap().is_none());
        assert_eq!(FinderSettings::load_from(&path), FinderSettings::default());
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = testdir!();
        let path = dir.join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            FinderSettings::try_load_from(&path),
            Err(SettingsError::Json(_))
        ));
        assert_eq!(FinderSettings::load_from(&path), FinderSettings::default());
    }

    #[test]
    fn save_creates_directory_and_loads_back() {
        let dir = testdir!();
        let path = dir.join("nested").join("settings.json");
        let settings = FinderSettings {
            window_size: Vec2::new(400.0, 300.0),
            max_showable_item_count: 12,
            row_text_color: Color::BLACK,
            duplicate_policy: DuplicatePolicy::Skip,
            sort_order: SortOrder::SiblingIndex,
            ..Default::default()
        };

        settings.save_to(&path).unwrap();
        assert_eq!(FinderSettings::load_from(&path), settings);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = FinderSettings::from_json(br#"{ "max_showable_item_count": 7 }"#).unwrap();
        assert_eq!(settings.max_showable_item_count, 7);
        assert_eq!(settings.window_size, FinderSettings::default().window_size);
        assert_eq!(settings.duplicate_policy, DuplicatePolicy::Stop);
    }

    #[test]
    fn load_budget_conversion() {
        let settings = FinderSettings::default();
        assert_eq!(settings.load_budget(), Duration::from_millis(5));

        let settings = FinderSettings {
            load_budget_millis: 2.5,
            ..Default::default()
        };
        assert_float_eq!(settings.load_budget().as_secs_f64(), 0.0025, abs <= 1e-9);

        let settings = FinderSettings {
            load_budget_millis: -1.0,
            ..Default::default()
        };
        assert_eq!(settings.load_budget(), DEFAULT_LOAD_BUDGET);
    }
}
