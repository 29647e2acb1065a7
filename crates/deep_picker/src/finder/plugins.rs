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

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_input::prelude::*;
use std::path::PathBuf;
use tracing::warn;

use crate::{context::FinderContext, finder::*, settings::FinderSettings};

/// Adds alt + right click deep picking to an app.
///
/// Settings are read once when the plugin is built, from
/// [`FinderSettings::default_path`] unless another path is given. The
/// application supplies the actual hit testing through [`PickBackends`].
#[derive(Debug, Clone, Default)]
pub struct DeepPickerPlugin {
    pub settings_path: Option<PathBuf>,
}

impl DeepPickerPlugin {
    pub fn with_settings_path(path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: Some(path.into()),
        }
    }
}

impl Plugin for DeepPickerPlugin {
    fn build(&self, app: &mut App) {
        let path = self
            .settings_path
            .clone()
            .or_else(FinderSettings::default_path);
        let settings = match &path {
            Some(path) => FinderSettings::load_from(path),
            None => {
                warn!("No configuration directory found, deep picker settings will not persist");
                FinderSettings::default()
            }
        };

        app.insert_resource(DeepPicker(FinderContext::new(settings)))
            .insert_resource(DeepPickerSettingsPath(path))
            .init_resource::<ActiveDeepPick>()
            .init_resource::<PickBackends>()
            .add_event::<DeepPickRequest>()
            .add_event::<DeepPickOpened>()
            .add_event::<DeepPickQuery>()
            .add_event::<DeepPickChoose>()
            .add_event::<DeepPickToggle>()
            .add_event::<DeepPickClose>()
            .add_event::<PingObject>()
            .add_event::<SaveDeepPickerSettings>()
            .add_systems(
                Update,
                (
                    request_deep_pick_on_gesture
                        .run_if(resource_exists::<ButtonInput<MouseButton>>)
                        .run_if(resource_exists::<ButtonInput<KeyCode>>),
                    handle_deep_pick_queries,
                    handle_deep_pick_toggles,
                    handle_deep_pick_choices,
                    // Row events from this frame refer to the session that
                    // was open before any new request replaces it.
                    handle_deep_pick_requests,
                    tick_deep_pick,
                    save_deep_picker_settings,
                )
                    .chain(),
            );
    }
}
