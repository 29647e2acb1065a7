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

use bevy_derive::{Deref, DerefMut};
use bevy_ecs::{component::ComponentId, prelude::*};
use std::path::PathBuf;

use crate::{
    context::FinderContext,
    picking::{PointPicker, UiRaycaster},
    session::PickSession,
};

/// Settings, item pool and filters shared by every pick.
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct DeepPicker(pub FinderContext<Entity, ComponentId>);

/// The session behind the open popup, if there is one.
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct ActiveDeepPick(pub Option<PickSession<Entity, ComponentId>>);

impl ActiveDeepPick {
    pub fn is_open(&self) -> bool {
        self.0.is_some()
    }
}

/// Where the picking passes get their hits from. The application installs
/// these, e.g. on top of its renderer's picking or its UI layout. A missing
/// backend finds nothing.
#[derive(Resource, Default)]
pub struct PickBackends {
    pub point: Option<Box<dyn PointPicker<Entity> + Send + Sync>>,
    pub ui: Option<Box<dyn UiRaycaster<Entity> + Send + Sync>>,
}

impl PickBackends {
    pub fn with_point(mut self, picker: impl PointPicker<Entity> + Send + Sync + 'static) -> Self {
        self.point = Some(Box::new(picker));
        self
    }

    pub fn with_ui(mut self, raycaster: impl UiRaycaster<Entity> + Send + Sync + 'static) -> Self {
        self.ui = Some(Box::new(raycaster));
        self
    }
}

/// File that [`SaveDeepPickerSettings`](crate::SaveDeepPickerSettings)
/// writes to. [`None`] when the platform has no configuration directory.
#[derive(Resource, Debug, Clone, Default, Deref, DerefMut)]
pub struct DeepPickerSettingsPath(pub Option<PathBuf>);
