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
use bevy_ecs::prelude::*;
use bevy_math::Vec2;

use crate::{item::ItemId, settings::FinderSettings};

/// Pick every object under `point`, replacing any session that is open.
#[derive(Debug, Clone, Copy, Event)]
pub struct DeepPickRequest {
    /// Cursor position in window coordinates.
    pub point: Vec2,
}

/// Sent after a request has been handled and the popup should open.
#[derive(Debug, Clone, Copy, Event)]
pub struct DeepPickOpened {
    pub point: Vec2,
    pub found: usize,
}

/// The search bar text changed.
#[derive(Debug, Clone, Default, Deref, DerefMut, Event)]
pub struct DeepPickQuery(pub String);

/// A row was clicked. The object is pinged and the session closes.
#[derive(Debug, Clone, Copy, Deref, DerefMut, Event)]
pub struct DeepPickChoose(pub ItemId);

/// Show or hide the children of a row.
#[derive(Debug, Clone, Copy, Deref, DerefMut, Event)]
pub struct DeepPickToggle(pub ItemId);

/// Dismiss the popup without choosing anything.
#[derive(Debug, Clone, Copy, Default, Event)]
pub struct DeepPickClose;

/// Ask the application to draw attention to an entity, e.g. by highlighting
/// it in a hierarchy view.
#[derive(Debug, Clone, Copy, Deref, DerefMut, Event)]
pub struct PingObject(pub Entity);

/// Apply new settings and write them to the settings file.
#[derive(Debug, Clone, Deref, DerefMut, Event)]
pub struct SaveDeepPickerSettings(pub FinderSettings);
