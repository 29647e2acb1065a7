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

use bevy_ecs::prelude::*;

/// Tag that a `tag:` query compares against.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PickTag(pub String);

impl PickTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

/// Free-form labels that an `l:` query compares against.
#[derive(Component, Debug, Default, Clone, PartialEq, Eq)]
pub struct PickLabels(pub Vec<String>);

impl PickLabels {
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(labels.into_iter().map(Into::into).collect())
    }
}

/// Name of the layer the entity is drawn on, for `lay:` queries.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PickLayer(pub String);

impl PickLayer {
    pub fn new(layer: impl Into<String>) -> Self {
        Self(layer.into())
    }
}
