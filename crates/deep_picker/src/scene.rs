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

use std::fmt::Debug;
use std::hash::Hash;

/// Broad category of a scene object. Only [`ObjectKind::Entity`] objects have
/// their components walked when an item is loaded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    #[default]
    Unknown,
    Entity,
    Component,
    Material,
    Texture,
    Animation,
    Audio,
    Mesh,
    Asset,
    Shader,
}

/// One component attached to a scene object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRecord<C> {
    /// Identity of this component instance.
    pub id: C,
    /// Every name this component type should be searchable by, most specific
    /// first. Lookups are case-insensitive.
    pub type_names: Vec<String>,
}

impl<C> ComponentRecord<C> {
    pub fn new(id: C, type_names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id,
            type_names: type_names.into_iter().map(Into::into).collect(),
        }
    }
}

/// Read access to the live scene that picked objects belong to.
///
/// The picker and the hierarchy builder never hold on to anything they get
/// from here beyond the copyable [`SceneQuery::Object`] handles, so an
/// implementation can borrow whatever world or document it wraps.
pub trait SceneQuery {
    /// Handle of a scene object. Two handles compare equal exactly when they
    /// refer to the same object.
    type Object: Copy + Eq + Hash + Debug;
    /// Identity of a component instance.
    type Component: Copy + Eq + Hash + Debug;

    /// Whether the object still exists in the scene.
    fn contains(&self, object: Self::Object) -> bool;

    fn kind(&self, object: Self::Object) -> ObjectKind;

    fn name(&self, object: Self::Object) -> String;

    fn tag(&self, object: Self::Object) -> Option<String>;

    fn layer(&self, _object: Self::Object) -> Option<String> {
        None
    }

    /// The immediate transform parent of the object, if it has one.
    fn parent(&self, object: Self::Object) -> Option<Self::Object>;

    /// Position of the object among the children of its parent.
    fn sibling_index(&self, _object: Self::Object) -> usize {
        0
    }

    fn components(&self, object: Self::Object) -> Vec<ComponentRecord<Self::Component>>;

    fn labels(&self, object: Self::Object) -> Vec<String>;
}

/// Strip the module path and generic arguments from a fully qualified type
/// name, e.g. `bevy_ecs::name::Name` becomes `Name`.
pub fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
