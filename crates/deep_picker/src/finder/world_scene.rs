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

use bevy_ecs::{component::ComponentId, prelude::*};

use crate::{
    finder::{PickLabels, PickLayer, PickTag},
    scene::{ComponentRecord, ObjectKind, SceneQuery, short_type_name},
};

/// Read-only view of a [`World`] for the picker.
///
/// Names come from [`Name`], parents from [`ChildOf`] and sibling order from
/// the parent's [`Children`]. Tags, labels and layers are opted into with
/// [`PickTag`], [`PickLabels`] and [`PickLayer`].
#[derive(Clone, Copy)]
pub struct WorldScene<'w> {
    world: &'w World,
}

impl<'w> WorldScene<'w> {
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }
}

impl SceneQuery for WorldScene<'_> {
    type Object = Entity;
    type Component = ComponentId;

    fn contains(&self, object: Entity) -> bool {
        self.world.get_entity(object).is_ok()
    }

    fn kind(&self, _object: Entity) -> ObjectKind {
        ObjectKind::Entity
    }

    fn name(&self, object: Entity) -> String {
        match self.world.get::<Name>(object) {
            Some(name) => name.as_str().to_owned(),
            None => format!("Entity {object}"),
        }
    }

    fn tag(&self, object: Entity) -> Option<String> {
        self.world.get::<PickTag>(object).map(|tag| tag.0.clone())
    }

    fn layer(&self, object: Entity) -> Option<String> {
        self.world.get::<PickLayer>(object).map(|layer| layer.0.clone())
    }

    fn parent(&self, object: Entity) -> Option<Entity> {
        self.world
            .get::<ChildOf>(object)
            .map(|child_of| child_of.parent())
    }

    fn sibling_index(&self, object: Entity) -> usize {
        let Some(parent) = self.parent(object) else {
            return 0;
        };
        let Some(children) = self.world.get::<Children>(parent) else {
            return 0;
        };
        let siblings: &[Entity] = children;
        siblings
            .iter()
            .position(|sibling| *sibling == object)
            .unwrap_or(0)
    }

    fn components(&self, object: Entity) -> Vec<ComponentRecord<ComponentId>> {
        let Ok(infos) = self.world.inspect_entity(object) else {
            return Vec::new();
        };

        infos
            .map(|info| {
                let full = info.name();
                let short = short_type_name(full);
                if short == full {
                    ComponentRecord::new(info.id(), [full])
                } else {
                    ComponentRecord::new(info.id(), [full, short])
                }
            })
            .collect()
    }

    fn labels(&self, object: Entity) -> Vec<String> {
        self.world
            .get::<PickLabels>(object)
            .map(|labels| labels.0.clone())
            .unwrap_or_default()
    }
}
