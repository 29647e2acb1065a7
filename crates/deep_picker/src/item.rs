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

use smallvec::SmallVec;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::scene::{ObjectKind, SceneQuery};

/// Index of an item inside the found set of one pick session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub usize);

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("cannot create a queryable item for {0}: the object is not in the scene")]
    MissingObject(String),
}

/// A pooled wrapper around one scene object that the filters can query.
///
/// The cheap identity fields are filled in by [`QueryableItem::initialize`].
/// Components and labels are only filled in by [`QueryableItem::load`], which
/// the lazy loader calls some time later. Two items are equal when they wrap
/// the same object.
#[derive(Debug)]
pub struct QueryableItem<O, C> {
    object: Option<O>,
    kind: ObjectKind,
    name: String,
    tag: Option<String>,
    layer: Option<String>,
    sibling_index: usize,
    discovery_index: usize,
    loaded: bool,
    components: HashSet<C>,
    /// Lowercase
    component_names: HashSet<String>,
    /// Lowercase
    labels: HashSet<String>,
    parent: Option<ItemId>,
    children: SmallVec<[ItemId; 4]>,
}

impl<O, C> Default for QueryableItem<O, C> {
    fn default() -> Self {
        Self {
            object: None,
            kind: ObjectKind::Unknown,
            name: String::new(),
            tag: None,
            layer: None,
            sibling_index: 0,
            discovery_index: 0,
            loaded: false,
            components: HashSet::new(),
            component_names: HashSet::new(),
            labels: HashSet::new(),
            parent: None,
            children: SmallVec::new(),
        }
    }
}

impl<O, C> QueryableItem<O, C>
where
    O: Copy + Eq + Hash + Debug,
    C: Copy + Eq + Hash + Debug,
{
    /// Bind this wrapper to `object` and cache its identity fields.
    pub fn initialize<S>(&mut self, object: O, scene: &S) -> Result<(), ItemError>
    where
        S: SceneQuery<Object = O, Component = C> + ?Sized,
    {
        if !scene.contains(object) {
            return Err(ItemError::MissingObject(format!("{object:?}")));
        }

        self.object = Some(object);
        self.kind = scene.kind(object);
        self.name.clear();
        self.name.push_str(&scene.name(object));
        self.tag = scene.tag(object);
        self.layer = scene.layer(object);
        self.sibling_index = scene.sibling_index(object);
        Ok(())
    }

    /// Populate the component and label sets. This walks every component of
    /// the object so it is deferred to the lazy loader.
    pub fn load<S>(&mut self, scene: &S)
    where
        S: SceneQuery<Object = O, Component = C> + ?Sized,
    {
        let Some(object) = self.object else {
            return;
        };

        if self.kind == ObjectKind::Entity {
            for record in scene.components(object) {
                self.components.insert(record.id);
                for name in record.type_names {
                    self.component_names.insert(name.to_lowercase());
                }
            }
        }

        for label in scene.labels(object) {
            self.labels.insert(label.to_lowercase());
        }

        self.loaded = true;
    }

    /// Unbind the wrapper so it can go back to the pool. The sets keep their
    /// allocations.
    pub fn free(&mut self) {
        self.object = None;
        self.kind = ObjectKind::Unknown;
        self.name.clear();
        self.tag = None;
        self.layer = None;
        self.sibling_index = 0;
        self.discovery_index = 0;
        self.loaded = false;
        self.components.clear();
        self.component_names.clear();
        self.labels.clear();
        self.parent = None;
        self.children.clear();
    }

    pub fn object(&self) -> Option<O> {
        self.object
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    pub fn sibling_index(&self) -> usize {
        self.sibling_index
    }

    /// Order in which the picker found this item.
    pub fn discovery_index(&self) -> usize {
        self.discovery_index
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn has_component(&self, component: &C) -> bool {
        self.components.contains(component)
    }

    pub fn has_component_named(&self, name: &str) -> bool {
        self.component_names.contains(&name.to_lowercase())
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(&label.to_lowercase())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag
            .as_deref()
            .is_some_and(|t| t.to_lowercase() == tag.to_lowercase())
    }

    pub fn has_layer(&self, layer: &str) -> bool {
        self.layer
            .as_deref()
            .is_some_and(|l| l.to_lowercase() == layer.to_lowercase())
    }

    pub fn name_contains(&self, text: &str) -> bool {
        self.name.to_lowercase().contains(&text.to_lowercase())
    }

    pub(crate) fn set_discovery_index(&mut self, index: usize) {
        self.discovery_index = index;
    }

    /// Returns false if a parent was already set during this session.
    pub(crate) fn set_parent(&mut self, parent: ItemId) -> bool {
        if self.parent.is_some() {
            return false;
        }
        self.parent = Some(parent);
        true
    }

    pub(crate) fn add_child(&mut self, child: ItemId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }
}

impl<O: PartialEq, C> PartialEq for QueryableItem<O, C> {
    fn eq(&self, other: &Self) -> bool {
        self.object == other.object
    }
}

impl<O: Eq, C> Eq for QueryableItem<O, C> {}

impl<O: Hash, C> Hash for QueryableItem<O, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.object.hash(state);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::scene::ComponentRecord;
    use std::collections::HashMap;

    /// A small in-memory scene used across the crate's tests.
    #[derive(Default)]
    pub(crate) struct TestScene {
        pub objects: HashMap<u32, TestObject>,
    }

    #[derive(Default, Clone)]
    pub(crate) struct TestObject {
        pub name: String,
        pub tag: Option<String>,
        pub layer: Option<String>,
        pub parent: Option<u32>,
        pub sibling_index: usize,
        pub components: Vec<(u64, Vec<&'static str>)>,
        pub labels: Vec<String>,
    }

    impl TestScene {
        pub(crate) fn add(&mut self, id: u32, name: &str) -> &mut TestObject {
            self.objects.entry(id).or_insert_with(|| TestObject {
                name: name.to_owned(),
                ..Default::default()
            })
        }
    }

    impl TestObject {
        pub(crate) fn tag(&mut self, tag: &str) -> &mut Self {
            self.tag = Some(tag.to_owned());
            self
        }

        pub(crate) fn layer(&mut self, layer: &str) -> &mut Self {
            self.layer = Some(layer.to_owned());
            self
        }

        pub(crate) fn parent(&mut self, parent: u32) -> &mut Self {
            self.parent = Some(parent);
            self
        }

        pub(crate) fn sibling(&mut self, index: usize) -> &mut Self {
            self.sibling_index = index;
            self
        }

        pub(crate) fn component(&mut self, id: u64, names: Vec<&'static str>) -> &mut Self {
            self.components.push((id, names));
            self
        }

        pub(crate) fn label(&mut self, label: &str) -> &mut Self {
            self.labels.push(label.to_owned());
            self
        }
    }

    impl SceneQuery for TestScene {
        type Object = u32;
        type Component = u64;

        fn contains(&self, object: u32) -> bool {
            self.objects.contains_key(&object)
        }

        fn kind(&self, _object: u32) -> ObjectKind {
            ObjectKind::Entity
        }

        fn name(&self, object: u32) -> String {
            self.objects
                .get(&object)
                .map(|o| o.name.clone())
                .unwrap_or_default()
        }

        fn tag(&self, object: u32) -> Option<String> {
            self.objects.get(&object).and_then(|o| o.tag.clone())
        }

        fn layer(&self, object: u32) -> Option<String> {
            self.objects.get(&object).and_then(|o| o.layer.clone())
        }

        fn parent(&self, object: u32) -> Option<u32> {
            self.objects.get(&object).and_then(|o| o.parent)
        }

        fn sibling_index(&self, object: u32) -> usize {
            self.objects
                .get(&object)
                .map(|o| o.sibling_index)
                .unwrap_or_default()
        }

        fn components(&self, object: u32) -> Vec<ComponentRecord<u64>> {
            self.objects
                .get(&object)
                .map(|o| {
                    o.components
                        .iter()
                        .map(|(id, names)| ComponentRecord::new(*id, names.iter().copied()))
                        .collect()
                })
                .unwrap_or_default()
        }

        fn labels(&self, object: u32) -> Vec<String> {
            self.objects
                .get(&object)
                .map(|o| o.labels.clone())
                .unwrap_or_default()
        }
    }

    fn player_scene() -> TestScene {
        let mut scene = TestScene::default();
        scene
            .add(1, "Player")
            .tag("Player")
            .layer("Characters")
            .component(10, vec!["game::Health", "Health"])
            .component(11, vec!["Collider", "Shape"])
            .label("Hero");
        scene
    }

    #[test]
    fn initialize_caches_identity_only() {
        let scene = player_scene();
        let mut item = QueryableItem::<u32, u64>::default();
        item.initialize(1, &scene).unwrap();

        assert_eq!(item.object(), Some(1));
        assert_eq!(item.name(), "Player");
        assert!(item.has_tag("player"));
        assert!(item.has_layer("CHARACTERS"));
        assert!(!item.is_loaded());
        assert!(!item.has_component_named("Health"));
        assert!(!item.has_label("hero"));
    }

    #[test]
    fn load_populates_case_insensitive_sets() {
        let scene = player_scene();
        let mut item = QueryableItem::<u32, u64>::default();
        item.initialize(1, &scene).unwrap();
        item.load(&scene);

        assert!(item.is_loaded());
        assert!(item.has_component(&10));
        assert!(!item.has_component(&12));
        assert!(item.has_component_named("health"));
        assert!(item.has_component_named("GAME::HEALTH"));
        assert!(item.has_component_named("shape"));
        assert!(item.has_label("HERO"));
        assert!(item.name_contains("lay"));
        assert!(!item.name_contains("enemy"));
    }

    #[test]
    fn initialize_rejects_missing_object() {
        let scene = player_scene();
        let mut item = QueryableItem::<u32, u64>::default();
        let err = item.initialize(99, &scene).unwrap_err();
        assert_eq!(err, ItemError::MissingObject("99".to_owned()));
        assert_eq!(item.object(), None);
    }

    #[test]
    fn free_clears_everything() {
        let scene = player_scene();
        let mut item = QueryableItem::<u32, u64>::default();
        item.initialize(1, &scene).unwrap();
        item.load(&scene);
        assert!(item.set_parent(ItemId(3)));
        item.add_child(ItemId(4));

        item.free();
        assert_eq!(item.object(), None);
        assert_eq!(item.name(), "");
        assert!(item.tag().is_none());
        assert!(!item.has_component(&10));
        assert!(!item.has_label("hero"));
        assert!(item.is_root());
        assert!(item.children().is_empty());
    }

    #[test]
    fn parent_is_set_at_most_once() {
        let mut item = QueryableItem::<u32, u64>::default();
        assert!(item.set_parent(ItemId(1)));
        assert!(!item.set_parent(ItemId(2)));
        assert_eq!(item.parent(), Some(ItemId(1)));
    }

    #[test]
    fn equality_follows_wrapped_object() {
        let scene = player_scene();
        let mut a = QueryableItem::<u32, u64>::default();
        let mut b = QueryableItem::<u32, u64>::default();
        a.initialize(1, &scene).unwrap();
        b.initialize(1, &scene).unwrap();
        b.set_discovery_index(5);
        assert_eq!(a, b);
    }
}
