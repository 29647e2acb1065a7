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

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::item::{ItemId, QueryableItem};

/// The duplicate-free, bounded set of items found by one pick.
///
/// Items are stored in discovery order and addressed by [`ItemId`]. No two
/// items wrap the same object.
#[derive(Debug)]
pub struct FoundItems<O, C> {
    items: Vec<QueryableItem<O, C>>,
    by_object: HashMap<O, ItemId>,
    max_items: usize,
}

impl<O, C> FoundItems<O, C>
where
    O: Copy + Eq + Hash + Debug,
    C: Copy + Eq + Hash + Debug,
{
    pub fn new(max_items: usize) -> Self {
        Self {
            items: Vec::with_capacity(max_items),
            by_object: HashMap::with_capacity(max_items),
            max_items,
        }
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_items
    }

    pub fn contains(&self, object: O) -> bool {
        self.by_object.contains_key(&object)
    }

    pub fn id_of(&self, object: O) -> Option<ItemId> {
        self.by_object.get(&object).copied()
    }

    pub fn get(&self, id: ItemId) -> Option<&QueryableItem<O, C>> {
        self.items.get(id.index())
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut QueryableItem<O, C>> {
        self.items.get_mut(id.index())
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = ItemId> + use<O, C> {
        (0..self.items.len()).map(ItemId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &QueryableItem<O, C>)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (ItemId(index), item))
    }

    /// Add an initialized item. The item is handed back when it is not bound
    /// to an object, when its object is already present, or when the set is
    /// full.
    pub fn insert(
        &mut self,
        mut item: QueryableItem<O, C>,
    ) -> Result<ItemId, QueryableItem<O, C>> {
        let Some(object) = item.object() else {
            return Err(item);
        };

        if self.is_full() || self.by_object.contains_key(&object) {
            return Err(item);
        }

        let id = ItemId(self.items.len());
        item.set_discovery_index(id.index());
        self.by_object.insert(object, id);
        self.items.push(item);
        Ok(id)
    }

    /// Remove every item, leaving the set empty.
    pub fn drain(&mut self) -> impl Iterator<Item = QueryableItem<O, C>> + '_ {
        self.by_object.clear();
        self.items.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::tests::TestScene;

    fn item(scene: &TestScene, object: u32) -> QueryableItem<u32, u64> {
        let mut item = QueryableItem::default();
        item.initialize(object, scene).unwrap();
        item
    }

    #[test]
    fn rejects_duplicates_and_overflow() {
        let mut scene = TestScene::default();
        scene.add(1, "a");
        scene.add(2, "b");
        scene.add(3, "c");

        let mut found = FoundItems::new(2);
        assert_eq!(found.insert(item(&scene, 1)).ok(), Some(ItemId(0)));
        assert!(found.insert(item(&scene, 1)).is_err());
        assert_eq!(found.insert(item(&scene, 2)).ok(), Some(ItemId(1)));
        assert!(found.is_full());
        assert!(found.insert(item(&scene, 3)).is_err());

        assert_eq!(found.len(), 2);
        assert_eq!(found.id_of(2), Some(ItemId(1)));
        assert_eq!(found.get(ItemId(1)).map(|i| i.discovery_index()), Some(1));
    }

    #[test]
    fn rejects_unbound_item() {
        let mut found = FoundItems::<u32, u64>::new(4);
        assert!(found.insert(QueryableItem::default()).is_err());
        assert!(found.is_empty());
    }

    #[test]
    fn drain_empties_the_set() {
        let mut scene = TestScene::default();
        scene.add(1, "a");
        let mut found = FoundItems::new(4);
        assert!(found.insert(item(&scene, 1)).is_ok());

        assert_eq!(found.drain().count(), 1);
        assert!(found.is_empty());
        assert!(!found.contains(1));
    }
}
