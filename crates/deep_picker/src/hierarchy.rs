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

use crate::{found::FoundItems, item::ItemId, scene::SceneQuery};

/// Link every found item to its immediate parent when that parent was also
/// found, and return the roots in discovery order.
///
/// Only one level is inspected. If an item's parent was not picked but its
/// grandparent was, the item is still a root.
pub fn build_hierarchy<S>(scene: &S, found: &mut FoundItems<S::Object, S::Component>) -> Vec<ItemId>
where
    S: SceneQuery + ?Sized,
{
    let mut by_object = HashMap::with_capacity(found.len());
    for (id, item) in found.iter() {
        if let Some(object) = item.object() {
            by_object.entry(object).or_insert(id);
        }
    }

    let links: Vec<(ItemId, ItemId)> = found
        .iter()
        .filter_map(|(id, item)| {
            let parent = scene.parent(item.object()?)?;
            let parent_id = *by_object.get(&parent)?;
            (parent_id != id).then_some((id, parent_id))
        })
        .collect();

    for (child, parent) in links {
        let linked = found
            .get_mut(child)
            .is_some_and(|item| item.set_parent(parent));
        if linked {
            if let Some(parent) = found.get_mut(parent) {
                parent.add_child(child);
            }
        }
    }

    found
        .iter()
        .filter(|(_, item)| item.is_root())
        .map(|(id, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{QueryableItem, tests::TestScene};

    fn found(scene: &TestScene, objects: &[u32]) -> FoundItems<u32, u64> {
        let mut found = FoundItems::new(objects.len());
        for object in objects {
            let mut item = QueryableItem::default();
            item.initialize(*object, scene).unwrap();
            assert!(found.insert(item).is_ok());
        }
        found
    }

    /// 1 -> 2 -> 3 -> 4, plus 5 -> 1
    fn chain() -> TestScene {
        let mut scene = TestScene::default();
        scene.add(1, "root");
        scene.add(2, "child").parent(1);
        scene.add(3, "grandchild").parent(2);
        scene.add(4, "great grandchild").parent(3);
        scene.add(5, "sibling").parent(1);
        scene
    }

    #[test]
    fn links_direct_parents_only() {
        let scene = chain();
        let mut found = found(&scene, &[4, 1, 3, 5]);
        let roots = build_hierarchy(&scene, &mut found);

        let id = |object| found.id_of(object).unwrap();
        let item = |object| found.get(id(object)).unwrap();

        // 3's parent 2 was not picked, so 3 is a root even though 1 was.
        assert_eq!(roots, vec![id(1), id(3)]);
        assert_eq!(item(4).parent(), Some(id(3)));
        assert_eq!(item(5).parent(), Some(id(1)));
        assert!(item(3).is_root());
        assert_eq!(item(1).children(), &[id(5)]);
        assert_eq!(item(3).children(), &[id(4)]);
    }

    #[test]
    fn parent_link_iff_parent_found() {
        let scene = chain();
        let mut found = found(&scene, &[1, 2, 3, 4, 5]);
        build_hierarchy(&scene, &mut found);

        for (_, item) in found.iter() {
            let object = item.object().unwrap();
            let expected = scene.parent(object).and_then(|p| found.id_of(p));
            assert_eq!(item.parent(), expected);
        }
    }

    #[test]
    fn unrelated_items_are_all_roots() {
        let mut scene = TestScene::default();
        scene.add(1, "a");
        scene.add(2, "b");
        let mut found = found(&scene, &[2, 1]);
        let roots = build_hierarchy(&scene, &mut found);
        assert_eq!(roots, vec![ItemId(0), ItemId(1)]);
    }
}
