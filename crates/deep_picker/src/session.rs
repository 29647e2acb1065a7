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

use bevy_math::Vec2;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

use crate::{
    context::{FinderContext, ItemPool},
    filter::{FilterChain, SortOrder},
    found::FoundItems,
    hierarchy::build_hierarchy,
    item::{ItemId, QueryableItem},
    loader::LazyLoader,
    picking::{PointPicker, UiRaycaster},
    scene::SceneQuery,
};

/// One row of the popup list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeRow {
    pub item: ItemId,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// State of one pick gesture, from the click until the popup closes.
#[derive(Debug)]
pub struct PickSession<O, C> {
    point: Vec2,
    found: FoundItems<O, C>,
    roots: Vec<ItemId>,
    /// Every item, in sort order.
    ordered: Vec<ItemId>,
    /// Position of each item in `ordered`, indexed by item.
    rank: Vec<usize>,
    order: SortOrder,
    query: String,
    filtered: Vec<ItemId>,
    expanded: HashSet<ItemId>,
    loader: LazyLoader<ItemId>,
}

impl<O, C> PickSession<O, C>
where
    O: Copy + Eq + Hash + Debug,
    C: Copy + Eq + Hash + Debug,
{
    /// Pick everything under `point`, link the hierarchy and start loading the
    /// item details in the background.
    pub fn begin<S, P, U>(
        context: &FinderContext<O, C>,
        scene: &S,
        point_picker: &mut P,
        ui_raycaster: &mut U,
        point: Vec2,
    ) -> Self
    where
        S: SceneQuery<Object = O, Component = C> + ?Sized,
        P: PointPicker<O> + ?Sized,
        U: UiRaycaster<O> + ?Sized,
    {
        let settings = context.settings();
        let picker = context.picker();
        let mut found = FoundItems::new(picker.max_items);
        let mut ignore = Vec::with_capacity(picker.max_items);

        let from_point = picker.pick_point(
            point,
            scene,
            point_picker,
            context.pool(),
            &mut found,
            &mut ignore,
        );
        let from_ui = picker.pick_ui(point, scene, ui_raycaster, context.pool(), &mut found);
        debug!(
            "deep pick at {point}: {from_point} objects from the scene, {from_ui} from the UI"
        );

        let roots = build_hierarchy(scene, &mut found);
        let expanded = found
            .iter()
            .filter(|(_, item)| !item.children().is_empty())
            .map(|(id, _)| id)
            .collect();

        let mut loader = LazyLoader::new();
        loader.initialize(found.ids(), settings.load_budget());

        let mut session = Self {
            point,
            found,
            roots,
            ordered: Vec::new(),
            rank: Vec::new(),
            order: settings.sort_order,
            query: String::new(),
            filtered: Vec::new(),
            expanded,
            loader,
        };
        session.reorder(settings.sort_order);
        session
    }

    /// Load item details until the loader's budget runs out. Returns true
    /// while there is still work left.
    ///
    /// When the last item finishes loading, an active query is evaluated again
    /// so that component and label filters see the complete data.
    pub fn tick<S>(&mut self, scene: &S, filters: &FilterChain) -> bool
    where
        S: SceneQuery<Object = O, Component = C> + ?Sized,
    {
        let was_processing = self.loader.is_processing();
        let found = &mut self.found;
        self.loader.tick(|id| {
            if let Some(item) = found.get_mut(id) {
                item.load(scene);
            }
        });

        let processing = self.loader.is_processing();
        if was_processing && !processing && !self.query.trim().is_empty() {
            self.refilter(filters);
        }
        processing
    }

    /// Update the search text. Returns false if the text did not change.
    pub fn set_query(&mut self, query: &str, filters: &FilterChain) -> bool {
        if self.query == query {
            return false;
        }
        self.query.clear();
        self.query.push_str(query);
        self.refilter(filters);
        true
    }

    /// Change the order of both the full and the filtered lists.
    pub fn reorder(&mut self, order: SortOrder) {
        self.order = order;
        self.ordered = self.found.ids().collect();
        order.sort(&mut self.ordered, &self.found);

        self.rank = vec![0; self.found.len()];
        for (position, id) in self.ordered.iter().enumerate() {
            self.rank[id.index()] = position;
        }

        if self.is_filtering() {
            self.sort_by_rank_filtered();
        } else {
            self.filtered = self.ordered.clone();
        }
    }

    /// Cancel any pending loads and hand every wrapper back to the pool.
    pub fn close(mut self, pool: &ItemPool<O, C>) {
        self.loader.cancel();
        for mut item in self.found.drain() {
            item.free();
            pool.give_back(item);
        }
    }

    pub fn point(&self) -> Vec2 {
        self.point
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn is_filtering(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn items(&self) -> &FoundItems<O, C> {
        &self.found
    }

    pub fn item(&self, id: ItemId) -> Option<&QueryableItem<O, C>> {
        self.found.get(id)
    }

    /// Every found item in sort order.
    pub fn ordered(&self) -> &[ItemId] {
        &self.ordered
    }

    /// Items without a picked parent, in discovery order.
    pub fn roots(&self) -> &[ItemId] {
        &self.roots
    }

    /// Items kept by the current query, in sort order.
    pub fn filtered(&self) -> &[ItemId] {
        &self.filtered
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn header_label(&self) -> String {
        if self.is_filtering() {
            format!(
                "Objects found ({}/{})",
                self.filtered_count(),
                self.found_count()
            )
        } else {
            format!("Objects found ({})", self.found_count())
        }
    }

    pub fn progress(&self) -> f32 {
        self.loader.progress()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_processing()
    }

    pub fn is_expanded(&self, id: ItemId) -> bool {
        self.expanded.contains(&id)
    }

    /// Flip whether the children of `id` are shown. Returns the new state.
    pub fn toggle_expanded(&mut self, id: ItemId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    /// Rows to display. Without a query this is the hierarchy, walked depth
    /// first through expanded items only. With a query it is the flat list of
    /// matches.
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        if self.is_filtering() {
            return self
                .filtered
                .iter()
                .map(|id| TreeRow {
                    item: *id,
                    depth: 0,
                    has_children: false,
                    expanded: false,
                })
                .collect();
        }

        let mut rows = Vec::with_capacity(self.found.len());
        let mut stack: Vec<(ItemId, usize)> = self
            .sorted(&self.roots)
            .into_iter()
            .rev()
            .map(|id| (id, 0))
            .collect();

        while let Some((id, depth)) = stack.pop() {
            let Some(item) = self.found.get(id) else {
                continue;
            };
            let has_children = !item.children().is_empty();
            let expanded = has_children && self.expanded.contains(&id);
            rows.push(TreeRow {
                item: id,
                depth,
                has_children,
                expanded,
            });

            if expanded {
                stack.extend(
                    self.sorted(item.children())
                        .into_iter()
                        .rev()
                        .map(|child| (child, depth + 1)),
                );
            }
        }

        rows
    }

    fn sorted(&self, ids: &[ItemId]) -> Vec<ItemId> {
        let mut ids = ids.to_vec();
        ids.sort_by_key(|id| self.rank.get(id.index()).copied().unwrap_or(usize::MAX));
        ids
    }

    fn refilter(&mut self, filters: &FilterChain) {
        if !self.is_filtering() {
            self.filtered = self.ordered.clone();
            return;
        }

        self.filtered = filters.apply(&self.query, &self.found);
        self.sort_by_rank_filtered();
    }

    fn sort_by_rank_filtered(&mut self) {
        let rank = &self.rank;
        self.filtered
            .sort_by_key(|id| rank.get(id.index()).copied().unwrap_or(usize::MAX));
    }
}
