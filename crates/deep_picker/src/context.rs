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

use crate::{
    filter::FilterChain, item::QueryableItem, picking::Picker, pool::Pool,
    settings::FinderSettings,
};

pub type ItemPool<O, C> = Pool<QueryableItem<O, C>>;

/// Everything that outlives a single pick: the settings, the pool of item
/// wrappers and the filter chain.
#[derive(Debug)]
pub struct FinderContext<O, C> {
    settings: FinderSettings,
    pool: ItemPool<O, C>,
    filters: FilterChain,
}

impl<O, C> FinderContext<O, C> {
    /// Build a context whose pool is filled up to the maximum item count.
    pub fn new(settings: FinderSettings) -> Self {
        let max = settings.max_showable_item_count;
        let pool = Pool::new(max);
        pool.prepopulate(max);
        Self {
            settings,
            pool,
            filters: FilterChain::builtin(),
        }
    }

    pub fn with_filters(mut self, filters: FilterChain) -> Self {
        self.filters = filters;
        self
    }

    pub fn settings(&self) -> &FinderSettings {
        &self.settings
    }

    pub fn pool(&self) -> &ItemPool<O, C> {
        &self.pool
    }

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterChain) {
        self.filters = filters;
    }

    /// Replace the settings and resize the pool to the new maximum.
    pub fn apply_settings(&mut self, settings: FinderSettings) {
        let max = settings.max_showable_item_count;
        self.settings = settings;
        self.pool.set_max_size(max);
        self.pool.resize(max);
    }

    pub fn picker(&self) -> Picker {
        Picker::new(
            self.settings.max_showable_item_count,
            self.settings.duplicate_policy,
        )
    }
}

impl<O, C> Default for FinderContext<O, C> {
    fn default() -> Self {
        Self::new(FinderSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_follows_settings() {
        let mut context = FinderContext::<u32, u64>::new(FinderSettings {
            max_showable_item_count: 8,
            ..Default::default()
        });
        assert_eq!(context.pool().len(), 8);
        assert_eq!(context.picker().max_items, 8);

        context.apply_settings(FinderSettings {
            max_showable_item_count: 3,
            ..Default::default()
        });
        assert_eq!(context.pool().max_size(), 3);
        assert_eq!(context.pool().len(), 3);

        context.apply_settings(FinderSettings {
            max_showable_item_count: 20,
            ..Default::default()
        });
        assert_eq!(context.pool().len(), 20);
    }
}
