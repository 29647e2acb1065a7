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

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Reverse;
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

use crate::{
    found::FoundItems,
    item::{ItemId, QueryableItem},
};

/// What a [`Filter`] compares its argument against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Any component type name, e.g. `t:Collider`.
    Component,
    /// Any label, e.g. `l:Interactable`.
    Label,
    /// The tag, e.g. `tag:Player`.
    Tag,
    /// The layer name, e.g. `lay:UI`.
    Layer,
    /// Substring of the name. This is the fallback for queries without a
    /// keyword.
    Name,
}

/// One keyword-prefixed predicate in a [`FilterChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    keyword: Cow<'static, str>,
    priority: u32,
    kind: FilterKind,
}

impl Filter {
    pub fn new(keyword: impl Into<Cow<'static, str>>, priority: u32, kind: FilterKind) -> Self {
        Self {
            keyword: keyword.into(),
            priority,
            kind,
        }
    }

    pub fn component() -> Self {
        Self::new("t:", 0, FilterKind::Component)
    }

    pub fn label() -> Self {
        Self::new("l:", 1, FilterKind::Label)
    }

    pub fn tag() -> Self {
        Self::new("tag:", 2, FilterKind::Tag)
    }

    pub fn layer() -> Self {
        Self::new("lay:", 3, FilterKind::Layer)
    }

    pub fn name() -> Self {
        Self::new("", u32::MAX, FilterKind::Name)
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Whether this filter should handle `query`.
    pub fn evaluate(&self, query: &str) -> bool {
        starts_with_ignore_case(query, &self.keyword)
    }

    /// The query with this filter's keyword stripped and whitespace trimmed.
    pub fn argument<'q>(&self, query: &'q str) -> &'q str {
        query.get(self.keyword.len()..).unwrap_or_default().trim()
    }

    pub fn matches<O, C>(&self, item: &QueryableItem<O, C>, argument: &str) -> bool
    where
        O: Copy + Eq + Hash + Debug,
        C: Copy + Eq + Hash + Debug,
    {
        match self.kind {
            FilterKind::Component => item.has_component_named(argument),
            FilterKind::Label => item.has_label(argument),
            FilterKind::Tag => item.has_tag(argument),
            FilterKind::Layer => item.has_layer(argument),
            FilterKind::Name => item.name_contains(argument),
        }
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterChainError {
    #[error("more than one filter uses the keyword {0:?}")]
    DuplicateKeyword(String),
    #[error("the keyword {shadowed:?} can never match because {by:?} is tried first")]
    ShadowedKeyword { shadowed: String, by: String },
    #[error("the chain needs a fallback filter with an empty keyword")]
    MissingFallback,
}

/// An ordered list of filters. The first filter whose keyword prefixes the
/// query handles it alone.
///
/// Filters are ordered by priority and then by descending keyword length, so
/// that a longer keyword is tried before a shorter one of the same priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FilterChain {
    /// Component, label, tag, layer and name filters.
    pub fn builtin() -> Self {
        let mut filters = vec![
            Filter::component(),
            Filter::label(),
            Filter::tag(),
            Filter::layer(),
            Filter::name(),
        ];
        sort_filters(&mut filters);
        Self { filters }
    }

    /// Build a chain from an explicit list of filters. The list must contain
    /// exactly one filter with an empty keyword, and no keyword may be
    /// unreachable because an earlier keyword always matches first.
    pub fn new(filters: impl IntoIterator<Item = Filter>) -> Result<Self, FilterChainError> {
        let mut filters: Vec<Filter> = filters.into_iter().collect();
        sort_filters(&mut filters);

        for (i, earlier) in filters.iter().enumerate() {
            for later in &filters[i + 1..] {
                if earlier.keyword.eq_ignore_ascii_case(&later.keyword) {
                    return Err(FilterChainError::DuplicateKeyword(
                        later.keyword.to_string(),
                    ));
                }

                // Any query that reaches `later` would already have been
                // claimed by `earlier`.
                if starts_with_ignore_case(&later.keyword, &earlier.keyword) {
                    return Err(FilterChainError::ShadowedKeyword {
                        shadowed: later.keyword.to_string(),
                        by: earlier.keyword.to_string(),
                    });
                }
            }
        }

        if !filters.iter().any(|f| f.keyword.is_empty()) {
            return Err(FilterChainError::MissingFallback);
        }

        Ok(Self { filters })
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Find the filter that handles `query` along with its argument. Returns
    /// [`None`] for a blank query.
    pub fn select<'q>(&self, query: &'q str) -> Option<(&Filter, &'q str)> {
        if query.trim().is_empty() {
            return None;
        }

        self.filters
            .iter()
            .find(|filter| filter.evaluate(query))
            .map(|filter| (filter, filter.argument(query)))
    }

    /// Ids of the items that `query` keeps, in discovery order. A blank query
    /// keeps everything.
    pub fn apply<O, C>(&self, query: &str, items: &FoundItems<O, C>) -> Vec<ItemId>
    where
        O: Copy + Eq + Hash + Debug,
        C: Copy + Eq + Hash + Debug,
    {
        match self.select(query) {
            None => items.ids().collect(),
            Some((filter, argument)) => items
                .iter()
                .filter(|(_, item)| filter.matches(item, argument))
                .map(|(id, _)| id)
                .collect(),
        }
    }
}

fn sort_filters(filters: &mut [Filter]) {
    filters.sort_by_key(|f| (f.priority, Reverse(f.keyword.len())));
}

/// Order in which items are listed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Case-insensitive name, then discovery order.
    #[default]
    Name,
    /// Position among transform siblings, then discovery order.
    SiblingIndex,
    /// The order the picker found the items in.
    Discovery,
}

impl SortOrder {
    pub fn sort<O, C>(self, ids: &mut [ItemId], items: &FoundItems<O, C>)
    where
        O: Copy + Eq + Hash + Debug,
        C: Copy + Eq + Hash + Debug,
    {
        match self {
            SortOrder::Name => ids.sort_by_cached_key(|id| {
                let name = items.get(*id).map(|i| i.name().to_lowercase());
                (name, *id)
            }),
            SortOrder::SiblingIndex => {
                ids.sort_by_key(|id| (items.get(*id).map(|i| i.sibling_index()), *id))
            }
            SortOrder::Discovery => ids.sort(),
        }
    }
}
