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
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    found::FoundItems,
    item::QueryableItem,
    pool::Pool,
    scene::SceneQuery,
};

/// Finds the nearest visible object under a point.
pub trait PointPicker<O> {
    /// Return the nearest object at `point` that is not in `ignore`, or
    /// [`None`] when nothing else is under the point.
    fn pick(&mut self, point: Vec2, ignore: &[O]) -> Option<O>;
}

/// Raycasts user interface canvases.
pub trait UiRaycaster<O> {
    /// Every active canvas that has a raycaster attached.
    fn canvases(&mut self) -> Vec<O>;

    /// Convert a point from GUI coordinates into the screen pixel coordinates
    /// that [`UiRaycaster::raycast`] expects.
    fn to_screen(&self, point: Vec2) -> Vec2 {
        point
    }

    /// Append every graphic of `canvas` under `screen_point` to `hits`.
    fn raycast(&mut self, canvas: O, screen_point: Vec2, hits: &mut Vec<O>);
}

/// A backend that never finds anything. Used when the application has not
/// provided a picker or raycaster.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPick;

impl<O> PointPicker<O> for NoPick {
    fn pick(&mut self, _point: Vec2, _ignore: &[O]) -> Option<O> {
        None
    }
}

impl<O> UiRaycaster<O> for NoPick {
    fn canvases(&mut self) -> Vec<O> {
        Vec::new()
    }

    fn raycast(&mut self, _canvas: O, _screen_point: Vec2, _hits: &mut Vec<O>) {}
}

/// What the point pick loop does when the picker hands back an object that was
/// already found, which happens when the picker stops honoring the ignore list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// End the point pass.
    #[default]
    Stop,
    /// Skip the duplicate and ask again. The pass is still bounded by the
    /// maximum item count.
    Skip,
}

/// Runs the two pick passes for one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Picker {
    pub max_items: usize,
    pub duplicate_policy: DuplicatePolicy,
}

impl Picker {
    pub fn new(max_items: usize, duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            max_items,
            duplicate_policy,
        }
    }

    /// Repeatedly pick the nearest object under `point`, excluding what was
    /// already found, until nothing is left, the found set is full, or the
    /// picker returns a duplicate. Makes at most `max_items` picker queries.
    ///
    /// Returns the number of items added.
    pub fn pick_point<S, P>(
        &self,
        point: Vec2,
        scene: &S,
        picker: &mut P,
        pool: &Pool<QueryableItem<S::Object, S::Component>>,
        found: &mut FoundItems<S::Object, S::Component>,
        ignore: &mut Vec<S::Object>,
    ) -> usize
    where
        S: SceneQuery + ?Sized,
        P: PointPicker<S::Object> + ?Sized,
    {
        let mut added = 0;
        for _ in 0..self.max_items {
            if found.len() >= self.max_items {
                break;
            }

            let Some(picked) = picker.pick(point, ignore) else {
                break;
            };

            match wrap(picked, scene, pool, found) {
                Wrapped::Added => {
                    added += 1;
                    exclude(ignore, picked, self.max_items);
                }
                Wrapped::Duplicate => match self.duplicate_policy {
                    DuplicatePolicy::Stop => {
                        debug!("point picker returned {picked:?} twice, ending the point pass");
                        break;
                    }
                    DuplicatePolicy::Skip => continue,
                },
                Wrapped::Missing => {
                    // Keep the picker from handing the same stale object back.
                    exclude(ignore, picked, self.max_items);
                }
                Wrapped::Full => break,
            }
        }

        added
    }

    /// Raycast every canvas at `point` and add each hit that is not already
    /// present. Returns the number of items added.
    pub fn pick_ui<S, U>(
        &self,
        point: Vec2,
        scene: &S,
        raycaster: &mut U,
        pool: &Pool<QueryableItem<S::Object, S::Component>>,
        found: &mut FoundItems<S::Object, S::Component>,
    ) -> usize
    where
        S: SceneQuery + ?Sized,
        U: UiRaycaster<S::Object> + ?Sized,
    {
        let screen_point = raycaster.to_screen(point);
        let mut hits = Vec::new();
        let mut added = 0;

        'canvases: for canvas in raycaster.canvases() {
            if found.len() >= self.max_items {
                break;
            }

            hits.clear();
            raycaster.raycast(canvas, screen_point, &mut hits);
            for hit in hits.iter().copied() {
                if found.len() >= self.max_items {
                    break 'canvases;
                }

                if let Wrapped::Added = wrap(hit, scene, pool, found) {
                    added += 1;
                }
            }
        }

        added
    }
}

enum Wrapped {
    Added,
    Duplicate,
    Missing,
    Full,
}

/// Rent a wrapper for `object` and try to add it to the found set. A wrapper
/// that does not make it into the set goes straight back to the pool.
fn wrap<S>(
    object: S::Object,
    scene: &S,
    pool: &Pool<QueryableItem<S::Object, S::Component>>,
    found: &mut FoundItems<S::Object, S::Component>,
) -> Wrapped
where
    S: SceneQuery + ?Sized,
{
    let mut item = pool.rent();
    if let Err(err) = item.initialize(object, scene) {
        warn!("skipping picked object: {err}");
        item.free();
        pool.give_back(item);
        return Wrapped::Missing;
    }

    let duplicate = found.contains(object);
    match found.insert(item) {
        Ok(_) => Wrapped::Added,
        Err(mut rejected) => {
            rejected.free();
            pool.give_back(rejected);
            if duplicate {
                Wrapped::Duplicate
            } else {
                Wrapped::Full
            }
        }
    }
}

fn exclude<O: PartialEq>(ignore: &mut Vec<O>, object: O, max_items: usize) {
    if ignore.len() < max_items && !ignore.contains(&object) {
        ignore.push(object);
    }
}
