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

use std::sync::{Mutex, MutexGuard, PoisonError};

/// A bounded stack of idle instances that can be rented out and given back.
///
/// The number of idle instances never exceeds [`Pool::max_size`]. Instances
/// given back while the pool is full are simply dropped. Every operation is
/// total.
#[derive(Debug)]
pub struct Pool<T> {
    idle: Mutex<Vec<T>>,
    max_size: usize,
}

impl<T: Default> Pool<T> {
    pub fn new(max_size: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(max_size)),
            max_size,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Number of idle instances currently held by the pool.
    pub fn len(&self) -> usize {
        self.idle().len()
    }

    pub fn is_empty(&self) -> bool {
        self.idle().is_empty()
    }

    /// Change the capacity of the pool, dropping idle instances above the new
    /// maximum.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        let idle = self.idle.get_mut().unwrap_or_else(PoisonError::into_inner);
        idle.truncate(max_size);
    }

    /// Eagerly construct up to `count` instances without going over capacity.
    pub fn prepopulate(&self, count: usize) {
        let mut idle = self.idle();
        let amount = count.min(self.max_size.saturating_sub(idle.len()));
        idle.extend(std::iter::repeat_with(T::default).take(amount));
    }

    /// Grow or shrink the idle stack to `target`, clamped to the capacity.
    pub fn resize(&self, target: usize) {
        let mut idle = self.idle();
        let target = target.min(self.max_size);
        if target > idle.len() {
            let amount = target - idle.len();
            idle.extend(std::iter::repeat_with(T::default).take(amount));
        } else {
            idle.truncate(target);
        }
    }

    /// Take an idle instance, or construct a new one when none are left.
    pub fn rent(&self) -> T {
        self.idle().pop().unwrap_or_default()
    }

    pub fn give_back(&self, item: T) {
        let mut idle = self.idle();
        if idle.len() < self.max_size {
            idle.push(item);
        }
    }

    pub fn give_back_all(&self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.give_back(item);
        }
    }

    fn idle(&self) -> MutexGuard<'_, Vec<T>> {
        // The stack is never left half-updated, so a poisoned lock is still
        // usable.
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Default> Default for Pool<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rent_and_give_back_keeps_idle_count() {
        let pool = Pool::<Vec<u8>>::new(4);
        pool.prepopulate(4);
        assert_eq!(pool.len(), 4);

        let item = pool.rent();
        assert_eq!(pool.len(), 3);
        pool.give_back(item);
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn rent_from_empty_pool_constructs() {
        let pool = Pool::<String>::new(2);
        assert!(pool.is_empty());
        assert_eq!(pool.rent(), String::new());
        assert!(pool.is_empty());
    }

    #[test]
    fn give_back_over_capacity_is_dropped() {
        let pool = Pool::<u32>::new(2);
        pool.give_back_all([1, 2, 3]);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.rent(), 2);
    }

    #[test]
    fn prepopulate_never_exceeds_capacity() {
        let pool = Pool::<u32>::new(3);
        pool.prepopulate(10);
        assert_eq!(pool.len(), 3);
        pool.prepopulate(1);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn resize_grows_and_drains() {
        let pool = Pool::<u32>::new(5);
        pool.resize(3);
        assert_eq!(pool.len(), 3);
        pool.resize(100);
        assert_eq!(pool.len(), 5);
        pool.resize(0);
        assert!(pool.is_empty());
    }

    #[test]
    fn shrinking_capacity_trims_idle() {
        let mut pool = Pool::<u32>::new(5);
        pool.prepopulate(5);
        pool.set_max_size(2);
        assert_eq!(pool.len(), 2);
        pool.give_back(7);
        assert_eq!(pool.len(), 2);
    }
}
