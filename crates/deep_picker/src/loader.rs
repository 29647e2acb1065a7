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

use std::collections::VecDeque;
use std::time::Duration;
use tracing::debug;
use web_time::Instant;

pub const DEFAULT_LOAD_BUDGET: Duration = Duration::from_millis(5);

/// Spreads expensive per-item work across host ticks.
///
/// The loader does nothing by itself. The host calls [`LazyLoader::tick`] once
/// per frame, and each tick processes queued items until the queue is empty or
/// the time budget is used up. At least one item is processed per tick while
/// any remain.
#[derive(Debug, Clone)]
pub struct LazyLoader<T> {
    queue: VecDeque<T>,
    budget: Duration,
    initial_total: usize,
    active: bool,
}

impl<T> Default for LazyLoader<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            budget: DEFAULT_LOAD_BUDGET,
            initial_total: 0,
            active: false,
        }
    }
}

impl<T> LazyLoader<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any pending work and queue up `items` instead.
    pub fn initialize(&mut self, items: impl IntoIterator<Item = T>, budget: Duration) {
        self.cancel();
        self.budget = budget;
        self.queue.extend(items);
        self.initial_total = self.queue.len();
        self.active = !self.queue.is_empty();
    }

    pub fn cancel(&mut self) {
        self.queue.clear();
        self.initial_total = 0;
        self.active = false;
    }

    /// Fraction of the initial queue that has been processed.
    pub fn progress(&self) -> f32 {
        if self.initial_total == 0 {
            return 1.0;
        }
        1.0 - self.queue.len() as f32 / self.initial_total as f32
    }

    pub fn is_processing(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Whether the loader still wants to be ticked. This stays true until the
    /// first tick that finds the queue empty.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Process queued items against the wall clock. Returns how many items
    /// were processed.
    pub fn tick(&mut self, load: impl FnMut(T)) -> usize {
        let start = Instant::now();
        self.tick_with(|| start.elapsed(), load)
    }

    /// Same as [`LazyLoader::tick`] but measures the budget with `elapsed`,
    /// which reports the time spent since the tick started.
    pub fn tick_with(&mut self, elapsed: impl Fn() -> Duration, mut load: impl FnMut(T)) -> usize {
        if !self.active {
            return 0;
        }

        if self.queue.is_empty() {
            self.active = false;
            return 0;
        }

        let mut loaded = 0;
        while !self.queue.is_empty() {
            if loaded > 0 && elapsed() > self.budget {
                break;
            }

            if let Some(item) = self.queue.pop_front() {
                load(item);
                loaded += 1;
            }
        }

        if self.queue.is_empty() {
            debug!("lazy loader finished {} items", self.initial_total);
        }

        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use std::cell::Cell;

    /// Fake clock that advances by a fixed step every time an item loads.
    struct StepClock {
        now: Cell<Duration>,
        step: Duration,
    }

    impl StepClock {
        fn new(step_millis: u64) -> Self {
            Self {
                now: Cell::new(Duration::ZERO),
                step: Duration::from_millis(step_millis),
            }
        }

        fn tick(&self, loader: &mut LazyLoader<u32>, loaded: &mut Vec<u32>) -> usize {
            self.now.set(Duration::ZERO);
            loader.tick_with(
                || self.now.get(),
                |item| {
                    self.now.set(self.now.get() + self.step);
                    loaded.push(item);
                },
            )
        }
    }

    #[test]
    fn budget_splits_work_across_ticks() {
        // Each load takes 2ms against a 5ms budget, so 3 loads fit in a tick.
        let clock = StepClock::new(2);
        let mut loader = LazyLoader::new();
        loader.initialize(0..10, Duration::from_millis(5));

        let mut loaded = Vec::new();
        let mut ticks = 0;
        while loader.is_processing() {
            let count = clock.tick(&mut loader, &mut loaded);
            assert!(count <= 3);
            ticks += 1;
        }

        assert_eq!(ticks, 4);
        assert_eq!(loaded, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn progress_is_monotonic() {
        let clock = StepClock::new(2);
        let mut loader = LazyLoader::new();
        loader.initialize(0..7, Duration::from_millis(5));
        assert_float_eq!(loader.progress(), 0.0, abs <= 1e-6);

        let mut loaded = Vec::new();
        let mut last = loader.progress();
        while loader.is_processing() {
            clock.tick(&mut loader, &mut loaded);
            assert!(loader.progress() > last);
            last = loader.progress();
        }
        assert_float_eq!(loader.progress(), 1.0, abs <= 1e-6);
    }

    #[test]
    fn always_makes_progress_with_zero_budget() {
        let clock = StepClock::new(1);
        let mut loader = LazyLoader::new();
        loader.initialize([1, 2], Duration::ZERO);

        let mut loaded = Vec::new();
        assert_eq!(clock.tick(&mut loader, &mut loaded), 1);
        assert_eq!(clock.tick(&mut loader, &mut loaded), 1);
        assert!(!loader.is_processing());
    }

    #[test]
    fn deactivates_on_first_idle_tick() {
        let mut loader = LazyLoader::new();
        loader.initialize([1u32], DEFAULT_LOAD_BUDGET);
        assert!(loader.is_active());

        assert_eq!(loader.tick(|_| {}), 1);
        assert!(!loader.is_processing());
        assert!(loader.is_active());

        assert_eq!(loader.tick(|_| {}), 0);
        assert!(!loader.is_active());
    }

    #[test]
    fn empty_initialize_stays_inactive() {
        let mut loader = LazyLoader::<u32>::new();
        loader.initialize([], DEFAULT_LOAD_BUDGET);
        assert!(!loader.is_active());
        assert_float_eq!(loader.progress(), 1.0, abs <= 1e-6);
    }

    #[test]
    fn cancel_and_reinitialize_discard_pending_work() {
        let mut loader = LazyLoader::new();
        loader.initialize([1u32, 2, 3], DEFAULT_LOAD_BUDGET);
        loader.cancel();
        assert!(!loader.is_processing());
        assert!(!loader.is_active());
        assert_eq!(loader.tick(|_| panic!("nothing should load")), 0);

        loader.initialize([4, 5], DEFAULT_LOAD_BUDGET);
        loader.initialize([6], DEFAULT_LOAD_BUDGET);
        let mut loaded = Vec::new();
        loader.tick(|item| loaded.push(item));
        assert_eq!(loaded, vec![6]);
    }
}
