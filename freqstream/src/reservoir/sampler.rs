// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;

use crate::common::random::RandomSource;
use crate::stream::GlobalClock;

#[derive(Debug)]
struct ReservoirState<R> {
    sample: Vec<i64>,
    processed: u64,
    rng: R,
}

/// Reservoir sampler of capacity `m` bounded to `budget` items.
///
/// The sample, the processed counter and the generator live behind one lock, and the
/// shared stream position is advanced while it is held, so every item sees a distinct
/// position and slot replacements never act on stale state.
#[derive(Debug)]
pub struct ReservoirSampler<R = StdRng> {
    capacity: usize,
    budget: u64,
    clock: Arc<GlobalClock>,
    state: Mutex<ReservoirState<R>>,
}

impl<R: RandomSource> ReservoirSampler<R> {
    /// Creates a sampler holding up to `capacity` items.
    ///
    /// The sampler must be the only one advancing `clock`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize, budget: u64, clock: Arc<GlobalClock>, rng: R) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        Self {
            capacity,
            budget,
            clock,
            state: Mutex::new(ReservoirState {
                sample: Vec::new(),
                processed: 0,
                rng,
            }),
        }
    }

    /// Feeds `items` in order and returns how many were consumed.
    ///
    /// Consumption stops early once the budget is reached.
    pub fn ingest_batch(&self, items: &[i64]) -> usize {
        let mut state = self.state.lock();
        let mut consumed = 0;
        for &item in items {
            if !self.ingest_locked(&mut state, item) {
                break;
            }
            consumed += 1;
        }
        consumed
    }

    /// Feeds one item. Returns false if the budget was already reached.
    pub fn ingest_item(&self, item: i64) -> bool {
        let mut state = self.state.lock();
        self.ingest_locked(&mut state, item)
    }

    fn ingest_locked(&self, state: &mut ReservoirState<R>, item: i64) -> bool {
        if state.processed >= self.budget {
            return false;
        }

        let t = self.clock.tick();
        if t <= self.capacity as u64 {
            state.sample.push(item);
        } else {
            debug_assert_eq!(state.sample.len(), self.capacity);
            let keep = self.capacity as f64 / t as f64;
            if state.rng.next_unit() < keep {
                let slot = state.rng.next_index(state.sample.len());
                state.sample[slot] = item;
            }
        }
        state.processed += 1;
        true
    }
}

impl<R> ReservoirSampler<R> {
    /// Returns the sample capacity `m`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of items consumed so far.
    pub fn processed(&self) -> u64 {
        self.state.lock().processed
    }

    /// Returns the sample in slot order.
    pub fn sample(&self) -> Vec<i64> {
        self.state.lock().sample.clone()
    }

    /// Returns the distinct sampled values in increasing order.
    pub fn distinct_sorted(&self) -> Vec<i64> {
        let mut items = self.sample();
        items.sort_unstable();
        items.dedup();
        items
    }
}
