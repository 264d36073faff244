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

use std::collections::BTreeMap;
use std::collections::HashMap;

use parking_lot::Mutex;
use rand::rngs::StdRng;

use crate::common::random::RandomSource;
use crate::sticky::BucketSchedule;

#[derive(Debug)]
struct StickyCursor<R> {
    processed: u64,
    prev_bucket: Option<u32>,
    rng: R,
}

/// Sticky sampling estimator bounded to `budget` items.
///
/// Two locks are involved. The cursor lock serialises items through the estimator
/// (processed count, previous bucket and generator). The table lock guards every
/// read-modify-write of the table, including each key's decay during recalibration.
///
/// Recalibration iterates over a snapshot of the keys taken under the table lock and
/// then decays the keys one by one, re-taking the lock for each. A key inserted into
/// the table while a pass is running may escape that pass, and a snapshot key that
/// has disappeared in the meantime is skipped.
#[derive(Debug)]
pub struct StickySampler<R = StdRng> {
    schedule: BucketSchedule,
    budget: u64,
    table: Mutex<HashMap<i64, u64>>,
    cursor: Mutex<StickyCursor<R>>,
}

impl<R: RandomSource> StickySampler<R> {
    /// Creates a sampler with sampling rate `rate` (see [`BucketSchedule`]).
    ///
    /// # Panics
    ///
    /// Panics if `rate` is not a positive finite number.
    pub fn new(rate: f64, budget: u64, rng: R) -> Self {
        Self {
            schedule: BucketSchedule::new(rate),
            budget,
            table: Mutex::new(HashMap::new()),
            cursor: Mutex::new(StickyCursor {
                processed: 0,
                prev_bucket: None,
                rng,
            }),
        }
    }

    /// Feeds `items` in order and returns how many were consumed.
    ///
    /// Consumption stops early once the budget is reached.
    pub fn ingest_batch(&self, items: &[i64]) -> usize {
        let mut cursor = self.cursor.lock();
        let mut consumed = 0;
        for &item in items {
            if !self.ingest_locked(&mut cursor, item) {
                break;
            }
            consumed += 1;
        }
        consumed
    }

    /// Feeds one item. Returns false if the budget was already reached.
    pub fn ingest_item(&self, item: i64) -> bool {
        let mut cursor = self.cursor.lock();
        self.ingest_locked(&mut cursor, item)
    }

    fn ingest_locked(&self, cursor: &mut StickyCursor<R>, item: i64) -> bool {
        if cursor.processed >= self.budget {
            return false;
        }

        let bucket = self.schedule.bucket_of(cursor.processed);
        if cursor.prev_bucket != Some(bucket) {
            self.recalibrate(&mut cursor.rng, bucket);
        }

        let draw = cursor.rng.next_unit();
        {
            let mut table = self.table.lock();
            if let Some(count) = table.get_mut(&item) {
                *count += 1;
            } else if draw < self.schedule.admission_probability(bucket) {
                table.insert(item, 1);
            }
        }

        cursor.prev_bucket = Some(bucket);
        cursor.processed += 1;
        true
    }

    fn recalibrate(&self, rng: &mut R, bucket: u32) {
        let keys: Vec<i64> = self.table.lock().keys().copied().collect();
        let mut evicted = 0usize;
        for key in keys.iter() {
            let tails = rng.tails_before_head();
            let mut table = self.table.lock();
            let Some(count) = table.get_mut(key) else {
                continue;
            };
            if *count > tails {
                *count -= tails;
            } else {
                table.remove(key);
                evicted += 1;
            }
        }
        tracing::debug!(
            bucket,
            keys = keys.len(),
            evicted,
            "recalibrated sticky table"
        );
    }
}

impl<R> StickySampler<R> {
    /// Returns the sampling rate `r`.
    pub fn rate(&self) -> f64 {
        self.schedule.rate()
    }

    /// Returns the bucket schedule.
    pub fn schedule(&self) -> BucketSchedule {
        self.schedule
    }

    /// Returns the number of items consumed so far.
    pub fn processed(&self) -> u64 {
        self.cursor.lock().processed
    }

    /// Returns the bucket of the last consumed item, if any.
    pub fn current_bucket(&self) -> Option<u32> {
        self.cursor.lock().prev_bucket
    }

    /// Returns the number of keys in the table.
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }

    /// Returns the stored count of `item`, 0 if it is not in the table.
    pub fn estimate(&self, item: i64) -> u64 {
        self.table.lock().get(&item).copied().unwrap_or(0)
    }

    /// Returns a sorted copy of the table.
    pub fn estimates(&self) -> BTreeMap<i64, u64> {
        self.table
            .lock()
            .iter()
            .map(|(item, count)| (*item, *count))
            .collect()
    }

    /// Returns, in increasing order, the keys whose stored count is at least `threshold`.
    pub fn estimated_frequent(&self, threshold: f64) -> Vec<i64> {
        let mut items: Vec<i64> = self
            .table
            .lock()
            .iter()
            .filter(|(_, count)| **count as f64 >= threshold)
            .map(|(item, _)| *item)
            .collect();
        items.sort_unstable();
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::random::default_rng;

    #[test]
    fn test_first_bucket_counts_exactly() {
        let sampler = StickySampler::new(50.0, 1_000, default_rng(Some(1)));
        let items = [4, 4, 1, 4, 2, 1];
        assert_eq!(sampler.ingest_batch(&items), items.len());
        assert_eq!(sampler.estimate(4), 3);
        assert_eq!(sampler.estimate(1), 2);
        assert_eq!(sampler.estimate(2), 1);
        assert_eq!(sampler.current_bucket(), Some(0));
    }

    #[test]
    fn test_budget_stops_mid_batch() {
        let sampler = StickySampler::new(2.0, 3, default_rng(Some(2)));
        assert_eq!(sampler.ingest_batch(&[1, 2, 3, 4, 5]), 3);
        assert!(!sampler.ingest_item(6));
        assert_eq!(sampler.processed(), 3);
    }

    #[test]
    fn test_recalibration_never_raises_counts() {
        let sampler = StickySampler::new(1.0, u64::MAX, default_rng(Some(3)));
        // Bucket 0 holds items 0 and 1; item 2 opens bucket 1.
        sampler.ingest_batch(&[8, 8]);
        assert_eq!(sampler.estimate(8), 2);
        sampler.ingest_item(9);
        assert_eq!(sampler.current_bucket(), Some(1));
        assert!(sampler.estimate(8) <= 2);
    }
}
