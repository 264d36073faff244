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

/// Exact frequency table.
///
/// Batches may be ingested concurrently: per-batch counts are merged under a single
/// lock and merging commutes, so the final table does not depend on batch order or on
/// how the stream was split into batches.
#[derive(Debug, Default)]
pub struct ExactCounter {
    counts: Mutex<HashMap<i64, u64>>,
}

impl ExactCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every item of `items` to the running counts.
    pub fn ingest_batch(&self, items: &[i64]) {
        let mut batch_counts: HashMap<i64, u64> = HashMap::new();
        for &item in items {
            *batch_counts.entry(item).or_insert(0) += 1;
        }

        let mut counts = self.counts.lock();
        for (item, count) in batch_counts {
            *counts.entry(item).or_insert(0) += count;
        }
    }

    /// Returns the number of distinct items tracked.
    pub fn num_keys(&self) -> usize {
        self.counts.lock().len()
    }

    /// Returns true if nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.lock().is_empty()
    }

    /// Returns the exact count of `item`.
    pub fn count(&self, item: i64) -> u64 {
        self.counts.lock().get(&item).copied().unwrap_or(0)
    }

    /// Returns the sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.lock().values().sum()
    }

    /// Returns a sorted copy of the table.
    pub fn counts(&self) -> BTreeMap<i64, u64> {
        self.counts
            .lock()
            .iter()
            .map(|(item, count)| (*item, *count))
            .collect()
    }

    /// Returns, in increasing order, the items whose count is at least `threshold`.
    pub fn true_frequent(&self, threshold: f64) -> Vec<i64> {
        let mut items: Vec<i64> = self
            .counts
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

    #[test]
    fn test_empty() {
        let counter = ExactCounter::new();
        assert!(counter.is_empty());
        assert_eq!(counter.num_keys(), 0);
        assert_eq!(counter.count(1), 0);
        assert!(counter.true_frequent(0.0).is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let counter = ExactCounter::new();
        counter.ingest_batch(&[5, 5, 5, 2, 2, 9]);
        assert_eq!(counter.true_frequent(2.0), vec![2, 5]);
        assert_eq!(counter.true_frequent(2.1), vec![5]);
        assert_eq!(counter.total(), 6);
    }
}
