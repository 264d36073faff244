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
use std::thread;

use freqstream::exact::ExactCounter;

fn counts_of(batches: &[&[i64]]) -> BTreeMap<i64, u64> {
    let counter = ExactCounter::new();
    for batch in batches {
        counter.ingest_batch(batch);
    }
    counter.counts()
}

#[test]
fn test_counts_do_not_depend_on_batching() {
    let expected = BTreeMap::from([(1, 3), (2, 1), (3, 1)]);
    assert_eq!(counts_of(&[&[1, 1], &[2, 3, 1]]), expected);
    assert_eq!(counts_of(&[&[1], &[1, 2], &[3, 1]]), expected);
    assert_eq!(counts_of(&[&[1, 1, 2, 3, 1]]), expected);
}

#[test]
fn test_concurrent_batches_commute() {
    let items: Vec<i64> = (0..10_000).map(|i| i % 37).collect();
    let sequential = counts_of(&[&items]);

    let counter = ExactCounter::new();
    thread::scope(|scope| {
        for chunk in items.chunks(1_000) {
            let counter = &counter;
            scope.spawn(move || counter.ingest_batch(chunk));
        }
    });

    assert_eq!(counter.counts(), sequential);
    assert_eq!(counter.total(), 10_000);
    assert_eq!(counter.num_keys(), 37);
}

#[test]
fn test_true_frequent_sorted() {
    let counter = ExactCounter::new();
    counter.ingest_batch(&[42, -5, 42, -5, 8, 42, -5]);
    assert_eq!(counter.true_frequent(3.0), vec![-5, 42]);
    assert!(counter.true_frequent(4.0).is_empty());
}
