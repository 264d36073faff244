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

//! Side-by-side results of the three estimators.

use std::fmt;

use crate::config::StreamConfig;
use crate::estimators::Estimators;

/// An item reported by a sampling estimator, checked against the exact counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatedItem {
    item: i64,
    truly_frequent: bool,
}

impl AnnotatedItem {
    /// Returns the item.
    pub fn item(&self) -> i64 {
        self.item
    }

    /// Returns true if the exact counter also judges the item frequent.
    pub fn is_truly_frequent(&self) -> bool {
        self.truly_frequent
    }
}

/// Final state of a run, ready to be printed.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    config: StreamConfig,
    endpoint: Option<String>,
    stream_length: u64,
    exact_keys: usize,
    true_frequent: Vec<i64>,
    reservoir_capacity: usize,
    reservoir_items: Vec<AnnotatedItem>,
    sticky_processed: u64,
    sticky_keys: usize,
    sticky_items: Vec<AnnotatedItem>,
}

impl Report {
    /// Reads the estimators and cross-checks the samplers against the exact counts.
    pub fn collect<R>(estimators: &Estimators<R>) -> Self {
        let config = *estimators.config();
        let stream_length = estimators.clock().stream_length();
        let exact = estimators.exact();
        let true_frequent = exact.true_frequent(config.frequency_threshold(stream_length));

        let annotate = |items: Vec<i64>| -> Vec<AnnotatedItem> {
            items
                .into_iter()
                .map(|item| AnnotatedItem {
                    item,
                    truly_frequent: true_frequent.binary_search(&item).is_ok(),
                })
                .collect()
        };

        let reservoir = estimators.reservoir();
        let reservoir_items = annotate(reservoir.distinct_sorted());

        let sticky = estimators.sticky();
        let sticky_processed = sticky.processed();
        let sticky_items =
            annotate(sticky.estimated_frequent(config.sticky_threshold(sticky_processed)));

        Self {
            config,
            endpoint: None,
            stream_length,
            exact_keys: exact.num_keys(),
            reservoir_capacity: reservoir.capacity(),
            reservoir_items,
            sticky_processed,
            sticky_keys: sticky.len(),
            sticky_items,
            true_frequent,
        }
    }

    /// Names the endpoint the stream was read from in the input properties.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Returns the cumulative stream length the thresholds were computed from.
    pub fn stream_length(&self) -> u64 {
        self.stream_length
    }

    /// Returns the number of distinct items counted exactly.
    pub fn exact_keys(&self) -> usize {
        self.exact_keys
    }

    /// Returns the truly frequent items in increasing order.
    pub fn true_frequent(&self) -> &[i64] {
        &self.true_frequent
    }

    /// Returns the reservoir capacity `m`.
    pub fn reservoir_capacity(&self) -> usize {
        self.reservoir_capacity
    }

    /// Returns the distinct sampled values in increasing order.
    pub fn reservoir_items(&self) -> &[AnnotatedItem] {
        &self.reservoir_items
    }

    /// Returns the number of keys in the sticky table.
    pub fn sticky_keys(&self) -> usize {
        self.sticky_keys
    }

    /// Returns the sticky estimated-frequent items in increasing order.
    pub fn sticky_items(&self) -> &[AnnotatedItem] {
        &self.sticky_items
    }
}

fn write_annotated(f: &mut fmt::Formatter<'_>, items: &[AnnotatedItem]) -> fmt::Result {
    writeln!(f, "Number of estimated frequent items = {}", items.len())?;
    writeln!(f, "Estimated frequent items:")?;
    for item in items {
        let mark = if item.truly_frequent { '+' } else { '-' };
        writeln!(f, "{} {mark}", item.item)?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INPUT PROPERTIES")?;
        write!(
            f,
            "n = {} phi = {} epsilon = {} delta = {}",
            self.config.budget(),
            self.config.phi(),
            self.config.epsilon(),
            self.config.delta()
        )?;
        match &self.endpoint {
            Some(endpoint) => writeln!(f, " endpoint = {endpoint}")?,
            None => writeln!(f)?,
        }
        writeln!(
            f,
            "Expected items: {}   Processed items: {}",
            self.stream_length, self.sticky_processed
        )?;

        writeln!(f, "EXACT ALGORITHM")?;
        writeln!(
            f,
            "Number of items in the data structure = {}",
            self.exact_keys
        )?;
        writeln!(
            f,
            "Number of true frequent items = {}",
            self.true_frequent.len()
        )?;
        for item in &self.true_frequent {
            writeln!(f, "{item}")?;
        }

        writeln!(f, "RESERVOIR SAMPLING")?;
        writeln!(f, "Size m of the sample = {}", self.reservoir_capacity)?;
        write_annotated(f, &self.reservoir_items)?;

        writeln!(f, "STICKY SAMPLING")?;
        writeln!(
            f,
            "Number of items in the Hash Table = {}",
            self.sticky_keys
        )?;
        write_annotated(f, &self.sticky_items)
    }
}
