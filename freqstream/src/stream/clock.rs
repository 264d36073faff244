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

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// Shared logical clock of a run.
///
/// Tracks the stream position `t` consumed by reservoir sampling (starting at 1) and
/// the cumulative length of every batch admitted so far.
#[derive(Debug)]
pub struct GlobalClock {
    position: AtomicU64,
    stream_length: AtomicU64,
}

impl GlobalClock {
    /// Creates a clock at position 1 with an empty stream.
    pub fn new() -> Self {
        Self {
            position: AtomicU64::new(1),
            stream_length: AtomicU64::new(0),
        }
    }

    /// Returns the current stream position `t`.
    pub fn position(&self) -> u64 {
        self.position.load(Ordering::Acquire)
    }

    /// Advances the stream position, returning the value before the increment.
    pub(crate) fn tick(&self) -> u64 {
        self.position.fetch_add(1, Ordering::AcqRel)
    }

    /// Returns the cumulative number of items in admitted batches.
    pub fn stream_length(&self) -> u64 {
        self.stream_length.load(Ordering::Acquire)
    }

    /// Admits a batch of `size` items if the stream has not yet reached `budget`.
    ///
    /// Returns the stream length including this batch, or `None` when the budget was
    /// already exhausted. A single admitted batch may carry the length past `budget`.
    pub fn admit_batch(&self, size: u64, budget: u64) -> Option<u64> {
        self.stream_length
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |len| {
                (len < budget).then_some(len + size)
            })
            .ok()
            .map(|previous| previous + size)
    }
}

impl Default for GlobalClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_returns_previous_position() {
        let clock = GlobalClock::new();
        assert_eq!(clock.position(), 1);
        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.position(), 3);
    }

    #[test]
    fn test_admission_stops_at_budget() {
        let clock = GlobalClock::new();
        assert_eq!(clock.admit_batch(300, 500), Some(300));
        assert_eq!(clock.admit_batch(300, 500), Some(600));
        assert_eq!(clock.admit_batch(1, 500), None);
        assert_eq!(clock.stream_length(), 600);
    }
}
