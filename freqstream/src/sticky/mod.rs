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

//! Sticky Sampling of frequent items with a confidence guarantee.
//!
//! The stream is cut into buckets whose sizes grow geometrically with the sampling
//! rate `r = ln(1/(delta*phi)) / epsilon`: bucket `B_0` holds the first `2r` items and
//! bucket `B_i` (`i >= 1`) the next `2^i * r`. Inside bucket `i` an unseen item enters
//! the table with probability `1/2^i`, while an item already in the table is counted
//! exactly.
//!
//! On the first item of every bucket the table is recalibrated: each stored count is
//! lowered by the number of tails a fair coin shows before its first head, and keys
//! that drop to zero are evicted. This keeps every stored count below the key's true
//! frequency and bounds the expected table size by `2/epsilon * ln(1/(phi*delta))`.
//!
//! An item of frequency at least `phi * N` is retained with probability at least
//! `1 - delta`; items with an estimate of at least `(phi - epsilon) * N` are reported.
//!
//! For background, see Manku and Motwani, *Approximate Frequency Counts over Data
//! Streams*, VLDB 2002.
//!
//! # Usage
//!
//! ```rust
//! # use freqstream::common::random::default_rng;
//! # use freqstream::sticky::StickySampler;
//! let sampler = StickySampler::new(28.0, 1_000, default_rng(Some(7)));
//! sampler.ingest_batch(&[3, 3, 3, 9]);
//! // Every item of the first bucket is admitted.
//! assert_eq!(sampler.estimate(3), 3);
//! assert_eq!(sampler.estimated_frequent(2.0), vec![3]);
//! ```

mod bucket;
mod sampler;

pub use self::bucket::BucketSchedule;
pub use self::sampler::StickySampler;
