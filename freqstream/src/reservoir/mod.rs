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

//! Fixed-size uniform sampling of the stream (Algorithm R).
//!
//! The sampler keeps `m` items. The first `m` items of the stream fill the reservoir;
//! the item at stream position `t > m` replaces a uniformly chosen slot with
//! probability `m/t`. After `t` items every one of them is in the sample with
//! probability `m/t`.
//!
//! The stream position is read from a [`GlobalClock`](crate::stream::GlobalClock)
//! shared with the rest of the run, and the sampler stops accepting items once it has
//! processed its item budget.
//!
//! # Usage
//!
//! ```rust
//! # use std::sync::Arc;
//! # use freqstream::common::random::default_rng;
//! # use freqstream::reservoir::ReservoirSampler;
//! # use freqstream::stream::GlobalClock;
//! let clock = Arc::new(GlobalClock::new());
//! let sampler = ReservoirSampler::new(4, 100, clock, default_rng(Some(1)));
//! sampler.ingest_batch(&[10, 20, 30]);
//! assert_eq!(sampler.sample(), vec![10, 20, 30]);
//! ```

mod sampler;

pub use self::sampler::ReservoirSampler;
