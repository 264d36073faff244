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

//! The three estimators of a run, wired to one configuration and one clock.

use std::sync::Arc;

use rand::rngs::StdRng;

use crate::common::random::RandomSource;
use crate::common::random::default_rng;
use crate::config::StreamConfig;
use crate::exact::ExactCounter;
use crate::report::Report;
use crate::reservoir::ReservoirSampler;
use crate::stream::GlobalClock;
use crate::sticky::StickySampler;

/// Exact counter, reservoir sampler and sticky sampler fed by the same stream.
#[derive(Debug)]
pub struct Estimators<R = StdRng> {
    config: StreamConfig,
    clock: Arc<GlobalClock>,
    exact: ExactCounter,
    reservoir: ReservoirSampler<R>,
    sticky: StickySampler<R>,
}

impl Estimators<StdRng> {
    /// Creates the estimators for `config`.
    ///
    /// With a seed both samplers draw from deterministic, distinct generators.
    pub fn new(config: StreamConfig, seed: Option<u64>) -> Self {
        let reservoir_rng = default_rng(seed);
        let sticky_rng = default_rng(seed.map(|s| s ^ 0x9e37_79b9_7f4a_7c15));
        Self::with_rngs(config, reservoir_rng, sticky_rng)
    }
}

impl<R: RandomSource> Estimators<R> {
    /// Creates the estimators with explicit generators.
    pub fn with_rngs(config: StreamConfig, reservoir_rng: R, sticky_rng: R) -> Self {
        let clock = Arc::new(GlobalClock::new());
        let reservoir = ReservoirSampler::new(
            config.reservoir_capacity(),
            config.budget(),
            Arc::clone(&clock),
            reservoir_rng,
        );
        let sticky = StickySampler::new(config.sticky_rate(), config.budget(), sticky_rng);
        Self {
            config,
            clock,
            exact: ExactCounter::new(),
            reservoir,
            sticky,
        }
    }

    /// Feeds an admitted batch to all three estimators.
    pub fn ingest_batch(&self, items: &[i64]) {
        self.exact.ingest_batch(items);
        self.reservoir.ingest_batch(items);
        self.sticky.ingest_batch(items);
    }
}

impl<R> Estimators<R> {
    /// Returns the run configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Returns the shared clock.
    pub fn clock(&self) -> &GlobalClock {
        &self.clock
    }

    /// Returns the exact counter.
    pub fn exact(&self) -> &ExactCounter {
        &self.exact
    }

    /// Returns the reservoir sampler.
    pub fn reservoir(&self) -> &ReservoirSampler<R> {
        &self.reservoir
    }

    /// Returns the sticky sampler.
    pub fn sticky(&self) -> &StickySampler<R> {
        &self.sticky
    }

    /// Snapshots the current state of the three estimators.
    pub fn report(&self) -> Report {
        Report::collect(self)
    }
}
