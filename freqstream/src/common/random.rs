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

//! Shared random utilities for the stream estimators.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Random draws needed by the sampling estimators.
pub trait RandomSource {
    /// Returns a uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Returns a uniform index in `[0, bound)`. `bound` must be positive.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Flips a fair coin, `true` being heads.
    fn next_bool(&mut self) -> bool {
        self.next_unit() < 0.5
    }

    /// Flips a fair coin until the first head and returns the number of tails.
    fn tails_before_head(&mut self) -> u64 {
        let mut tails = 0;
        while !self.next_bool() {
            tails += 1;
        }
        tails
    }
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }

    fn next_bool(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

/// Creates the default generator, deterministic when a seed is given.
pub fn default_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_and_index_ranges() {
        let mut rng = default_rng(Some(7));
        for _ in 0..10_000 {
            let unit = rng.next_unit();
            assert!((0.0..1.0).contains(&unit));
            assert!(rng.next_index(3) < 3);
        }
    }

    #[test]
    fn test_tails_before_head_is_geometric() {
        let mut rng = default_rng(Some(42));
        let trials = 100_000;
        let total: u64 = (0..trials).map(|_| rng.tails_before_head()).sum();
        let mean = total as f64 / trials as f64;
        // Geometric(1/2) counting failures has mean 1.
        assert!((mean - 1.0).abs() < 0.05, "mean tails {mean}");
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = default_rng(Some(9));
        let mut b = default_rng(Some(9));
        for _ in 0..100 {
            assert_eq!(a.next_index(1000), b.next_index(1000));
        }
    }
}
