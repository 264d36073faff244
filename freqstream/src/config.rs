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

//! Run parameters shared by the three estimators.

use crate::error::Error;

/// Largest reservoir a run may ask for, i.e. the smallest accepted `phi` is `1/2^32`.
const MAX_RESERVOIR_CAPACITY: u64 = u32::MAX as u64;

/// What to do with a stream record that does not parse as an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Abort the run on the first malformed record.
    #[default]
    Fail,
    /// Drop the record; it does not count toward the batch size.
    Skip,
}

/// Validated parameters of a frequent-items run.
///
/// # Examples
///
/// ```
/// use freqstream::config::StreamConfig;
///
/// let config = StreamConfig::new(10_000, 0.3, 0.1, 0.2).unwrap();
/// assert_eq!(config.reservoir_capacity(), 4);
/// assert!(config.sticky_rate() > 28.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamConfig {
    budget: u64,
    phi: f64,
    epsilon: f64,
    delta: f64,
}

impl StreamConfig {
    /// Creates a configuration, rejecting out-of-range parameters.
    ///
    /// * `budget` - number of items `n` after which the run stops, must be positive.
    /// * `phi` - frequency threshold in `(0, 1)`.
    /// * `epsilon` - approximation error of sticky sampling in `(0, 1)`.
    /// * `delta` - failure probability of sticky sampling in `(0, 1)`.
    pub fn new(budget: u64, phi: f64, epsilon: f64, delta: f64) -> Result<Self, Error> {
        let config = Self {
            budget,
            phi,
            epsilon,
            delta,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every parameter range.
    pub fn validate(&self) -> Result<(), Error> {
        if self.budget == 0 {
            return Err(Error::config_invalid("the argument n must be positive")
                .with_context("n", self.budget));
        }
        check_open_unit("phi", self.phi)?;
        check_open_unit("epsilon", self.epsilon)?;
        check_open_unit("delta", self.delta)?;
        if 1.0 / self.phi > MAX_RESERVOIR_CAPACITY as f64 {
            return Err(Error::config_invalid("the argument phi is too small")
                .with_context("phi", self.phi));
        }
        if !self.sticky_rate().is_finite() {
            return Err(Error::config_invalid("the sticky sampling rate is not finite")
                .with_context("epsilon", self.epsilon)
                .with_context("delta", self.delta));
        }
        if self.epsilon >= self.phi {
            tracing::warn!(
                phi = self.phi,
                epsilon = self.epsilon,
                "epsilon >= phi, every retained sticky key will be reported as frequent"
            );
        }
        Ok(())
    }

    /// Returns the item budget `n`.
    pub fn budget(&self) -> u64 {
        self.budget
    }

    /// Returns the frequency threshold `phi`.
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Returns the approximation error `epsilon`.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the failure probability `delta`.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the reservoir size `m = ceil(1/phi)`.
    pub fn reservoir_capacity(&self) -> usize {
        (1.0 / self.phi).ceil() as usize
    }

    /// Returns the sticky sampling rate `r = ln(1/(delta*phi)) / epsilon`.
    pub fn sticky_rate(&self) -> f64 {
        (1.0 / (self.delta * self.phi)).ln() / self.epsilon
    }

    /// Returns the count a key needs to be truly frequent in a stream of `stream_length` items.
    pub fn frequency_threshold(&self, stream_length: u64) -> f64 {
        self.phi * stream_length as f64
    }

    /// Returns the estimate a sticky key needs after `processed` items to be reported.
    pub fn sticky_threshold(&self, processed: u64) -> f64 {
        (self.phi - self.epsilon) * processed as f64
    }
}

fn check_open_unit(name: &'static str, value: f64) -> Result<(), Error> {
    if value > 0.0 && value < 1.0 {
        return Ok(());
    }
    let message = format!("the argument {name} must be in (0,1)");
    Err(Error::config_invalid(message).with_context(name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_derived_parameters() {
        let config = StreamConfig::new(10_000, 0.3, 0.1, 0.2).unwrap();
        assert_eq!(config.reservoir_capacity(), 4);
        let expected_rate = (1.0f64 / 0.06).ln() / 0.1;
        assert!((config.sticky_rate() - expected_rate).abs() < 1e-9);
        assert!((config.frequency_threshold(10_000) - 3000.0).abs() < 1e-6);
        assert!((config.sticky_threshold(10_000) - 2000.0).abs() < 1e-6);
    }

    #[test]
    fn test_capacity_rounds_up() {
        let capacity = |phi| {
            let config = StreamConfig::new(1, phi, 0.1, 0.1).unwrap();
            config.reservoir_capacity()
        };
        assert_eq!(capacity(0.25), 4);
        assert_eq!(capacity(0.26), 4);
        assert_eq!(capacity(0.24), 5);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = StreamConfig::new(0, 0.3, 0.1, 0.2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context("n"), Some("0"));

        for (phi, epsilon, delta, name) in [
            (0.0, 0.1, 0.2, "phi"),
            (1.0, 0.1, 0.2, "phi"),
            (0.3, -0.1, 0.2, "epsilon"),
            (0.3, 0.1, 1.5, "delta"),
            (f64::NAN, 0.1, 0.2, "phi"),
        ] {
            let err = StreamConfig::new(100, phi, epsilon, delta).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
            assert!(err.context(name).is_some(), "missing context for {name}");
        }
    }

    #[test]
    fn test_rejects_unusable_derived_parameters() {
        let err = StreamConfig::new(10, 1e-20, 0.1, 0.2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.context("phi").is_some());

        let err = StreamConfig::new(10, 0.3, 1e-320, 0.2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.context("epsilon").is_some());

        let err = StreamConfig::new(10, 1e-9, 0.1, 1e-300).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.context("delta").is_some());

        // A reservoir larger than the budget is still valid.
        let config = StreamConfig::new(10, 0.0078125, 0.005, 0.1).unwrap();
        assert_eq!(config.reservoir_capacity(), 128);
    }
}
