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

/// Maps processed-item counts to sticky sampling buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketSchedule {
    rate: f64,
}

impl BucketSchedule {
    /// Creates the schedule for sampling rate `r`.
    ///
    /// # Panics
    ///
    /// Panics if `rate` is not a positive finite number.
    pub fn new(rate: f64) -> Self {
        assert!(
            rate.is_finite() && rate > 0.0,
            "sampling rate must be positive and finite"
        );
        Self { rate }
    }

    /// Returns the sampling rate `r`.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the bucket holding the item with 0-based index `k`.
    pub fn bucket_of(&self, k: u64) -> u32 {
        let k = k as f64;
        if k < 2.0 * self.rate {
            0
        } else {
            (k / self.rate).log2().floor() as u32
        }
    }

    /// Returns the probability `1/2^i` of admitting an unseen item in bucket `i`.
    pub fn admission_probability(&self, bucket: u32) -> f64 {
        0.5f64.powi(bucket as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        let schedule = BucketSchedule::new(10.0);
        assert_eq!(schedule.bucket_of(0), 0);
        assert_eq!(schedule.bucket_of(19), 0);
        assert_eq!(schedule.bucket_of(20), 1);
        assert_eq!(schedule.bucket_of(39), 1);
        assert_eq!(schedule.bucket_of(40), 2);
        assert_eq!(schedule.bucket_of(79), 2);
        assert_eq!(schedule.bucket_of(80), 3);
    }

    #[test]
    fn test_fractional_rate() {
        let schedule = BucketSchedule::new(2.5);
        assert_eq!(schedule.bucket_of(4), 0);
        assert_eq!(schedule.bucket_of(5), 1);
        assert_eq!(schedule.bucket_of(9), 1);
        assert_eq!(schedule.bucket_of(10), 2);
    }

    #[test]
    fn test_admission_halves_per_bucket() {
        let schedule = BucketSchedule::new(1.0);
        assert_eq!(schedule.admission_probability(0), 1.0);
        assert_eq!(schedule.admission_probability(1), 0.5);
        assert_eq!(schedule.admission_probability(4), 0.0625);
    }

    #[test]
    #[should_panic(expected = "sampling rate must be positive")]
    fn test_rejects_zero_rate() {
        BucketSchedule::new(0.0);
    }
}
