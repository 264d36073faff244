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

//! Exact per-key counting over the admitted prefix of the stream.
//!
//! The exact counter is the ground truth the sampling estimators are checked against.
//! It keeps one entry per distinct item, so its memory grows with the number of
//! distinct items admitted before the item budget is reached.
//!
//! # Usage
//!
//! ```rust
//! # use freqstream::exact::ExactCounter;
//! let counter = ExactCounter::new();
//! counter.ingest_batch(&[1, 1, 2]);
//! counter.ingest_batch(&[3, 1]);
//! assert_eq!(counter.count(1), 3);
//! assert_eq!(counter.true_frequent(2.0), vec![1]);
//! ```

mod counter;

pub use self::counter::ExactCounter;
