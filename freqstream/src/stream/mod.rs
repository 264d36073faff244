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

//! Batch ingestion: the shared clock, batch sources and the loop driving the estimators.
//!
//! # Usage
//!
//! ```rust
//! # use freqstream::config::StreamConfig;
//! # use freqstream::estimators::Estimators;
//! # use freqstream::stream::{IngestOptions, StopReason, VecSource, ingest};
//! let config = StreamConfig::new(6, 0.3, 0.1, 0.2).unwrap();
//! let estimators = Estimators::new(config, Some(1));
//! let source = VecSource::new([vec![7, 7, 3], vec![7, 1, 7], vec![2]]);
//!
//! let options = IngestOptions {
//!     workers: 1,
//!     ..IngestOptions::default()
//! };
//! let summary = ingest(&estimators, source, options).unwrap();
//! assert_eq!(summary.reason, StopReason::BudgetReached);
//! assert_eq!(summary.stream_length, 6);
//! assert_eq!(estimators.exact().count(7), 4);
//! ```

mod clock;
mod gate;
mod ingest;
mod source;

pub use self::clock::GlobalClock;
pub use self::gate::CompletionGate;
pub use self::gate::StopReason;
pub use self::ingest::IngestOptions;
pub use self::ingest::IngestionLoop;
pub use self::ingest::RunSummary;
pub use self::ingest::ingest;
pub use self::source::Batch;
pub use self::source::BatchSource;
pub use self::source::LineSource;
pub use self::source::VecSource;
pub use self::source::parse_items;
