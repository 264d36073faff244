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

//! Frequent items of an unbounded numeric stream, estimated three ways.
//!
//! Batches of integer records are fed, under a fixed item budget, to:
//!
//! - an [exact counter](exact) giving the ground truth,
//! - a [reservoir sampler](reservoir) keeping a uniform sample of `ceil(1/phi)` items,
//! - a [sticky sampler](sticky) estimating frequencies with bounded expected memory.
//!
//! The [ingestion loop](stream) admits batches until the budget is met, and the
//! [report](report) lists what each estimator judges frequent next to the exact answer.

pub mod common;
pub mod config;
pub mod error;
pub mod estimators;
pub mod exact;
pub mod report;
pub mod reservoir;
pub mod sticky;
pub mod stream;
