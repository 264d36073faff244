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
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::thread;

use crossbeam_channel::Sender;
use parking_lot::Mutex;

use crate::common::random::RandomSource;
use crate::config::MalformedPolicy;
use crate::error::Error;
use crate::estimators::Estimators;
use crate::stream::Batch;
use crate::stream::BatchSource;
use crate::stream::CompletionGate;
use crate::stream::StopReason;
use crate::stream::parse_items;

const DEFAULT_WORKERS: usize = 4;
const DEFAULT_QUEUE_DEPTH: usize = 16;

/// Tuning of the ingestion loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Number of worker threads processing batches, at least 1.
    pub workers: usize,
    /// Number of batches buffered between the source and the workers, at least 1.
    pub queue_depth: usize,
    /// Handling of records that are not decimal integers.
    pub malformed: MalformedPolicy,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_depth: DEFAULT_QUEUE_DEPTH,
            malformed: MalformedPolicy::default(),
        }
    }
}

/// Outcome of an ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// First reason the run stopped for.
    pub reason: StopReason,
    /// Cumulative number of items in admitted batches.
    pub stream_length: u64,
    /// Batches forwarded to the estimators.
    pub batches_admitted: u64,
    /// Non-empty batches refused because the budget was already exhausted.
    pub batches_refused: u64,
    /// Items consumed by the reservoir sampler.
    pub reservoir_processed: u64,
    /// Items consumed by the sticky sampler.
    pub sticky_processed: u64,
}

/// Drives a [`BatchSource`] into a set of [`Estimators`] until the item budget is met.
///
/// A feeder thread pulls batches from the source into a bounded queue drained by a
/// pool of workers. Each worker parses a batch, admits it against the budget on the
/// shared clock and forwards it to the estimators. The calling thread blocks on a
/// [`CompletionGate`] that opens the first time the budget is reached, the source ends,
/// or something fails. The feeder then stops asking for batches while queued and
/// in-flight batches are drained before [`IngestionLoop::run`] returns.
pub struct IngestionLoop<'a, R> {
    estimators: &'a Estimators<R>,
    options: IngestOptions,
    gate: CompletionGate,
    failure: Mutex<Option<Error>>,
    live_workers: AtomicUsize,
    batches_admitted: AtomicU64,
    batches_refused: AtomicU64,
}

impl<'a, R> IngestionLoop<'a, R>
where
    R: RandomSource + Send,
{
    /// Creates a loop feeding `estimators`.
    pub fn new(estimators: &'a Estimators<R>, options: IngestOptions) -> Self {
        Self {
            estimators,
            options,
            gate: CompletionGate::new(),
            failure: Mutex::new(None),
            live_workers: AtomicUsize::new(0),
            batches_admitted: AtomicU64::new(0),
            batches_refused: AtomicU64::new(0),
        }
    }

    /// Consumes `source` until the run stops and returns its summary.
    ///
    /// Returns the first parse or source error if the run failed.
    pub fn run<S>(self, mut source: S) -> Result<RunSummary, Error>
    where
        S: BatchSource + Send,
    {
        let workers = self.options.workers.max(1);
        let queue_depth = self.options.queue_depth.max(1);
        let (sender, receiver) = crossbeam_channel::bounded::<Batch>(queue_depth);
        self.live_workers.store(workers, Ordering::Release);

        tracing::info!(
            budget = self.estimators.config().budget(),
            workers,
            "starting ingestion"
        );

        let this = &self;
        let reason = thread::scope(|scope| {
            for _ in 0..workers {
                let receiver = receiver.clone();
                scope.spawn(move || {
                    for batch in receiver {
                        this.process_batch(batch);
                    }
                    this.worker_finished();
                });
            }
            drop(receiver);

            scope.spawn(move || this.feed(&mut source, sender));

            let reason = this.gate.wait();
            tracing::info!(?reason, "stopping ingestion, draining in-flight batches");
            reason
        });

        if let Some(err) = self.failure.lock().take() {
            return Err(err);
        }

        let summary = RunSummary {
            reason,
            stream_length: self.estimators.clock().stream_length(),
            batches_admitted: self.batches_admitted.load(Ordering::Acquire),
            batches_refused: self.batches_refused.load(Ordering::Acquire),
            reservoir_processed: self.estimators.reservoir().processed(),
            sticky_processed: self.estimators.sticky().processed(),
        };
        tracing::info!(
            stream_length = summary.stream_length,
            processed = summary.sticky_processed,
            "ingestion stopped"
        );
        Ok(summary)
    }

    fn feed<S: BatchSource>(&self, source: &mut S, sender: Sender<Batch>) {
        while !self.gate.is_released() {
            match source.next_batch() {
                Ok(Some(batch)) => {
                    if sender.send(batch).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    self.fail(err);
                    break;
                }
            }
        }
    }

    fn process_batch(&self, batch: Batch) {
        if self.gate.reason() == Some(StopReason::Failed) {
            return;
        }
        let items = match parse_items(&batch, self.options.malformed) {
            Ok(items) => items,
            Err(err) => {
                self.fail(err);
                return;
            }
        };
        if items.is_empty() {
            return;
        }

        let budget = self.estimators.config().budget();
        let Some(stream_length) = self
            .estimators
            .clock()
            .admit_batch(items.len() as u64, budget)
        else {
            self.batches_refused.fetch_add(1, Ordering::AcqRel);
            return;
        };
        self.batches_admitted.fetch_add(1, Ordering::AcqRel);

        self.estimators.ingest_batch(&items);
        tracing::debug!(size = items.len(), stream_length, "batch processed");

        if stream_length >= budget && self.gate.release(StopReason::BudgetReached) {
            tracing::info!(stream_length, budget, "item budget reached");
        }
    }

    fn worker_finished(&self) {
        // The queue only closes once the feeder is done, so the last worker out knows
        // every delivered batch has been processed.
        if self.live_workers.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.gate.release(StopReason::SourceExhausted);
        }
    }

    fn fail(&self, err: Error) {
        tracing::error!(error = %err, "ingestion failed");
        let mut failure = self.failure.lock();
        if failure.is_none() {
            *failure = Some(err);
        }
        drop(failure);
        self.gate.release(StopReason::Failed);
    }
}

/// Runs `source` into `estimators` with `options`.
pub fn ingest<R, S>(
    estimators: &Estimators<R>,
    source: S,
    options: IngestOptions,
) -> Result<RunSummary, Error>
where
    R: RandomSource + Send,
    S: BatchSource + Send,
{
    IngestionLoop::new(estimators, options).run(source)
}
