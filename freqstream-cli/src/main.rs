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

//! Command line front end: reads a stream of integers, one per line, from a TCP
//! endpoint or stdin and prints the frequent items found by each estimator.
//!
//! ```bash
//! # 10,000 items from a generator listening on port 8888
//! freqstream 10000 0.3 0.1 0.2 localhost:8888
//!
//! # the same parameters over a file
//! freqstream 10000 0.3 0.1 0.2 - < items.txt
//! ```

use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::net::TcpStream;

use anyhow::Context;
use clap::Parser;
use freqstream::config::MalformedPolicy;
use freqstream::config::StreamConfig;
use freqstream::estimators::Estimators;
use freqstream::stream::IngestOptions;
use freqstream::stream::LineSource;
use freqstream::stream::ingest;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Frequent items of a numeric stream: exact, reservoir and sticky sampling
#[derive(Parser, Debug)]
#[command(name = "freqstream")]
#[command(version)]
struct Args {
    /// Number of stream items to process
    n: u64,

    /// Frequency threshold, in (0, 1)
    phi: f64,

    /// Approximation error of sticky sampling, in (0, 1)
    epsilon: f64,

    /// Failure probability of sticky sampling, in (0, 1)
    delta: f64,

    /// `host:port` of the item generator, or `-` to read stdin
    endpoint: String,

    /// Worker threads processing batches
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Records grouped into one batch
    #[arg(long, default_value_t = 1024)]
    batch_size: usize,

    /// Skip records that are not integers instead of failing
    #[arg(long)]
    skip_malformed: bool,

    /// Seed the samplers for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn open_endpoint(endpoint: &str) -> anyhow::Result<Box<dyn BufRead + Send>> {
    if endpoint == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let stream = TcpStream::connect(endpoint)
        .with_context(|| format!("failed to connect to {endpoint}"))?;
    Ok(Box::new(BufReader::new(stream)))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = StreamConfig::new(args.n, args.phi, args.epsilon, args.delta)?;
    tracing::info!(
        n = config.budget(),
        phi = config.phi(),
        epsilon = config.epsilon(),
        delta = config.delta(),
        endpoint = %args.endpoint,
        "input properties"
    );

    let options = IngestOptions {
        workers: args.workers.max(1),
        queue_depth: args.workers.max(1) * 4,
        malformed: if args.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Fail
        },
    };

    let reader = open_endpoint(&args.endpoint)?;
    let source = LineSource::new(reader, args.batch_size);
    let estimators = Estimators::new(config, args.seed);

    let summary = ingest(&estimators, source, options)?;
    tracing::info!(
        reason = ?summary.reason,
        batches = summary.batches_admitted,
        refused = summary.batches_refused,
        "stream processed"
    );

    print!("{}", estimators.report().with_endpoint(args.endpoint));
    Ok(())
}
