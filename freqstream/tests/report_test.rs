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

use freqstream::config::StreamConfig;
use freqstream::estimators::Estimators;
use freqstream::stream::IngestOptions;
use freqstream::stream::VecSource;
use freqstream::stream::ingest;

#[test]
fn test_report_rendering() {
    // Four items all fall in the first sticky bucket and fit the reservoir, so every
    // estimator is deterministic.
    let config = StreamConfig::new(4, 0.3, 0.1, 0.2).unwrap();
    let estimators = Estimators::new(config, Some(1));
    let source = VecSource::new([vec![7, 7], vec![3, 7]]);
    let options = IngestOptions {
        workers: 1,
        ..IngestOptions::default()
    };
    ingest(&estimators, source, options).unwrap();

    let report = estimators.report().with_endpoint("localhost:8886");
    insta::assert_snapshot!(report.to_string(), @r"
    INPUT PROPERTIES
    n = 4 phi = 0.3 epsilon = 0.1 delta = 0.2 endpoint = localhost:8886
    Expected items: 4   Processed items: 4
    EXACT ALGORITHM
    Number of items in the data structure = 2
    Number of true frequent items = 1
    7
    RESERVOIR SAMPLING
    Size m of the sample = 4
    Number of estimated frequent items = 2
    Estimated frequent items:
    3 -
    7 +
    STICKY SAMPLING
    Number of items in the Hash Table = 2
    Number of estimated frequent items = 2
    Estimated frequent items:
    3 -
    7 +
    ");
}

#[test]
fn test_report_before_any_batch() {
    let config = StreamConfig::new(100, 0.5, 0.1, 0.1).unwrap();
    let estimators = Estimators::new(config, Some(2));
    let report = estimators.report();
    assert_eq!(report.stream_length(), 0);
    assert_eq!(report.exact_keys(), 0);
    // No keys yet, so nothing is frequent even at a zero threshold.
    assert!(report.true_frequent().is_empty());
    assert_eq!(report.reservoir_capacity(), 2);
    assert!(report.reservoir_items().is_empty());
    assert_eq!(report.sticky_keys(), 0);
    assert!(report.sticky_items().is_empty());

    let rendered = report.to_string();
    let properties = rendered.lines().nth(1);
    assert_eq!(
        properties,
        Some("n = 100 phi = 0.5 epsilon = 0.1 delta = 0.1")
    );
}
