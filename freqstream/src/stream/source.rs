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

use std::io::BufRead;

use crate::config::MalformedPolicy;
use crate::error::Error;
use crate::error::ErrorKind;

/// Raw stream records delivered together, one token per record.
pub type Batch = Vec<String>;

/// Producer of the stream, one batch at a time.
pub trait BatchSource {
    /// Returns the next batch, or `None` once the stream has ended.
    ///
    /// Implementations may block until a batch is available.
    fn next_batch(&mut self) -> Result<Option<Batch>, Error>;
}

/// Source replaying batches held in memory.
#[derive(Debug, Clone)]
pub struct VecSource {
    batches: std::vec::IntoIter<Batch>,
}

impl VecSource {
    /// Creates a source delivering `batches` in order.
    pub fn new<I, B, T>(batches: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: IntoIterator<Item = T>,
        T: ToString,
    {
        let batches: Vec<Batch> = batches
            .into_iter()
            .map(|batch| batch.into_iter().map(|t| t.to_string()).collect())
            .collect();
        Self {
            batches: batches.into_iter(),
        }
    }

    /// Splits `items` into consecutive batches of at most `batch_size` records.
    pub fn chunked(items: &[i64], batch_size: usize) -> Self {
        Self::new(items.chunks(batch_size.max(1)).map(|c| c.to_vec()))
    }
}

impl BatchSource for VecSource {
    fn next_batch(&mut self) -> Result<Option<Batch>, Error> {
        Ok(self.batches.next())
    }
}

/// Source reading one record per line, grouping up to `batch_size` lines per batch.
///
/// Blank lines are ignored and surrounding whitespace is trimmed.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    batch_size: usize,
    line: String,
    finished: bool,
}

impl<R: BufRead> LineSource<R> {
    /// Creates a line source over `reader`.
    pub fn new(reader: R, batch_size: usize) -> Self {
        Self {
            reader,
            batch_size: batch_size.max(1),
            line: String::new(),
            finished: false,
        }
    }
}

impl<R: BufRead> BatchSource for LineSource<R> {
    fn next_batch(&mut self) -> Result<Option<Batch>, Error> {
        if self.finished {
            return Ok(None);
        }
        let mut batch = Vec::with_capacity(self.batch_size);
        while batch.len() < self.batch_size {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.finished = true;
                    break;
                }
                Ok(_) => {
                    let record = self.line.trim();
                    if !record.is_empty() {
                        batch.push(record.to_string());
                    }
                }
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    return Err(Error::new(ErrorKind::SourceFailed, "failed to read record")
                        .with_context("records_in_batch", batch.len())
                        .set_source(err));
                }
            }
        }
        if batch.is_empty() && self.finished {
            Ok(None)
        } else {
            Ok(Some(batch))
        }
    }
}

/// Parses the records of a batch as items.
///
/// With [`MalformedPolicy::Fail`] the first malformed record is returned as an error;
/// with [`MalformedPolicy::Skip`] malformed records are dropped.
pub fn parse_items(batch: &[String], policy: MalformedPolicy) -> Result<Vec<i64>, Error> {
    let mut items = Vec::with_capacity(batch.len());
    for record in batch {
        match record.trim().parse::<i64>() {
            Ok(item) => items.push(item),
            Err(_) => match policy {
                MalformedPolicy::Fail => return Err(Error::malformed_record(record)),
                MalformedPolicy::Skip => {
                    tracing::warn!(record = %record, "skipping malformed record");
                }
            },
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_line_source_groups_lines() {
        let input = Cursor::new("1\n2\n\n 3 \n4\n5\n");
        let mut source = LineSource::new(input, 2);
        assert_eq!(
            source.next_batch().unwrap(),
            Some(vec!["1".into(), "2".into()])
        );
        assert_eq!(
            source.next_batch().unwrap(),
            Some(vec!["3".into(), "4".into()])
        );
        assert_eq!(source.next_batch().unwrap(), Some(vec!["5".into()]));
        assert_eq!(source.next_batch().unwrap(), None);
        assert_eq!(source.next_batch().unwrap(), None);
    }

    #[test]
    fn test_vec_source_chunks() {
        let mut source = VecSource::chunked(&[1, 2, 3, 4, 5], 2);
        assert_eq!(source.next_batch().unwrap().map(|b| b.len()), Some(2));
        assert_eq!(source.next_batch().unwrap().map(|b| b.len()), Some(2));
        assert_eq!(source.next_batch().unwrap(), Some(vec!["5".to_string()]));
        assert!(source.next_batch().unwrap().is_none());
    }

    #[test]
    fn test_parse_items_policies() {
        let batch: Batch = vec!["10".into(), "x".into(), "-3".into()];
        let err = parse_items(&batch, MalformedPolicy::Fail).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRecord);
        assert_eq!(err.context("record"), Some("x"));

        let items = parse_items(&batch, MalformedPolicy::Skip).unwrap();
        assert_eq!(items, vec![10, -3]);
    }
}
