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

//! Error types for freqstream operations

use std::fmt;

/// ErrorKind is all kinds of Error of freqstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The stream configuration is invalid.
    ConfigInvalid,
    /// A stream record could not be parsed as an item.
    MalformedRecord,
    /// The batch source failed to deliver the next batch.
    SourceFailed,
}

impl ErrorKind {
    /// Convert this error kind instance into static str.
    pub const fn into_static(self) -> &'static str {
        match self {
            ErrorKind::ConfigInvalid => "ConfigInvalid",
            ErrorKind::MalformedRecord => "MalformedRecord",
            ErrorKind::SourceFailed => "SourceFailed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

/// Error is the error struct returned by all freqstream functions.
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
    source: Option<anyhow::Error>,
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: Vec::default(),
            source: None,
        }
    }

    pub(crate) fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    pub(crate) fn malformed_record(record: &str) -> Self {
        Self::new(ErrorKind::MalformedRecord, "record is not an integer")
            .with_context("record", record)
    }

    /// Add more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Set source for error.
    ///
    /// # Panics
    ///
    /// Panics if the source has been set.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::error::Error as _;
    /// use freqstream::error::{Error, ErrorKind};
    ///
    /// let mut error = Error::new(ErrorKind::SourceFailed, "failed to read batch");
    /// assert!(error.source().is_none());
    /// error = error.set_source(std::io::Error::new(std::io::ErrorKind::Other, "IO error"));
    /// assert!(error.source().is_some());
    /// ```
    pub fn set_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        assert!(self.source.is_none(), "the source error has been set");
        self.source = Some(src.into());
        self
    }

    /// Return error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the value attached to a context key, if any.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("context", &self.context)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        for (key, value) in &self.context {
            write!(f, ", {key} = {value}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|v| v.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context_and_message() {
        let err = Error::config_invalid("phi must be in (0, 1)");
        let err = err.with_context("phi", 1.5);
        assert_eq!(
            err.to_string(),
            "ConfigInvalid: phi must be in (0, 1), phi = 1.5"
        );
        assert_eq!(err.context("phi"), Some("1.5"));
        assert_eq!(err.context("delta"), None);
    }

    #[test]
    fn test_malformed_record_carries_token() {
        let err = Error::malformed_record("12a");
        assert_eq!(err.kind(), ErrorKind::MalformedRecord);
        assert_eq!(err.context("record"), Some("12a"));
        assert_eq!(
            err.to_string(),
            "MalformedRecord: record is not an integer, record = 12a"
        );
    }

    #[test]
    fn test_source_is_exposed_through_std_error() {
        use std::error::Error as _;

        let io = std::io::Error::other("connection reset");
        let err = Error::new(ErrorKind::SourceFailed, "failed to read record");
        let err = err.set_source(io);
        assert_eq!(err.to_string(), "SourceFailed: failed to read record");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("connection reset"));
    }
}
