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

use parking_lot::Condvar;
use parking_lot::Mutex;

/// Why an ingestion run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The cumulative stream length reached the item budget.
    BudgetReached,
    /// The source ran out of batches before the budget was reached.
    SourceExhausted,
    /// Parsing or the source failed.
    Failed,
}

/// One-shot gate a controller blocks on until the run is over.
///
/// Only the first release is recorded; later releases are ignored.
#[derive(Debug, Default)]
pub struct CompletionGate {
    state: Mutex<Option<StopReason>>,
    released: Condvar,
}

impl CompletionGate {
    /// Creates a closed gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the gate. Returns `true` if this call was the one that opened it.
    pub fn release(&self, reason: StopReason) -> bool {
        let mut state = self.state.lock();
        if state.is_some() {
            return false;
        }
        *state = Some(reason);
        self.released.notify_all();
        true
    }

    /// Returns true once the gate has been opened.
    pub fn is_released(&self) -> bool {
        self.state.lock().is_some()
    }

    /// Returns the reason of the first release, if any.
    pub fn reason(&self) -> Option<StopReason> {
        *self.state.lock()
    }

    /// Blocks until the gate is opened and returns the first release reason.
    pub fn wait(&self) -> StopReason {
        let mut state = self.state.lock();
        loop {
            if let Some(reason) = *state {
                return reason;
            }
            self.released.wait(&mut state);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_first_release_wins() {
        let gate = CompletionGate::new();
        assert!(!gate.is_released());
        assert!(gate.release(StopReason::BudgetReached));
        assert!(!gate.release(StopReason::Failed));
        assert_eq!(gate.reason(), Some(StopReason::BudgetReached));
        assert_eq!(gate.wait(), StopReason::BudgetReached);
    }

    #[test]
    fn test_wait_blocks_until_released() {
        let gate = Arc::new(CompletionGate::new());
        let waiter = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || gate.wait())
        };
        gate.release(StopReason::SourceExhausted);
        assert_eq!(waiter.join().unwrap(), StopReason::SourceExhausted);
    }
}
