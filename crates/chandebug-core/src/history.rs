//! Bounded in-memory history of emitted lines.
//!
//! Every enabled emission is recorded here before it reaches the sink, so
//! tests and diagnostics can inspect what was logged without capturing
//! output.
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  HistoryBuffer                                   │
//! │  ├── records: VecDeque<HistoryRecord>            │
//! │  │   └── oldest at the front, newest at the back │
//! │  └── capacity: usize (default 100)               │
//! └──────────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// Default number of records kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// One emitted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    /// When the message was emitted
    pub when: DateTime<Utc>,
    /// Channel name
    pub who: String,
    /// Rendered message, without prefix, colour or elapsed suffix
    pub log: String,
}

impl HistoryRecord {
    pub fn new(when: DateTime<Utc>, who: impl Into<String>, log: impl Into<String>) -> Self {
        Self {
            when,
            who: who.into(),
            log: log.into(),
        }
    }
}

/// Capacity-bounded FIFO of [`HistoryRecord`]s shared by all channels.
#[derive(Debug)]
pub struct HistoryBuffer {
    records: RwLock<VecDeque<HistoryRecord>>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: RwLock::new(VecDeque::with_capacity(
                capacity.min(DEFAULT_HISTORY_CAPACITY),
            )),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record, evicting the oldest overflow in the same step.
    pub fn add(&self, record: HistoryRecord) {
        let mut records = self.records.write();
        records.push_back(record);
        if records.len() > self.capacity {
            let excess = records.len() - self.capacity;
            records.drain(..excess);
        }
    }

    /// Copy of the current contents, oldest first.
    pub fn snapshot(&self) -> Vec<HistoryRecord> {
        self.records.read().iter().cloned().collect()
    }

    /// Records emitted by one channel, oldest first.
    pub fn records_for(&self, who: &str) -> Vec<HistoryRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.who == who)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
