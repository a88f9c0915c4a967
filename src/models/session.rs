//! Session slots and the day partition.
//!
//! Sessions are identified by a 1-based contiguous index. Which day a
//! session falls on is configuration — a fixed partition of the index
//! range into contiguous per-day spans — not something derived from data.

use serde::{Deserialize, Serialize};

/// One programming slot.
///
/// Derived on demand from the problem configuration: the capacity list
/// defines the session count, the day partition defines the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// 1-based ordinal, contiguous from 1.
    pub index: usize,
    /// Maximum number of talks assignable to this session.
    pub capacity: u32,
    /// Day number from the partition.
    pub day: u32,
}

/// A contiguous range of session indices belonging to one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySpan {
    /// Day number (unique across the partition).
    pub day: u32,
    /// First session index of the day (1-based, inclusive).
    pub first: usize,
    /// Last session index of the day (inclusive).
    pub last: usize,
}

impl DaySpan {
    /// Creates a day span covering sessions `first..=last`.
    pub fn new(day: u32, first: usize, last: usize) -> Self {
        Self { day, first, last }
    }

    /// Whether the given session index falls on this day.
    #[inline]
    pub fn contains(&self, session: usize) -> bool {
        session >= self.first && session <= self.last
    }

    /// Number of sessions in this span.
    pub fn len(&self) -> usize {
        if self.last >= self.first {
            self.last - self.first + 1
        } else {
            0
        }
    }

    /// Whether the span covers no sessions.
    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }
}
