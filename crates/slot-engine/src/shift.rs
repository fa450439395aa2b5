//! Work shifts — contiguous blocks of working time on one day.
//!
//! A shift has no identity of its own; it exists only as validated input to
//! slot expansion. Raw form input arrives as [`ShiftDraft`] (unparsed `HH:mm`
//! strings) and becomes a [`Shift`] once validation succeeds.

use serde::{Deserialize, Serialize};

use crate::timeofday::TimeOfDay;

/// A validated working interval within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl Shift {
    pub const fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Signed length in minutes. Negative when the end precedes the start,
    /// which validation reports as an invalid range.
    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.end_time.minutes()) - i64::from(self.start_time.minutes())
    }

    /// How many whole slots of `slot_duration_minutes` fit into this shift.
    /// Partial trailing intervals never count.
    pub fn slot_capacity(&self, slot_duration_minutes: u32) -> u32 {
        if slot_duration_minutes == 0 {
            return 0;
        }
        let minutes = self.duration_minutes().max(0) as u32;
        minutes / slot_duration_minutes
    }
}

/// Unvalidated shift input as submitted by a form or plan file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDraft {
    pub start_time: String,
    pub end_time: String,
}

impl ShiftDraft {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}
