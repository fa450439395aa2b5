//! Wall-clock time-of-day values.
//!
//! Every duration and ordering comparison in the scheduling core happens in
//! minutes since midnight; this module owns the `HH:mm` parsing and the
//! conversion back. Absolute dates never appear here.

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// A wall-clock `HH:mm` value stored as minutes since midnight.
///
/// Parsing enforces only the textual pattern (two 2-digit groups separated by
/// a colon); it performs no hour/minute range check, so `25:00` is a valid
/// 1500-minute value. Combining such a value with a calendar date rolls over
/// into the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u32,
}

impl TimeOfDay {
    /// Parse an `HH:mm` string.
    ///
    /// # Errors
    /// Returns [`FormatError`] when the input is not exactly two 2-digit
    /// groups separated by a colon.
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        let bytes = input.as_bytes();
        let matches_pattern = bytes.len() == 5
            && bytes[0].is_ascii_digit()
            && bytes[1].is_ascii_digit()
            && bytes[2] == b':'
            && bytes[3].is_ascii_digit()
            && bytes[4].is_ascii_digit();

        if !matches_pattern {
            return Err(FormatError(input.to_string()));
        }

        let hours = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
        let minutes = u32::from(bytes[3] - b'0') * 10 + u32::from(bytes[4] - b'0');

        Ok(Self {
            minutes: hours * 60 + minutes,
        })
    }

    /// Build a value directly from hour and minute components.
    pub const fn from_hm(hour: u32, minute: u32) -> Self {
        Self {
            minutes: hour * 60 + minute,
        }
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u32 {
        self.minutes
    }
}

impl FromStr for TimeOfDay {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}
