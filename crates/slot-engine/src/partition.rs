//! Slot partitioning — expands one shift on one calendar date into a
//! sequence of fixed-duration, non-overlapping intervals.
//!
//! Exactly `floor(shift_minutes / slot_duration)` intervals are produced; a
//! partial trailing interval is dropped, never emitted truncated. Seconds are
//! zero by construction: only the hour and minute components of the shift are
//! combined with the date.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::shift::Shift;

/// A single partitioned interval with absolute start and end times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Combine a calendar date with a wall-clock offset.
///
/// Offsets past 24:00 roll over into the following day.
fn at_offset(date: NaiveDate, minutes_from_midnight: u32) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc() + Duration::minutes(i64::from(minutes_from_midnight))
}

/// Partition one shift on one calendar date into bookable slot intervals.
///
/// Intervals start at the shift's start time-of-day on `date` and advance in
/// `slot_duration_minutes` steps until the next interval's end would exceed
/// the shift's end. A zero duration would never terminate, so it produces no
/// intervals; validation rejects it upstream.
pub fn partition_shift(
    date: NaiveDate,
    shift: &Shift,
    slot_duration_minutes: u32,
) -> Vec<SlotInterval> {
    if slot_duration_minutes == 0 {
        return Vec::new();
    }

    let shift_start = at_offset(date, shift.start_time.minutes());
    let shift_end = at_offset(date, shift.end_time.minutes());
    let step = Duration::minutes(i64::from(slot_duration_minutes));

    let mut intervals = Vec::new();
    let mut cursor = shift_start;
    while cursor + step <= shift_end {
        intervals.push(SlotInterval {
            start: cursor,
            end: cursor + step,
        });
        cursor += step;
    }
    intervals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeofday::TimeOfDay;
    use chrono::TimeZone;

    fn shift(start: &str, end: &str) -> Shift {
        Shift::new(
            TimeOfDay::parse(start).unwrap(),
            TimeOfDay::parse(end).unwrap(),
        )
    }

    #[test]
    fn interval_count_matches_capacity() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let s = shift("08:00", "11:00");
        let intervals = partition_shift(date, &s, 30);
        assert_eq!(intervals.len() as u32, s.slot_capacity(30));
    }

    #[test]
    fn late_shift_rolls_into_next_day() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let s = shift("23:00", "25:00");
        let intervals = partition_shift(date, &s, 60);
        assert_eq!(intervals.len(), 2);
        assert_eq!(
            intervals[1].end,
            Utc.with_ymd_and_hms(2025, 6, 3, 1, 0, 0).unwrap()
        );
    }
}
