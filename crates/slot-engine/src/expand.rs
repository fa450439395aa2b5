//! Batch expansion — the cross product of selected dates, validated shifts,
//! and an optional repeat-week count, flattened into slot-creation requests.
//!
//! Expansion is a pure function: identical input produces an identical
//! request list, in a deterministic order (week-major, then date, then shift,
//! then chronological within the shift). The ordering is not semantically
//! required, but tests rely on it.

use chrono::{Duration, NaiveDate};

use crate::partition::partition_shift;
use crate::shift::Shift;
use crate::slot::SlotRequest;

/// A fully validated submission, ready for expansion.
///
/// Produced by [`crate::validate::validate_plan`]; the dates are deduplicated
/// and in submission order, and every shift has passed range, overlap, and
/// capacity checks. The expander trusts this — in particular it does not
/// re-check repeat-week eligibility, which the validating caller enforces.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan {
    pub dates: Vec<NaiveDate>,
    pub shifts: Vec<Shift>,
    pub slot_duration_minutes: u32,
    pub price: Option<f64>,
    pub repeat_weeks: u32,
}

/// Expand a plan into the flat list of slot-creation requests.
///
/// For `week` in `0..=repeat_weeks`, each selected date is shifted by
/// `week * 7` days and every shift is partitioned on that target date.
pub fn expand_plan(plan: &BatchPlan) -> Vec<SlotRequest> {
    let mut requests = Vec::new();

    for week in 0..=plan.repeat_weeks {
        for date in &plan.dates {
            let target = *date + Duration::days(7 * i64::from(week));
            for shift in &plan.shifts {
                for interval in partition_shift(target, shift, plan.slot_duration_minutes) {
                    requests.push(SlotRequest {
                        start_time: interval.start,
                        end_time: interval.end,
                        slot_duration_in_minutes: plan.slot_duration_minutes,
                        price: plan.price,
                    });
                }
            }
        }
    }

    requests
}

/// Whether a date selection is eligible for weekly repetition.
///
/// Repeating is permitted only while the span between the earliest and
/// latest selected date is strictly less than 7 days. An empty selection is
/// trivially eligible; the creation form resets the repeat count to zero the
/// moment a selection change lands in a disallowed state.
pub fn repeat_allowed(dates: &[NaiveDate]) -> bool {
    match (dates.iter().min(), dates.iter().max()) {
        (Some(first), Some(last)) => (*last - *first).num_days() < 7,
        _ => true,
    }
}
