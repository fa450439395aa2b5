//! Range-selection conflict resolution.
//!
//! When the user drags a start/end range on the calendar, this module
//! decides what that gesture means: delete existing slots, create new ones,
//! or nothing because the range lies entirely in the past. The reference
//! "now" is always an explicit parameter so tests can pin it.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};

use crate::shift::Shift;
use crate::slot::AvailabilitySlot;
use crate::timeofday::TimeOfDay;

/// A raw calendar drag, as emitted by the calendar widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSelection {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A drag that landed on existing slots and needs an explicit user choice.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSelection {
    /// Existing slots whose start falls inside the dragged range, by start.
    pub slots: Vec<AvailabilitySlot>,
    /// Future-or-today dates the drag touched; empty when the whole range is
    /// in the past, which disables the create-new choice.
    pub dates: Vec<NaiveDate>,
    /// Inferred when the drag stayed within one day.
    pub default_shift: Option<Shift>,
}

impl PendingSelection {
    /// The create-new branch is only offered when there is somewhere to
    /// create; deletion of the found slots is always offered.
    pub fn can_create(&self) -> bool {
        !self.dates.is_empty()
    }
}

/// What a calendar drag resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// Existing slots in range: the user must choose between deleting them
    /// and creating over the non-conflicting dates.
    ConflictChoice(PendingSelection),
    /// Nothing in the way: open the creation flow pre-filled.
    CreateNew {
        dates: Vec<NaiveDate>,
        default_shift: Option<Shift>,
    },
    /// The range is entirely in the past; report it, never a silent no-op.
    PastRange,
}

/// Resolve a calendar drag against the currently known slots.
pub fn resolve_range(
    selection: &RangeSelection,
    known_slots: &[AvailabilitySlot],
    now: DateTime<Utc>,
) -> SelectionOutcome {
    let dates = enumerate_dates(selection, now.date_naive());
    let default_shift = infer_shift(selection);

    let mut in_range: Vec<AvailabilitySlot> = known_slots
        .iter()
        .filter(|slot| slot.start_time >= selection.start && slot.start_time < selection.end)
        .cloned()
        .collect();
    in_range.sort_by_key(|slot| slot.start_time);

    if !in_range.is_empty() {
        return SelectionOutcome::ConflictChoice(PendingSelection {
            slots: in_range,
            dates,
            default_shift,
        });
    }

    if dates.is_empty() {
        return SelectionOutcome::PastRange;
    }

    SelectionOutcome::CreateNew {
        dates,
        default_shift,
    }
}

/// Enumerate the calendar dates a drag covers, excluding past days.
///
/// A selection ending exactly at midnight strictly after its start does not
/// include that final day — the widget reports midnight-aligned drags with
/// an exclusive nominal end. When every enumerated day is in the past but
/// the start itself is today-or-later, the start date alone survives.
fn enumerate_dates(selection: &RangeSelection, today: NaiveDate) -> Vec<NaiveDate> {
    let start_date = selection.start.date_naive();
    let mut inclusive_end = selection.end.date_naive();

    if selection.end.time() == NaiveTime::MIN && selection.end > selection.start {
        inclusive_end = inclusive_end.pred_opt().unwrap_or(inclusive_end);
    }

    let dates: Vec<NaiveDate> = start_date
        .iter_days()
        .take_while(|date| *date <= inclusive_end)
        .filter(|date| *date >= today)
        .collect();

    if dates.is_empty() && start_date >= today {
        return vec![start_date];
    }
    dates
}

/// Infer a default shift from a drag confined to a single day.
///
/// Requires both endpoints on the same calendar date and at least one with a
/// non-midnight time-of-day; a full-day (midnight-to-midnight) drag carries
/// no usable shift and the user specifies shifts manually instead. Seconds
/// are discarded — only hour and minute survive into the shift.
fn infer_shift(selection: &RangeSelection) -> Option<Shift> {
    let same_day = selection.start.date_naive() == selection.end.date_naive();
    let timed = selection.start.time() != NaiveTime::MIN || selection.end.time() != NaiveTime::MIN;

    if !(same_day && timed) {
        return None;
    }

    let tod = |dt: DateTime<Utc>| TimeOfDay::from_hm(dt.hour(), dt.minute());

    Some(Shift::new(tod(selection.start), tod(selection.end)))
}
