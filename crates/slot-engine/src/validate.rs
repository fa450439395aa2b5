//! Shift and plan validation with field-tagged issues.
//!
//! Validation never panics and collects everything it can: range failures
//! gate the later checks, the overlap scan reports only the first
//! conflicting pair (tagging both offending fields), and capacity issues
//! are collected independently so a form can highlight every offending row
//! before resubmission.

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::expand::{repeat_allowed, BatchPlan};
use crate::shift::{Shift, ShiftDraft};
use crate::slot::MIN_SLOT_DURATION_MINUTES;
use crate::timeofday::TimeOfDay;

/// Which side of a shift an issue is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftField {
    StartTime,
    EndTime,
}

/// Field path an issue is tagged to, addressed like the submitted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    SelectedDates,
    Shifts,
    Shift { index: usize, field: ShiftField },
    SlotDuration,
    RepeatWeeks,
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::SelectedDates => f.write_str("selectedDates"),
            FieldPath::Shifts => f.write_str("shifts"),
            FieldPath::Shift { index, field } => {
                let field = match field {
                    ShiftField::StartTime => "startTime",
                    ShiftField::EndTime => "endTime",
                };
                write!(f, "shifts[{index}].{field}")
            }
            FieldPath::SlotDuration => f.write_str("slotDurationInMinutes"),
            FieldPath::RepeatWeeks => f.write_str("repeatWeeks"),
        }
    }
}

/// Classification of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// A time string did not match the `HH:mm` pattern.
    Format,
    /// A shift's end does not come after its start.
    InvalidRange,
    /// Two shifts in the same submission overlap in time.
    Overlap,
    /// A shift is shorter than one slot duration.
    TooShort,
    /// A required part of the submission is absent.
    Missing,
    /// A value falls outside what the submission allows.
    OutOfRange,
}

/// One field-tagged validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: FieldPath,
    pub kind: IssueKind,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: FieldPath, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every issue collected from one submission.
///
/// Returned as the `Err` side of validation so callers can render all
/// field-level problems at once; submission is simply blocked until the
/// report would be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether any issue of `kind` is tagged to `path`.
    pub fn has(&self, path: FieldPath, kind: IssueKind) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.path == path && issue.kind == kind)
    }

    fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    fn into_result<T>(self, ok: impl FnOnce() -> T) -> Result<T, ValidationReport> {
        if self.is_empty() {
            Ok(ok())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Raw submission input, as a form or plan file provides it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    pub dates: Vec<NaiveDate>,
    pub shifts: Vec<ShiftDraft>,
    pub slot_duration_in_minutes: u32,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub repeat_weeks: u32,
}

/// Validate an entire submission and produce an expansion-ready plan.
///
/// `today` is the injected reference date for past-day checks; callers pin
/// it rather than reading the wall clock here. Dates are deduplicated in
/// submission order. All collectable issues are gathered before returning.
pub fn validate_plan(input: &PlanInput, today: NaiveDate) -> Result<BatchPlan, ValidationReport> {
    let mut report = ValidationReport::default();

    let mut dates: Vec<NaiveDate> = Vec::with_capacity(input.dates.len());
    for date in &input.dates {
        if !dates.contains(date) {
            dates.push(*date);
        }
    }

    if dates.is_empty() {
        report.push(ValidationIssue::new(
            FieldPath::SelectedDates,
            IssueKind::Missing,
            "Select at least one day.",
        ));
    }
    for date in &dates {
        if *date < today {
            report.push(ValidationIssue::new(
                FieldPath::SelectedDates,
                IssueKind::OutOfRange,
                format!("Selected day {date} is in the past."),
            ));
        }
    }

    if input.shifts.is_empty() {
        report.push(ValidationIssue::new(
            FieldPath::Shifts,
            IssueKind::Missing,
            "Add at least one shift.",
        ));
    }

    if input.slot_duration_in_minutes < MIN_SLOT_DURATION_MINUTES {
        report.push(ValidationIssue::new(
            FieldPath::SlotDuration,
            IssueKind::OutOfRange,
            format!("Duration must be {MIN_SLOT_DURATION_MINUTES} minutes or more."),
        ));
    }

    let shifts = parse_shift_drafts(&input.shifts, &mut report);

    if let Some(shifts) = &shifts {
        match validate_shifts(shifts, input.slot_duration_in_minutes) {
            Ok(()) => {}
            Err(shift_report) => {
                for issue in shift_report.issues {
                    report.push(issue);
                }
            }
        }
    }

    if input.repeat_weeks > 0 && !repeat_allowed(&dates) {
        report.push(ValidationIssue::new(
            FieldPath::RepeatWeeks,
            IssueKind::OutOfRange,
            "Repeating requires all selected days to fall within one week.",
        ));
    }

    let slot_duration_minutes = input.slot_duration_in_minutes;
    let price = input.price;
    let repeat_weeks = input.repeat_weeks;
    report.into_result(move || BatchPlan {
        dates,
        shifts: shifts.unwrap_or_default(),
        slot_duration_minutes,
        price,
        repeat_weeks,
    })
}

/// Parse every draft, tagging format issues to the offending field.
/// Returns `None` when any draft failed, since the later checks need every
/// shift in minute form.
fn parse_shift_drafts(
    drafts: &[ShiftDraft],
    report: &mut ValidationReport,
) -> Option<Vec<Shift>> {
    let mut shifts = Vec::with_capacity(drafts.len());
    let mut all_parsed = true;

    for (index, draft) in drafts.iter().enumerate() {
        let start = TimeOfDay::parse(&draft.start_time);
        let end = TimeOfDay::parse(&draft.end_time);

        if start.is_err() {
            report.push(ValidationIssue::new(
                FieldPath::Shift {
                    index,
                    field: ShiftField::StartTime,
                },
                IssueKind::Format,
                "Invalid format (HH:mm).",
            ));
        }
        if end.is_err() {
            report.push(ValidationIssue::new(
                FieldPath::Shift {
                    index,
                    field: ShiftField::EndTime,
                },
                IssueKind::Format,
                "Invalid format (HH:mm).",
            ));
        }

        match (start, end) {
            (Ok(start), Ok(end)) => shifts.push(Shift::new(start, end)),
            _ => all_parsed = false,
        }
    }

    all_parsed.then_some(shifts)
}

/// Validate a parsed shift set against the configured slot duration.
///
/// Range failures are reported alone: the overlap and capacity checks only
/// run once every shift has a forward range. The overlap scan stops at the
/// first conflicting pair in start order, tagging both the earlier shift's
/// end field and the later shift's start field by their original submission
/// indices. Capacity issues are independent of the overlap scan and both may
/// appear in one report across different shifts.
pub fn validate_shifts(
    shifts: &[Shift],
    slot_duration_minutes: u32,
) -> Result<(), ValidationReport> {
    let mut report = ValidationReport::default();

    for (index, shift) in shifts.iter().enumerate() {
        if shift.duration_minutes() <= 0 {
            report.push(ValidationIssue::new(
                FieldPath::Shift {
                    index,
                    field: ShiftField::EndTime,
                },
                IssueKind::InvalidRange,
                "End time must be after start time.",
            ));
        }
    }
    if !report.is_empty() {
        return Err(report);
    }

    check_overlaps(shifts, &mut report);

    // Skipped when the duration itself is invalid; the duration issue is
    // already on the report and flagging every shift would only add noise.
    if slot_duration_minutes >= MIN_SLOT_DURATION_MINUTES {
        for (index, shift) in shifts.iter().enumerate() {
            if shift.slot_capacity(slot_duration_minutes) < 1 {
                report.push(ValidationIssue::new(
                    FieldPath::Shift {
                        index,
                        field: ShiftField::EndTime,
                    },
                    IssueKind::TooShort,
                    "Shift is shorter than the slot duration.",
                ));
            }
        }
    }

    report.into_result(|| ())
}

/// Scan start-sorted shifts for the first pair where the next shift begins
/// strictly before the previous one ends. Touching boundaries are allowed.
/// Only the first conflicting pair is reported; scanning stops there.
fn check_overlaps(shifts: &[Shift], report: &mut ValidationReport) {
    let mut sorted: Vec<(usize, &Shift)> = shifts.iter().enumerate().collect();
    sorted.sort_by_key(|(_, shift)| shift.start_time);

    for pair in sorted.windows(2) {
        let (prev_index, prev) = pair[0];
        let (next_index, next) = pair[1];

        if next.start_time < prev.end_time {
            report.push(ValidationIssue::new(
                FieldPath::Shift {
                    index: next_index,
                    field: ShiftField::StartTime,
                },
                IssueKind::Overlap,
                "Shift overlaps with another entry.",
            ));
            report.push(ValidationIssue::new(
                FieldPath::Shift {
                    index: prev_index,
                    field: ShiftField::EndTime,
                },
                IssueKind::Overlap,
                "Shift overlaps with another entry.",
            ));
            break;
        }
    }
}
