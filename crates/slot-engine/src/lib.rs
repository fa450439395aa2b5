//! # slot-engine
//!
//! Pure scheduling core for practitioner availability: recurring work shifts
//! across selected calendar days are validated, partitioned into bookable
//! appointment slots of a configured duration, checked against existing
//! slots, and optionally replicated across future weeks.
//!
//! The crate performs no I/O and never reads the clock — every function that
//! cares about "today" takes it as a parameter, so callers (and tests) pin
//! the reference time explicitly.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use slot_engine::{expand_plan, validate_plan, PlanInput, ShiftDraft};
//!
//! let input = PlanInput {
//!     dates: vec![NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()],
//!     shifts: vec![ShiftDraft::new("08:00", "11:00")],
//!     slot_duration_in_minutes: 30,
//!     price: None,
//!     repeat_weeks: 0,
//! };
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//!
//! let plan = validate_plan(&input, today).unwrap();
//! let requests = expand_plan(&plan);
//! assert_eq!(requests.len(), 6); // 3 hours / 30 minutes
//! ```
//!
//! ## Modules
//!
//! - [`timeofday`] — `HH:mm` wall-clock values and minute arithmetic
//! - [`shift`] — work shifts and their unparsed drafts
//! - [`validate`] — field-tagged shift and plan validation
//! - [`partition`] — one shift on one date → fixed-duration intervals
//! - [`expand`] — dates × shifts × repeat weeks → slot-creation requests
//! - [`selection`] — calendar-drag conflict resolution
//! - [`slot`] — slot and request types shared with the API boundary
//! - [`error`] — error types

pub mod error;
pub mod expand;
pub mod partition;
pub mod selection;
pub mod shift;
pub mod slot;
pub mod timeofday;
pub mod validate;

pub use error::FormatError;
pub use expand::{expand_plan, repeat_allowed, BatchPlan};
pub use partition::{partition_shift, SlotInterval};
pub use selection::{resolve_range, PendingSelection, RangeSelection, SelectionOutcome};
pub use shift::{Shift, ShiftDraft};
pub use slot::{AvailabilitySlot, SlotRequest, SlotStatus, MIN_SLOT_DURATION_MINUTES};
pub use timeofday::TimeOfDay;
pub use validate::{validate_plan, validate_shifts, PlanInput, ValidationIssue, ValidationReport};
