//! The scheduling screen controller.
//!
//! Owns the authoritative in-memory slot list for a rolling window (30 days
//! back through 90 days forward of the injected `now`) and drives the
//! creation and deletion flows as an explicit state machine:
//!
//! | state                 | event                           | next state            |
//! |-----------------------|---------------------------------|-----------------------|
//! | any non-submitting    | `on_range_selected` → conflict  | PendingConflictChoice |
//! | any non-submitting    | `on_range_selected` → create    | SelectingDates        |
//! | any non-submitting    | `on_range_selected` → past      | Idle                  |
//! | any non-submitting    | `open_creation`                 | SelectingDates        |
//! | PendingConflictChoice | `choose_create_new`             | SelectingDates        |
//! | PendingConflictChoice | `choose_delete_existing`        | ConfirmingDelete      |
//! | any non-submitting    | `request_delete_slot`           | ConfirmingDelete      |
//! | SelectingDates        | `submit_creation`               | Submitting → Idle     |
//! | ConfirmingDelete      | `confirm_delete`                | Submitting → Idle     |
//! | any non-submitting    | `cancel`                        | Idle                  |
//!
//! A failed round trip returns to the state it left so the user can fix and
//! resubmit; the `Submitting` guard is engaged before the call and released
//! on every exit path. After any mutation — successful or stale — the whole
//! window is re-fetched rather than patched locally: the slot list is
//! double-booking-critical, so consistency wins over latency. A
//! delete-then-recreate initiated from one gesture is always two sequential
//! round trips, never concurrent.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use slot_engine::{
    expand_plan, resolve_range, validate_plan, AvailabilitySlot, PendingSelection, PlanInput,
    RangeSelection, SelectionOutcome, Shift, SlotStatus,
};

use crate::api::{BatchOutcome, SlotApi};
use crate::error::{Result, ScreenError};
use crate::events::{event_for, CalendarEvent};

/// How far back the slot window reaches, in days.
pub const FETCH_WINDOW_PAST_DAYS: i64 = 30;
/// How far forward the slot window reaches, in days.
pub const FETCH_WINDOW_FUTURE_DAYS: i64 = 90;

/// Named states of the scheduling screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScreenState {
    #[default]
    Idle,
    /// The creation modal is open, seeded with dates and an optional shift.
    SelectingDates(CreationDraft),
    /// A drag landed on existing slots; the user must pick a branch.
    PendingConflictChoice(PendingSelection),
    /// The delete confirmation dialog is open over these slots.
    ConfirmingDelete(Vec<AvailabilitySlot>),
    /// A create/delete round trip is in flight; action controls are disabled.
    Submitting,
}

impl ScreenState {
    fn name(&self) -> &'static str {
        match self {
            ScreenState::Idle => "idle",
            ScreenState::SelectingDates(_) => "selecting dates",
            ScreenState::PendingConflictChoice(_) => "awaiting a conflict choice",
            ScreenState::ConfirmingDelete(_) => "confirming a deletion",
            ScreenState::Submitting => "submitting",
        }
    }

    fn is_submitting(&self) -> bool {
        matches!(self, ScreenState::Submitting)
    }
}

/// Seed values for the creation modal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreationDraft {
    pub dates: Vec<chrono::NaiveDate>,
    pub default_shift: Option<Shift>,
}

/// What a drag gesture asks the surrounding UI to materialize.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionFlow {
    /// Open the conflict dialog: existing slots were found in the range.
    ConflictPrompt {
        slot_count: usize,
        first_start: DateTime<Utc>,
        last_start: DateTime<Utc>,
        /// The create-new choice is only enabled when some date survives.
        can_create: bool,
    },
    /// Open the creation modal pre-filled from the drag.
    OpenCreation(CreationDraft),
    /// Tell the user the range is entirely in the past.
    PastRange,
}

/// Detail card contents for a clicked slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDetail {
    pub slot: AvailabilitySlot,
    pub action: DetailAction,
}

/// What the detail card offers for the clicked slot.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailAction {
    /// AVAILABLE: deletion may be requested.
    OfferDelete,
    /// BOOKED: deletion is refused; view the linked appointment instead.
    ViewAppointment { appointment_id: Option<String> },
}

/// Breakdown shown by the delete confirmation dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletePrompt {
    /// AVAILABLE slots that will actually be deleted.
    pub deletable_count: usize,
    /// BOOKED slots in the selection that will be kept.
    pub booked_kept_count: usize,
    pub first_start: Option<DateTime<Utc>>,
    pub last_start: Option<DateTime<Utc>>,
}

/// The scheduling screen: slot window, state machine, and flows.
pub struct ScheduleScreen<A: SlotApi> {
    api: A,
    slots: Vec<AvailabilitySlot>,
    state: ScreenState,
}

impl<A: SlotApi> ScheduleScreen<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            slots: Vec::new(),
            state: ScreenState::Idle,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// The currently loaded slot window.
    pub fn slots(&self) -> &[AvailabilitySlot] {
        &self.slots
    }

    /// Re-fetch the rolling slot window and replace the list wholesale.
    pub async fn refresh(&mut self, now: DateTime<Utc>) -> Result<()> {
        let range_start = now - Duration::days(FETCH_WINDOW_PAST_DAYS);
        let range_end = now + Duration::days(FETCH_WINDOW_FUTURE_DAYS);

        let slots = self.api.fetch_slots(range_start, range_end).await?;
        info!(count = slots.len(), "refreshed availability window");
        self.slots = slots;
        Ok(())
    }

    /// Map the loaded slots to display events for the calendar widget.
    pub fn events(&self, now: DateTime<Utc>) -> Vec<CalendarEvent> {
        self.slots.iter().map(|slot| event_for(slot, now)).collect()
    }

    /// Handle a click on an existing event. Dismisses any open dialog.
    pub fn on_event_clicked(&mut self, slot_id: &str) -> Result<SlotDetail> {
        self.ensure_not_submitting("select a slot")?;
        self.state = ScreenState::Idle;

        let slot = self.find_slot(slot_id)?.clone();
        let action = match slot.status {
            SlotStatus::Available => DetailAction::OfferDelete,
            SlotStatus::Booked => DetailAction::ViewAppointment {
                appointment_id: slot.appointment_id.clone(),
            },
        };
        Ok(SlotDetail { slot, action })
    }

    /// Handle a drag-select gesture by delegating to the conflict resolver
    /// and transitioning into whichever flow it returns.
    pub fn on_range_selected(
        &mut self,
        selection: RangeSelection,
        now: DateTime<Utc>,
    ) -> Result<SelectionFlow> {
        self.ensure_not_submitting("start a selection")?;

        match resolve_range(&selection, &self.slots, now) {
            SelectionOutcome::ConflictChoice(pending) => {
                let flow = SelectionFlow::ConflictPrompt {
                    slot_count: pending.slots.len(),
                    first_start: pending.slots[0].start_time,
                    last_start: pending.slots[pending.slots.len() - 1].start_time,
                    can_create: pending.can_create(),
                };
                self.state = ScreenState::PendingConflictChoice(pending);
                Ok(flow)
            }
            SelectionOutcome::CreateNew {
                dates,
                default_shift,
            } => {
                let draft = CreationDraft {
                    dates,
                    default_shift,
                };
                self.state = ScreenState::SelectingDates(draft.clone());
                Ok(SelectionFlow::OpenCreation(draft))
            }
            SelectionOutcome::PastRange => {
                self.state = ScreenState::Idle;
                Ok(SelectionFlow::PastRange)
            }
        }
    }

    /// Open the creation modal with no pre-filled dates (the "advanced"
    /// entry point).
    pub fn open_creation(&mut self) -> Result<CreationDraft> {
        self.ensure_not_submitting("open the creation form")?;
        let draft = CreationDraft::default();
        self.state = ScreenState::SelectingDates(draft.clone());
        Ok(draft)
    }

    /// Resolve a pending conflict toward creating new slots over the
    /// non-conflicting dates.
    pub fn choose_create_new(&mut self) -> Result<CreationDraft> {
        let pending = match &self.state {
            ScreenState::PendingConflictChoice(pending) => pending,
            other => {
                return Err(ScreenError::InvalidTransition {
                    state: other.name(),
                    action: "choose to create new slots",
                })
            }
        };

        if !pending.can_create() {
            self.state = ScreenState::Idle;
            return Err(ScreenError::PastRange);
        }

        let draft = CreationDraft {
            dates: pending.dates.clone(),
            default_shift: pending.default_shift,
        };
        self.state = ScreenState::SelectingDates(draft.clone());
        Ok(draft)
    }

    /// Resolve a pending conflict toward deleting the existing slots.
    /// Deletion still requires [`Self::confirm_delete`].
    pub fn choose_delete_existing(&mut self) -> Result<DeletePrompt> {
        let pending = match std::mem::take(&mut self.state) {
            ScreenState::PendingConflictChoice(pending) => pending,
            other => {
                let err = ScreenError::InvalidTransition {
                    state: other.name(),
                    action: "choose to delete existing slots",
                };
                self.state = other;
                return Err(err);
            }
        };

        let prompt = delete_prompt(&pending.slots);
        self.state = ScreenState::ConfirmingDelete(pending.slots);
        Ok(prompt)
    }

    /// Request deletion of a single slot from its detail card. Refused for
    /// booked slots — the backend would reject it anyway, and the user is
    /// redirected toward the appointment instead.
    pub fn request_delete_slot(&mut self, slot_id: &str) -> Result<DeletePrompt> {
        self.ensure_not_submitting("request a deletion")?;

        let slot = self.find_slot(slot_id)?.clone();
        if slot.is_booked() {
            return Err(ScreenError::SlotBooked(slot.slot_id));
        }

        let prompt = delete_prompt(std::slice::from_ref(&slot));
        self.state = ScreenState::ConfirmingDelete(vec![slot]);
        Ok(prompt)
    }

    /// Dismiss any open dialog. An in-flight submission cannot be cancelled;
    /// the guard stays engaged until its round trip resolves.
    pub fn cancel(&mut self) {
        if !self.state.is_submitting() {
            self.state = ScreenState::Idle;
        }
    }

    /// Validate, expand, and submit the creation form.
    ///
    /// On validation failure nothing leaves the screen; on a backend failure
    /// the modal state is restored so the user can resubmit, and the window
    /// is re-fetched so the calendar reflects whatever the backend now holds.
    pub async fn submit_creation(
        &mut self,
        input: &PlanInput,
        now: DateTime<Utc>,
    ) -> Result<BatchOutcome> {
        let draft = match std::mem::take(&mut self.state) {
            ScreenState::SelectingDates(draft) => draft,
            ScreenState::Submitting => {
                self.state = ScreenState::Submitting;
                return Err(ScreenError::SubmissionInFlight);
            }
            other => {
                let err = ScreenError::InvalidTransition {
                    state: other.name(),
                    action: "submit the creation form",
                };
                self.state = other;
                return Err(err);
            }
        };

        let plan = match validate_plan(input, now.date_naive()) {
            Ok(plan) => plan,
            Err(report) => {
                self.state = ScreenState::SelectingDates(draft);
                return Err(ScreenError::Validation(report));
            }
        };

        let requests = expand_plan(&plan);
        self.state = ScreenState::Submitting;

        match self.api.create_slots_batch(&requests).await {
            Ok(outcome) => {
                info!(
                    requested = requests.len(),
                    created = outcome.created_count,
                    "created availability slots"
                );
                self.state = ScreenState::Idle;
                self.refresh_after_mutation(now).await;
                Ok(outcome)
            }
            Err(err) => {
                warn!(error = %err, "slot creation rejected");
                self.state = ScreenState::SelectingDates(draft);
                self.refresh_after_mutation(now).await;
                Err(err.into())
            }
        }
    }

    /// Execute a confirmed deletion.
    ///
    /// Only the AVAILABLE subset of the confirmed selection is sent; booked
    /// slots are kept and reported. Returns how many slots were deleted.
    pub async fn confirm_delete(&mut self, now: DateTime<Utc>) -> Result<usize> {
        let slots = match std::mem::take(&mut self.state) {
            ScreenState::ConfirmingDelete(slots) => slots,
            ScreenState::Submitting => {
                self.state = ScreenState::Submitting;
                return Err(ScreenError::SubmissionInFlight);
            }
            other => {
                let err = ScreenError::InvalidTransition {
                    state: other.name(),
                    action: "confirm the deletion",
                };
                self.state = other;
                return Err(err);
            }
        };

        let mut deletable: Vec<&AvailabilitySlot> =
            slots.iter().filter(|slot| !slot.is_booked()).collect();
        deletable.sort_by_key(|slot| slot.start_time);

        if deletable.is_empty() {
            // Every targeted slot is booked; keep the dialog open so the
            // user sees why nothing can happen.
            let first_booked = slots[0].slot_id.clone();
            self.state = ScreenState::ConfirmingDelete(slots);
            return Err(ScreenError::SlotBooked(first_booked));
        }

        let ids: Vec<String> = deletable
            .iter()
            .map(|slot| slot.slot_id.clone())
            .collect();
        self.state = ScreenState::Submitting;

        match self.api.delete_slots(&ids).await {
            Ok(()) => {
                info!(count = ids.len(), "deleted availability slots");
                self.state = ScreenState::Idle;
                self.refresh_after_mutation(now).await;
                Ok(ids.len())
            }
            Err(err) => {
                warn!(error = %err, "slot deletion rejected");
                self.state = ScreenState::ConfirmingDelete(slots);
                self.refresh_after_mutation(now).await;
                Err(err.into())
            }
        }
    }

    /// Best-effort window re-fetch after a mutation round trip. A failure
    /// here must not mask the mutation's own outcome; the stale list simply
    /// survives until the next refresh.
    async fn refresh_after_mutation(&mut self, now: DateTime<Utc>) {
        if let Err(err) = self.refresh(now).await {
            warn!(error = %err, "window re-fetch after mutation failed");
        }
    }

    fn find_slot(&self, slot_id: &str) -> Result<&AvailabilitySlot> {
        self.slots
            .iter()
            .find(|slot| slot.slot_id == slot_id)
            .ok_or_else(|| ScreenError::UnknownSlot(slot_id.to_string()))
    }

    fn ensure_not_submitting(&self, action: &'static str) -> Result<()> {
        if self.state.is_submitting() {
            return Err(ScreenError::InvalidTransition {
                state: self.state.name(),
                action,
            });
        }
        Ok(())
    }
}

fn delete_prompt(slots: &[AvailabilitySlot]) -> DeletePrompt {
    let mut deletable: Vec<&AvailabilitySlot> =
        slots.iter().filter(|slot| !slot.is_booked()).collect();
    deletable.sort_by_key(|slot| slot.start_time);

    DeletePrompt {
        deletable_count: deletable.len(),
        booked_kept_count: slots.len() - deletable.len(),
        first_start: deletable.first().map(|slot| slot.start_time),
        last_start: deletable.last().map(|slot| slot.start_time),
    }
}
