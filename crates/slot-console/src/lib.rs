//! # slot-console
//!
//! The scheduling screen for practitioner availability: an explicit state
//! machine over [`slot_engine`]'s pure core, an async boundary to the slot
//! persistence API, and the display-event mapping consumed by the calendar
//! widget.
//!
//! The controller owns the authoritative slot window and re-fetches it
//! wholesale after every mutation; it never patches local state
//! optimistically. All "now" references are injected parameters, so flows
//! are fully deterministic under test.
//!
//! ## Modules
//!
//! - [`controller`] — the screen state machine and creation/deletion flows
//! - [`events`] — slot → calendar display-event mapping with styling hints
//! - [`api`] — the `SlotApi` trait the controller consumes
//! - [`client`] — REST/JSON `SlotApi` implementation over `reqwest`
//! - [`error`] — error taxonomy (validation / stale-state / transport)

pub mod api;
pub mod client;
pub mod controller;
pub mod error;
pub mod events;

pub use api::{BatchOutcome, SlotApi};
pub use client::RestSlotApi;
pub use controller::{
    CreationDraft, DeletePrompt, DetailAction, ScheduleScreen, ScreenState, SelectionFlow,
    SlotDetail, FETCH_WINDOW_FUTURE_DAYS, FETCH_WINDOW_PAST_DAYS,
};
pub use error::{ApiError, ScreenError};
pub use events::{CalendarEvent, EventStyle};
