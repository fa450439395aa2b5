//! Error types for the scheduling console.
//!
//! Nothing here is fatal: every failure leaves the screen in a state the
//! user can act on again. The worst case is "the action did not happen,
//! try again".

use slot_engine::ValidationReport;
use thiserror::Error;

/// Failures crossing the slot persistence API boundary.
///
/// The server's message text is preserved verbatim in the stale and rejected
/// variants so the user sees exactly what the backend reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Backend state moved underneath us: a slot booked between lookup and
    /// deletion, or a conflicting slot created since the last fetch.
    #[error("{0}")]
    Stale(String),

    /// The backend rejected the request outright.
    #[error("{0}")]
    Rejected(String),

    /// The request never completed cleanly.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Failures surfaced by the scheduling screen.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScreenError {
    /// Field-tagged input problems; blocks submission, never hits the network.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationReport),

    /// A create/delete round trip is already in flight.
    #[error("another submission is in flight")]
    SubmissionInFlight,

    /// The clicked or targeted slot is not in the loaded window.
    #[error("no slot with id `{0}` is loaded")]
    UnknownSlot(String),

    /// Booked slots are immutable from this screen.
    #[error("slot `{0}` is booked and cannot be deleted")]
    SlotBooked(String),

    /// The dragged range lies entirely in the past.
    #[error("selected range is entirely in the past")]
    PastRange,

    /// The requested action does not apply to the current screen state.
    #[error("cannot {action} while the screen is {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Convenience alias used throughout slot-console.
pub type Result<T> = std::result::Result<T, ScreenError>;
