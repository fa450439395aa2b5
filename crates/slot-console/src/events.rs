//! Calendar display events.
//!
//! The calendar widget is an external collaborator: it consumes a flat list
//! of events with styling hints and emits clicks and drag ranges back
//! upward. Styling is keyed by booking status and past/future only; nothing
//! else about a slot leaks into the widget.

use chrono::{DateTime, Utc};
use slot_engine::AvailabilitySlot;

/// Styling hints for one rendered event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventStyle {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
    /// Past events render dimmed.
    pub opacity: f32,
}

const AVAILABLE_BACKGROUND: &str = "#dcfce7";
const AVAILABLE_TEXT: &str = "#166534";
const AVAILABLE_BORDER: &str = "1px solid #4ade80";

const BOOKED_BACKGROUND: &str = "#fecaca";
const BOOKED_TEXT: &str = "#991b1b";
const BOOKED_BORDER: &str = "2px solid #f87171";

const PAST_OPACITY: f32 = 0.6;

/// One entry handed to the calendar widget, carrying a back-reference to
/// its slot by id.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub slot_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub style: EventStyle,
}

pub(crate) fn event_for(slot: &AvailabilitySlot, now: DateTime<Utc>) -> CalendarEvent {
    let booked = slot.is_booked();
    let past = slot.end_time < now;

    let style = EventStyle {
        background: if booked {
            BOOKED_BACKGROUND
        } else {
            AVAILABLE_BACKGROUND
        },
        text: if booked { BOOKED_TEXT } else { AVAILABLE_TEXT },
        border: if booked { BOOKED_BORDER } else { AVAILABLE_BORDER },
        opacity: if past { PAST_OPACITY } else { 1.0 },
    };

    CalendarEvent {
        slot_id: slot.slot_id.clone(),
        title: format!(
            "{} - {}",
            slot.start_time.format("%H:%M"),
            slot.end_time.format("%H:%M")
        ),
        start: slot.start_time,
        end: slot.end_time,
        style,
    }
}
