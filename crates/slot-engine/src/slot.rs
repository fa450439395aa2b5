//! Slot types shared across the scheduling core and its API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Smallest slot duration the system accepts, in minutes.
pub const MIN_SLOT_DURATION_MINUTES: u32 = 5;

/// Booking state of a persisted slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Available,
    Booked,
}

/// A persisted, bookable time interval owned by the current practitioner.
///
/// Created by persisting expander output; flips to [`SlotStatus::Booked`]
/// through an external booking event observed on re-fetch. Only AVAILABLE
/// slots may ever be deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    /// Server-assigned identifier, opaque to this core.
    pub slot_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: SlotStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Present once a customer has booked the slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
}

impl AvailabilitySlot {
    pub fn is_booked(&self) -> bool {
        self.status == SlotStatus::Booked
    }
}

/// One fully resolved slot-to-be, ready for bulk submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub slot_duration_in_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}
