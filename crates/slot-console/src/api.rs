//! The slot persistence API boundary.
//!
//! The screen controller only ever talks to this trait; the REST
//! implementation lives in [`crate::client`] and tests substitute their own.
//! All calls operate on slots owned by the currently authenticated
//! practitioner.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use slot_engine::{AvailabilitySlot, SlotRequest};

use crate::error::ApiError;

/// Outcome of a bulk slot creation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    #[serde(default)]
    pub created_count: usize,
    pub message: String,
}

#[async_trait]
pub trait SlotApi: Send + Sync {
    /// All slots owned by the current practitioner overlapping the range.
    async fn fetch_slots(
        &self,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<AvailabilitySlot>, ApiError>;

    /// Bulk-create slots. All-or-nothing: a conflict that appeared since the
    /// last fetch rejects the entire batch.
    async fn create_slots_batch(&self, requests: &[SlotRequest]) -> Result<BatchOutcome, ApiError>;

    /// Delete slots by id. Fails if any targeted slot is no longer
    /// AVAILABLE — e.g. booked between lookup and this call. The caller
    /// recovers by re-fetching and informing the user, never by retrying
    /// silently.
    async fn delete_slots(&self, slot_ids: &[String]) -> Result<(), ApiError>;
}
