//! REST/JSON implementation of the slot persistence API.
//!
//! A thin `reqwest` wrapper speaking the availability-slots endpoints with
//! bearer-token auth. Server message text is preserved verbatim on failures
//! so the screen can show the user exactly what the backend reported.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::warn;

use slot_engine::{AvailabilitySlot, SlotRequest};

use crate::api::{BatchOutcome, SlotApi};
use crate::error::ApiError;

const SLOTS_PATH: &str = "api/availability-slots";
const BATCH_DELETE_PATH: &str = "api/availability-slots/batch";

#[derive(Clone)]
pub struct RestSlotApi {
    http: Client,
    base_url: Url,
    token: String,
}

impl fmt::Debug for RestSlotApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestSlotApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Response envelope the backend wraps list payloads in.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Serialize)]
struct CreateBody<'a> {
    requests: &'a [SlotRequest],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteBody<'a> {
    slot_ids: &'a [String],
}

impl RestSlotApi {
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        let http = Client::builder()
            .user_agent("slot-console/0.1")
            .build()
            .expect("reqwest client");
        Self {
            http,
            base_url,
            token: token.into(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::Transport(err.to_string()))
    }

    /// Map a non-success response to the error taxonomy, pulling the
    /// server's `message` out of the body when one is present.
    async fn error_from(response: Response) -> ApiError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        warn!(%status, %message, "slot API request failed");

        if status == StatusCode::CONFLICT {
            ApiError::Stale(message)
        } else if status.is_client_error() {
            ApiError::Rejected(message)
        } else {
            ApiError::Transport(message)
        }
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait]
impl SlotApi for RestSlotApi {
    async fn fetch_slots(
        &self,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<AvailabilitySlot>, ApiError> {
        let response = self
            .http
            .get(self.endpoint(SLOTS_PATH)?)
            .bearer_auth(&self.token)
            .query(&[("startDate", iso(range_start)), ("endDate", iso(range_end))])
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let envelope: Envelope<Vec<AvailabilitySlot>> =
            response.json().await.map_err(transport)?;
        Ok(envelope.data)
    }

    async fn create_slots_batch(&self, requests: &[SlotRequest]) -> Result<BatchOutcome, ApiError> {
        let response = self
            .http
            .post(self.endpoint(SLOTS_PATH)?)
            .bearer_auth(&self.token)
            .json(&CreateBody { requests })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        response.json().await.map_err(transport)
    }

    async fn delete_slots(&self, slot_ids: &[String]) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.endpoint(BATCH_DELETE_PATH)?)
            .bearer_auth(&self.token)
            .json(&DeleteBody { slot_ids })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Ok(())
    }
}
