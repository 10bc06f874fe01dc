//! Public event listings

use crate::{client::ApiClient, error::ApiError};
use serde::Serialize;
use serde_json::Value;

/// Filters for [`list_public_events`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EventQuery {
    /// 1-based page number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Event type, sent as `type`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Category slug
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Events starting on or after, `YYYY-MM-DD`
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Events starting on or before, `YYYY-MM-DD`
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// `GET /events/public`
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn list_public_events(client: &ApiClient, query: &EventQuery) -> Result<Value, ApiError> {
    client.get_with("/events/public", query).await
}

/// `GET /events/{id}`
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn get_event(client: &ApiClient, id: u64) -> Result<Value, ApiError> {
    client.get(&format!("/events/{id}")).await
}
