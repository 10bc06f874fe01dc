//! Seller and listing badges

use crate::{client::ApiClient, error::ApiError};
use serde::Serialize;
use serde_json::Value;

/// Filters for [`list_badges`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BadgeQuery {
    /// 1-based page number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Badge type, sent as `type`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub badge_type: Option<String>,
}

/// Badge grant for [`assign_badge`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BadgeAssignment {
    /// Badge to grant
    pub badge_id: u64,
    /// Receiving user
    pub user_id: u64,
}

/// `GET /badges`
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn list_badges(client: &ApiClient, query: &BadgeQuery) -> Result<Value, ApiError> {
    client.get_with("/badges", query).await
}

/// `POST /badges/assign`
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn assign_badge(
    client: &ApiClient,
    assignment: &BadgeAssignment,
) -> Result<Value, ApiError> {
    client.post("/badges/assign", assignment).await
}
