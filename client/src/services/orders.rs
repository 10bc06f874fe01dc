//! Orders and refund requests

use crate::{client::ApiClient, error::ApiError};
use serde::Serialize;
use serde_json::Value;

/// Filters for [`list_orders`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OrderQuery {
    /// 1-based page number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Order status, e.g. `PENDING`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Free-text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Filters for [`list_refund_requests`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RefundQuery {
    /// 1-based page number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Refund status, e.g. `APPROVED`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// `GET /orders`
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn list_orders(client: &ApiClient, query: &OrderQuery) -> Result<Value, ApiError> {
    client.get_with("/orders", query).await
}

/// `GET /orders/{id}`
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn get_order(client: &ApiClient, id: u64) -> Result<Value, ApiError> {
    client.get(&format!("/orders/{id}")).await
}

/// `GET /orders/refunds`
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn list_refund_requests(
    client: &ApiClient,
    query: &RefundQuery,
) -> Result<Value, ApiError> {
    client.get_with("/orders/refunds", query).await
}
