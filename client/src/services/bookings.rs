//! Ticket and seat bookings

use crate::{client::ApiClient, error::ApiError};
use serde::Serialize;
use serde_json::Value;

/// Filters for [`list_bookings`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BookingQuery {
    /// 1-based page number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Booking status, e.g. `CONFIRMED`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// `GET /bookings`
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn list_bookings(client: &ApiClient, query: &BookingQuery) -> Result<Value, ApiError> {
    client.get_with("/bookings", query).await
}

/// `POST /bookings` with `booking` as the JSON body
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn create_booking<B>(client: &ApiClient, booking: &B) -> Result<Value, ApiError>
where
    B: Serialize + ?Sized,
{
    client.post("/bookings", booking).await
}
