//! Sales reporting

use crate::{client::ApiClient, error::ApiError};
use serde::Serialize;
use serde_json::Value;

/// Filters for [`sales_report`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SalesReportQuery {
    /// `YYYY-MM-DD`
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Report grouping, sent as `type` (e.g. `daily`, `monthly`)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
}

/// Date bounds for [`summary`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// `YYYY-MM-DD`
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// `GET /reports/sales`
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn sales_report(client: &ApiClient, query: &SalesReportQuery) -> Result<Value, ApiError> {
    client.get_with("/reports/sales", query).await
}

/// `GET /reports/summary`
///
/// # Errors
///
/// Propagates any [`ApiError`] from the client.
pub async fn summary(client: &ApiClient, range: &DateRange) -> Result<Value, ApiError> {
    client.get_with("/reports/summary", range).await
}
