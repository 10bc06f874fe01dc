//! HTTP-level tests for the client and service functions against a mock backend

#![allow(clippy::unwrap_used)]

use marketdesk_client::services::{
    badges::{self, BadgeAssignment, BadgeQuery},
    bookings::{self, BookingQuery},
    events::{self, EventQuery},
    orders::{self, OrderQuery, RefundQuery},
    reports::{self, DateRange, SalesReportQuery},
};
use marketdesk_client::{ApiClient, ApiError, ClientConfig, SharedToken};
use serde_json::json;
use std::{sync::Arc, time::Duration};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&ClientConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn test_list_orders_sends_only_set_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("page", "2"))
        .and(query_param("status", "PENDING"))
        .and(query_param("startDate", "2025-01-01"))
        .and(query_param_is_missing("search"))
        .and(query_param_is_missing("endDate"))
        .respond_with(envelope(json!([{ "id": 7 }])))
        .expect(1)
        .mount(&server)
        .await;

    let query = OrderQuery {
        page: Some(2),
        status: Some("PENDING".to_string()),
        start_date: Some("2025-01-01".to_string()),
        ..OrderQuery::default()
    };
    let orders = orders::list_orders(&client_for(&server), &query).await.unwrap();

    assert_eq!(orders, json!([{ "id": 7 }]));
}

#[tokio::test]
async fn test_every_request_carries_default_headers_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/42"))
        .and(header("accept", "application/json"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(envelope(json!({ "id": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&ClientConfig::new(server.uri()).with_token("s3cret")).unwrap();
    let order = orders::get_order(&client, 42).await.unwrap();

    assert_eq!(order["id"], 42);
}

#[tokio::test]
async fn test_shared_token_is_read_per_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/3"))
        .and(header("authorization", "Bearer after-login"))
        .respond_with(envelope(json!({ "id": 3 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events/3"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthenticated." })))
        .mount(&server)
        .await;

    let token = SharedToken::new();
    let client =
        ApiClient::with_token_provider(&ClientConfig::new(server.uri()), Arc::new(token.clone()))
            .unwrap();

    let anonymous = events::get_event(&client, 3).await;
    assert_eq!(anonymous, Err(ApiError::Unauthorized));

    token.set("after-login");
    assert_eq!(events::get_event(&client, 3).await.unwrap()["id"], 3);
}

#[tokio::test]
async fn test_public_events_rename_type_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/public"))
        .and(query_param("type", "concert"))
        .and(query_param("category", "music"))
        .and(query_param("per_page", "12"))
        .respond_with(envelope(json!({ "data": [], "total": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let query = EventQuery {
        per_page: Some(12),
        event_type: Some("concert".to_string()),
        category: Some("music".to_string()),
        ..EventQuery::default()
    };
    let page = events::list_public_events(&client_for(&server), &query)
        .await
        .unwrap();

    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_refunds_and_bookings_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/refunds"))
        .and(query_param("status", "APPROVED"))
        .respond_with(envelope(json!(["r1"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(query_param("endDate", "2025-02-01"))
        .respond_with(envelope(json!(["b1"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let refunds = orders::list_refund_requests(
        &client,
        &RefundQuery {
            status: Some("APPROVED".to_string()),
            ..RefundQuery::default()
        },
    )
    .await
    .unwrap();
    let bookings = bookings::list_bookings(
        &client,
        &BookingQuery {
            end_date: Some("2025-02-01".to_string()),
            ..BookingQuery::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(refunds, json!(["r1"]));
    assert_eq!(bookings, json!(["b1"]));
}

#[tokio::test]
async fn test_posts_send_json_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .and(body_json(json!({ "event_id": 9, "quantity": 2 })))
        .respond_with(envelope(json!({ "id": 100, "status": "PENDING" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/badges/assign"))
        .and(body_json(json!({ "badge_id": 1, "user_id": 5 })))
        .respond_with(envelope(json!({ "assigned": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let booking = bookings::create_booking(&client, &json!({ "event_id": 9, "quantity": 2 }))
        .await
        .unwrap();
    let assigned = badges::assign_badge(
        &client,
        &BadgeAssignment {
            badge_id: 1,
            user_id: 5,
        },
    )
    .await
    .unwrap();

    assert_eq!(booking["status"], "PENDING");
    assert_eq!(assigned["assigned"], true);
}

#[tokio::test]
async fn test_reports_and_badges_queries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/sales"))
        .and(query_param("type", "monthly"))
        .respond_with(envelope(json!({ "total": 1200 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports/summary"))
        .and(query_param("startDate", "2025-01-01"))
        .and(query_param("endDate", "2025-01-31"))
        .respond_with(envelope(json!({ "orders": 30 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/badges"))
        .and(query_param("type", "seller"))
        .respond_with(envelope(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let sales = reports::sales_report(
        &client,
        &SalesReportQuery {
            report_type: Some("monthly".to_string()),
            ..SalesReportQuery::default()
        },
    )
    .await
    .unwrap();
    let summary = reports::summary(
        &client,
        &DateRange {
            start_date: Some("2025-01-01".to_string()),
            end_date: Some("2025-01-31".to_string()),
        },
    )
    .await
    .unwrap();
    let badges = badges::list_badges(
        &client,
        &BadgeQuery {
            badge_type: Some("seller".to_string()),
            ..BadgeQuery::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(sales["total"], 1200);
    assert_eq!(summary["orders"], 30);
    assert_eq!(badges, json!([]));
}

#[tokio::test]
async fn test_error_status_uses_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/summary"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "The start date is invalid." })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports/sales"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let validation = reports::summary(&client, &DateRange::default())
        .await
        .unwrap_err();
    let outage = reports::sales_report(&client, &SalesReportQuery::default())
        .await
        .unwrap_err();

    assert_eq!(validation.to_string(), "The start date is invalid.");
    assert_eq!(validation.status(), Some(422));
    assert_eq!(outage.to_string(), "Request failed with status code 503");
}

#[tokio::test]
async fn test_unsuccessful_envelope_and_garbage_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "Event not published" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let unsuccessful = events::get_event(&client, 1).await.unwrap_err();
    let garbage = events::get_event(&client, 2).await.unwrap_err();

    assert_eq!(unsuccessful.to_string(), "Event not published");
    assert!(matches!(garbage, ApiError::Decode { .. }));
    assert_eq!(garbage.to_string(), "Unexpected response from server");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let client = ApiClient::new(&ClientConfig::new("http://127.0.0.1:1")).unwrap();

    let error = orders::get_order(&client, 1).await.unwrap_err();

    assert!(matches!(error, ApiError::Network { .. }));
    assert_eq!(error.to_string(), "Network Error");
}

#[tokio::test]
async fn test_configured_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/badges"))
        .respond_with(envelope(json!([])).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri()).with_timeout(Duration::from_millis(50));
    let client = ApiClient::new(&config).unwrap();

    let error = badges::list_badges(&client, &BadgeQuery::default())
        .await
        .unwrap_err();

    assert_eq!(error, ApiError::Timeout);
}
