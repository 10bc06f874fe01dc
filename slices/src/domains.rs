//! One slice service per backend domain.
//!
//! Each service wraps a single list endpoint. Params are that endpoint's
//! query struct and the payload is the unwrapped envelope `data`.

use futures::FutureExt;
use futures::future::BoxFuture;
use marketdesk_client::services::{
    badges::{self, BadgeQuery},
    bookings::{self, BookingQuery},
    events::{self, EventQuery},
    orders::{self, OrderQuery, RefundQuery},
    reports::{self, DateRange, SalesReportQuery},
};
use marketdesk_client::{ApiClient, ApiError};
use marketdesk_core::slice::SliceService;
use serde_json::Value;

macro_rules! api_slice {
    ($(#[$meta:meta])* $name:ident, $slice:literal, $params:ty, $call:path) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            client: ApiClient,
        }

        impl $name {
            /// Slice backed by `client`
            #[must_use]
            pub const fn new(client: ApiClient) -> Self {
                Self { client }
            }
        }

        impl SliceService for $name {
            const NAME: &'static str = $slice;
            type Params = $params;
            type Payload = Value;
            type Error = ApiError;

            fn fetch(&self, params: $params) -> BoxFuture<'static, Result<Value, ApiError>> {
                let client = self.client.clone();
                async move { $call(&client, &params).await }.boxed()
            }
        }
    };
}

api_slice!(
    /// Admin order list
    OrdersSlice,
    "orders",
    OrderQuery,
    orders::list_orders
);

api_slice!(
    /// Refund requests awaiting or past review
    RefundsSlice,
    "refunds",
    RefundQuery,
    orders::list_refund_requests
);

api_slice!(
    /// Public event catalogue
    EventsSlice,
    "events",
    EventQuery,
    events::list_public_events
);

api_slice!(
    /// Bookings of the current user or venue
    BookingsSlice,
    "bookings",
    BookingQuery,
    bookings::list_bookings
);

api_slice!(
    /// Sales report
    SalesReportSlice,
    "sales_report",
    SalesReportQuery,
    reports::sales_report
);

api_slice!(
    /// Dashboard summary figures
    SummarySlice,
    "summary",
    DateRange,
    reports::summary
);

api_slice!(
    /// Badge catalogue
    BadgesSlice,
    "badges",
    BadgeQuery,
    badges::list_badges
);
