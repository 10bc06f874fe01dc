//! # Marketdesk Slices
//!
//! One async state slice per backend domain, plus the lookups the view layer
//! uses to render statuses and ratings.
//!
//! A slice is a [`Store`](marketdesk_runtime::Store) running the generic
//! [`SliceReducer`](marketdesk_core::slice::SliceReducer) over an
//! [`AsyncState`](marketdesk_core::request::AsyncState). Triggering a slice
//! issues one backend request; only the most recently triggered request can
//! change what the slice shows.
//!
//! ## Example
//!
//! ```no_run
//! use marketdesk_client::ApiClient;
//! use marketdesk_client::services::orders::OrderQuery;
//! use marketdesk_core::environment::{Clock, SystemClock};
//! use marketdesk_core::slice::SliceAction;
//! use marketdesk_slices::{Config, Slices};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let client = ApiClient::new(&config.client)?;
//!     let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//!     let slices = Slices::new(&client, &clock, config.store);
//!
//!     let mut handle = slices.orders.send(SliceAction::Trigger(OrderQuery::default())).await?;
//!     handle.wait().await;
//!
//!     let failed = slices.orders.state(|s| s.is_failed()).await;
//!     println!("orders failed: {failed}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod domains;
pub mod labels;
pub mod stores;

pub use config::{Config, StoreSettings};
pub use domains::{
    BadgesSlice, BookingsSlice, EventsSlice, OrdersSlice, RefundsSlice, SalesReportSlice,
    SummarySlice,
};
pub use labels::{Badge, BadgeVariant, Star, star_rating};
pub use stores::{SliceStore, Slices, slice_store};
