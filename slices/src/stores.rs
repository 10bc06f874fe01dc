//! Store wiring for every domain slice.

use crate::config::StoreSettings;
use crate::domains::{
    BadgesSlice, BookingsSlice, EventsSlice, OrdersSlice, RefundsSlice, SalesReportSlice,
    SummarySlice,
};
use marketdesk_client::ApiClient;
use marketdesk_core::environment::Clock;
use marketdesk_core::request::AsyncState;
use marketdesk_core::slice::{SliceAction, SliceEnvironment, SliceReducer, SliceService};
use marketdesk_runtime::{StoreError, store::Store};
use std::sync::Arc;
use std::time::Duration;

/// Store running the generic slice reducer for service `S`
pub type SliceStore<S> = Store<
    AsyncState<<S as SliceService>::Payload>,
    SliceAction<<S as SliceService>::Params, <S as SliceService>::Payload>,
    SliceEnvironment<S>,
    SliceReducer<S>,
>;

/// Build an idle store for `service`
#[must_use]
pub fn slice_store<S>(service: S, clock: Arc<dyn Clock>, settings: StoreSettings) -> SliceStore<S>
where
    S: SliceService + Clone,
    S::Payload: Sync,
{
    Store::with_config(
        AsyncState::new(),
        SliceReducer::new(),
        SliceEnvironment::new(service, clock),
        settings.store_config(),
    )
}

/// Every domain slice, each in its own store and initially idle.
#[derive(Clone)]
pub struct Slices {
    /// Admin order list
    pub orders: SliceStore<OrdersSlice>,
    /// Refund requests
    pub refunds: SliceStore<RefundsSlice>,
    /// Public events
    pub events: SliceStore<EventsSlice>,
    /// Bookings
    pub bookings: SliceStore<BookingsSlice>,
    /// Sales report
    pub sales_report: SliceStore<SalesReportSlice>,
    /// Dashboard summary
    pub summary: SliceStore<SummarySlice>,
    /// Badge catalogue
    pub badges: SliceStore<BadgesSlice>,
}

impl Slices {
    /// Wire every slice to `client`
    #[must_use]
    pub fn new(client: &ApiClient, clock: &Arc<dyn Clock>, settings: StoreSettings) -> Self {
        Self {
            orders: slice_store(OrdersSlice::new(client.clone()), Arc::clone(clock), settings),
            refunds: slice_store(RefundsSlice::new(client.clone()), Arc::clone(clock), settings),
            events: slice_store(EventsSlice::new(client.clone()), Arc::clone(clock), settings),
            bookings: slice_store(BookingsSlice::new(client.clone()), Arc::clone(clock), settings),
            sales_report: slice_store(
                SalesReportSlice::new(client.clone()),
                Arc::clone(clock),
                settings,
            ),
            summary: slice_store(SummarySlice::new(client.clone()), Arc::clone(clock), settings),
            badges: slice_store(BadgesSlice::new(client.clone()), Arc::clone(clock), settings),
        }
    }

    /// Return every slice to idle. Outstanding requests become stale.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if a store is shutting down.
    pub async fn reset_all(&self) -> Result<(), StoreError> {
        self.orders.send(SliceAction::Reset).await?;
        self.refunds.send(SliceAction::Reset).await?;
        self.events.send(SliceAction::Reset).await?;
        self.bookings.send(SliceAction::Reset).await?;
        self.sales_report.send(SliceAction::Reset).await?;
        self.summary.send(SliceAction::Reset).await?;
        self.badges.send(SliceAction::Reset).await?;
        Ok(())
    }

    /// Shut every store down, waiting up to `timeout` for each one's
    /// in-flight requests.
    ///
    /// All stores are asked to stop even if an earlier one times out; the
    /// first error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if requests were still running.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        let results = [
            self.orders.shutdown(timeout).await,
            self.refunds.shutdown(timeout).await,
            self.events.shutdown(timeout).await,
            self.bookings.shutdown(timeout).await,
            self.sales_report.shutdown(timeout).await,
            self.summary.shutdown(timeout).await,
            self.badges.shutdown(timeout).await,
        ];
        results.into_iter().collect()
    }
}
