//! Marketdesk smoke run
//!
//! Loads configuration, fetches every slice once against the configured
//! backend, and logs what each slice ends up holding.
//!
//! ```bash
//! MARKETDESK_API_URL=https://shop.example/api RUST_LOG=debug cargo run --bin marketdesk-smoke
//! ```

use marketdesk_client::ApiClient;
use marketdesk_core::environment::{Clock, SystemClock};
use marketdesk_core::request::AsyncState;
use marketdesk_core::slice::{SliceAction, SliceService};
use marketdesk_runtime::EffectHandle;
use marketdesk_slices::{Config, SliceStore, Slices};
use serde_json::Value;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,marketdesk_client=debug,marketdesk_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(base_url = %config.client.base_url, "Starting smoke run");

    let client = ApiClient::new(&config.client)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slices = Slices::new(&client, &clock, config.store);

    let mut handles = vec![
        trigger(&slices.orders).await?,
        trigger(&slices.refunds).await?,
        trigger(&slices.events).await?,
        trigger(&slices.bookings).await?,
        trigger(&slices.sales_report).await?,
        trigger(&slices.summary).await?,
        trigger(&slices.badges).await?,
    ];
    for handle in &mut handles {
        if let Err(error) = handle.wait_with_timeout(config.store.shutdown_timeout).await {
            tracing::warn!(%error, "Slice still loading");
        }
    }

    report(&slices.orders).await;
    report(&slices.refunds).await;
    report(&slices.events).await;
    report(&slices.bookings).await;
    report(&slices.sales_report).await;
    report(&slices.summary).await;
    report(&slices.badges).await;

    slices.shutdown(config.store.shutdown_timeout).await?;
    tracing::info!("Smoke run finished");
    Ok(())
}

async fn trigger<S>(store: &SliceStore<S>) -> anyhow::Result<EffectHandle>
where
    S: SliceService<Payload = Value> + Clone,
    S::Params: Default,
{
    Ok(store.send(SliceAction::Trigger(S::Params::default())).await?)
}

async fn report<S>(store: &SliceStore<S>)
where
    S: SliceService<Payload = Value> + Clone,
{
    let state: AsyncState<Value> = store.state(Clone::clone).await;
    let status = state.status();
    match (state.error(), state.data()) {
        (Some(error), _) => tracing::warn!(slice = S::NAME, %status, %error, "Slice failed"),
        (None, Some(data)) => {
            tracing::info!(slice = S::NAME, %status, bytes = data.to_string().len(), "Slice loaded");
        },
        (None, None) => tracing::info!(slice = S::NAME, %status, "Slice empty"),
    }
}
